//! Parser for the XML spreadsheet format

use super::{SavedCell, SavedSheet, xml_error};
use crate::error::{Result, SheetError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;

const MAX_SHEET_FILE_BYTES: u64 = 64 * 1_048_576; // 64 MiB

/// Parse a spreadsheet file
pub fn parse_sheet(path: &Path) -> Result<SavedSheet> {
    let meta =
        fs::metadata(path).map_err(|e| SheetError::ReadWrite(format!("{}: {}", path.display(), e)))?;
    if meta.len() > MAX_SHEET_FILE_BYTES {
        return Err(SheetError::ReadWrite(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_SHEET_FILE_BYTES
        )));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| SheetError::ReadWrite(format!("{}: {}", path.display(), e)))?;
    parse_sheet_content(&content)
}

#[derive(Clone, Copy)]
enum Field {
    Name,
    Contents,
}

#[derive(Default)]
struct PendingCell {
    name: Option<String>,
    contents: Option<String>,
}

impl PendingCell {
    fn set(&mut self, field: Field, value: String) -> Result<()> {
        let (slot, tag) = match field {
            Field::Name => (&mut self.name, "name"),
            Field::Contents => (&mut self.contents, "contents"),
        };
        if slot.is_some() {
            return Err(malformed(format!("duplicate <{}> in <cell>", tag)));
        }
        *slot = Some(value);
        Ok(())
    }

    fn finish(self) -> Result<SavedCell> {
        match (self.name, self.contents) {
            (Some(name), Some(contents)) => Ok(SavedCell { name, contents }),
            (None, _) => Err(malformed("<cell> without <name>")),
            (Some(name), None) => Err(malformed(format!("cell {} without <contents>", name))),
        }
    }
}

/// Parse spreadsheet XML from a string.
///
/// Whitespace between elements is ignored; text inside `name` and
/// `contents` is kept exactly.
pub fn parse_sheet_content(content: &str) -> Result<SavedSheet> {
    let mut reader = Reader::from_str(content);

    let mut version: Option<String> = None;
    let mut in_root = false;
    let mut cells = Vec::new();
    let mut cell: Option<PendingCell> = None;
    let mut field: Option<(Field, String)> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Start(e) => match e.name().as_ref() {
                b"spreadsheet" => {
                    if in_root || version.is_some() {
                        return Err(malformed("more than one <spreadsheet> element"));
                    }
                    version = Some(version_attribute(&e)?);
                    in_root = true;
                }
                b"cell" => {
                    if !in_root || cell.is_some() {
                        return Err(malformed("<cell> outside <spreadsheet>"));
                    }
                    cell = Some(PendingCell::default());
                }
                b"name" | b"contents" => {
                    if cell.is_none() || field.is_some() {
                        return Err(malformed("field outside <cell>"));
                    }
                    field = Some((field_kind(e.name().as_ref()), String::new()));
                }
                other => return Err(unknown_element(other)),
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"spreadsheet" => {
                    if in_root || version.is_some() {
                        return Err(malformed("more than one <spreadsheet> element"));
                    }
                    version = Some(version_attribute(&e)?);
                }
                b"name" | b"contents" => {
                    let Some(pending) = cell.as_mut() else {
                        return Err(malformed("field outside <cell>"));
                    };
                    if field.is_some() {
                        return Err(malformed("nested field"));
                    }
                    pending.set(field_kind(e.name().as_ref()), String::new())?;
                }
                b"cell" => return Err(malformed("<cell> without <name>")),
                other => return Err(unknown_element(other)),
            },
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_error)?;
                if let Some((_, value)) = field.as_mut() {
                    value.push_str(&text);
                } else if !text.trim().is_empty() {
                    return Err(malformed(format!("unexpected text {:?}", text.trim())));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"name" | b"contents" => {
                    if let (Some((kind, value)), Some(pending)) = (field.take(), cell.as_mut()) {
                        pending.set(kind, value)?;
                    }
                }
                b"cell" => {
                    if let Some(pending) = cell.take() {
                        cells.push(pending.finish()?);
                    }
                }
                b"spreadsheet" => in_root = false,
                other => return Err(unknown_element(other)),
            },
            Event::Eof => break,
            _ => return Err(malformed("unsupported XML content")),
        }
    }

    let Some(version) = version else {
        return Err(malformed("missing <spreadsheet> element"));
    };
    if in_root {
        return Err(malformed("unclosed <spreadsheet> element"));
    }

    Ok(SavedSheet { version, cells })
}

fn version_attribute(e: &BytesStart<'_>) -> Result<String> {
    let attr = e
        .try_get_attribute("version")
        .map_err(xml_error)?
        .ok_or_else(|| malformed("<spreadsheet> without a version attribute"))?;
    Ok(attr.unescape_value().map_err(xml_error)?.into_owned())
}

fn field_kind(tag: &[u8]) -> Field {
    if tag == b"name" {
        Field::Name
    } else {
        Field::Contents
    }
}

fn unknown_element(tag: &[u8]) -> SheetError {
    malformed(format!("unknown element <{}>", String::from_utf8_lossy(tag)))
}

fn malformed(message: impl Into<String>) -> SheetError {
    SheetError::ReadWrite(format!("Malformed spreadsheet file: {}", message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::write_sheet_content;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<spreadsheet version="ps6">
  <cell>
    <name>A1</name>
    <contents>5</contents>
  </cell>
  <cell>
    <contents>=A1*2</contents>
    <name>B1</name>
  </cell>
</spreadsheet>
"#;

    #[test]
    fn test_parse_sample() {
        let sheet = parse_sheet_content(SAMPLE).unwrap();
        assert_eq!(sheet.version, "ps6");
        assert_eq!(
            sheet.cells,
            vec![
                SavedCell {
                    name: "A1".to_string(),
                    contents: "5".to_string()
                },
                SavedCell {
                    name: "B1".to_string(),
                    contents: "=A1*2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_keeps_field_whitespace_and_entities() {
        let xml = r#"<spreadsheet version="v"><cell><name>A1</name><contents>  a &amp; &lt;b&gt; </contents></cell></spreadsheet>"#;
        let sheet = parse_sheet_content(xml).unwrap();
        assert_eq!(sheet.cells[0].contents, "  a & <b> ");
    }

    #[test]
    fn test_parse_empty_fields() {
        let xml = r#"<spreadsheet version=""><cell><name>A1</name><contents/></cell><cell><name>A2</name><contents></contents></cell></spreadsheet>"#;
        let sheet = parse_sheet_content(xml).unwrap();
        assert_eq!(sheet.version, "");
        assert_eq!(sheet.cells[0].contents, "");
        assert_eq!(sheet.cells[1].contents, "");
    }

    #[test]
    fn test_parse_empty_root() {
        let sheet = parse_sheet_content(r#"<spreadsheet version="x"/>"#).unwrap();
        assert_eq!(sheet.version, "x");
        assert!(sheet.cells.is_empty());
    }

    #[test]
    fn test_written_document_parses_back() {
        let original = SavedSheet {
            version: "1.0 \"beta\"".to_string(),
            cells: vec![
                SavedCell {
                    name: "A1".to_string(),
                    contents: " spaced <text> ".to_string(),
                },
                SavedCell {
                    name: "B1".to_string(),
                    contents: String::new(),
                },
            ],
        };
        let xml = write_sheet_content(&original).unwrap();
        assert_eq!(parse_sheet_content(&xml).unwrap(), original);
    }

    #[test]
    fn test_rejects_malformed_documents() {
        let cases = [
            "",
            "not xml at all",
            r#"<spreadsheet><cell><name>A1</name><contents>1</contents></cell></spreadsheet>"#,
            r#"<spreadsheet version="v"><cell><name>A1</name></cell></spreadsheet>"#,
            r#"<spreadsheet version="v"><cell><contents>1</contents></cell></spreadsheet>"#,
            r#"<spreadsheet version="v"><cell><name>A1</name><name>A2</name><contents>1</contents></cell></spreadsheet>"#,
            r#"<spreadsheet version="v"><row/></spreadsheet>"#,
            r#"<spreadsheet version="v">stray</spreadsheet>"#,
            r#"<spreadsheet version="v"><name>A1</name></spreadsheet>"#,
            r#"<spreadsheet version="v"><cell><name>A1</name><contents>1</contents>"#,
            r#"<spreadsheet version="v"></spreadsheet><spreadsheet version="v"></spreadsheet>"#,
        ];
        for xml in cases {
            assert!(
                matches!(parse_sheet_content(xml), Err(SheetError::ReadWrite(_))),
                "expected failure for {:?}",
                xml
            );
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_sheet(Path::new("/nonexistent/sheet.xml")).unwrap_err();
        assert!(matches!(err, SheetError::ReadWrite(_)));
    }
}
