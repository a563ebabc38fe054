//! Writer for the XML spreadsheet format

use super::{SavedCell, SavedSheet, xml_error};
use crate::error::{Result, SheetError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Write a sheet to a file
pub fn write_sheet(path: &Path, sheet: &SavedSheet) -> Result<()> {
    let content = write_sheet_content(sheet)?;
    fs::write(path, content)
        .map_err(|e| SheetError::ReadWrite(format!("{}: {}", path.display(), e)))
}

/// Write a sheet to an XML string
pub fn write_sheet_content(sheet: &SavedSheet) -> Result<String> {
    let bytes = build_document(sheet).map_err(xml_error)?;
    String::from_utf8(bytes).map_err(xml_error)
}

fn build_document(sheet: &SavedSheet) -> std::result::Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_layout(&mut writer, "\n")?;

    let mut root = BytesStart::new("spreadsheet");
    root.push_attribute(("version", sheet.version.as_str()));
    writer.write_event(Event::Start(root))?;

    // Sort cells by name for consistent output
    let mut cells: Vec<&SavedCell> = sheet.cells.iter().collect();
    cells.sort_by(|a, b| a.name.cmp(&b.name));

    for cell in cells {
        write_layout(&mut writer, "\n  ")?;
        writer.write_event(Event::Start(BytesStart::new("cell")))?;
        write_layout(&mut writer, "\n    ")?;
        write_field(&mut writer, "name", &cell.name)?;
        write_layout(&mut writer, "\n    ")?;
        write_field(&mut writer, "contents", &cell.contents)?;
        write_layout(&mut writer, "\n  ")?;
        writer.write_event(Event::End(BytesEnd::new("cell")))?;
    }

    write_layout(&mut writer, "\n")?;
    writer.write_event(Event::End(BytesEnd::new("spreadsheet")))?;
    write_layout(&mut writer, "\n")?;

    Ok(writer.into_inner().into_inner())
}

/// Whitespace between elements. Written by hand so field text is never
/// reindented.
fn write_layout<W: std::io::Write>(
    writer: &mut Writer<W>,
    ws: &str,
) -> std::result::Result<(), quick_xml::Error> {
    writer.write_event(Event::Text(BytesText::new(ws)))?;
    Ok(())
}

fn write_field<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &str,
) -> std::result::Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if !value.is_empty() {
        writer.write_event(Event::Text(BytesText::new(value)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[(&str, &str)]) -> SavedSheet {
        SavedSheet {
            version: "v1".to_string(),
            cells: cells
                .iter()
                .map(|(name, contents)| SavedCell {
                    name: name.to_string(),
                    contents: contents.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_write_empty_sheet() {
        let content = write_sheet_content(&sheet(&[])).unwrap();
        assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(content.contains("<spreadsheet version=\"v1\">"));
        assert!(content.contains("</spreadsheet>"));
        assert!(!content.contains("<cell>"));
    }

    #[test]
    fn test_write_cell() {
        let content = write_sheet_content(&sheet(&[("A1", "=B1+2")])).unwrap();
        assert!(content.contains("<name>A1</name>"));
        assert!(content.contains("<contents>=B1+2</contents>"));
    }

    #[test]
    fn test_write_escapes_text() {
        let content = write_sheet_content(&sheet(&[("A1", "<b> & \"q\"")])).unwrap();
        assert!(content.contains("&lt;b&gt; &amp; "));
        assert!(!content.contains("<b>"));
    }

    #[test]
    fn test_write_sorted_by_name() {
        let content = write_sheet_content(&sheet(&[("B2", "2"), ("A1", "1")])).unwrap();
        let a1 = content.find("<name>A1</name>").unwrap();
        let b2 = content.find("<name>B2</name>").unwrap();
        assert!(a1 < b2);
    }

    #[test]
    fn test_write_to_bad_path() {
        let err = write_sheet(Path::new("/nonexistent/dir/sheet.xml"), &sheet(&[])).unwrap_err();
        assert!(matches!(err, SheetError::ReadWrite(_)));
    }
}
