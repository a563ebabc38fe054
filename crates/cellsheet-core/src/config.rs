//! Sheet configuration.
//!
//! A small TOML file describing how a host wants cell names handled:
//!
//! ```toml
//! version = "ps6"
//! name_case = "upper"            # preserve | upper | lower
//! name_pattern = "^[A-Z][0-9]{1,2}$"
//! ```
//!
//! `name_case` becomes the store's normalize function and `name_pattern`
//! its extra validity predicate.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, SheetError};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// How cell names and formula variables are normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    #[default]
    Preserve,
    Upper,
    Lower,
}

impl NameCase {
    pub fn apply(self, name: &str) -> String {
        match self {
            NameCase::Preserve => name.to_string(),
            NameCase::Upper => name.to_ascii_uppercase(),
            NameCase::Lower => name.to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SheetConfig {
    /// Version label written to and required from saved files.
    pub version: String,
    pub name_case: NameCase,
    /// Extra regex every normalized cell name must match.
    pub name_pattern: Option<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            version: "default".to_string(),
            name_case: NameCase::Preserve,
            name_pattern: None,
        }
    }
}

impl SheetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SheetError::Config(e.to_string()))
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .map_err(|e| SheetError::Config(format!("{}: {}", path.display(), e)))?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(SheetError::Config(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            )));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| SheetError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub(crate) fn normalizer(&self) -> Box<dyn Fn(&str) -> String> {
        let case = self.name_case;
        Box::new(move |name: &str| case.apply(name))
    }

    pub(crate) fn validator(&self) -> Result<Box<dyn Fn(&str) -> bool>> {
        match &self.name_pattern {
            None => Ok(Box::new(|_: &str| true)),
            Some(pattern) => {
                let re = Regex::new(pattern).map_err(|e| {
                    SheetError::Config(format!("Invalid name_pattern {:?}: {}", pattern, e))
                })?;
                Ok(Box::new(move |name: &str| re.is_match(name)))
            }
        }
    }
}
