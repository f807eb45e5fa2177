use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ScError, ScResult};

pub const CONFIG_KEYS: &[&str] = &["dataset", "delimiter"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV used when no dataset is given on the command line
    pub dataset: Option<PathBuf>,
    pub delimiter: char,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            delimiter: ',',
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> ScResult<Self> {
        confy::load_path(path).map_err(Into::into)
    }

    pub fn store(&self, path: &Path) -> ScResult<()> {
        confy::store_path(path, self).map_err(Into::into)
    }

    pub fn set(&mut self, key: &str, value: &str) -> ScResult<()> {
        match key.trim().to_lowercase().as_str() {
            "dataset" => {
                let value = value.trim();
                self.dataset = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "delimiter" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii() => self.delimiter = c,
                    _ => {
                        return Err(ScError::Invalid {
                            code: "INVALID_DELIMITER",
                            message: format!("Delimiter must be a single ASCII character, got '{value}'"),
                        });
                    }
                }
            }
            _ => {
                return Err(ScError::NotExists {
                    code: "CONFIG_KEY_NOT_EXISTS",
                    message: format!(
                        "Unknown config key '{key}', expected one of: {}",
                        CONFIG_KEYS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn delimiter_byte(&self) -> ScResult<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .ok_or_else(|| ScError::Invalid {
                code: "INVALID_DELIMITER",
                message: format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ),
            })
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        vec![
            (
                "dataset".to_string(),
                self.dataset
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or("-".to_string()),
            ),
            ("delimiter".to_string(), self.delimiter.to_string()),
        ]
    }
}
