//! Generator configuration file (JSON).
//!
//! Every field is optional; the CLI fills gaps with its own flags and then
//! with the defaults below. Errors carry the JSON path of the offending field.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{GenError, Result};
use crate::generate::{DEFAULT_INDEX_FILE, DEFAULT_RUNTIME_PATH, Family};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory artifacts are written to.
    pub out_dir: Option<PathBuf>,
    /// Container short ids; empty or missing means all.
    #[serde(default)]
    pub containers: Vec<String>,
    /// Families; empty or missing means all.
    #[serde(default)]
    pub families: Vec<Family>,
    /// Path prefix for runtime items in generated code.
    pub runtime_path: Option<String>,
    /// Name of the include index.
    pub index_file: Option<String>,
    /// Skip the include index entirely.
    #[serde(default)]
    pub no_index: bool,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| GenError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        from_str_with_path(&src)
    }

    pub fn families(&self) -> Vec<Family> {
        if self.families.is_empty() { Family::ALL.to_vec() } else { self.families.clone() }
    }

    pub fn runtime_path(&self) -> &str {
        self.runtime_path.as_deref().unwrap_or(DEFAULT_RUNTIME_PATH)
    }

    pub fn index_file(&self) -> &str {
        self.index_file.as_deref().unwrap_or(DEFAULT_INDEX_FILE)
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(GenError::Config { path, message: err.into_inner().to_string() })
        }
    }
}
