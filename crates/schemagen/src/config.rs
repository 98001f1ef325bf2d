//! Generator configuration.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::diagnostic::CodegenError;

/// Configuration for the schema generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Directory the generated tree is written to.
    pub out_dir: PathBuf,

    /// Directory (relative to `out_dir`) holding one declaration file per schema module.
    pub module_dir: PathBuf,

    /// Location of the reflection runtime, relative to `out_dir`.
    pub runtime_path: PathBuf,

    /// Package providing the temporal wrapper types (`Duration`, `LocalDate`, ...).
    pub client_module: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("dbschema/edgeql-js"),
            module_dir: PathBuf::from("modules"),
            runtime_path: PathBuf::from("../reflection"),
            client_module: "edgedb".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a configuration from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::io(path, e.to_string()))?;

        serde_json::from_str(&content)
            .map_err(|e| CodegenError::io(path, format!("Failed to parse config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemagen.json");
        std::fs::write(&path, r#"{ "outDir": "generated", "clientModule": "gel" }"#).unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("generated"));
        assert_eq!(config.client_module, "gel");
        assert_eq!(config.module_dir, PathBuf::from("modules"));
        assert_eq!(config.runtime_path, PathBuf::from("../reflection"));
    }

    #[test]
    fn load_reports_parse_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemagen.json");
        std::fs::write(&path, "not json").unwrap();

        let err = GeneratorConfig::load(&path).unwrap_err();
        assert!(matches!(err, CodegenError::IoError { .. }));
    }
}
