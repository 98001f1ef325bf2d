//! # schemagen
//!
//! Generates statically-typed TypeScript declarations from an introspected
//! database schema, and renders query expression trees as EdgeQL text.
//!
//! ## Architecture
//!
//! ```text
//! Introspection rows
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Introspect  │  Typed snapshot of the schema
//! │  (Snapshot)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Graph     │  Reference checks, base-first ordering,
//! │ (toposort)   │  cycle detection
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Enums, interfaces, spec table,
//! │  (IR → TS)   │  type handles, index
//! └──────┬───────┘
//!        │
//!        ▼
//!   Output tree ──► files on disk
//!
//! Expression tree ──► query::Expr::to_edgeql ──► EdgeQL text
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemagen::{Generator, GeneratorConfig, Snapshot};
//!
//! let snapshot = Snapshot::load("introspection.json".as_ref())?;
//! let generator = Generator::new(GeneratorConfig::default());
//! let result = generator.run(&snapshot)?;
//! println!("wrote {} files", result.files);
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod graph;
pub mod introspect;
pub mod query;

pub use codegen::GeneratedCode;
pub use config::GeneratorConfig;
pub use diagnostic::CodegenError;
pub use introspect::Snapshot;

use introspect::IntrospectedType;

/// Drives generation for one snapshot and writes the result.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the output tree in memory.
    pub fn generate(&self, snapshot: &Snapshot) -> Result<GeneratedCode, CodegenError> {
        codegen::generate(snapshot, &self.config)
    }

    /// Generates and then writes the output tree.
    ///
    /// Files are only written once generation has fully succeeded.
    pub fn run(&self, snapshot: &Snapshot) -> Result<GenerateResult, CodegenError> {
        let generated = self.generate(snapshot)?;
        self.write_output(&generated)?;

        let mut result = GenerateResult {
            files: generated.files.len(),
            modules: generated
                .files
                .keys()
                .filter(|path| path.as_str() != codegen::SPEC_FILE && path.as_str() != codegen::INDEX_FILE)
                .count(),
            object_types: 0,
            enums: 0,
        };
        for ty in snapshot.types() {
            match ty {
                IntrospectedType::Object(object) if !object.is_compound() => result.object_types += 1,
                IntrospectedType::Scalar(scalar) if scalar.is_enum() => result.enums += 1,
                _ => {}
            }
        }

        tracing::info!(
            files = result.files,
            modules = result.modules,
            out_dir = %self.config.out_dir.display(),
            "generated schema declarations"
        );
        Ok(result)
    }

    /// Writes generated files under the output directory.
    fn write_output(&self, generated: &GeneratedCode) -> Result<(), CodegenError> {
        std::fs::create_dir_all(&self.config.out_dir)
            .map_err(|e| CodegenError::io(&self.config.out_dir, e.to_string()))?;

        for (filename, content) in generated.rendered() {
            let path = self.config.out_dir.join(&filename);
            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CodegenError::io(parent, e.to_string()))?;
            }
            std::fs::write(&path, content).map_err(|e| CodegenError::io(&path, e.to_string()))?;
            tracing::debug!(path = %path.display(), "wrote file");
        }

        Ok(())
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// Number of files written.
    pub files: usize,
    /// Number of per-module declaration files.
    pub modules: usize,
    /// Number of object types given an interface.
    pub object_types: usize,
    /// Number of enum declarations.
    pub enums: usize,
}
