//! In-memory tree of generated files.

use std::collections::BTreeMap;
use indexmap::IndexSet;

/// Header written at the top of every generated file.
pub const BANNER: &str = "// GENERATED by schemagen - DO NOT EDIT\n";

/// Deduplicated import statements in first-registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSet(IndexSet<String>);

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an import statement. Re-adding an existing one is a no-op.
    pub fn add(&mut self, statement: impl Into<String>) {
        self.0.insert(statement.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One generated file: its imports and declaration body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputBuffer {
    pub imports: ImportSet,
    pub body: String,
}

impl OutputBuffer {
    /// Renders the final file text.
    pub fn render(&self) -> String {
        let mut out = String::from(BANNER);
        if !self.imports.is_empty() {
            out.push('\n');
            for import in self.imports.iter() {
                out.push_str(import);
                out.push('\n');
            }
        }
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str(&self.body);
        }
        out
    }
}

/// Generated files keyed by path relative to the output directory.
#[derive(Debug, Default)]
pub struct GeneratedCode {
    pub files: BTreeMap<String, OutputBuffer>,
}

impl GeneratedCode {
    /// Rendered `(path, content)` pairs in path order.
    pub fn rendered(&self) -> Vec<(String, String)> {
        self.files
            .iter()
            .map(|(path, buffer)| (path.clone(), buffer.render()))
            .collect()
    }

    pub fn get(&self, path: &str) -> Option<&OutputBuffer> {
        self.files.get(path)
    }
}
