//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while generating code or serializing expressions.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CodegenError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(schemagen::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Schema Errors
    // =========================================================================
    #[error("Type '{referrer}' references unknown type id '{id}'")]
    #[diagnostic(
        code(schemagen::schema::unresolved_reference),
        help("The introspection snapshot is inconsistent. Re-run introspection against the database.")
    )]
    UnresolvedReference {
        referrer: String,
        id: String,
    },

    #[error("Type id '{id}' appears more than once in the snapshot")]
    #[diagnostic(code(schemagen::schema::duplicate_type_id))]
    DuplicateTypeId {
        id: String,
    },

    #[error("Type name '{name}' has no module qualifier")]
    #[diagnostic(
        code(schemagen::schema::malformed_name),
        help("Schema type names must look like 'module::Name'")
    )]
    MalformedTypeName {
        name: String,
    },

    // =========================================================================
    // Graph Errors
    // =========================================================================
    #[error("Dependency cycle detected at '{name}': {}", cycle.join(" -> "))]
    #[diagnostic(
        code(schemagen::graph::dependency_cycle),
        help("A type cannot (transitively) extend itself")
    )]
    DependencyCycle {
        name: String,
        cycle: Vec<String>,
    },

    // =========================================================================
    // Query Errors
    // =========================================================================
    #[error("Cannot encode {value} as a literal of type '{type_name}'")]
    #[diagnostic(code(schemagen::query::unsupported_literal))]
    UnsupportedLiteral {
        type_name: String,
        value: String,
    },

    #[error("Invalid arguments to set constructor: {}", elements.join(", "))]
    #[diagnostic(
        code(schemagen::query::mixed_set),
        help("Set elements must be either all object types or all non-object types")
    )]
    MixedSet {
        elements: Vec<String>,
    },

    #[error("Cannot construct an empty set")]
    #[diagnostic(code(schemagen::query::empty_set))]
    EmptySet,

    #[error("Cannot traverse '{pointer}' from a non-object path")]
    #[diagnostic(code(schemagen::query::invalid_path_parent))]
    InvalidPathParent {
        pointer: String,
    },
}

impl CodegenError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an unresolved reference error.
    pub fn unresolved(referrer: impl Into<String>, id: impl ToString) -> Self {
        Self::UnresolvedReference {
            referrer: referrer.into(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_path() {
        let err = CodegenError::DependencyCycle {
            name: "default::A".to_string(),
            cycle: vec!["default::A".to_string(), "default::B".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Dependency cycle detected at 'default::A': default::A -> default::B"
        );
    }

    #[test]
    fn mixed_set_message_lists_elements() {
        let err = CodegenError::MixedSet {
            elements: vec!["default::User".to_string(), "std::str".to_string()],
        };
        assert!(err.to_string().contains("default::User, std::str"));
    }
}
