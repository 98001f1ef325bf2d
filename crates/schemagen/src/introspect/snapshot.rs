//! An immutable, indexed set of introspected types.

use std::collections::HashMap;
use std::path::Path;

use crate::diagnostic::CodegenError;
use super::types::{IntrospectedType, TypeId};

/// All types returned by one introspection run, in their original order.
#[derive(Debug, Clone)]
pub struct Snapshot {
    types: Vec<IntrospectedType>,
    index: HashMap<TypeId, usize>,
}

impl Snapshot {
    /// Indexes the types by id. Duplicate ids are rejected.
    pub fn new(types: Vec<IntrospectedType>) -> Result<Self, CodegenError> {
        let mut index = HashMap::with_capacity(types.len());
        for (pos, ty) in types.iter().enumerate() {
            if index.insert(ty.id().clone(), pos).is_some() {
                return Err(CodegenError::DuplicateTypeId {
                    id: ty.id().to_string(),
                });
            }
        }
        Ok(Self { types, index })
    }

    /// Loads a snapshot previously dumped to disk as a JSON array of type descriptors.
    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::io(path, e.to_string()))?;

        let types: Vec<IntrospectedType> = serde_json::from_str(&content)
            .map_err(|e| CodegenError::io(path, format!("Failed to parse snapshot: {}", e)))?;

        Self::new(types)
    }

    pub fn types(&self) -> &[IntrospectedType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: &TypeId) -> Option<&IntrospectedType> {
        self.index.get(id).map(|&pos| &self.types[pos])
    }

    /// Position of a type in snapshot order.
    pub fn position(&self, id: &TypeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Looks up a type that must exist; `referrer` names who asked, for the error.
    pub fn resolve(&self, id: &TypeId, referrer: &str) -> Result<&IntrospectedType, CodegenError> {
        self.get(id).ok_or_else(|| CodegenError::unresolved(referrer, id))
    }

    /// Resolves a list of ids to type names.
    pub fn names_of(&self, ids: &[TypeId], referrer: &str) -> Result<Vec<String>, CodegenError> {
        ids.iter()
            .map(|id| self.resolve(id, referrer).map(|t| t.name().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::ScalarType;
    use tempfile::TempDir;

    fn scalar(id: &str, name: &str) -> IntrospectedType {
        IntrospectedType::Scalar(ScalarType {
            id: TypeId::from(id),
            name: name.to_string(),
            is_abstract: false,
            bases: vec![],
            ancestors: vec![],
            enum_values: vec![],
            material_id: None,
        })
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Snapshot::new(vec![scalar("1", "std::str"), scalar("1", "std::int64")]).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateTypeId { id } if id == "1"));
    }

    #[test]
    fn resolve_reports_referrer() {
        let snapshot = Snapshot::new(vec![scalar("1", "std::str")]).unwrap();
        assert_eq!(snapshot.resolve(&TypeId::from("1"), "x").unwrap().name(), "std::str");

        let err = snapshot.resolve(&TypeId::from("2"), "default::User.name").unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnresolvedReference { referrer, id } if referrer == "default::User.name" && id == "2"
        ));
    }

    #[test]
    fn load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"[{"kind": "scalar", "id": "a", "name": "std::str"},
                {"kind": "scalar", "id": "a", "name": "std::bool"}]"#,
        )
        .unwrap();

        let err = Snapshot::load(&path).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateTypeId { .. }));

        let missing = Snapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, CodegenError::IoError { .. }));
    }
}
