//! Type descriptors returned by schema introspection.

use std::fmt;
use serde::{Deserialize, Serialize};

use super::pointer::Pointer;

/// Opaque identifier of a schema type, unique within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub String);

impl TypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single introspected schema type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IntrospectedType {
    Scalar(ScalarType),
    Object(ObjectType),
    Array(ArrayType),
    Tuple(TupleType),
}

impl IntrospectedType {
    pub fn id(&self) -> &TypeId {
        match self {
            IntrospectedType::Scalar(t) => &t.id,
            IntrospectedType::Object(t) => &t.id,
            IntrospectedType::Array(t) => &t.id,
            IntrospectedType::Tuple(t) => &t.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            IntrospectedType::Scalar(t) => &t.name,
            IntrospectedType::Object(t) => &t.name,
            IntrospectedType::Array(t) => &t.name,
            IntrospectedType::Tuple(t) => &t.name,
        }
    }

    /// Direct bases. Only scalars and objects have any.
    pub fn bases(&self) -> &[TypeId] {
        match self {
            IntrospectedType::Scalar(t) => &t.bases,
            IntrospectedType::Object(t) => &t.bases,
            IntrospectedType::Array(_) | IntrospectedType::Tuple(_) => &[],
        }
    }

    /// Every type id this descriptor refers to, paired with a label for error reports.
    pub fn references(&self) -> Vec<(String, &TypeId)> {
        let name = self.name();
        let mut refs = Vec::new();
        match self {
            IntrospectedType::Scalar(t) => {
                refs.extend(t.bases.iter().map(|id| (name.to_string(), id)));
                refs.extend(t.ancestors.iter().map(|id| (name.to_string(), id)));
                if let Some(material) = &t.material_id {
                    refs.push((name.to_string(), material));
                }
            }
            IntrospectedType::Object(t) => {
                refs.extend(t.bases.iter().map(|id| (name.to_string(), id)));
                refs.extend(t.ancestors.iter().map(|id| (name.to_string(), id)));
                refs.extend(t.union_of.iter().map(|id| (name.to_string(), id)));
                refs.extend(t.intersection_of.iter().map(|id| (name.to_string(), id)));
                for ptr in &t.pointers {
                    refs.push((format!("{}.{}", name, ptr.name), &ptr.target_id));
                    for prop in &ptr.pointers {
                        refs.push((format!("{}.{}@{}", name, ptr.name, prop.name), &prop.target_id));
                    }
                }
            }
            IntrospectedType::Array(t) => refs.push((name.to_string(), &t.element_id)),
            IntrospectedType::Tuple(t) => {
                refs.extend(t.elements.iter().map(|el| (name.to_string(), &el.target_id)));
            }
        }
        refs
    }
}

/// A scalar type: built-in, enum, or a refinement of a built-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarType {
    pub id: TypeId,
    pub name: String,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub bases: Vec<TypeId>,
    #[serde(default)]
    pub ancestors: Vec<TypeId>,
    #[serde(default)]
    pub enum_values: Vec<String>,
    /// Canonical concrete scalar this one refines.
    #[serde(default)]
    pub material_id: Option<TypeId>,
}

impl ScalarType {
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }
}

/// An object type with its own (non-inherited) pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub id: TypeId,
    pub name: String,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub bases: Vec<TypeId>,
    #[serde(default)]
    pub ancestors: Vec<TypeId>,
    #[serde(default)]
    pub union_of: Vec<TypeId>,
    #[serde(default)]
    pub intersection_of: Vec<TypeId>,
    #[serde(default)]
    pub pointers: Vec<Pointer>,
}

impl ObjectType {
    /// Union and intersection types are compositions, not declarations of their own.
    pub fn is_compound(&self) -> bool {
        !self.union_of.is_empty() || !self.intersection_of.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    pub id: TypeId,
    pub name: String,
    pub element_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleType {
    pub id: TypeId,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<TupleElement>,
}

impl TupleType {
    /// A tuple is named when its first element's name is not a positional index.
    pub fn is_named(&self) -> bool {
        self.elements
            .first()
            .map(|el| el.name.parse::<i64>().is_err())
            .unwrap_or(false)
    }
}

/// Tuple element. Positional elements carry their index as the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleElement {
    pub name: String,
    pub target_id: TypeId,
}

/// Splits `module::Name` at the last separator.
pub fn split_name(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once("::")
        .filter(|(module, local)| !module.is_empty() && !local.is_empty())
}
