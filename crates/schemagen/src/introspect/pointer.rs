//! Links and properties owned by object types.

use std::fmt;
use serde::{Deserialize, Serialize};

use super::types::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Link,
    Property,
}

/// Introspected (single/multi) cardinality of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerCardinality {
    One,
    Many,
}

/// Externally visible cardinality, combining multiplicity with `required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    AtMostOne,
    AtLeastOne,
    Many,
}

impl Cardinality {
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::One => "One",
            Cardinality::AtMostOne => "AtMostOne",
            Cardinality::AtLeastOne => "AtLeastOne",
            Cardinality::Many => "Many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link or property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub name: String,
    pub kind: PointerKind,
    pub cardinality: PointerCardinality,
    #[serde(default)]
    pub required: bool,
    /// Set for computed pointers.
    #[serde(default)]
    pub expr: Option<String>,
    pub target_id: TypeId,
    /// Link properties, including the implicit `source` and `target`.
    #[serde(default)]
    pub pointers: Vec<Pointer>,
}

impl Pointer {
    pub fn is_link(&self) -> bool {
        self.kind == PointerKind::Link
    }

    pub fn is_computed(&self) -> bool {
        self.expr.is_some()
    }

    pub fn cardinality(&self) -> Cardinality {
        match (self.cardinality, self.required) {
            (PointerCardinality::One, true) => Cardinality::One,
            (PointerCardinality::One, false) => Cardinality::AtMostOne,
            (PointerCardinality::Many, true) => Cardinality::AtLeastOne,
            (PointerCardinality::Many, false) => Cardinality::Many,
        }
    }

    /// User-declared link properties. Empty unless the link declares
    /// something beyond the implicit `source`/`target` pair.
    pub fn link_properties(&self) -> impl Iterator<Item = &Pointer> {
        let declared = self.is_link() && self.pointers.len() > 2;
        self.pointers
            .iter()
            .filter(move |p| declared && p.name != "source" && p.name != "target")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(cardinality: PointerCardinality, required: bool) -> Pointer {
        Pointer {
            name: "p".to_string(),
            kind: PointerKind::Property,
            cardinality,
            required,
            expr: None,
            target_id: TypeId::from("str"),
            pointers: vec![],
        }
    }

    #[test]
    fn cardinality_combinations() {
        assert_eq!(pointer(PointerCardinality::One, true).cardinality(), Cardinality::One);
        assert_eq!(pointer(PointerCardinality::One, false).cardinality(), Cardinality::AtMostOne);
        assert_eq!(pointer(PointerCardinality::Many, true).cardinality(), Cardinality::AtLeastOne);
        assert_eq!(pointer(PointerCardinality::Many, false).cardinality(), Cardinality::Many);
    }

    #[test]
    fn link_properties_skip_implicit_pair() {
        let mut link = pointer(PointerCardinality::Many, false);
        link.kind = PointerKind::Link;
        link.pointers = vec![
            pointer(PointerCardinality::One, true),
            pointer(PointerCardinality::One, true),
        ];
        link.pointers[0].name = "source".to_string();
        link.pointers[1].name = "target".to_string();
        assert_eq!(link.link_properties().count(), 0);

        let mut rank = pointer(PointerCardinality::One, false);
        rank.name = "rank".to_string();
        link.pointers.push(rank);
        let names: Vec<_> = link.link_properties().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["rank"]);
    }
}
