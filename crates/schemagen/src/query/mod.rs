//! EdgeQL rendering of query expression trees.
//!
//! Expressions are built by the query builder and rendered to text here.
//! There are four node kinds:
//!
//! - path nodes: a type reference (`default::User`), optionally reached
//!   through a link of a parent path (`default::User.friends`)
//! - path leaves: a property of a path node (`default::User.name`)
//! - literals: typed values with an explicit cast (`<std::int64>42`)
//! - sets: `{ a, b }` of uniformly object or uniformly non-object members

mod literal;

pub use literal::{encode_literal, quote, BigInt, Duration, LiteralType, Value};

use crate::diagnostic::CodegenError;

/// Broad kind of an expression's element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Scalar,
    Array,
    Tuple,
}

/// Element type of an expression: what one member of its result set is.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementType {
    pub name: String,
    pub kind: TypeKind,
}

impl ElementType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Object)
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Scalar)
    }

    pub fn is_object(&self) -> bool {
        self.kind == TypeKind::Object
    }
}

impl From<&LiteralType> for ElementType {
    fn from(ty: &LiteralType) -> Self {
        let kind = match ty {
            LiteralType::Scalar(_) => TypeKind::Scalar,
            LiteralType::Array(_) => TypeKind::Array,
            LiteralType::Tuple(_) | LiteralType::NamedTuple(_) => TypeKind::Tuple,
        };
        Self::new(ty.name(), kind)
    }
}

/// The step that reached a path from its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub parent: Box<Expr>,
    pub pointer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub element: ElementType,
    pub step: Option<PathStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathLeaf {
    pub element: ElementType,
    pub step: PathStep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub element: ElementType,
    pub ty: LiteralType,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
    pub element: ElementType,
    pub exprs: Vec<Expr>,
}

/// A query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    PathNode(PathNode),
    PathLeaf(PathLeaf),
    Literal(Literal),
    Set(SetExpr),
}

impl Expr {
    /// Root path over an object type, e.g. `default::User`.
    pub fn path(type_name: impl Into<String>) -> Self {
        Expr::PathNode(PathNode {
            element: ElementType::object(type_name),
            step: None,
        })
    }

    /// Follows a link from this path to objects of `target`.
    pub fn link(self, pointer: impl Into<String>, target: impl Into<String>) -> Result<Self, CodegenError> {
        let step = self.step_to(pointer.into())?;
        Ok(Expr::PathNode(PathNode {
            element: ElementType::object(target),
            step: Some(step),
        }))
    }

    /// Selects a property of this path.
    pub fn property(self, pointer: impl Into<String>, element: ElementType) -> Result<Self, CodegenError> {
        let step = self.step_to(pointer.into())?;
        Ok(Expr::PathLeaf(PathLeaf { element, step }))
    }

    /// A typed literal. Value/type agreement is checked when rendering.
    pub fn literal(ty: LiteralType, value: Value) -> Self {
        Expr::Literal(Literal {
            element: ElementType::from(&ty),
            ty,
            value,
        })
    }

    /// A set of expressions, all object-typed or all non-object-typed.
    ///
    /// The set's element type is that of its first member.
    pub fn set(exprs: Vec<Expr>) -> Result<Self, CodegenError> {
        let first = exprs.first().ok_or(CodegenError::EmptySet)?;
        let objects = exprs.iter().filter(|e| e.element().is_object()).count();
        if objects != 0 && objects != exprs.len() {
            return Err(CodegenError::MixedSet {
                elements: exprs.iter().map(|e| e.element().name.clone()).collect(),
            });
        }

        Ok(Expr::Set(SetExpr {
            element: first.element().clone(),
            exprs,
        }))
    }

    pub fn element(&self) -> &ElementType {
        match self {
            Expr::PathNode(node) => &node.element,
            Expr::PathLeaf(leaf) => &leaf.element,
            Expr::Literal(literal) => &literal.element,
            Expr::Set(set) => &set.element,
        }
    }

    fn step_to(self, pointer: String) -> Result<PathStep, CodegenError> {
        if !matches!(&self, Expr::PathNode(node) if node.element.is_object()) {
            return Err(CodegenError::InvalidPathParent { pointer });
        }
        Ok(PathStep {
            parent: Box::new(self),
            pointer,
        })
    }

    /// Renders the expression as EdgeQL.
    pub fn to_edgeql(&self) -> Result<String, CodegenError> {
        match self {
            Expr::PathNode(PathNode { element, step: None }) => Ok(element.name.clone()),
            Expr::PathNode(PathNode { step: Some(step), .. }) | Expr::PathLeaf(PathLeaf { step, .. }) => {
                Ok(format!("{}.{}", step.parent.to_edgeql()?, step.pointer))
            }
            Expr::Literal(literal) => encode_literal(&literal.ty, &literal.value),
            Expr::Set(set) => {
                let members = set
                    .exprs
                    .iter()
                    .map(Expr::to_edgeql)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{{ {} }}", members.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Expr {
        Expr::literal(LiteralType::scalar("std::int64"), Value::Int(n))
    }

    #[test]
    fn renders_paths() {
        let user = Expr::path("default::User");
        assert_eq!(user.to_edgeql().unwrap(), "default::User");

        let name = user
            .clone()
            .property("name", ElementType::scalar("std::str"))
            .unwrap();
        assert_eq!(name.to_edgeql().unwrap(), "default::User.name");

        let friend_names = user
            .link("friends", "default::User")
            .unwrap()
            .property("name", ElementType::scalar("std::str"))
            .unwrap();
        assert_eq!(friend_names.to_edgeql().unwrap(), "default::User.friends.name");
        assert_eq!(friend_names.element().name, "std::str");
    }

    #[test]
    fn leaves_cannot_be_traversed() {
        let name = Expr::path("default::User")
            .property("name", ElementType::scalar("std::str"))
            .unwrap();
        let err = name.property("length", ElementType::scalar("std::int64")).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidPathParent { pointer } if pointer == "length"));

        assert!(int(1).link("x", "default::X").is_err());
    }

    #[test]
    fn renders_literal() {
        assert_eq!(int(42).to_edgeql().unwrap(), "<std::int64>42");
    }

    #[test]
    fn renders_sets_in_order() {
        let set = Expr::set(vec![int(1), int(2), int(3)]).unwrap();
        assert_eq!(
            set.to_edgeql().unwrap(),
            "{ <std::int64>1, <std::int64>2, <std::int64>3 }"
        );
        assert_eq!(set.element().name, "std::int64");

        let objects = Expr::set(vec![Expr::path("default::User"), Expr::path("default::Post")]).unwrap();
        assert_eq!(objects.to_edgeql().unwrap(), "{ default::User, default::Post }");
    }

    #[test]
    fn mixed_set_fails() {
        let err = Expr::set(vec![Expr::path("default::User"), int(1)]).unwrap_err();
        match err {
            CodegenError::MixedSet { elements } => {
                assert_eq!(elements, vec!["default::User", "std::int64"]);
            }
            other => panic!("expected mixed set error, got {other:?}"),
        }
    }

    #[test]
    fn empty_set_fails() {
        assert!(matches!(Expr::set(vec![]).unwrap_err(), CodegenError::EmptySet));
    }

    #[test]
    fn literal_errors_surface_when_rendering() {
        let bad = Expr::literal(LiteralType::scalar("std::int64"), Value::Bool(true));
        let set = Expr::set(vec![int(1), bad]).unwrap();
        assert!(matches!(
            set.to_edgeql().unwrap_err(),
            CodegenError::UnsupportedLiteral { .. }
        ));
    }
}
