//! Introspected schema model.
//!
//! These types mirror what the database reports about its own schema: scalars,
//! object types with their links and properties, and the array/tuple types
//! built over them. They are produced by the connection layer (or loaded from a
//! JSON dump) and are never mutated during generation.

mod pointer;
mod snapshot;
mod types;

pub use pointer::{Cardinality, Pointer, PointerCardinality, PointerKind};
pub use snapshot::Snapshot;
pub use types::{
    split_name, ArrayType, IntrospectedType, ObjectType, ScalarType, TupleElement, TupleType,
    TypeId,
};
