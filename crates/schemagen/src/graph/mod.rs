//! Dependency ordering of introspected types.
//!
//! Object and scalar types depend on their direct bases. Generated declarations
//! must appear after everything they extend, so the generator walks types in
//! the order produced here. Arrays and tuples take part as plain nodes without
//! edges: their element types are always referenced inline.

use crate::diagnostic::CodegenError;
use crate::introspect::{IntrospectedType, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Base-dependency graph over a snapshot, stored as an arena indexed by
/// snapshot position.
pub struct TypeGraph<'a> {
    snapshot: &'a Snapshot,
    /// `edges[i]` holds the positions of the direct bases of type `i`.
    edges: Vec<Vec<usize>>,
}

impl<'a> TypeGraph<'a> {
    /// Builds the graph, checking that every reference in the snapshot resolves.
    pub fn build(snapshot: &'a Snapshot) -> Result<Self, CodegenError> {
        let mut edges = Vec::with_capacity(snapshot.len());

        for ty in snapshot.types() {
            for (referrer, id) in ty.references() {
                if snapshot.get(id).is_none() {
                    return Err(CodegenError::unresolved(referrer, id));
                }
            }

            let bases = ty
                .bases()
                .iter()
                .map(|id| {
                    snapshot
                        .position(id)
                        .ok_or_else(|| CodegenError::unresolved(ty.name(), id))
                })
                .collect::<Result<Vec<_>, _>>()?;
            edges.push(bases);
        }

        Ok(Self { snapshot, edges })
    }

    /// Returns every type exactly once, bases before the types extending them.
    ///
    /// Traversal starts from each type in snapshot order, so the result is
    /// stable for a given snapshot.
    pub fn sorted(&self) -> Result<Vec<&'a IntrospectedType>, CodegenError> {
        let types = self.snapshot.types();
        let mut marks = vec![Mark::Unvisited; types.len()];
        let mut order = Vec::with_capacity(types.len());

        for root in 0..types.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }

            // (node, index of the next base to visit)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            marks[root] = Mark::Visiting;

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;

                if let Some(&base) = self.edges[node].get(next) {
                    frame.1 += 1;
                    match marks[base] {
                        Mark::Done => {}
                        Mark::Visiting => return Err(self.cycle_error(&stack, base)),
                        Mark::Unvisited => {
                            marks[base] = Mark::Visiting;
                            stack.push((base, 0));
                        }
                    }
                } else {
                    marks[node] = Mark::Done;
                    order.push(&types[node]);
                    stack.pop();
                }
            }
        }

        tracing::debug!(types = order.len(), "sorted schema types");
        Ok(order)
    }

    /// Reports the stack segment from the first occurrence of `repeated` to the top.
    fn cycle_error(&self, stack: &[(usize, usize)], repeated: usize) -> CodegenError {
        let types = self.snapshot.types();
        let start = stack
            .iter()
            .position(|&(node, _)| node == repeated)
            .unwrap_or(0);

        let mut cycle: Vec<String> = stack[start..]
            .iter()
            .map(|&(node, _)| types[node].name().to_string())
            .collect();
        cycle.push(types[repeated].name().to_string());

        CodegenError::DependencyCycle {
            name: types[repeated].name().to_string(),
            cycle,
        }
    }
}

/// Convenience wrapper: build the graph and sort it.
pub fn sort_types(snapshot: &Snapshot) -> Result<Vec<&IntrospectedType>, CodegenError> {
    TypeGraph::build(snapshot)?.sorted()
}
