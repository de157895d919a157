//! Structural errors reported by the graph model and path queries.
//!
//! Only misuse propagates as an error: referencing a vertex that is not in
//! the graph, asking for paths from a vertex to itself, inserting a
//! self-loop, or scoring a graph against a path table built from another
//! graph. A pair with no connecting path is never an error; it is an
//! empty [`crate::paths::PathSet`].

/// Errors from graph construction and shortest-path queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex identifier is not a member of the graph's vertex set.
    #[error("vertex not found in graph: {0}")]
    VertexNotFound(String),

    /// A shortest-path query named the same vertex as source and target.
    #[error("source and target are the same vertex: {0}")]
    SameEndpoints(String),

    /// An edge would join a vertex to itself.
    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(String),

    /// A precomputed path table was built from a different graph.
    #[error("path table was built for a different graph ({expected}; graph is {found})")]
    TableMismatch { expected: String, found: String },
}

impl GraphError {
    pub(crate) fn vertex_not_found(v: &impl std::fmt::Debug) -> Self {
        Self::VertexNotFound(format!("{v:?}"))
    }

    pub(crate) fn same_endpoints(v: &impl std::fmt::Debug) -> Self {
        Self::SameEndpoints(format!("{v:?}"))
    }

    pub(crate) fn self_loop(v: &impl std::fmt::Debug) -> Self {
        Self::SelfLoop(format!("{v:?}"))
    }
}
