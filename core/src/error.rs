use thiserror::Error;

/// Errors surfaced by store queries and mutations.
///
/// Broken internal invariants (queue overflow, mismatched mask lengths) are
/// not represented here; they panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown vertex {vertex} (graph has {vertex_count} vertices)")]
    UnknownVertex { vertex: usize, vertex_count: usize },

    #[error("no edge between {tail} and {head}")]
    NotAnEdge { tail: usize, head: usize },

    #[error("shrinking to {requested} vertices would discard edges (graph has {vertex_count} vertices)")]
    WouldDiscardEdges { requested: usize, vertex_count: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
