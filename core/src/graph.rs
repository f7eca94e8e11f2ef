use std::fmt;

use crate::error::Result;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Directed {}
    impl Sealed for super::Undirected {}
}

/// Compile-time edge direction of a store.
pub trait EdgeType: sealed::Sealed + fmt::Debug + Clone + Copy + Default + PartialEq + Eq + 'static {
    const DIRECTED: bool;
}

/// Marker: edges are ordered `(tail, head)` pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directed;

/// Marker: edges are stored as `tail <= head` and read symmetrically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undirected;

impl EdgeType for Directed {
    const DIRECTED: bool = true;
}

impl EdgeType for Undirected {
    const DIRECTED: bool = false;
}

/// Query and mutation contract shared by every store.
///
/// Vertices are dense ids in `0..vertex_count()`. Edge ids are insertion
/// positions in `0..edge_count()`. Neighbour and incidence views are finite,
/// ordered and restartable (`Clone`), and borrow the store until the next
/// mutation.
///
/// Accessors taking a vertex panic if it is out of range, like slice
/// indexing; `is_edge`, `edge_id` and the mutators check their input instead.
pub trait Graph {
    type Direction: EdgeType;

    type Neighbours<'a>: Iterator<Item = usize> + ExactSizeIterator + Clone
    where
        Self: 'a;

    type IncidentEdges<'a>: Iterator<Item = usize> + ExactSizeIterator + Clone
    where
        Self: 'a;

    fn is_directed(&self) -> bool {
        Self::Direction::DIRECTED
    }

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Grow or shrink the vertex range. Shrinking fails with
    /// `WouldDiscardEdges` if any stored edge touches a dropped vertex.
    fn set_vertex_count(&mut self, count: usize) -> Result<()>;

    /// Append `count` isolated vertices.
    fn add_vertices(&mut self, count: usize) {
        let target = self.vertex_count() + count;
        // growing never discards edges
        let _ = self.set_vertex_count(target);
    }

    /// True if at least one `(tail, head)` edge is stored. Unknown vertices
    /// simply have no edges.
    fn is_edge(&self, tail: usize, head: usize) -> bool;

    /// Id of the lowest-numbered `(tail, head)` edge.
    fn edge_id(&self, tail: usize, head: usize) -> Result<usize>;

    /// Insert one edge and return its id.
    fn add_edge(&mut self, tail: usize, head: usize) -> Result<usize>;

    /// Insert many edges at once. Every pair is validated before anything is
    /// stored, so a failed batch leaves the store untouched.
    fn add_edges(&mut self, edges: &[(usize, usize)]) -> Result<()>;

    /// Vertices reachable over one edge: out-neighbours when directed,
    /// all neighbours when undirected.
    fn successors(&self, vertex: usize) -> Self::Neighbours<'_>;

    /// Vertices sharing an edge in either direction: out-neighbours followed
    /// by in-neighbours when directed, all neighbours when undirected.
    fn adjacent(&self, vertex: usize) -> Self::Neighbours<'_>;
}

/// Accessors that only make sense when edges have a direction.
pub trait DirectedGraph: Graph<Direction = Directed> {
    fn degree_in(&self, vertex: usize) -> usize;

    fn degree_out(&self, vertex: usize) -> usize;

    /// Tails of edges whose head is `vertex`, ordered by tail.
    fn neighbours_in(&self, vertex: usize) -> Self::Neighbours<'_>;

    /// Heads of edges whose tail is `vertex`, ordered by head.
    fn neighbours_out(&self, vertex: usize) -> Self::Neighbours<'_>;

    fn incident_edges_in(&self, vertex: usize) -> Self::IncidentEdges<'_>;

    fn incident_edges_out(&self, vertex: usize) -> Self::IncidentEdges<'_>;
}

/// Accessors for symmetric edges.
///
/// A self-loop counts twice towards `degree` and is listed twice by
/// `neighbours` and `incident_edges`.
pub trait UndirectedGraph: Graph<Direction = Undirected> {
    fn degree(&self, vertex: usize) -> usize;

    fn neighbours(&self, vertex: usize) -> Self::Neighbours<'_>;

    fn incident_edges(&self, vertex: usize) -> Self::IncidentEdges<'_>;
}
