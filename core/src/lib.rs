//! edge-index-core: In-memory indexed edge-list graph store.
//!
//! A pure Rust library that keeps edges in insertion order alongside two
//! sorted permutation indices and cumulative degree sums, giving O(1)
//! per-vertex bucket lookup. A caching decorator memoises neighbour and
//! incidence views in shared arenas. On top of the store's query contract
//! sit betweenness centrality (Brandes) and connected-component sizing.
//!
//! Everything is single-threaded and synchronous. Mutation takes `&mut self`,
//! so views handed out by a store cannot outlive the next mutation.
//!
//! ```
//! use edge_index_core::{betweenness, UndirectedEdgeList, UndirectedGraph};
//!
//! let mut g = UndirectedEdgeList::with_vertex_count(4);
//! g.add_edges(&[(0, 1), (1, 2), (2, 3)]).unwrap();
//! assert_eq!(g.degree(1), 2);
//! assert_eq!(betweenness(&g, None), vec![0.0, 2.0, 2.0, 0.0]);
//! ```

mod cached;
mod edge_list;
mod error;
mod graph;
mod queue;
mod traversal;

pub use cached::{CachedDirectedEdgeList, CachedEdgeList, CachedUndirectedEdgeList, CachedView};
pub use edge_list::{
    DirectedEdgeList, IncidentEdges, IndexedEdgeList, Neighbours, UndirectedEdgeList,
};
pub use error::{GraphError, Result};
pub use graph::{Directed, DirectedGraph, EdgeType, Graph, Undirected, UndirectedGraph};
pub use queue::BoundedQueue;
pub use traversal::{
    betweenness, connected_components, degree_ranking, largest_cluster_size, Components,
    DegreeResult,
};
