use std::cell::Cell;
use std::iter::FusedIterator;
use std::slice;

use tracing::trace;

use crate::edge_list::{IncidentEdges, IndexedEdgeList};
use crate::error::Result;
use crate::graph::{Directed, DirectedGraph, EdgeType, Graph, Undirected, UndirectedGraph};

/// Where a vertex's view lives inside an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    offset: usize,
    len: usize,
}

/// Which bucket combination a window holds.
#[derive(Debug, Clone, Copy)]
enum Side {
    Out,
    In,
    All,
}

/// Flat buffer of `2 × edge_count` slots carved into per-vertex windows.
///
/// Window offsets come from the cumulative sums, so windows never overlap:
/// out-views start at `sum_tail[v]`, in-views at `edge_count + sum_head[v]`
/// and undirected views at `sum_tail[v] + sum_head[v]`. A window is filled at
/// most once between invalidations, which is what lets it be written through
/// a shared reference.
#[derive(Debug, Default)]
struct Arena {
    buf: Vec<Cell<usize>>,
    // out/all views at `v`, in-views at `vertex_count + v`
    slots: Vec<Cell<Option<Window>>>,
}

impl Arena {
    fn reset(&mut self, edge_count: usize, vertex_count: usize) {
        self.buf.resize_with(2 * edge_count, Cell::default);
        self.slots.clear();
        self.slots.resize_with(2 * vertex_count, Cell::default);
    }

    fn window<I>(&self, slot: usize, offset: usize, values: I) -> &[Cell<usize>]
    where
        I: ExactSizeIterator<Item = usize>,
    {
        let window = match self.slots[slot].get() {
            Some(window) => window,
            None => {
                let window = Window {
                    offset,
                    len: values.len(),
                };
                for (cell, value) in self.buf[offset..offset + window.len].iter().zip(values) {
                    cell.set(value);
                }
                self.slots[slot].set(Some(window));
                window
            }
        };
        &self.buf[window.offset..window.offset + window.len]
    }

    fn materialized(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    fn memory_usage(&self) -> usize {
        self.buf.capacity() * std::mem::size_of::<Cell<usize>>()
            + self.slots.capacity() * std::mem::size_of::<Cell<Option<Window>>>()
    }
}

/// Caching decorator over an [`IndexedEdgeList`].
///
/// Neighbour and incident-edge views are copied into arena windows the first
/// time each vertex is asked for and served from there afterwards. Every
/// mutation drops all windows. Views borrow the decorator, so they cannot
/// outlive the next mutation.
///
/// The arenas are written through `&self`, which makes this type `!Sync`.
#[derive(Debug)]
pub struct CachedEdgeList<Ty: EdgeType = Undirected> {
    graph: IndexedEdgeList<Ty>,
    neighbours: Arena,
    incident: Arena,
}

pub type CachedDirectedEdgeList = CachedEdgeList<Directed>;
pub type CachedUndirectedEdgeList = CachedEdgeList<Undirected>;

impl<Ty: EdgeType> CachedEdgeList<Ty> {
    pub fn new() -> Self {
        Self::from(IndexedEdgeList::new())
    }

    pub fn with_vertex_count(vertex_count: usize) -> Self {
        Self::from(IndexedEdgeList::with_vertex_count(vertex_count))
    }

    /// The wrapped store.
    pub fn inner(&self) -> &IndexedEdgeList<Ty> {
        &self.graph
    }

    pub fn into_inner(self) -> IndexedEdgeList<Ty> {
        self.graph
    }

    /// Number of per-vertex views currently materialized.
    pub fn cached_views(&self) -> usize {
        self.neighbours.materialized() + self.incident.materialized()
    }

    /// Approximate memory usage in bytes, arenas included.
    pub fn memory_usage(&self) -> usize {
        self.graph.memory_usage() + self.neighbours.memory_usage() + self.incident.memory_usage()
    }

    fn invalidate(&mut self) {
        let (edges, vertices) = (self.graph.edge_count(), self.graph.vertex_count());
        self.neighbours.reset(edges, vertices);
        self.incident.reset(edges, vertices);
        trace!(edges, vertices, "cached_edge_list.invalidate");
    }

    fn slot(&self, vertex: usize, side: Side) -> (usize, usize) {
        let g = &self.graph;
        match side {
            Side::Out => (vertex, g.sum_tail()[vertex]),
            Side::In => (
                g.vertex_count() + vertex,
                g.edge_count() + g.sum_head()[vertex],
            ),
            Side::All => (vertex, g.sum_tail()[vertex] + g.sum_head()[vertex]),
        }
    }

    fn neighbour_window(&self, vertex: usize, side: Side) -> &[Cell<usize>] {
        let (slot, offset) = self.slot(vertex, side);
        let values = match side {
            Side::Out => self.graph.out_neighbours(vertex),
            Side::In => self.graph.in_neighbours(vertex),
            Side::All => self.graph.all_neighbours(vertex),
        };
        self.neighbours.window(slot, offset, values)
    }

    fn incident_window(&self, vertex: usize, side: Side) -> &[Cell<usize>] {
        let (slot, offset) = self.slot(vertex, side);
        let g = &self.graph;
        let values = match side {
            Side::Out => IncidentEdges::new(g.tail_bucket(vertex), &[]),
            Side::In => IncidentEdges::new(g.head_bucket(vertex), &[]),
            Side::All => IncidentEdges::new(g.tail_bucket(vertex), g.head_bucket(vertex)),
        };
        self.incident.window(slot, offset, values)
    }
}

impl<Ty: EdgeType> Default for CachedEdgeList<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> From<IndexedEdgeList<Ty>> for CachedEdgeList<Ty> {
    fn from(graph: IndexedEdgeList<Ty>) -> Self {
        let mut cached = Self {
            graph,
            neighbours: Arena::default(),
            incident: Arena::default(),
        };
        cached.invalidate();
        cached
    }
}

impl<Ty: EdgeType> Graph for CachedEdgeList<Ty> {
    type Direction = Ty;
    type Neighbours<'a> = CachedView<'a>;
    type IncidentEdges<'a> = CachedView<'a>;

    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn set_vertex_count(&mut self, count: usize) -> Result<()> {
        let result = self.graph.set_vertex_count(count);
        self.invalidate();
        result
    }

    fn is_edge(&self, tail: usize, head: usize) -> bool {
        self.graph.is_edge(tail, head)
    }

    fn edge_id(&self, tail: usize, head: usize) -> Result<usize> {
        self.graph.edge_id(tail, head)
    }

    fn add_edge(&mut self, tail: usize, head: usize) -> Result<usize> {
        let result = self.graph.add_edge(tail, head);
        self.invalidate();
        result
    }

    fn add_edges(&mut self, edges: &[(usize, usize)]) -> Result<()> {
        let result = self.graph.add_edges(edges);
        self.invalidate();
        result
    }

    fn successors(&self, vertex: usize) -> CachedView<'_> {
        let side = if Ty::DIRECTED { Side::Out } else { Side::All };
        CachedView::new(self.neighbour_window(vertex, side), &[])
    }

    fn adjacent(&self, vertex: usize) -> CachedView<'_> {
        if Ty::DIRECTED {
            CachedView::new(
                self.neighbour_window(vertex, Side::Out),
                self.neighbour_window(vertex, Side::In),
            )
        } else {
            CachedView::new(self.neighbour_window(vertex, Side::All), &[])
        }
    }
}

impl DirectedGraph for CachedEdgeList<Directed> {
    fn degree_in(&self, vertex: usize) -> usize {
        self.graph.degree_in(vertex)
    }

    fn degree_out(&self, vertex: usize) -> usize {
        self.graph.degree_out(vertex)
    }

    fn neighbours_in(&self, vertex: usize) -> CachedView<'_> {
        CachedView::new(self.neighbour_window(vertex, Side::In), &[])
    }

    fn neighbours_out(&self, vertex: usize) -> CachedView<'_> {
        CachedView::new(self.neighbour_window(vertex, Side::Out), &[])
    }

    fn incident_edges_in(&self, vertex: usize) -> CachedView<'_> {
        CachedView::new(self.incident_window(vertex, Side::In), &[])
    }

    fn incident_edges_out(&self, vertex: usize) -> CachedView<'_> {
        CachedView::new(self.incident_window(vertex, Side::Out), &[])
    }
}

impl UndirectedGraph for CachedEdgeList<Undirected> {
    fn degree(&self, vertex: usize) -> usize {
        self.graph.degree(vertex)
    }

    fn neighbours(&self, vertex: usize) -> CachedView<'_> {
        CachedView::new(self.neighbour_window(vertex, Side::All), &[])
    }

    fn incident_edges(&self, vertex: usize) -> CachedView<'_> {
        CachedView::new(self.incident_window(vertex, Side::All), &[])
    }
}

/// View over one or two materialized arena windows.
#[derive(Debug, Clone)]
pub struct CachedView<'a> {
    first: slice::Iter<'a, Cell<usize>>,
    second: slice::Iter<'a, Cell<usize>>,
}

impl<'a> CachedView<'a> {
    fn new(first: &'a [Cell<usize>], second: &'a [Cell<usize>]) -> Self {
        Self {
            first: first.iter(),
            second: second.iter(),
        }
    }
}

impl Iterator for CachedView<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.first.next().or_else(|| self.second.next()).map(Cell::get)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for CachedView<'_> {}
impl FusedIterator for CachedView<'_> {}
