use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::slice;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Directed, DirectedGraph, EdgeType, Graph, Undirected, UndirectedGraph};

/// Edge-list graph store with two sorted permutation indices.
///
/// Edges live in insertion order in `tail`/`head`. `index_by_tail` orders
/// edge ids by `(tail, head)` and `index_by_head` by `(head, tail)`, ties
/// broken by edge id. `sum_tail[v]..sum_tail[v + 1]` is then the range of
/// `index_by_tail` holding exactly the edges whose tail is `v` (likewise for
/// heads), so bucket bounds are O(1) and a bucket enumerates in O(degree).
///
/// Undirected edges are stored with `tail <= head`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEdgeList<Ty: EdgeType = Undirected> {
    tail: Vec<usize>,
    head: Vec<usize>,
    index_by_tail: Vec<usize>,
    index_by_head: Vec<usize>,
    sum_tail: Vec<usize>,
    sum_head: Vec<usize>,
    direction: PhantomData<Ty>,
}

pub type DirectedEdgeList = IndexedEdgeList<Directed>;
pub type UndirectedEdgeList = IndexedEdgeList<Undirected>;

impl<Ty: EdgeType> IndexedEdgeList<Ty> {
    pub fn new() -> Self {
        Self::with_vertex_count(0)
    }

    /// Empty store over `vertex_count` isolated vertices.
    pub fn with_vertex_count(vertex_count: usize) -> Self {
        Self::with_capacity(vertex_count, 0)
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        let mut sum_tail = Vec::with_capacity(vertex_count + 1);
        sum_tail.resize(vertex_count + 1, 0);
        Self {
            tail: Vec::with_capacity(edge_count),
            head: Vec::with_capacity(edge_count),
            index_by_tail: Vec::with_capacity(edge_count),
            index_by_head: Vec::with_capacity(edge_count),
            sum_head: sum_tail.clone(),
            sum_tail,
            direction: PhantomData,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.sum_head.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.tail.len()
    }

    /// Endpoints of edge `id` as stored (canonical order when undirected).
    pub fn edge(&self, id: usize) -> Option<(usize, usize)> {
        Some((*self.tail.get(id)?, self.head[id]))
    }

    /// All edges in id order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.tail.iter().copied().zip(self.head.iter().copied())
    }

    pub fn tails(&self) -> &[usize] {
        &self.tail
    }

    pub fn heads(&self) -> &[usize] {
        &self.head
    }

    pub fn index_by_tail(&self) -> &[usize] {
        &self.index_by_tail
    }

    pub fn index_by_head(&self) -> &[usize] {
        &self.index_by_head
    }

    pub fn sum_tail(&self) -> &[usize] {
        &self.sum_tail
    }

    pub fn sum_head(&self) -> &[usize] {
        &self.sum_head
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        let words = self.tail.capacity()
            + self.head.capacity()
            + self.index_by_tail.capacity()
            + self.index_by_head.capacity()
            + self.sum_tail.capacity()
            + self.sum_head.capacity();
        words * std::mem::size_of::<usize>()
    }

    pub fn set_vertex_count(&mut self, count: usize) -> Result<()> {
        let current = self.vertex_count();
        if count < current
            && (self.sum_tail[count] != self.sum_tail[current]
                || self.sum_head[count] != self.sum_head[current])
        {
            return Err(GraphError::WouldDiscardEdges {
                requested: count,
                vertex_count: current,
            });
        }

        // Growing replicates the last cumulative value, so new vertices start
        // with empty buckets.
        let edges = self.edge_count();
        self.sum_tail.resize(count + 1, edges);
        self.sum_head.resize(count + 1, edges);

        debug!(from = current, to = count, "edge_list.vertex_count");
        Ok(())
    }

    pub fn is_edge(&self, tail: usize, head: usize) -> bool {
        let count = self.vertex_count();
        if tail >= count || head >= count {
            return false;
        }
        let (tail, head) = Self::canonical(tail, head);
        self.find_edge(tail, head).is_some()
    }

    pub fn edge_id(&self, tail: usize, head: usize) -> Result<usize> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;
        let (t, h) = Self::canonical(tail, head);
        self.find_edge(t, h)
            .ok_or(GraphError::NotAnEdge { tail, head })
    }

    /// Incremental insert: the new edge is placed after every equal key in
    /// each index, which is where a stable batch sort would put it too.
    pub fn add_edge(&mut self, tail: usize, head: usize) -> Result<usize> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;
        let (tail, head) = Self::canonical(tail, head);

        let id = self.tail.len();
        self.tail.push(tail);
        self.head.push(head);

        let (tails, heads) = (&self.tail, &self.head);
        let pos = self
            .index_by_tail
            .partition_point(|&e| (tails[e], heads[e]) <= (tail, head));
        self.index_by_tail.insert(pos, id);
        let pos = self
            .index_by_head
            .partition_point(|&e| (heads[e], tails[e]) <= (head, tail));
        self.index_by_head.insert(pos, id);

        for sum in &mut self.sum_tail[tail + 1..] {
            *sum += 1;
        }
        for sum in &mut self.sum_head[head + 1..] {
            *sum += 1;
        }

        Ok(id)
    }

    /// Batch insert: append everything, then resort both indices and
    /// recount both cumulative sums from scratch.
    pub fn add_edges(&mut self, edges: &[(usize, usize)]) -> Result<()> {
        for &(tail, head) in edges {
            self.check_vertex(tail)?;
            self.check_vertex(head)?;
        }
        if edges.is_empty() {
            return Ok(());
        }

        self.tail.reserve(edges.len());
        self.head.reserve(edges.len());
        for &(tail, head) in edges {
            let (tail, head) = Self::canonical(tail, head);
            self.tail.push(tail);
            self.head.push(head);
        }

        self.rebuild_indices();
        debug!(
            added = edges.len(),
            edges = self.edge_count(),
            vertices = self.vertex_count(),
            "edge_list.batch_insert"
        );
        Ok(())
    }

    fn rebuild_indices(&mut self) {
        let edges = self.tail.len();
        let (tails, heads) = (&self.tail, &self.head);

        // Stable sorts over ascending ids: equal keys stay in insertion order.
        self.index_by_tail.clear();
        self.index_by_tail.extend(0..edges);
        self.index_by_tail.sort_by_key(|&e| (tails[e], heads[e]));

        self.index_by_head.clear();
        self.index_by_head.extend(0..edges);
        self.index_by_head.sort_by_key(|&e| (heads[e], tails[e]));

        recount(&mut self.sum_tail, &self.index_by_tail, tails);
        recount(&mut self.sum_head, &self.index_by_head, heads);
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        let vertex_count = self.vertex_count();
        if vertex < vertex_count {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex {
                vertex,
                vertex_count,
            })
        }
    }

    fn canonical(tail: usize, head: usize) -> (usize, usize) {
        if !Ty::DIRECTED && tail > head {
            (head, tail)
        } else {
            (tail, head)
        }
    }

    /// Scan whichever of the two candidate buckets is smaller; ties scan the
    /// tail bucket. Both buckets list duplicates in id order, so either scan
    /// finds the lowest id.
    fn find_edge(&self, tail: usize, head: usize) -> Option<usize> {
        let by_tail = self.tail_bucket(tail);
        let by_head = self.head_bucket(head);
        if by_tail.is_empty() || by_head.is_empty() {
            return None;
        }
        if by_tail.len() <= by_head.len() {
            by_tail.iter().copied().find(|&e| self.head[e] == head)
        } else {
            by_head.iter().copied().find(|&e| self.tail[e] == tail)
        }
    }

    /// Edge ids whose tail is `vertex`, ordered by head.
    pub(crate) fn tail_bucket(&self, vertex: usize) -> &[usize] {
        &self.index_by_tail[self.sum_tail[vertex]..self.sum_tail[vertex + 1]]
    }

    /// Edge ids whose head is `vertex`, ordered by tail.
    pub(crate) fn head_bucket(&self, vertex: usize) -> &[usize] {
        &self.index_by_head[self.sum_head[vertex]..self.sum_head[vertex + 1]]
    }

    pub(crate) fn tail_degree(&self, vertex: usize) -> usize {
        self.sum_tail[vertex + 1] - self.sum_tail[vertex]
    }

    pub(crate) fn head_degree(&self, vertex: usize) -> usize {
        self.sum_head[vertex + 1] - self.sum_head[vertex]
    }

    pub(crate) fn out_neighbours(&self, vertex: usize) -> Neighbours<'_> {
        Neighbours::new(self.heads_of(vertex), Partners::empty())
    }

    pub(crate) fn in_neighbours(&self, vertex: usize) -> Neighbours<'_> {
        Neighbours::new(self.tails_of(vertex), Partners::empty())
    }

    /// Tail bucket followed by head bucket. Canonical storage puts every
    /// undirected edge in exactly one of each, so this is the full
    /// neighbourhood (and out-then-in for directed stores).
    pub(crate) fn all_neighbours(&self, vertex: usize) -> Neighbours<'_> {
        Neighbours::new(self.heads_of(vertex), self.tails_of(vertex))
    }

    fn heads_of(&self, vertex: usize) -> Partners<'_> {
        Partners {
            edges: self.tail_bucket(vertex).iter(),
            partner: &self.head,
        }
    }

    fn tails_of(&self, vertex: usize) -> Partners<'_> {
        Partners {
            edges: self.head_bucket(vertex).iter(),
            partner: &self.tail,
        }
    }
}

/// Rebuild a cumulative-sum array in one pass over a fully sorted index.
fn recount(sums: &mut [usize], index: &[usize], key: &[usize]) {
    let vertices = sums.len() - 1;
    let mut pos = 0;
    for (vertex, sum) in sums.iter_mut().take(vertices).enumerate() {
        *sum = pos;
        while pos < index.len() && key[index[pos]] == vertex {
            pos += 1;
        }
    }
    sums[vertices] = pos;
}

impl<Ty: EdgeType> Default for IndexedEdgeList<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> Graph for IndexedEdgeList<Ty> {
    type Direction = Ty;
    type Neighbours<'a> = Neighbours<'a>;
    type IncidentEdges<'a> = IncidentEdges<'a>;

    fn vertex_count(&self) -> usize {
        IndexedEdgeList::vertex_count(self)
    }

    fn edge_count(&self) -> usize {
        IndexedEdgeList::edge_count(self)
    }

    fn set_vertex_count(&mut self, count: usize) -> Result<()> {
        IndexedEdgeList::set_vertex_count(self, count)
    }

    fn is_edge(&self, tail: usize, head: usize) -> bool {
        IndexedEdgeList::is_edge(self, tail, head)
    }

    fn edge_id(&self, tail: usize, head: usize) -> Result<usize> {
        IndexedEdgeList::edge_id(self, tail, head)
    }

    fn add_edge(&mut self, tail: usize, head: usize) -> Result<usize> {
        IndexedEdgeList::add_edge(self, tail, head)
    }

    fn add_edges(&mut self, edges: &[(usize, usize)]) -> Result<()> {
        IndexedEdgeList::add_edges(self, edges)
    }

    fn successors(&self, vertex: usize) -> Neighbours<'_> {
        if Ty::DIRECTED {
            self.out_neighbours(vertex)
        } else {
            self.all_neighbours(vertex)
        }
    }

    fn adjacent(&self, vertex: usize) -> Neighbours<'_> {
        self.all_neighbours(vertex)
    }
}

impl DirectedGraph for IndexedEdgeList<Directed> {
    fn degree_in(&self, vertex: usize) -> usize {
        self.head_degree(vertex)
    }

    fn degree_out(&self, vertex: usize) -> usize {
        self.tail_degree(vertex)
    }

    fn neighbours_in(&self, vertex: usize) -> Neighbours<'_> {
        self.in_neighbours(vertex)
    }

    fn neighbours_out(&self, vertex: usize) -> Neighbours<'_> {
        self.out_neighbours(vertex)
    }

    fn incident_edges_in(&self, vertex: usize) -> IncidentEdges<'_> {
        IncidentEdges::new(self.head_bucket(vertex), &[])
    }

    fn incident_edges_out(&self, vertex: usize) -> IncidentEdges<'_> {
        IncidentEdges::new(self.tail_bucket(vertex), &[])
    }
}

impl UndirectedGraph for IndexedEdgeList<Undirected> {
    fn degree(&self, vertex: usize) -> usize {
        self.tail_degree(vertex) + self.head_degree(vertex)
    }

    fn neighbours(&self, vertex: usize) -> Neighbours<'_> {
        self.all_neighbours(vertex)
    }

    fn incident_edges(&self, vertex: usize) -> IncidentEdges<'_> {
        IncidentEdges::new(self.tail_bucket(vertex), self.head_bucket(vertex))
    }
}

/// Maps a bucket of edge ids to the opposite endpoint of each edge.
#[derive(Debug, Clone)]
struct Partners<'a> {
    edges: slice::Iter<'a, usize>,
    partner: &'a [usize],
}

impl Partners<'_> {
    fn empty() -> Self {
        Partners {
            edges: [].iter(),
            partner: &[],
        }
    }
}

/// Neighbour view over one or two buckets of a plain store.
#[derive(Debug, Clone)]
pub struct Neighbours<'a> {
    first: Partners<'a>,
    second: Partners<'a>,
}

impl<'a> Neighbours<'a> {
    fn new(first: Partners<'a>, second: Partners<'a>) -> Self {
        Self { first, second }
    }
}

impl Iterator for Neighbours<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if let Some(&e) = self.first.edges.next() {
            return Some(self.first.partner[e]);
        }
        self.second.edges.next().map(|&e| self.second.partner[e])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.edges.len() + self.second.edges.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Neighbours<'_> {}
impl FusedIterator for Neighbours<'_> {}

/// Edge ids from one or two buckets of a plain store.
#[derive(Debug, Clone)]
pub struct IncidentEdges<'a> {
    first: slice::Iter<'a, usize>,
    second: slice::Iter<'a, usize>,
}

impl<'a> IncidentEdges<'a> {
    pub(crate) fn new(first: &'a [usize], second: &'a [usize]) -> Self {
        Self {
            first: first.iter(),
            second: second.iter(),
        }
    }
}

impl Iterator for IncidentEdges<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.first.next().or_else(|| self.second.next()).copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for IncidentEdges<'_> {}
impl FusedIterator for IncidentEdges<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(vertices: usize, edges: &[(usize, usize)]) -> UndirectedEdgeList {
        let mut g = UndirectedEdgeList::with_vertex_count(vertices);
        g.add_edges(edges).unwrap();
        g
    }

    fn directed(vertices: usize, edges: &[(usize, usize)]) -> DirectedEdgeList {
        let mut g = DirectedEdgeList::with_vertex_count(vertices);
        g.add_edges(edges).unwrap();
        g
    }

    /// Check every store invariant against a brute-force recomputation.
    fn assert_invariants<Ty: EdgeType>(g: &IndexedEdgeList<Ty>) {
        let m = g.edge_count();
        let n = g.vertex_count();
        assert_eq!(g.tails().len(), m);
        assert_eq!(g.heads().len(), m);
        assert_eq!(g.sum_tail().len(), n + 1);
        assert_eq!(g.sum_head().len(), n + 1);
        assert_eq!(g.sum_tail()[0], 0);
        assert_eq!(g.sum_head()[n], m);

        let mut by_tail = g.index_by_tail().to_vec();
        by_tail.sort_unstable();
        assert_eq!(by_tail, (0..m).collect::<Vec<_>>());

        let key = |e: usize| (g.tails()[e], g.heads()[e], e);
        assert!(g.index_by_tail().windows(2).all(|w| key(w[0]) < key(w[1])));
        let key = |e: usize| (g.heads()[e], g.tails()[e], e);
        assert!(g.index_by_head().windows(2).all(|w| key(w[0]) < key(w[1])));

        for v in 0..n {
            let out = g.tails().iter().filter(|&&t| t == v).count();
            let inc = g.heads().iter().filter(|&&h| h == v).count();
            assert_eq!(g.tail_degree(v), out, "tail bucket of {v}");
            assert_eq!(g.head_degree(v), inc, "head bucket of {v}");
        }
        if !Ty::DIRECTED {
            assert!(g.edges().all(|(t, h)| t <= h));
        }
    }

    // --- Construction and vertex count ---

    #[test]
    fn test_empty_store() {
        let g = UndirectedEdgeList::new();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.sum_tail(), &[0]);
        assert!(!g.is_edge(0, 0));
    }

    #[test]
    fn test_grow_keeps_edges() {
        let mut g = undirected(3, &[(0, 1), (1, 2)]);
        g.add_vertices(2);
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.sum_tail(), &[0, 1, 2, 2, 2, 2]);
        assert_eq!(g.sum_head(), &[0, 0, 1, 2, 2, 2]);
        assert_eq!(g.degree(4), 0);
        g.add_edge(4, 3).unwrap();
        assert!(g.is_edge(3, 4));
        assert_invariants(&g);
    }

    #[test]
    fn test_shrink_without_edges_in_range() {
        let mut g = undirected(6, &[(0, 1), (1, 2)]);
        g.set_vertex_count(3).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_invariants(&g);
    }

    #[test]
    fn test_shrink_would_discard_edges() {
        let mut g = directed(5, &[(0, 1), (4, 2)]);
        let err = g.set_vertex_count(4).unwrap_err();
        assert_eq!(
            err,
            GraphError::WouldDiscardEdges {
                requested: 4,
                vertex_count: 5
            }
        );
        assert_eq!(g.vertex_count(), 5);

        // Head-side only: 2 -> 3 survives 4 but not 3
        let mut g = directed(5, &[(2, 3)]);
        assert!(g.set_vertex_count(4).is_ok());
        assert!(g.set_vertex_count(3).is_err());
    }

    // --- Insertion ---

    #[test]
    fn test_add_edge_returns_insertion_id() {
        let mut g = UndirectedEdgeList::with_vertex_count(4);
        assert_eq!(g.add_edge(2, 3).unwrap(), 0);
        assert_eq!(g.add_edge(0, 1).unwrap(), 1);
        assert_eq!(g.add_edge(1, 0).unwrap(), 2);
        assert_eq!(g.edge(2), Some((0, 1)));
        assert_eq!(g.edge(3), None);
        assert_invariants(&g);
    }

    #[test]
    fn test_add_edge_unknown_vertex() {
        let mut g = DirectedEdgeList::with_vertex_count(3);
        assert_eq!(
            g.add_edge(0, 3),
            Err(GraphError::UnknownVertex {
                vertex: 3,
                vertex_count: 3
            })
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_batch_rejects_whole_list() {
        let mut g = directed(3, &[(0, 1)]);
        let before = g.clone();
        assert!(g.add_edges(&[(1, 2), (2, 9)]).is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn test_incremental_matches_batch() {
        let edges = [(3, 1), (0, 2), (1, 3), (2, 2), (0, 2), (4, 0), (1, 1), (3, 1)];

        let mut one_by_one = UndirectedEdgeList::with_vertex_count(5);
        for &(t, h) in &edges {
            one_by_one.add_edge(t, h).unwrap();
        }
        let batch = undirected(5, &edges);
        assert_eq!(one_by_one, batch);
        assert_invariants(&batch);

        let mut one_by_one = DirectedEdgeList::with_vertex_count(5);
        for &(t, h) in &edges {
            one_by_one.add_edge(t, h).unwrap();
        }
        let batch = directed(5, &edges);
        assert_eq!(one_by_one, batch);
        assert_invariants(&batch);
    }

    #[test]
    fn test_mixed_batches_and_single_inserts() {
        let mut mixed = DirectedEdgeList::with_vertex_count(4);
        mixed.add_edges(&[(1, 2), (0, 3)]).unwrap();
        mixed.add_edge(1, 2).unwrap();
        mixed.add_edges(&[(3, 0), (0, 1)]).unwrap();
        mixed.add_edge(2, 1).unwrap();

        let all = directed(4, &[(1, 2), (0, 3), (1, 2), (3, 0), (0, 1), (2, 1)]);
        assert_eq!(mixed, all);
    }

    #[test]
    fn test_sorted_indices_break_ties_by_id() {
        let g = directed(3, &[(1, 2), (0, 2), (1, 2), (0, 1)]);
        assert_eq!(g.index_by_tail(), &[3, 1, 0, 2]);
        assert_eq!(g.index_by_head(), &[3, 1, 0, 2]);
        assert_eq!(g.sum_tail(), &[0, 2, 4, 4]);
        assert_eq!(g.sum_head(), &[0, 0, 1, 4]);
    }

    // --- Lookup ---

    #[test]
    fn test_canonicalization() {
        let mut g = UndirectedEdgeList::with_vertex_count(6);
        g.add_edge(5, 2).unwrap();
        assert_eq!(g.edge(0), Some((2, 5)));
        assert!(g.is_edge(5, 2));
        assert!(g.is_edge(2, 5));
        assert_eq!(g.edge_id(5, 2), g.edge_id(2, 5));
    }

    #[test]
    fn test_directed_edges_are_ordered() {
        let g = directed(3, &[(0, 1)]);
        assert!(g.is_edge(0, 1));
        assert!(!g.is_edge(1, 0));
        assert_eq!(g.edge_id(0, 1), Ok(0));
        assert_eq!(g.edge_id(1, 0), Err(GraphError::NotAnEdge { tail: 1, head: 0 }));
    }

    #[test]
    fn test_edge_id_unknown_vertex() {
        let g = directed(3, &[(0, 1)]);
        assert!(matches!(
            g.edge_id(0, 7),
            Err(GraphError::UnknownVertex { vertex: 7, .. })
        ));
        assert!(!g.is_edge(0, 7));
    }

    #[test]
    fn test_edge_id_duplicates_lowest_id() {
        let g = directed(4, &[(2, 3), (0, 3), (1, 3), (0, 3)]);
        assert_eq!(g.edge_id(0, 3), Ok(1));
    }

    #[test]
    fn test_lookup_scans_either_bucket() {
        // Vertex 0 has many out-edges, vertex 5 few in-edges, and vice versa.
        let mut edges: Vec<(usize, usize)> = (1..5).map(|h| (0, h)).collect();
        edges.push((0, 5));
        edges.extend((6..9).map(|t| (t, 5)));
        edges.push((9, 1));
        let g = directed(10, &edges);

        assert_eq!(g.edge_id(0, 5), Ok(4));
        assert_eq!(g.edge_id(9, 1), Ok(8));
        assert_eq!(g.edge_id(7, 5), Ok(6));
        assert!(!g.is_edge(9, 5));
        assert!(!g.is_edge(5, 0));
    }

    #[test]
    fn test_self_loop() {
        let g = undirected(2, &[(1, 1)]);
        assert!(g.is_edge(1, 1));
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.neighbours(1).collect::<Vec<_>>(), vec![1, 1]);
        assert_eq!(g.incident_edges(1).collect::<Vec<_>>(), vec![0, 0]);
    }

    // --- Degrees and views ---

    #[test]
    fn test_undirected_views() {
        let g = undirected(5, &[(2, 0), (2, 4), (1, 2), (3, 2), (0, 1)]);
        assert_eq!(g.degree(2), 4);
        assert_eq!(g.neighbours(2).len(), 4);
        // tail bucket (heads 3, 4) chained with head bucket (tails 0, 1)
        assert_eq!(g.neighbours(2).collect::<Vec<_>>(), vec![3, 4, 0, 1]);
        assert_eq!(g.incident_edges(2).collect::<Vec<_>>(), vec![3, 1, 0, 2]);

        let degree_sum: usize = (0..5).map(|v| g.degree(v)).sum();
        assert_eq!(degree_sum, 2 * g.edge_count());
    }

    #[test]
    fn test_directed_views() {
        let g = directed(4, &[(0, 1), (2, 1), (1, 3), (1, 0)]);
        assert_eq!(g.degree_out(1), 2);
        assert_eq!(g.degree_in(1), 2);
        assert_eq!(g.neighbours_out(1).collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(g.neighbours_in(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(g.incident_edges_out(1).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(g.incident_edges_in(1).collect::<Vec<_>>(), vec![0, 1]);

        for v in 0..4 {
            assert!(g.incident_edges_out(v).all(|e| g.tails()[e] == v));
            assert!(g.incident_edges_in(v).all(|e| g.heads()[e] == v));
        }
        let outs: usize = (0..4).map(|v| g.degree_out(v)).sum();
        let ins: usize = (0..4).map(|v| g.degree_in(v)).sum();
        assert_eq!(outs, 4);
        assert_eq!(ins, 4);
    }

    #[test]
    fn test_successors_and_adjacent() {
        let g = directed(3, &[(0, 1), (2, 0)]);
        assert_eq!(g.successors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(g.adjacent(0).collect::<Vec<_>>(), vec![1, 2]);

        let g = undirected(3, &[(0, 1), (2, 0)]);
        assert_eq!(g.successors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(g.adjacent(0).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_views_are_restartable() {
        let g = undirected(3, &[(0, 1), (0, 2)]);
        let view = g.neighbours(0);
        let again = view.clone();
        assert_eq!(view.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = undirected(100, &[(0, 1), (1, 2)]);
        assert!(g.memory_usage() > 0);
    }
}
