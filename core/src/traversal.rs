use tracing::debug;

use crate::graph::Graph;
use crate::queue::BoundedQueue;

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult {
    pub vertex: usize,
    /// Edges touching the vertex in either direction; self-loops count twice.
    pub degree: usize,
}

/// Connected-component labelling produced by [`connected_components`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    /// Component label per vertex, `None` for ignored vertices.
    pub labels: Vec<Option<usize>>,
    /// Vertex count of each component, indexed by label.
    pub sizes: Vec<usize>,
}

impl Components {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    pub fn largest(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }
}

fn check_mask(ignore: Option<&[bool]>, vertex_count: usize) {
    if let Some(mask) = ignore {
        assert_eq!(
            mask.len(),
            vertex_count,
            "ignore mask length must equal vertex count"
        );
    }
}

fn is_ignored(ignore: Option<&[bool]>, vertex: usize) -> bool {
    ignore.is_some_and(|mask| mask[vertex])
}

/// Betweenness centrality of every vertex (Brandes' algorithm).
///
/// Runs one BFS per non-ignored source, counting shortest paths (`sigma`)
/// and recording predecessors, then replays the visit order backwards to
/// accumulate dependencies. Ignored vertices are neither sources nor
/// intermediate hops. Undirected scores are halved, since every path is
/// found once from each end.
///
/// Complexity: O(V · (V + E)) time, O(V + E) space.
///
/// # Panics
///
/// If `ignore` is given and its length differs from the vertex count.
pub fn betweenness<G: Graph>(graph: &G, ignore: Option<&[bool]>) -> Vec<f64> {
    let n = graph.vertex_count();
    check_mask(ignore, n);

    let mut centrality = vec![0.0f64; n];
    let mut sigma = vec![0.0f64; n];
    let mut delta = vec![0.0f64; n];
    let mut distance: Vec<Option<usize>> = vec![None; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut queue = BoundedQueue::new(n);

    for source in 0..n {
        if is_ignored(ignore, source) {
            continue;
        }

        sigma[source] = 1.0;
        distance[source] = Some(0);
        queue.push(source);

        while let Some(v) = queue.pop() {
            stack.push(v);
            let next = distance[v].map(|d| d + 1);
            for w in graph.successors(v) {
                if is_ignored(ignore, w) {
                    continue;
                }
                if distance[w].is_none() {
                    distance[w] = next;
                    sigma[w] = sigma[v];
                    predecessors[w].push(v);
                    queue.push(w);
                } else if distance[w] == next {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Dependency accumulation in reverse discovery order. sigma[w] >= 1
        // for every visited w.
        while let Some(w) = stack.pop() {
            let share = (1.0 + delta[w]) / sigma[w];
            for &v in &predecessors[w] {
                delta[v] += sigma[v] * share;
            }
            if w != source {
                centrality[w] += delta[w];
            }
            sigma[w] = 0.0;
            delta[w] = 0.0;
            distance[w] = None;
            predecessors[w].clear();
        }
    }

    if !graph.is_directed() {
        for c in &mut centrality {
            *c /= 2.0;
        }
    }

    debug!(
        vertices = n,
        edges = graph.edge_count(),
        "traversal.betweenness"
    );
    centrality
}

/// Label connected components by BFS, treating directed edges as
/// undirected. Ignored vertices get no label and are never crossed.
///
/// # Panics
///
/// If `ignore` is given and its length differs from the vertex count.
pub fn connected_components<G: Graph>(graph: &G, ignore: Option<&[bool]>) -> Components {
    let n = graph.vertex_count();
    check_mask(ignore, n);

    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut sizes = Vec::new();
    let mut queue = BoundedQueue::new(n);

    for source in 0..n {
        if is_ignored(ignore, source) || labels[source].is_some() {
            continue;
        }

        let label = sizes.len();
        labels[source] = Some(label);
        queue.push(source);
        let mut size = 1;

        while let Some(v) = queue.pop() {
            for w in graph.adjacent(v) {
                if is_ignored(ignore, w) || labels[w].is_some() {
                    continue;
                }
                labels[w] = Some(label);
                size += 1;
                queue.push(w);
            }
        }
        sizes.push(size);
    }

    Components { labels, sizes }
}

/// Vertex count of the largest connected component; 0 when the graph is
/// empty or every vertex is ignored.
///
/// # Panics
///
/// If `ignore` is given and its length differs from the vertex count.
pub fn largest_cluster_size<G: Graph>(graph: &G, ignore: Option<&[bool]>) -> usize {
    let components = connected_components(graph, ignore);
    let largest = components.largest();
    debug!(
        vertices = graph.vertex_count(),
        components = components.count(),
        largest,
        "traversal.largest_cluster"
    );
    largest
}

/// Return vertices ranked by degree (total connections).
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N by
/// degree (descending). Ties are broken by vertex id (ascending).
pub fn degree_ranking<G: Graph>(graph: &G, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = (0..graph.vertex_count())
        .map(|vertex| DegreeResult {
            vertex,
            degree: graph.adjacent(vertex).len(),
        })
        .collect();

    // Sort by degree descending, then by id ascending for stability
    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.vertex.cmp(&b.vertex)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
