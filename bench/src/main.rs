use std::collections::VecDeque;
use std::error::Error;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use edge_index_core::{
    betweenness, largest_cluster_size, CachedEdgeList, Directed, EdgeType, Graph,
    IndexedEdgeList, Undirected,
};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("edge-index-bench failed: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    install_tracing_subscriber();

    let mut reports = Vec::new();
    for mode in args.mode.expand() {
        let generated = mode.generate(args.vertices, args.seed);
        info!(
            generator = mode.label(),
            vertices = generated.vertices,
            edges = generated.edges.len(),
            "bench.generated"
        );
        let report = if args.directed {
            run_benchmark::<Directed>(mode, &generated, &args)?
        } else {
            run_benchmark::<Undirected>(mode, &generated, &args)?
        };
        if !args.json {
            report.print();
        }
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn install_tracing_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(about = "Benchmark the indexed edge-list store on synthetic graphs")]
struct Args {
    /// Graph generator to benchmark.
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Target vertex count per generated graph.
    #[arg(long, default_value_t = 10_000)]
    vertices: usize,

    /// RNG seed offset for repeatable graphs.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Build directed stores instead of undirected ones.
    #[arg(long)]
    directed: bool,

    /// Which store variant runs the analytics.
    #[arg(long, value_enum, default_value_t = Store::Both)]
    store: Store,

    /// Skip the one-edge-at-a-time build above this many edges.
    #[arg(long, default_value_t = 50_000)]
    incremental_limit: usize,

    /// Skip betweenness centrality above this many vertices.
    #[arg(long, default_value_t = 2_000)]
    betweenness_limit: usize,

    /// Emit results as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, Eq, PartialEq)]
#[value(rename_all = "kebab_case")]
enum Mode {
    All,
    Lsystem,
    Scalefree,
    Smallworld,
    Random,
    Barbell,
    Dla,
}

impl Mode {
    fn expand(self) -> Vec<Mode> {
        match self {
            Mode::All => vec![
                Mode::Lsystem,
                Mode::Scalefree,
                Mode::Smallworld,
                Mode::Random,
                Mode::Barbell,
                Mode::Dla,
            ],
            other => vec![other],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::Lsystem => "L-system tree",
            Mode::Scalefree => "Scale-free (edge sampling)",
            Mode::Smallworld => "Small-world (Watts-Strogatz)",
            Mode::Random => "Erdos-Renyi random",
            Mode::Barbell => "Barbell (clique-bridge-clique)",
            Mode::Dla => "DLA (organic branching)",
        }
    }

    fn generate(self, vertices: usize, seed: u64) -> GeneratedGraph {
        match self {
            Mode::All | Mode::Lsystem => gen_lsystem(vertices, seed),
            Mode::Scalefree => gen_scale_free(vertices, seed),
            Mode::Smallworld => gen_small_world(vertices, seed),
            Mode::Random => gen_random(vertices, seed),
            Mode::Barbell => gen_barbell(vertices, seed),
            Mode::Dla => gen_dla(vertices, seed),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, Eq, PartialEq)]
#[value(rename_all = "kebab_case")]
enum Store {
    Plain,
    Cached,
    Both,
}

impl Store {
    fn plain(self) -> bool {
        matches!(self, Store::Plain | Store::Both)
    }

    fn cached(self) -> bool {
        matches!(self, Store::Cached | Store::Both)
    }
}

#[derive(Debug, Serialize)]
struct BenchReport {
    generator: &'static str,
    directed: bool,
    vertices: usize,
    edges: usize,
    memory_mb: f64,
    batch_build_ms: f64,
    incremental_build_ms: Option<f64>,
    runs: Vec<StoreRun>,
}

#[derive(Debug, Serialize)]
struct StoreRun {
    store: &'static str,
    /// Two full passes over every vertex's successors.
    neighbour_scan_ms: f64,
    largest_cluster: usize,
    largest_cluster_ms: f64,
    max_betweenness: Option<f64>,
    betweenness_ms: Option<f64>,
}

impl BenchReport {
    fn print(&self) {
        println!("--- {} ---", self.generator);
        println!(
            "{} vertices, {} edges ({}), ~{:.1}MB",
            self.vertices,
            self.edges,
            if self.directed { "directed" } else { "undirected" },
            self.memory_mb
        );
        println!("Batch build:       {:>10.2}ms", self.batch_build_ms);
        match self.incremental_build_ms {
            Some(ms) => println!("Incremental build: {:>10.2}ms", ms),
            None => println!("Incremental build:    skipped"),
        }
        println!();
        println!(
            "{:>8} {:>12} {:>10} {:>12} {:>14} {:>12}",
            "store", "scan", "cluster", "cluster", "betweenness", "betweenness"
        );
        println!("{:->8} {:->12} {:->10} {:->12} {:->14} {:->12}", "", "", "", "", "", "");
        for run in &self.runs {
            println!(
                "{:>8} {:>10.2}ms {:>10} {:>10.2}ms {:>14} {:>12}",
                run.store,
                run.neighbour_scan_ms,
                run.largest_cluster,
                run.largest_cluster_ms,
                run.max_betweenness
                    .map_or_else(|| "-".to_string(), |b| format!("{b:.1}")),
                run.betweenness_ms
                    .map_or_else(|| "skipped".to_string(), |ms| format!("{ms:.1}ms")),
            );
        }
        println!();
    }
}

fn run_benchmark<Ty: EdgeType>(
    mode: Mode,
    generated: &GeneratedGraph,
    args: &Args,
) -> Result<BenchReport, Box<dyn Error>> {
    let t = Instant::now();
    let mut graph = IndexedEdgeList::<Ty>::with_capacity(generated.vertices, generated.edges.len());
    graph.add_edges(&generated.edges)?;
    let batch_build_ms = elapsed_ms(t);

    let incremental_build_ms = if generated.edges.len() <= args.incremental_limit {
        let t = Instant::now();
        let mut stepped = IndexedEdgeList::<Ty>::with_vertex_count(generated.vertices);
        for &(tail, head) in &generated.edges {
            stepped.add_edge(tail, head)?;
        }
        let ms = elapsed_ms(t);
        if stepped != graph {
            return Err("incremental build diverged from batch build".into());
        }
        Some(ms)
    } else {
        None
    };

    let memory_mb = graph.memory_usage() as f64 / 1_048_576.0;
    let mut runs = Vec::new();
    if args.store.plain() {
        runs.push(run_store("plain", &graph, args));
    }
    if args.store.cached() {
        let cached = CachedEdgeList::from(graph.clone());
        runs.push(run_store("cached", &cached, args));
    }

    Ok(BenchReport {
        generator: mode.label(),
        directed: Ty::DIRECTED,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        memory_mb,
        batch_build_ms,
        incremental_build_ms,
        runs,
    })
}

fn run_store<G: Graph>(store: &'static str, graph: &G, args: &Args) -> StoreRun {
    let t = Instant::now();
    let mut touched = 0usize;
    for _ in 0..2 {
        for v in 0..graph.vertex_count() {
            touched += graph.successors(v).sum::<usize>() & 1;
        }
    }
    let neighbour_scan_ms = elapsed_ms(t);
    std::hint::black_box(touched);

    let t = Instant::now();
    let largest_cluster = largest_cluster_size(graph, None);
    let largest_cluster_ms = elapsed_ms(t);

    let (max_betweenness, betweenness_ms) = if graph.vertex_count() <= args.betweenness_limit {
        let t = Instant::now();
        let scores = betweenness(graph, None);
        let ms = elapsed_ms(t);
        (Some(scores.into_iter().fold(0.0, f64::max)), Some(ms))
    } else {
        warn!(
            store,
            vertices = graph.vertex_count(),
            limit = args.betweenness_limit,
            "bench.betweenness_skipped"
        );
        (None, None)
    };

    StoreRun {
        store,
        neighbour_scan_ms,
        largest_cluster,
        largest_cluster_ms,
        max_betweenness,
        betweenness_ms,
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ---------------------------------------------------------------------------
// Generators: O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

struct GeneratedGraph {
    vertices: usize,
    edges: Vec<(usize, usize)>,
}

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// L-system fractal tree: each vertex spawns three children.
///
/// Deep paths (log depth) with exponential width. Ids are assigned in
/// breadth-first order, so edges arrive already sorted by tail.
fn gen_lsystem(vertices: usize, _seed: u64) -> GeneratedGraph {
    let branching = 3;
    let mut edges = Vec::with_capacity(vertices);
    let mut next_id = 1;
    let mut frontier = vec![0];

    while next_id < vertices && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= vertices {
                    break;
                }
                edges.push((parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    GeneratedGraph {
        vertices: vertices.max(1),
        edges,
    }
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint, so
/// vertices with more edges are more likely to be picked.
fn gen_scale_free(vertices: usize, seed: u64) -> GeneratedGraph {
    let edges_per_vertex = 10;
    let clique = 5.min(vertices);
    let mut rng = FastRng::new(12345 + seed);
    let mut edges = Vec::with_capacity(vertices * edges_per_vertex);
    let mut endpoints: Vec<usize> = Vec::with_capacity(vertices * edges_per_vertex * 2);

    for i in 0..clique {
        for j in (i + 1)..clique {
            edges.push((i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_vertex in clique..vertices {
        if endpoints.is_empty() {
            break;
        }
        for _ in 0..edges_per_vertex.min(new_vertex) {
            let target = endpoints[rng.next(endpoints.len())];
            if target != new_vertex {
                edges.push((new_vertex, target));
                endpoints.push(new_vertex);
                endpoints.push(target);
            }
        }
    }

    GeneratedGraph { vertices, edges }
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
fn gen_small_world(vertices: usize, seed: u64) -> GeneratedGraph {
    let k = 10; // neighbours on each side
    let p = 0.05f64; // rewire probability
    let mut rng = FastRng::new(67890 + seed);
    let mut edges = Vec::with_capacity(vertices * k);

    if vertices < 2 {
        return GeneratedGraph { vertices, edges };
    }
    for i in 0..vertices {
        for j in 1..=k.min(vertices - 1) {
            let neighbour = (i + j) % vertices;
            if rng.next_f64() < p {
                let rewired = rng.next(vertices);
                edges.push((i, if rewired != i { rewired } else { neighbour }));
            } else {
                edges.push((i, neighbour));
            }
        }
    }

    GeneratedGraph { vertices, edges }
}

/// Erdos-Renyi: ~10 uniform random edges per vertex, no structure.
fn gen_random(vertices: usize, seed: u64) -> GeneratedGraph {
    let target_edges = vertices * 10;
    let mut rng = FastRng::new(54321 + seed);
    let mut edges = Vec::with_capacity(target_edges);

    if vertices == 0 {
        return GeneratedGraph { vertices, edges };
    }
    for _ in 0..target_edges {
        let tail = rng.next(vertices);
        let head = rng.next(vertices);
        if tail != head {
            edges.push((tail, head));
        }
    }

    GeneratedGraph { vertices, edges }
}

/// Barbell: two dense cliques joined by a chain of ten bridge vertices.
///
/// Every path between the cliques crosses the bridge, which concentrates
/// betweenness there.
fn gen_barbell(vertices: usize, seed: u64) -> GeneratedGraph {
    let bridge_len = 10;
    let clique_size = vertices.saturating_sub(bridge_len) / 2;
    let mut rng = FastRng::new(99999 + seed);
    let mut edges = Vec::with_capacity(clique_size * 40 + bridge_len);

    if clique_size < 2 {
        let edges = (1..vertices).map(|i| (i - 1, i)).collect();
        return GeneratedGraph { vertices, edges };
    }

    let mut clique = |offset: usize, edges: &mut Vec<(usize, usize)>| {
        for i in 0..clique_size {
            for _ in 0..20.min(clique_size - 1) {
                let target = rng.next(clique_size);
                if target != i {
                    edges.push((offset + i, offset + target));
                }
            }
        }
    };

    clique(0, &mut edges);
    let bridge_start = clique_size;
    edges.push((clique_size - 1, bridge_start));
    for id in bridge_start + 1..bridge_start + bridge_len {
        edges.push((id - 1, id));
    }
    let b_start = bridge_start + bridge_len;
    edges.push((b_start - 1, b_start));
    clique(b_start, &mut edges);

    GeneratedGraph {
        vertices: b_start + clique_size,
        edges,
    }
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new vertex attaches to a recent "surface" vertex, with an
/// occasional second long-range edge that closes a loop.
fn gen_dla(vertices: usize, seed: u64) -> GeneratedGraph {
    let mut rng = FastRng::new(77777 + seed);
    let mut edges = Vec::with_capacity(vertices * 2);
    let surface_max = 10_000;
    let mut surface: VecDeque<usize> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_vertex in 1..vertices {
        let attach_to = surface[rng.next(surface.len())];
        edges.push((new_vertex, attach_to));

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_vertex > 1 {
            let other = rng.next(new_vertex);
            if other != attach_to {
                edges.push((new_vertex, other));
            }
        }

        surface.push_back(new_vertex);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    GeneratedGraph {
        vertices: vertices.max(1),
        edges,
    }
}
