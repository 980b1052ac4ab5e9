//! Random directed-graph synthesis over a frontier-growth process.
//!
//! Generation runs in four phases over a `size`×`size` coordinate grid:
//!
//! 1. **Spanning walk** — the origin `(0, 0)` is visited first with no
//!    outgoing edge. While any node is ACTIVE, one is drawn uniformly at
//!    random, linked to a uniformly random VISITED neighbour, and visited;
//!    its still-UNVISITED neighbours become ACTIVE. Every edge points to an
//!    earlier-visited node, so this phase is acyclic by construction and
//!    yields out-degree exactly 1 per non-origin node.
//! 2. **Augmentation** — a size-derived number of extra edges between
//!    uniformly random node pairs (self-loops silently dropped). These may
//!    introduce cycles.
//! 3. **Sparsification** — a size-derived number of random nodes lose their
//!    *entire* outgoing edge set (dead-end injection).
//! 4. **Emission** — an [`AdjacencyDocument`] over all `size²` nodes,
//!    sinks mapped to empty lists.
//!
//! The UNVISITED/ACTIVE/VISITED partition lives in an explicit [`Frontier`]
//! owned by the running generation, never in shared state, so any number of
//! generations can run concurrently. All randomness flows through an
//! injected [`Rng`], making a run fully reproducible from a seed.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use rand::Rng;

use crate::addressing::{AddressError, GridAddressing};
use crate::document::AdjacencyDocument;

// ---------------------------------------------------------------------------
// GenerateError
// ---------------------------------------------------------------------------

/// Error produced during graph generation. Any variant aborts the current
/// graph; other graphs of a corpus are unaffected.
#[derive(Debug)]
pub enum GenerateError {
    /// A non-origin ACTIVE node has no VISITED neighbour. A node only
    /// becomes ACTIVE by being adjacent to a freshly visited node, so this
    /// signals a broken algorithm invariant.
    NoVisitedNeighbour {
        /// The ACTIVE node that violated the invariant.
        node: String,
    },
    /// An addressing operation failed on an internally produced identifier.
    Address(AddressError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NoVisitedNeighbour { node } => {
                write!(f, "active node {node} has no visited neighbour")
            }
            GenerateError::Address(e) => write!(f, "addressing failure: {e}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Address(e) => Some(e),
            GenerateError::NoVisitedNeighbour { .. } => None,
        }
    }
}

impl From<AddressError> for GenerateError {
    fn from(e: AddressError) -> Self {
        GenerateError::Address(e)
    }
}

// ---------------------------------------------------------------------------
// GrowthConfig
// ---------------------------------------------------------------------------

/// Tunables for one graph generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthConfig {
    /// Grid side length; the graph has `size²` nodes.
    pub size: usize,
    /// Number of augmentation edges added after the spanning walk.
    pub extra_links: usize,
    /// Number of nodes whose entire outgoing edge set is removed.
    pub unlinks: usize,
}

impl GrowthConfig {
    /// Derives the default density tunables for a grid side length.
    ///
    /// Both counts grow sub-linearly in `size` so edge density scales
    /// sensibly across orders of magnitude:
    /// `extra_links = 3 + (0.5·size)^0.9`, `unlinks = 1 + (0.1·size)^0.7`,
    /// both truncated.
    pub fn for_size(size: usize) -> Self {
        let s = size as f64;
        GrowthConfig {
            size,
            extra_links: (3.0 + (0.5 * s).powf(0.9)) as usize,
            unlinks: (1.0 + (0.1 * s).powf(0.7)) as usize,
        }
    }
}

/// The compiled-in corpus size schedule: a power-law progression
/// `size(i) = trunc(0.5 + i^2.5 / 4^1.5)` over a fixed index range, so a
/// handful of samples covers both small and large grids.
pub fn corpus_sizes() -> Vec<usize> {
    const EXPONENT: f64 = 2.5;
    const FIRST: usize = 4;
    const LAST: usize = 12;

    let base = (FIRST as f64).powf(EXPONENT - 1.0);
    (FIRST..LAST)
        .map(|i| (0.5 + (i as f64).powf(EXPONENT) / base) as usize)
        .collect()
}

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// Visitation phase of one grid node. Transitions are monotonic:
/// `Unvisited → Active → Visited`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unvisited,
    Active,
    Visited,
}

/// The owned UNVISITED/ACTIVE/VISITED partition of a grid during one
/// generation. ACTIVE members are additionally kept in a vector for O(1)
/// uniform sampling; `slot` maps an id to its vector index so removal can
/// swap-remove.
#[derive(Debug)]
pub struct Frontier {
    phase: HashMap<String, Phase>,
    active: Vec<String>,
    slot: HashMap<String, usize>,
}

impl Frontier {
    /// Builds the initial partition: every grid node UNVISITED, then the
    /// origin promoted to ACTIVE.
    ///
    /// # Errors
    ///
    /// Propagates [`AddressError`] from origin encoding (only possible for
    /// a zero-sized grid).
    pub fn new(addr: &GridAddressing) -> Result<Self, GenerateError> {
        let mut frontier = Frontier {
            phase: addr
                .all_nodes()
                .into_iter()
                .map(|id| (id, Phase::Unvisited))
                .collect(),
            active: Vec::new(),
            slot: HashMap::new(),
        };
        let origin = addr.encode(0, 0)?;
        frontier.activate(&origin);
        Ok(frontier)
    }

    /// Number of currently ACTIVE nodes.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Draws one ACTIVE node uniformly at random, or `None` when the
    /// frontier is exhausted. Does not change any state.
    pub fn pick_active<R: Rng>(&self, rng: &mut R) -> Option<String> {
        if self.active.is_empty() {
            None
        } else {
            Some(self.active[rng.gen_range(0..self.active.len())].clone())
        }
    }

    /// The VISITED members of `id`'s grid neighbourhood, sorted.
    pub fn visited_neighbours(
        &self,
        addr: &GridAddressing,
        id: &str,
    ) -> Result<Vec<String>, GenerateError> {
        let mut result: Vec<String> = addr
            .neighborhood(id)?
            .into_iter()
            .filter(|nb| self.phase.get(nb) == Some(&Phase::Visited))
            .collect();
        result.sort();
        Ok(result)
    }

    /// Moves an ACTIVE node to VISITED and promotes its still-UNVISITED
    /// neighbours to ACTIVE.
    pub fn visit(&mut self, addr: &GridAddressing, id: &str) -> Result<(), GenerateError> {
        debug_assert_eq!(self.phase.get(id), Some(&Phase::Active));

        if let Some(index) = self.slot.remove(id) {
            self.active.swap_remove(index);
            if index < self.active.len() {
                self.slot.insert(self.active[index].clone(), index);
            }
        }
        self.phase.insert(id.to_owned(), Phase::Visited);

        for nb in addr.neighborhood(id)? {
            if self.phase.get(&nb) == Some(&Phase::Unvisited) {
                self.activate(&nb);
            }
        }
        Ok(())
    }

    fn activate(&mut self, id: &str) {
        self.phase.insert(id.to_owned(), Phase::Active);
        self.slot.insert(id.to_owned(), self.active.len());
        self.active.push(id.to_owned());
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Accumulates directed edges during generation. Self-loops are dropped at
/// insertion; successor sets keep edges distinct.
#[derive(Debug, Default)]
struct EdgeSet {
    links: BTreeMap<String, BTreeSet<String>>,
}

impl EdgeSet {
    fn link(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        self.links
            .entry(from.to_owned())
            .or_default()
            .insert(to.to_owned());
    }

    fn unlink_all(&mut self, node: &str) {
        self.links.remove(node);
    }
}

/// Runs only the spanning walk (phase 1), returning the acyclic forest as
/// a document. Exposed for callers that need the pre-augmentation graph.
pub fn grow_spanning<R: Rng>(size: usize, rng: &mut R) -> Result<AdjacencyDocument, GenerateError> {
    let addr = GridAddressing::new(size);
    let (edges, _) = spanning_walk(&addr, rng)?;
    Ok(emit(&addr, edges))
}

/// Runs the full generation pass: spanning walk, augmentation,
/// sparsification, emission. Single deterministic pass for a fixed `rng`.
///
/// # Errors
///
/// [`GenerateError::NoVisitedNeighbour`] on an invariant breach; the graph
/// is abandoned, no partial document is produced.
pub fn grow<R: Rng>(config: &GrowthConfig, rng: &mut R) -> Result<AdjacencyDocument, GenerateError> {
    let addr = GridAddressing::new(config.size);
    let (mut edges, _) = spanning_walk(&addr, rng)?;

    let nodes = addr.all_nodes();
    let n = nodes.len();

    // Augmentation: uniformly random ordered pairs; self-loops dropped by
    // EdgeSet::link, duplicates collapse into the successor set.
    for _ in 0..config.extra_links {
        let from = &nodes[rng.gen_range(0..n)];
        let to = &nodes[rng.gen_range(0..n)];
        edges.link(from, to);
    }

    // Sparsification: the drawn node loses its whole outgoing edge set,
    // not a single edge. Dead-end injection, kept as the original behaves.
    for _ in 0..config.unlinks {
        let node = &nodes[rng.gen_range(0..n)];
        edges.unlink_all(node);
    }

    Ok(emit(&addr, edges))
}

/// Phase 1: the frontier spanning walk. Returns the recorded edges and the
/// visitation order (origin first).
fn spanning_walk<R: Rng>(
    addr: &GridAddressing,
    rng: &mut R,
) -> Result<(EdgeSet, Vec<String>), GenerateError> {
    let mut frontier = Frontier::new(addr)?;
    let mut edges = EdgeSet::default();
    let mut order = Vec::with_capacity(addr.size() * addr.size());

    // The origin is consumed before the loop and records no edge.
    let origin = addr.encode(0, 0)?;
    frontier.visit(addr, &origin)?;
    order.push(origin);

    while let Some(node) = frontier.pick_active(rng) {
        let visited = frontier.visited_neighbours(addr, &node)?;
        if visited.is_empty() {
            return Err(GenerateError::NoVisitedNeighbour { node });
        }
        let target = &visited[rng.gen_range(0..visited.len())];
        edges.link(&node, target);
        frontier.visit(addr, &node)?;
        order.push(node);
    }

    Ok((edges, order))
}

/// Phase 4: the document over every grid node, sinks included.
fn emit(addr: &GridAddressing, edges: EdgeSet) -> AdjacencyDocument {
    let mut links = edges.links;
    let map: BTreeMap<String, Vec<String>> = addr
        .all_nodes()
        .into_iter()
        .map(|id| {
            let succ = links
                .remove(&id)
                .map(|set| set.into_iter().collect())
                .unwrap_or_default();
            (id, succ)
        })
        .collect();
    AdjacencyDocument::from_map(map)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn document_covers_the_grid_exactly() {
        for size in [1, 2, 4, 7] {
            let config = GrowthConfig::for_size(size);
            let doc = grow(&config, &mut seeded(42)).expect("generates");
            assert_eq!(doc.node_count(), size * size);
            let addr = GridAddressing::new(size);
            for id in addr.all_nodes() {
                assert!(doc.contains(&id), "missing node {id}");
            }
        }
    }

    #[test]
    fn successors_are_always_valid_grid_nodes() {
        let config = GrowthConfig::for_size(6);
        let doc = grow(&config, &mut seeded(7)).expect("generates");
        for (id, succ) in doc.iter() {
            for s in succ {
                assert!(doc.contains(s), "dangling successor {s} of {id}");
                assert_ne!(s, id, "self-loop on {id}");
            }
        }
    }

    #[test]
    fn spanning_walk_has_out_degree_one_except_origin() {
        let addr = GridAddressing::new(5);
        let doc = grow_spanning(5, &mut seeded(3)).expect("generates");
        let origin = addr.encode(0, 0).expect("in range");
        for (id, succ) in doc.iter() {
            let expected = usize::from(*id != origin);
            assert_eq!(succ.len(), expected, "node {id}");
        }
    }

    #[test]
    fn spanning_walk_edges_point_to_earlier_visited_nodes() {
        let addr = GridAddressing::new(6);
        let mut rng = seeded(11);
        let (edges, order) = spanning_walk(&addr, &mut rng).expect("walks");
        let rank: HashMap<&String, usize> =
            order.iter().enumerate().map(|(k, id)| (id, k)).collect();
        for (from, targets) in &edges.links {
            for to in targets {
                assert!(
                    rank[to] < rank[from],
                    "edge {from}->{to} does not point backwards in visit order"
                );
            }
        }
    }

    #[test]
    fn generation_is_deterministic_under_a_fixed_seed() {
        let config = GrowthConfig::for_size(5);
        let a = grow(&config, &mut seeded(99)).expect("generates");
        let b = grow(&config, &mut seeded(99)).expect("generates");
        assert_eq!(a, b);
        let c = grow(&config, &mut seeded(100)).expect("generates");
        assert_ne!(a, c, "different seeds produced identical graphs");
    }

    #[test]
    fn sparsification_removes_entire_outgoing_set() {
        // unlinks is intentionally whole-set removal (dead-end injection).
        // With enough unlink draws on a small grid, at least one non-origin
        // node must end up with zero successors despite the spanning walk
        // giving every non-origin node out-degree 1.
        let config = GrowthConfig {
            size: 3,
            extra_links: 0,
            unlinks: 20,
        };
        let doc = grow(&config, &mut seeded(5)).expect("generates");
        let addr = GridAddressing::new(3);
        let origin = addr.encode(0, 0).expect("in range");
        let emptied = doc
            .iter()
            .filter(|(id, succ)| **id != origin && succ.is_empty())
            .count();
        assert!(emptied > 0, "no node lost its outgoing edge set");
    }

    #[test]
    fn growth_config_formulas_match_expected_values() {
        let c = GrowthConfig::for_size(10);
        // 3 + 5^0.9 = 7.25.. -> 7; 1 + 1^0.7 = 2.0 -> 2
        assert_eq!(c.extra_links, 7);
        assert_eq!(c.unlinks, 2);
        let c = GrowthConfig::for_size(100);
        // 3 + 50^0.9 = 36.8.. -> 36; 1 + 10^0.7 = 6.01.. -> 6
        assert_eq!(c.extra_links, 36);
        assert_eq!(c.unlinks, 6);
    }

    #[test]
    fn corpus_sizes_follow_a_power_law_progression() {
        let sizes = corpus_sizes();
        assert_eq!(sizes.first(), Some(&4));
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        // Power-law growth: later gaps strictly dominate earlier ones.
        let first_gap = sizes[1] - sizes[0];
        let last_gap = sizes[sizes.len() - 1] - sizes[sizes.len() - 2];
        assert!(last_gap > first_gap);
    }

    #[test]
    fn single_node_grid_generates_one_sink() {
        let config = GrowthConfig {
            size: 1,
            extra_links: 3,
            unlinks: 1,
        };
        let doc = grow(&config, &mut seeded(1)).expect("generates");
        assert_eq!(doc.node_count(), 1);
        let (_, succ) = doc.iter().next().expect("one node");
        assert!(succ.is_empty());
    }
}
