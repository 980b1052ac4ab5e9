//! Shared fixtures for the cyclescan criterion benches: seeded graphs at a
//! few grid-size tiers, so every bench group measures the same corpus.

use cyclescan_core::{
    AdjacencyDocument, GrowthConfig, TransitionMatrix, build_transition_matrix, grow,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Grid-size tiers used across the benches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 4×4 grid, 16 nodes.
    Small,
    /// 7×7 grid, 49 nodes.
    Medium,
    /// 11×11 grid, 121 nodes.
    Large,
}

impl SizeTier {
    /// Grid side length for this tier.
    pub fn grid_side(self) -> usize {
        match self {
            SizeTier::Small => 4,
            SizeTier::Medium => 7,
            SizeTier::Large => 11,
        }
    }

    /// Short label for criterion group ids.
    pub fn label(self) -> &'static str {
        match self {
            SizeTier::Small => "S",
            SizeTier::Medium => "M",
            SizeTier::Large => "L",
        }
    }
}

/// Generates the tier's fixture graph from a fixed seed.
pub fn fixture_document(tier: SizeTier, seed: u64) -> AdjacencyDocument {
    let config = GrowthConfig::for_size(tier.grid_side());
    let mut rng = StdRng::seed_from_u64(seed);
    grow(&config, &mut rng).unwrap_or_default()
}

/// The fixture graph's transition matrix.
pub fn fixture_matrix(tier: SizeTier, seed: u64) -> TransitionMatrix {
    let doc = fixture_document(tier, seed);
    build_transition_matrix(&doc).unwrap_or(TransitionMatrix {
        n: 0,
        triplets: Vec::new(),
    })
}
