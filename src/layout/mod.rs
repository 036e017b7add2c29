pub mod label_placement;
pub mod partition;
pub mod wedge;

use crate::config::LayoutConfig;
use crate::tree::WeightedTree;

pub use label_placement::{LabelCandidate, LabelLayout, label_candidate, place_labels};
pub use partition::{RadialPartition, RingEntry, partition};
pub use wedge::{PathCommand, WedgeLayout, layout_wedges, polar_to_cartesian};

#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub level: usize,
    pub wedges: Vec<WedgeLayout>,
    pub labels: Vec<LabelLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunburstLayout {
    pub width: f64,
    pub height: f64,
    pub center: (f64, f64),
    pub ring_depth: f64,
    /// Innermost first; later rings draw over earlier ones.
    pub rings: Vec<RingLayout>,
    /// Sorted distinct labels, the basis of colour assignment.
    pub vocabulary: Vec<String>,
}

impl SunburstLayout {
    pub fn wedge_count(&self) -> usize {
        self.rings.iter().map(|ring| ring.wedges.len()).sum()
    }

    pub fn label_count(&self) -> usize {
        self.rings.iter().map(|ring| ring.labels.len()).sum()
    }
}

/// Wedges and placed labels for one ring of the chart.
pub fn layout_ring(
    level: usize,
    entries: &[RingEntry],
    center: (f64, f64),
    config: &LayoutConfig,
) -> RingLayout {
    let wedges = layout_wedges(level, entries, config.scaled_ring_depth());
    let candidates: Vec<LabelCandidate> = wedges
        .iter()
        .map(|wedge| {
            label_candidate(
                wedge,
                center,
                config.scaled_label_nudge(),
                config.uppercase_labels,
            )
        })
        .collect();
    let labels = place_labels(candidates, config.scaled_label_spacing());
    tracing::debug!(
        level,
        wedges = wedges.len(),
        labels = labels.len(),
        "laid out ring"
    );
    RingLayout {
        level,
        wedges,
        labels,
    }
}

pub fn compute_layout(tree: &WeightedTree, config: &LayoutConfig) -> SunburstLayout {
    let size = config.canvas_size();
    let center = (size / 2.0, size / 2.0);
    let partition = partition(tree);

    let depth = tree.depth();
    if depth > config.max_rings {
        tracing::warn!(
            rings = depth,
            max_rings = config.max_rings,
            "taxonomy is deeper than the canvas; outer rings will be clipped"
        );
    }

    let rings: Vec<RingLayout> = partition
        .rings()
        .map(|(depth, entries)| layout_ring(depth, entries, center, config))
        .collect();

    SunburstLayout {
        width: size,
        height: size,
        center,
        ring_depth: config.scaled_ring_depth(),
        rings,
        vocabulary: tree.vocabulary().iter().cloned().collect(),
    }
}
