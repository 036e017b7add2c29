use std::collections::BTreeMap;

use crate::tree::{TreeNode, WeightedTree};

/// A node's share of the full circle, in turn fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct RingEntry {
    pub label: String,
    pub weight: u64,
    pub size: f64,
    pub offset: f64,
}

impl RingEntry {
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }
}

/// Angular intervals of every node, grouped by depth. Depth 0 holds the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadialPartition {
    tiers: BTreeMap<usize, Vec<RingEntry>>,
}

impl RadialPartition {
    pub fn tier(&self, depth: usize) -> Option<&[RingEntry]> {
        self.tiers.get(&depth).map(Vec::as_slice)
    }

    pub fn tiers(&self) -> &BTreeMap<usize, Vec<RingEntry>> {
        &self.tiers
    }

    /// Drawable rings, innermost first. The root tier is dropped.
    pub fn rings(&self) -> impl Iterator<Item = (usize, &[RingEntry])> {
        self.tiers
            .range(1..)
            .map(|(depth, entries)| (*depth, entries.as_slice()))
    }

    pub fn ring_count(&self) -> usize {
        self.tiers.range(1..).count()
    }
}

pub fn partition(tree: &WeightedTree) -> RadialPartition {
    let mut tiers = BTreeMap::new();
    visit(tree.root(), 0, 1.0, 0.0, &mut tiers);
    RadialPartition { tiers }
}

// Records ending at `node` take the leading part of its interval; children
// follow in label order.
fn visit(
    node: &TreeNode,
    depth: usize,
    size: f64,
    offset: f64,
    tiers: &mut BTreeMap<usize, Vec<RingEntry>>,
) {
    let share = |weight: u64| {
        if node.weight == 0 {
            0.0
        } else {
            size * weight as f64 / node.weight as f64
        }
    };

    let mut cursor = offset + share(node.terminal_weight);
    for child in node.children.values() {
        let child_size = share(child.weight);
        visit(child, depth + 1, child_size, cursor, tiers);
        cursor += child_size;
    }

    tiers.entry(depth).or_default().push(RingEntry {
        label: node.label.clone(),
        weight: node.weight,
        size,
        offset,
    });
}
