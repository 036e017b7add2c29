use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// Label carried by the synthetic root node. Never drawn.
pub const ROOT_LABEL: &str = "^";

/// One node of the frequency-weighted taxonomy.
///
/// `weight` is always `terminal_weight` plus the sum of the children's weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub weight: u64,
    /// Weight of records whose path ends exactly at this node.
    pub terminal_weight: u64,
    /// Set once any record ends here, even one of weight zero.
    pub terminates: bool,
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            weight: 0,
            terminal_weight: 0,
            terminates: false,
            children: BTreeMap::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTree {
    root: TreeNode,
    vocabulary: BTreeSet<String>,
    records: usize,
}

impl Default for WeightedTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedTree {
    pub fn new() -> Self {
        Self {
            root: TreeNode::new(ROOT_LABEL),
            vocabulary: BTreeSet::new(),
            records: 0,
        }
    }

    pub fn from_records<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a crate::parser::Record>,
    {
        let mut tree = Self::new();
        for record in records {
            tree.add(&record.path, record.weight)?;
        }
        Ok(tree)
    }

    /// Adds `weight` to every node along `path`, creating nodes on first sight,
    /// and records that a path terminates at the last node.
    ///
    /// Fails without touching the tree when the total weight would overflow.
    pub fn add<S: AsRef<str>>(&mut self, path: &[S], weight: u64) -> Result<()> {
        if self.root.weight.checked_add(weight).is_none() {
            return Err(Error::WeightOverflow {
                path: path
                    .iter()
                    .map(|segment| segment.as_ref())
                    .collect::<Vec<_>>()
                    .join(";"),
                record: self.records + 1,
            });
        }
        for segment in path {
            let segment = segment.as_ref();
            if !self.vocabulary.contains(segment) {
                self.vocabulary.insert(segment.to_string());
            }
        }
        insert(&mut self.root, path, weight);
        self.records += 1;
        Ok(())
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn total_weight(&self) -> u64 {
        self.root.weight
    }

    /// Distinct labels seen across all paths, sorted.
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Depth of the deepest labelled node; the number of rings the chart needs.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

// No node outweighs the root, so once the root total fits every node on the
// path does too.
fn insert<S: AsRef<str>>(node: &mut TreeNode, path: &[S], weight: u64) {
    node.weight += weight;
    let Some((first, rest)) = path.split_first() else {
        node.terminal_weight += weight;
        node.terminates = true;
        return;
    };
    let label = first.as_ref();
    let child = node
        .children
        .entry(label.to_string())
        .or_insert_with(|| TreeNode::new(label));
    insert(child, rest, weight);
}
