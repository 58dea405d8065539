use std::collections::VecDeque;

use crate::frequency::FrequencyEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, weight: usize) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    #[inline(always)]
    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Joins two nodes under a new internal node; `left` is the first
    /// node taken off the working list.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Huffman tree built by repeatedly merging the two lightest nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree from a frequency list sorted by ascending count.
    ///
    /// Returns `None` when `entries` is empty. A single entry yields a
    /// tree made of one leaf.
    pub fn build(entries: &[FrequencyEntry]) -> Option<Self> {
        debug_assert!(
            entries.windows(2).all(|w| w[0].count <= w[1].count),
            "frequency entries must be sorted by ascending count"
        );

        let mut working: VecDeque<HuffNode> = entries
            .iter()
            .map(|e| HuffNode::leaf(e.symbol, e.count))
            .collect();

        while working.len() > 1 {
            let left = working.pop_front()?;
            let right = working.pop_front()?;
            let node = HuffNode::merge(left, right);

            // Ties go after every node of equal weight already queued.
            let weight = node.weight();
            let at = working
                .iter()
                .position(|n| n.weight() > weight)
                .unwrap_or(working.len());
            working.insert(at, node);
        }

        let root = working.pop_front()?;
        log::trace!("built huffman tree of weight {} and depth {}", root.weight(), depth(&root));

        Some(Self { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Sum of all leaf weights, i.e. the length of the counted input.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    /// Leaves in left-to-right order as `(symbol, weight)` pairs.
    pub fn leaves(&self) -> Vec<(u8, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, weight } => out.push((*symbol, *weight)),
                HuffNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        out
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        depth(&self.root)
    }
}

fn depth(node: &HuffNode) -> usize {
    match node {
        HuffNode::Leaf { .. } => 0,
        HuffNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
    }
}
