use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MerkleError, Result};

/// Half-open span of leaf indices `[start, end)` covered by a tree node.
///
/// Every node of the tree is identified by its range: width 1 is a leaf,
/// anything wider is an interior node whose children are found with
/// [`NodeRange::split`].
///
/// ```text
///                   0,7
///              ______|______
///             /             \
///           0,4             4,7
///          __|__           __|__
///         /     \         /     \
///       0,2     2,4     4,6     6,7
///       / \     / \     / \      |
///     0,1 1,2 2,3 3,4 4,5 5,6   d6
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRange {
    /// First leaf index covered.
    pub start: usize,
    /// One past the last leaf index covered.
    pub end: usize,
}

impl NodeRange {
    /// Creates a range, rejecting empty or inverted spans.
    pub fn new(start: usize, end: usize) -> Result<NodeRange> {
        if start >= end {
            return Err(MerkleError::InvalidRange {
                start,
                end,
                size: end,
            });
        }
        Ok(NodeRange { start, end })
    }

    /// Range of the single leaf `index`.
    #[inline]
    pub fn leaf(index: usize) -> NodeRange {
        NodeRange {
            start: index,
            end: index + 1,
        }
    }

    /// Number of leaves under this node.
    #[inline]
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for width 1 ranges.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.width() == 1
    }

    /// Returns `true` if leaf `index` lies inside the range.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Split point `start + p`, with `p` the largest power of two strictly
    /// less than the width. Only meaningful for interior nodes.
    #[inline]
    pub fn split_point(&self) -> usize {
        self.start + largest_pow2_below(self.width())
    }

    /// Left and right children of an interior node. The left child always
    /// has a power of two width.
    #[inline]
    pub fn split(&self) -> (NodeRange, NodeRange) {
        debug_assert!(!self.is_leaf());
        let k = self.split_point();
        (
            NodeRange {
                start: self.start,
                end: k,
            },
            NodeRange {
                start: k,
                end: self.end,
            },
        )
    }

    /// Checks the range against a tree of `size` leaves.
    pub fn check(&self, size: usize) -> Result<()> {
        if self.start >= self.end || self.end > size {
            return Err(MerkleError::InvalidRange {
                start: self.start,
                end: self.end,
                size,
            });
        }
        Ok(())
    }
}

impl fmt::Display for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.start, self.end)
    }
}

/// Largest power of two strictly less than `n`, for `n > 1`.
///
/// ```text
/// 2 -> 1, 3 -> 2, 4 -> 2, 5 -> 4, 7 -> 4, 8 -> 4, 9 -> 8
/// ```
///
/// Taken from the highest set bit of `n - 1`, so it holds up to `usize::MAX`
/// where `next_power_of_two` would overflow.
#[inline]
pub fn largest_pow2_below(n: usize) -> usize {
    debug_assert!(n > 1);
    1 << (usize::BITS - 1 - (n - 1).leading_zeros())
}

/// Number of audit path hashes for leaf `m` in a tree of `n` leaves, i.e.
/// the depth of the leaf below the root.
pub fn expected_path_len(m: usize, n: usize) -> usize {
    let mut range = NodeRange { start: 0, end: n };
    let mut len = 0;
    while range.width() > 1 {
        let (left, right) = range.split();
        range = if left.contains(m) { left } else { right };
        len += 1;
    }
    len
}
