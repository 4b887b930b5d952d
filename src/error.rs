use thiserror::Error;

use crate::range::NodeRange;

/// Errors that can occur in Merkle tree operations.
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Requested range is empty or reaches past the tree size.
    #[error("invalid range [{start}, {end}) for tree of size {size}")]
    InvalidRange {
        /// First leaf index of the range.
        start: usize,
        /// One past the last leaf index of the range.
        end: usize,
        /// Tree size the range was checked against.
        size: usize,
    },

    /// Leaf index outside `[0, size)`.
    #[error("leaf index {index} out of bounds for tree of size {size}")]
    InvalidLeafIndex {
        /// Requested leaf index.
        index: usize,
        /// Tree size the index was checked against.
        size: usize,
    },

    /// A leaf node was requested that was never appended.
    #[error("no leaf stored at {0}")]
    MissingLeaf(NodeRange),

    /// Attempt to store a node beyond the current tree size.
    #[error("cannot store node {range} in tree of size {size}")]
    StoreOutOfBounds {
        /// Range of the rejected node.
        range: NodeRange,
        /// Tree size at the time of the store.
        size: usize,
    },

    /// Audit path does not have the length implied by the tree shape.
    #[error("expected audit path of {expected} hashes, got {actual}")]
    InvalidPathLength {
        /// Length implied by the leaf index and tree size.
        expected: usize,
        /// Length of the supplied path.
        actual: usize,
    },

    /// Failure reported by the backing store.
    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Result type for Merkle tree operations.
pub type Result<T> = std::result::Result<T, MerkleError>;
