use std::fmt::Debug;

use anyhow::Result;

use crate::hash::Element;
use crate::range::NodeRange;

mod mem;

pub use mem::MemStore;

/// Backing store of the merkle tree node cache.
///
/// Maps a node range to its hash. The tree only ever adds entries: a node's
/// hash is fixed once its range exists, so implementations never need to
/// evict or overwrite. Backends that keep the cache somewhere other than
/// memory implement this trait and are handed to
/// [`MerkleTree::with_store`](../merkle/struct.MerkleTree.html#method.with_store).
pub trait Store<E: Element>: Debug + Send + Sync {
    /// Returns the hash stored for `range`, if any.
    fn get(&self, range: &NodeRange) -> Result<Option<E>>;

    /// Stores the hash of `range`.
    fn put(&mut self, range: NodeRange, el: E) -> Result<()>;

    /// Returns `true` if a hash is stored for `range`.
    fn contains(&self, range: &NodeRange) -> Result<bool> {
        Ok(self.get(range)?.is_some())
    }

    /// Number of stored nodes.
    fn len(&self) -> usize;

    /// Returns `true` if no node has been stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
