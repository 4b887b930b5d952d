use std::collections::HashMap;

use anyhow::Result;

use crate::hash::Element;
use crate::range::NodeRange;
use crate::store::Store;

/// In-memory node cache, the default store. Lives as long as the tree.
#[derive(Debug, Clone)]
pub struct MemStore<E: Element>(HashMap<NodeRange, E>);

impl<E: Element> Default for MemStore<E> {
    fn default() -> Self {
        MemStore::new()
    }
}

impl<E: Element> MemStore<E> {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemStore(HashMap::new())
    }

    /// Creates an empty store with room for `size` nodes.
    pub fn with_capacity(size: usize) -> Self {
        MemStore(HashMap::with_capacity(size))
    }

    /// Iterates over the stored nodes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeRange, &E)> {
        self.0.iter()
    }
}

impl<E: Element> Store<E> for MemStore<E> {
    fn get(&self, range: &NodeRange) -> Result<Option<E>> {
        Ok(self.0.get(range).cloned())
    }

    fn put(&mut self, range: NodeRange, el: E) -> Result<()> {
        if let Some(existing) = self.0.get(&range) {
            ensure!(
                *existing == el,
                "node {} already stored with a different hash",
                range
            );
            return Ok(());
        }

        self.0.insert(range, el);
        Ok(())
    }

    fn contains(&self, range: &NodeRange) -> Result<bool> {
        Ok(self.0.contains_key(range))
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
