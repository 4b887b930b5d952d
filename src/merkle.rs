use std::marker::PhantomData;

use log::debug;

use crate::error::{MerkleError, Result};
use crate::hash::{Algorithm, Element, Hashable, Sha256Algorithm};
use crate::proof::{self, AuditProof};
use crate::range::{expected_path_len, NodeRange};
use crate::store::{MemStore, Store};

/// Append-only Merkle hash tree.
///
/// Every node is identified by the range of leaves it covers, `(k1, k2)`.
/// Leaves are installed by [`add_leaf`]; interior nodes are computed on
/// demand by [`mth`] and memoized in the [`Store`]:
///
/// ```text
///         0,3              0,4
///        __|__            __|__
///       /     \          /     \
///     0,2     2,3      0,2     2,4
///    /   \     |       / \     / \
///  0,1   1,2  d2     0,1 1,2 2,3 3,4
///   |     |           |   |   |   |
///  d0    d1          d0  d1  d2  d3
/// ```
///
/// An interior node `(k1, k2)` splits at `k1 + p`, where `p` is the largest
/// power of two strictly less than `k2 - k1`:
///
/// ```text
/// mth(k1, k1 + 1) = ALG(0x00 || d(k1))
/// mth(k1, k2)     = ALG(0x01 || mth(k1, k1 + p) || mth(k1 + p, k2))
/// ```
///
/// Because the split only depends on the range, a node's hash never changes
/// as the tree grows, and the root for any earlier size stays available.
///
/// [`add_leaf`]: #method.add_leaf
/// [`mth`]: #method.mth
#[derive(Debug, Clone)]
pub struct MerkleTree<T = [u8; 32], A = Sha256Algorithm, K = MemStore<T>>
where
    T: Element,
    A: Algorithm<T>,
    K: Store<T>,
{
    data: K,
    leafs: usize,
    alg: A,

    _t: PhantomData<T>,
}

impl<T: Element, A: Algorithm<T> + Default, K: Store<T> + Default> Default for MerkleTree<T, A, K> {
    fn default() -> Self {
        Self::with_store(A::default(), K::default())
    }
}

impl<T: Element, A: Algorithm<T> + Default, K: Store<T> + Default> MerkleTree<T, A, K> {
    /// Creates an empty tree with the default algorithm and store.
    pub fn new() -> MerkleTree<T, A, K> {
        Self::default()
    }

    /// Creates a tree from a sequence of raw entries.
    pub fn try_from_iter<D: AsRef<[u8]>, I: IntoIterator<Item = D>>(
        into: I,
    ) -> Result<MerkleTree<T, A, K>> {
        let mut mt = Self::new();
        mt.add_leafs(into)?;
        Ok(mt)
    }

    /// Creates a tree from a list of hashable objects.
    pub fn from_data<O: Hashable<A>, I: IntoIterator<Item = O>>(
        data: I,
    ) -> Result<MerkleTree<T, A, K>> {
        let mut mt = Self::new();
        for item in data {
            mt.push(&item)?;
        }
        Ok(mt)
    }
}

impl<T: Element, A: Algorithm<T>, K: Store<T> + Default> MerkleTree<T, A, K> {
    /// Creates an empty tree hashing with `alg`.
    pub fn with_algorithm(alg: A) -> MerkleTree<T, A, K> {
        Self::with_store(alg, K::default())
    }
}

impl<T: Element, A: Algorithm<T>, K: Store<T>> MerkleTree<T, A, K> {
    /// Creates an empty tree hashing with `alg` and caching nodes in `data`.
    pub fn with_store(alg: A, data: K) -> MerkleTree<T, A, K> {
        MerkleTree {
            data,
            leafs: 0,
            alg,
            _t: PhantomData,
        }
    }

    /// Creates a tree over an already populated `Store`. The specified
    /// `size` is the number of leafs the store holds.
    pub fn from_store(alg: A, data: K, size: usize) -> Result<MerkleTree<T, A, K>> {
        for index in 0..size {
            let range = NodeRange::leaf(index);
            if !data.contains(&range)? {
                return Err(MerkleError::MissingLeaf(range));
            }
        }

        Ok(MerkleTree {
            data,
            leafs: size,
            alg,
            _t: PhantomData,
        })
    }

    /// Appends a leaf for the raw entry `data`: `mth(n, n + 1) = ALG(0x00 || data)`.
    ///
    /// Existing nodes are left untouched, so every earlier root stays valid.
    pub fn add_leaf(&mut self, data: &[u8]) -> Result<()> {
        let leaf = self.alg.leaf(data);
        self.install_leaf(leaf)
    }

    /// Appends a leaf for a hashable entry.
    pub fn push(&mut self, data: &dyn Hashable<A>) -> Result<()> {
        let leaf = self.alg.leaf_data(data);
        self.install_leaf(leaf)
    }

    /// Appends a leaf for each raw entry, in order.
    pub fn add_leafs<D: AsRef<[u8]>, I: IntoIterator<Item = D>>(&mut self, into: I) -> Result<()> {
        for item in into {
            self.add_leaf(item.as_ref())?;
        }
        Ok(())
    }

    fn install_leaf(&mut self, leaf: T) -> Result<()> {
        let range = NodeRange::leaf(self.leafs);
        self.leafs += 1;
        if let Err(e) = self.store_node(range, leaf) {
            self.leafs -= 1;
            return Err(e);
        }

        debug!("appended leaf {}, tree size {}", range, self.leafs);
        Ok(())
    }

    fn retrieve_node(&self, range: NodeRange) -> Result<Option<T>> {
        Ok(self.data.get(&range)?)
    }

    fn store_node(&mut self, range: NodeRange, hash: T) -> Result<()> {
        if range.start >= range.end || range.end > self.leafs {
            return Err(MerkleError::StoreOutOfBounds {
                range,
                size: self.leafs,
            });
        }

        self.data.put(range, hash)?;
        Ok(())
    }

    /// Merkle tree hash of the node covering leaves `[k1, k2)`.
    ///
    /// Interior nodes missing from the store are computed recursively and
    /// stored, so each node is hashed at most once over the tree's lifetime.
    pub fn mth(&mut self, k1: usize, k2: usize) -> Result<T> {
        let range = NodeRange { start: k1, end: k2 };
        range.check(self.leafs)?;
        self.node_hash(range)
    }

    fn node_hash(&mut self, range: NodeRange) -> Result<T> {
        if let Some(hash) = self.retrieve_node(range)? {
            return Ok(hash);
        }

        // Leafs only come from `install_leaf`.
        if range.is_leaf() {
            return Err(MerkleError::MissingLeaf(range));
        }

        let (left, right) = range.split();
        let lhs = self.node_hash(left)?;
        let rhs = self.node_hash(right)?;
        let hash = self.alg.node(lhs, rhs);
        self.store_node(range, hash.clone())?;

        debug!("computed node {}", range);
        Ok(hash)
    }

    /// Root hash of the tree as it was at `size` leafs (the current size
    /// when `None`). The root of the empty tree is `ALG("")`.
    pub fn root_hash(&mut self, size: Option<usize>) -> Result<T> {
        let n = size.unwrap_or(self.leafs);
        if n > self.leafs {
            return Err(MerkleError::InvalidRange {
                start: 0,
                end: n,
                size: self.leafs,
            });
        }

        if n == 0 {
            return Ok(self.alg.empty());
        }

        self.node_hash(NodeRange { start: 0, end: n })
    }

    /// Hash of leaf `m`.
    pub fn leaf_hash(&mut self, m: usize) -> Result<T> {
        if m >= self.leafs {
            return Err(MerkleError::InvalidLeafIndex {
                index: m,
                size: self.leafs,
            });
        }

        self.node_hash(NodeRange::leaf(m))
    }

    /// Audit path proving leaf `m` is included in the root of the tree at
    /// `size` leafs (the current size when `None`).
    ///
    /// Hashes are ordered from the sibling of the leaf up to the child of
    /// the root. For a tree of 7 entries:
    ///
    /// ```text
    /// d0: [mth(1,2), mth(2,4), mth(4,7)]
    /// d3: [mth(2,3), mth(0,2), mth(4,7)]
    /// d4: [mth(5,6), mth(6,7), mth(0,4)]
    /// d6: [mth(4,6), mth(0,4)]
    /// ```
    pub fn audit_path(&mut self, m: usize, size: Option<usize>) -> Result<Vec<T>> {
        let n = self.checked_size(m, size)?;

        let mut path = Vec::with_capacity(expected_path_len(m, n));
        self.collect_audit_path(m, NodeRange { start: 0, end: n }, &mut path)?;
        Ok(path)
    }

    fn collect_audit_path(&mut self, m: usize, range: NodeRange, path: &mut Vec<T>) -> Result<()> {
        if range.is_leaf() {
            return Ok(());
        }

        // The sibling is pushed after descending, so the path runs leaf to root.
        let (left, right) = range.split();
        if left.contains(m) {
            self.collect_audit_path(m, left, path)?;
            path.push(self.node_hash(right)?);
        } else {
            self.collect_audit_path(m, right, path)?;
            path.push(self.node_hash(left)?);
        }
        Ok(())
    }

    /// Bundles leaf `m`, its audit path and the root at `size` leafs into a
    /// self-contained proof.
    pub fn audit_proof(&mut self, m: usize, size: Option<usize>) -> Result<AuditProof<T>> {
        let n = self.checked_size(m, size)?;
        let path = self.audit_path(m, Some(n))?;
        let leaf = self.leaf_hash(m)?;
        let root = self.root_hash(Some(n))?;

        AuditProof::new(m, n, leaf, path, root)
    }

    /// Checks an audit path with this tree's algorithm. The tree's own nodes
    /// are not consulted; see [`proof::validate_path`].
    pub fn validate_path(
        &self,
        m: usize,
        n: usize,
        leaf_hash: &T,
        root_hash: &T,
        audit_path: &[T],
    ) -> Result<bool> {
        let mut alg = self.alg.clone();
        proof::validate_path(&mut alg, m, n, leaf_hash, root_hash, audit_path)
    }

    fn checked_size(&self, m: usize, size: Option<usize>) -> Result<usize> {
        let n = size.unwrap_or(self.leafs);
        if n > self.leafs {
            return Err(MerkleError::InvalidRange {
                start: 0,
                end: n,
                size: self.leafs,
            });
        }
        if m >= n {
            return Err(MerkleError::InvalidLeafIndex { index: m, size: n });
        }
        Ok(n)
    }

    /// Returns the number of leafs appended so far.
    #[inline]
    pub fn size(&self) -> usize {
        self.leafs
    }

    /// Returns the number of leafs appended so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.leafs
    }

    /// Returns `true` if no leaf has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leafs == 0
    }

    /// Returns the number of nodes (leafs and interior) held in the store.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the backing store.
    #[inline]
    pub fn store(&self) -> &K {
        &self.data
    }
}
