use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{MerkleError, Result};
use crate::hash::{Algorithm, Element, Hashable};
use crate::range::{expected_path_len, NodeRange};

/// Checks that `leaf_hash` is leaf `m` of the tree of `n` leafs whose root is
/// `root_hash`, as demonstrated by `audit_path`.
///
/// Needs no tree instance: the root is recomputed from the path alone by
/// walking the same splits as [`MerkleTree::audit_path`], consuming the path
/// from its last element (the root's child) down to its first (the leaf's
/// sibling).
///
/// Returns `Ok(false)` when the recomputed root differs from `root_hash`.
/// A request that cannot describe a proof at all is an error instead:
/// `n == 0` or `m >= n` is [`MerkleError::InvalidLeafIndex`], a path of the
/// wrong length for `(m, n)` is [`MerkleError::InvalidPathLength`].
///
/// [`MerkleTree::audit_path`]: ../merkle/struct.MerkleTree.html#method.audit_path
pub fn validate_path<T: Element, A: Algorithm<T>>(
    alg: &mut A,
    m: usize,
    n: usize,
    leaf_hash: &T,
    root_hash: &T,
    audit_path: &[T],
) -> Result<bool> {
    if m >= n {
        return Err(MerkleError::InvalidLeafIndex { index: m, size: n });
    }

    let expected = expected_path_len(m, n);
    if audit_path.len() != expected {
        return Err(MerkleError::InvalidPathLength {
            expected,
            actual: audit_path.len(),
        });
    }

    let hash = hash_audit_path(alg, m, NodeRange { start: 0, end: n }, leaf_hash, audit_path);
    Ok(&hash == root_hash)
}

// `path` holds the siblings still to be consumed; its last element belongs
// to `range`.
fn hash_audit_path<T: Element, A: Algorithm<T>>(
    alg: &mut A,
    m: usize,
    range: NodeRange,
    leaf_hash: &T,
    path: &[T],
) -> T {
    let (sibling, rest) = match path.split_last() {
        Some(split) => split,
        None => return leaf_hash.clone(),
    };

    debug_assert!(!range.is_leaf());
    let (left, right) = range.split();
    if left.contains(m) {
        let hash = hash_audit_path(alg, m, left, leaf_hash, rest);
        alg.node(hash, sibling.clone())
    } else {
        let hash = hash_audit_path(alg, m, right, leaf_hash, rest);
        alg.node(sibling.clone(), hash)
    }
}

/// Merkle tree inclusion proof for data element `index`, for which
/// `leaf = ALG(0x00 || d(index))`.
///
/// Carries everything a verifier needs, independent of the tree it was
/// generated from:
///
/// ```text
/// [ leaf ] + [ h_leaf_sibling ... h_root_child ] + [ root ] at size n
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AuditProof<T> {
    index: usize,
    size: usize,
    leaf: T,
    path: Vec<T>,
    root: T,
}

impl<T: Element> AuditProof<T> {
    /// Creates new MT inclusion proof
    pub fn new(index: usize, size: usize, leaf: T, path: Vec<T>, root: T) -> Result<AuditProof<T>> {
        if index >= size {
            return Err(MerkleError::InvalidLeafIndex { index, size });
        }

        let expected = expected_path_len(index, size);
        if path.len() != expected {
            return Err(MerkleError::InvalidPathLength {
                expected,
                actual: path.len(),
            });
        }

        Ok(AuditProof {
            index,
            size,
            leaf,
            path,
            root,
        })
    }

    /// Index of the proven leaf.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tree size the proof was generated for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return proof target leaf
    pub fn leaf(&self) -> &T {
        &self.leaf
    }

    /// Returns the audit path, leaf sibling first.
    pub fn path(&self) -> &Vec<T> {
        &self.path
    }

    /// Return tree root
    pub fn root(&self) -> &T {
        &self.root
    }

    /// Verifies MT inclusion proof. A proof whose shape does not match its
    /// index and size (e.g. a tampered deserialized one) does not verify.
    pub fn validate<A: Algorithm<T>>(&self, alg: &mut A) -> bool {
        validate_path(alg, self.index, self.size, &self.leaf, &self.root, &self.path)
            .unwrap_or(false)
    }

    /// Verifies MT inclusion proof and that `data` is the original entry for
    /// which the proof was generated.
    pub fn validate_with_data<A: Algorithm<T>>(&self, alg: &mut A, data: &dyn Hashable<A>) -> bool {
        alg.leaf_data(data) == self.leaf && self.validate(alg)
    }
}

impl<T: Element> fmt::Display for AuditProof<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "--- audit proof")?;
        writeln!(f, "m:    {}", self.index)?;
        writeln!(f, "n:    {}", self.size)?;
        writeln!(f, "leaf: {}", hex::encode(&self.leaf))?;
        write!(f, "path:")?;
        for hash in &self.path {
            write!(f, "\n    - {}", hex::encode(hash))?;
        }
        write!(f, "\nroot: {}", hex::encode(&self.root))
    }
}

/// Verifies a batch of proofs in parallel. Verification shares no state, so
/// each worker hashes with its own clone of `alg`.
pub fn validate_batch<T, A>(alg: &A, proofs: &[AuditProof<T>]) -> Vec<bool>
where
    T: Element,
    A: Algorithm<T> + Send + Sync,
{
    proofs
        .par_iter()
        .map_init(|| alg.clone(), |a, proof| proof.validate(a))
        .collect()
}
