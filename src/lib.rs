//! Append-only _Merkle Hash Tree_ with audit paths.
//!
//! The tree grows one leaf at a time, commits to every prefix of its entries
//! with a root hash, and proves the inclusion of any entry under any of
//! those roots with an audit path of `O(log n)` hashes.
//!
//! This tree implementation uses encoding scheme as in _Certificate Transparency_
//! [RFC 6962](https://tools.ietf.org/html/rfc6962):
//!
//! ```text
//! MTH({}) = ALG().
//! MTH({d(0)}) = ALG(0x00 || d(0)).
//! For n > 1, let k be the largest power of two smaller than n (i.e.,
//! k < n <= 2k).  The Merkle tree Hash of an n-element list D[n] is then
//! defined recursively as
//! MTH(D[n]) = ALG(0x01 || MTH(D[0:k]) || MTH(D[k:n])),
//! ```
//!
//! Link: [](https://en.wikipedia.org/wiki/Merkle_tree)
//!
//! # Implementation choices
//!
//! Nodes are addressed by the range of leaves they cover, `(k1, k2)`. The
//! split rule only depends on the range, so a node computed once never
//! changes as the tree grows: interior nodes are computed lazily and memoized
//! in a [`Store`], and the root of every earlier size stays retrievable.
//!
//! The hash algorithm is an [`Algorithm`], which complements [`Hasher`] to be
//! reusable and follows the idea that the result hash is a mapping of the
//! data stream. It is handed to the tree at construction; [`Sha256Algorithm`]
//! is the default.
//!
//! Verification ([`validate_path`]) needs nothing but the algorithm and the
//! proof, so it can run anywhere, at any time, in parallel.
//!
//! [`Hasher`]: std::hash::Hasher
//!
//! # Interface
//!
//! ```text
//! - add_leaf (entry)
//! - root_hash (n?) -> hash
//! - leaf_hash (m) -> hash
//! - audit_path (m, n?) -> [hash]
//! - validate_path (m, n, leaf, root, path) -> bool
//! ```
//!
//! # Quick start
//!
//! ```
//! use merkle_hashtree::{validate_path, Algorithm, MerkleTree, Sha256Algorithm};
//!
//! let mut mt: MerkleTree = MerkleTree::new();
//! for entry in ["d0", "d1", "d2", "d3", "d4", "d5", "d6"].iter() {
//!     mt.add_leaf(entry.as_bytes()).unwrap();
//! }
//!
//! let root = mt.root_hash(None).unwrap();
//! let leaf = mt.leaf_hash(4).unwrap();
//! let path = mt.audit_path(4, None).unwrap();
//! assert_eq!(path, vec![
//!     mt.mth(5, 6).unwrap(),
//!     mt.mth(6, 7).unwrap(),
//!     mt.mth(0, 4).unwrap(),
//! ]);
//!
//! let mut alg = Sha256Algorithm::new();
//! assert_eq!(leaf, alg.leaf(b"d4"));
//! assert!(validate_path(&mut alg, 4, 7, &leaf, &root, &path).unwrap());
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate anyhow;

/// Error types for Merkle tree operations.
pub mod error;

/// Hash infrastructure for items in Merkle tree.
pub mod hash;

/// Common implementations for [`Hashable`](hash::Hashable).
mod hash_impl;

/// Merkle tree inclusion proof
pub mod proof;

/// Node range addressing and the split rule.
pub mod range;

/// Merkle tree abstractions, implementation and algorithms.
pub mod merkle;

/// Backing stores for the node cache.
pub mod store;

/// Common test helpers.
#[cfg(test)]
mod test_common;

/// Tests XOR128.
#[cfg(test)]
mod test_xor128;

/// Tests for Merkle Hasher Customization
#[cfg(test)]
mod test_cmh;

pub use error::{MerkleError, Result};
#[cfg(feature = "ring")]
pub use hash::RingSha256Algorithm;
pub use hash::{Algorithm, Element, Hashable, Sha256Algorithm};
pub use merkle::MerkleTree;
pub use proof::{validate_batch, validate_path, AuditProof};
pub use range::{expected_path_len, NodeRange};
pub use store::{MemStore, Store};
