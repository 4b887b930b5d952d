//! Hash infrastructure for items in Merkle tree.

use std::fmt::Debug;
use std::hash::Hasher;

use sha2::{Digest, Sha256};

/// A hashable type.
///
/// Types implementing `Hashable` are able to be [`hash`]ed with an instance of
/// [`Hasher`].
///
/// ## Implementing `Hashable`
///
/// Byte-like entries (`[u8]`, `str`, `Vec<u8>`, ...) feed their raw bytes,
/// so `tree.push(&"entry")` and `tree.add_leaf(b"entry")` produce the same
/// leaf. If you need more control over how a value is hashed, implement the
/// trait yourself:
///
/// ```text
/// use hash::Hashable;
///
/// struct Person {
///     id: u32,
///     name: String,
///     phone: u64,
/// }
///
/// /// where SHA256 : std::hash::Hasher
/// impl Hashable<SHA256> for Person {
///     fn hash(&self, state: &mut SHA256) {
///         self.id.hash(state);
///         self.phone.hash(state);
///     }
/// }
/// ```
///
/// ## `Hashable` and `Eq`
///
/// When implementing both `Hashable` and [`Eq`], it is important that the following
/// property holds:
///
/// ```text
/// k1 == k2 -> hash(k1) == hash(k2)
/// ```
///
/// In other words, if two keys are equal, their hashes must also be equal.
///
/// [`hash`]: #tymethod.hash
pub trait Hashable<H: Hasher> {
    /// Feeds this value into the given [`Hasher`].
    fn hash(&self, state: &mut H);
}

/// Digest type stored in the tree.
///
/// Any fixed-size byte array qualifies; the algorithm decides the length.
pub trait Element: Clone + Eq + AsRef<[u8]> + Send + Sync + Debug {}

impl<const N: usize> Element for [u8; N] {}

/// Hashing algorithm type.
///
/// Algorithm conforms standard [`Hasher`] trait and provides methods to return
/// full length hash and reset current state. The provided `leaf` and `node`
/// methods apply the RFC 6962 domain separation:
///
/// ```text
/// leaf = ALG(0x00 || d)
/// node = ALG(0x01 || left || right)
/// ```
///
/// The prefixes keep a leaf hash from ever being confused with an interior
/// node hash over the same number of bytes.
pub trait Algorithm<T>: Hasher + Clone
where
    T: Element,
{
    /// MT leaf hash prefix
    const LEAF: u8 = 0x00;

    /// MT interior node hash prefix
    const INTERIOR: u8 = 0x01;

    /// Returns the hash value for the data stream written so far.
    fn hash(&mut self) -> T;

    /// Reset Hasher state.
    fn reset(&mut self);

    /// Returns digest of the empty thing.
    #[inline]
    fn empty(&mut self) -> T {
        self.reset();
        self.hash()
    }

    /// Returns the hash value for MT leaf (prefix 0x00).
    #[inline]
    fn leaf(&mut self, data: &[u8]) -> T {
        self.reset();
        self.write_u8(Self::LEAF);
        self.write(data);
        self.hash()
    }

    /// Returns the leaf hash of a hashable entry (prefix 0x00).
    #[inline]
    fn leaf_data(&mut self, data: &dyn Hashable<Self>) -> T
    where
        Self: Sized,
    {
        self.reset();
        self.write_u8(Self::LEAF);
        data.hash(self);
        self.hash()
    }

    /// Returns the hash value for MT interior node (prefix 0x01).
    #[inline]
    fn node(&mut self, left: T, right: T) -> T {
        self.reset();
        self.write_u8(Self::INTERIOR);
        self.write(left.as_ref());
        self.write(right.as_ref());
        self.hash()
    }
}

/// SHA-256 hash algorithm, the default for [`MerkleTree`].
///
/// [`MerkleTree`]: ../merkle/struct.MerkleTree.html
#[derive(Clone, Default)]
pub struct Sha256Algorithm(Sha256);

impl Debug for Sha256Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("Sha256Algorithm")
    }
}

impl Sha256Algorithm {
    /// Creates a fresh hasher.
    pub fn new() -> Sha256Algorithm {
        Sha256Algorithm(Sha256::new())
    }
}

impl Hasher for Sha256Algorithm {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.0.update(msg)
    }

    /// First 8 bytes of the running digest, little endian.
    #[inline]
    fn finish(&self) -> u64 {
        let mut h = [0u8; 8];
        h.copy_from_slice(&self.0.clone().finalize()[..8]);
        u64::from_le_bytes(h)
    }
}

impl Algorithm<[u8; 32]> for Sha256Algorithm {
    #[inline]
    fn hash(&mut self) -> [u8; 32] {
        self.0.clone().finalize().into()
    }

    #[inline]
    fn reset(&mut self) {
        self.0.reset();
    }
}

/// SHA-256 backed by `ring`.
#[cfg(feature = "ring")]
#[derive(Clone)]
pub struct RingSha256Algorithm(ring::digest::Context);

#[cfg(feature = "ring")]
impl RingSha256Algorithm {
    /// Creates a fresh hasher.
    pub fn new() -> RingSha256Algorithm {
        RingSha256Algorithm(ring::digest::Context::new(&ring::digest::SHA256))
    }
}

#[cfg(feature = "ring")]
impl Default for RingSha256Algorithm {
    fn default() -> RingSha256Algorithm {
        RingSha256Algorithm::new()
    }
}

#[cfg(feature = "ring")]
impl Debug for RingSha256Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("RingSha256Algorithm")
    }
}

#[cfg(feature = "ring")]
impl Hasher for RingSha256Algorithm {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.0.update(msg)
    }

    /// First 8 bytes of the running digest, little endian.
    #[inline]
    fn finish(&self) -> u64 {
        let mut h = [0u8; 8];
        h.copy_from_slice(&self.0.clone().finish().as_ref()[..8]);
        u64::from_le_bytes(h)
    }
}

#[cfg(feature = "ring")]
impl Algorithm<[u8; 32]> for RingSha256Algorithm {
    /// ring.Context is not reusable after finalization (finish(self)),
    /// so the running state is cloned before finishing.
    #[inline]
    fn hash(&mut self) -> [u8; 32] {
        let mut h = [0u8; 32];
        h.copy_from_slice(self.0.clone().finish().as_ref());
        h
    }

    #[inline]
    fn reset(&mut self) {
        self.0 = ring::digest::Context::new(&ring::digest::SHA256);
    }
}
