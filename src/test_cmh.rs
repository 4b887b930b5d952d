use crate::hash::{Algorithm, Hashable};
use crate::merkle::MerkleTree;
use crate::proof::validate_path;
use crate::store::MemStore;
use crate::test_common::{Item, XOR128};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

const LEAF_MARK: u8 = 0xaa;
const NODE_MARK: u8 = 0xbb;

/// Custom merkle hash util test
#[derive(Debug, Clone, Default)]
struct CMH(DefaultHasher, u8);

impl CMH {
    pub fn new() -> CMH {
        CMH(DefaultHasher::new(), 0)
    }
}

impl Hasher for CMH {
    fn write(&mut self, msg: &[u8]) {
        self.0.write(msg)
    }

    fn finish(&self) -> u64 {
        self.0.finish()
    }
}

impl Algorithm<Item> for CMH {
    fn hash(&mut self) -> Item {
        let mut h = [0u8; 16];
        h[..8].copy_from_slice(&self.finish().to_le_bytes());
        h[15] = self.1;
        h
    }

    fn reset(&mut self) {
        *self = CMH::default()
    }

    fn leaf(&mut self, leaf: &[u8]) -> Item {
        self.reset();
        self.1 = LEAF_MARK;
        // e.g. no prefix
        self.write(leaf);
        self.hash()
    }

    fn leaf_data(&mut self, data: &dyn Hashable<Self>) -> Item {
        self.reset();
        self.1 = LEAF_MARK;
        data.hash(self);
        self.hash()
    }

    fn node(&mut self, left: Item, right: Item) -> Item {
        self.reset();
        self.1 = NODE_MARK;
        // e.g. custom prefix
        self.write(&[1u8]);
        self.write(left.as_ref());
        self.write(&[2u8]);
        self.write(right.as_ref());
        self.hash()
    }
}

type CmhTree = MerkleTree<Item, CMH, MemStore<Item>>;

#[test]
fn test_custom_merkle_hasher() {
    let mut mt = CmhTree::with_algorithm(CMH::new());
    for x in [1u64, 2, 3, 4, 5].iter() {
        mt.push(x).unwrap();
    }
    let root = mt.root_hash(None).unwrap();

    assert_eq!(root[15], NODE_MARK);
    for m in 0..5 {
        assert_eq!(mt.leaf_hash(m).unwrap()[15], LEAF_MARK);
    }
    assert_eq!(
        mt.store()
            .iter()
            .filter(|(range, hash)| hash[15] == if range.is_leaf() { LEAF_MARK } else { NODE_MARK })
            .count(),
        mt.node_count()
    );
    assert_eq!(mt.node_count(), 9);
}

#[test]
fn test_verifier_uses_injected_algorithm() {
    let mut mt = CmhTree::with_algorithm(CMH::new());
    mt.add_leafs(["a", "b", "c", "d", "e", "f"].iter()).unwrap();
    let root = mt.root_hash(None).unwrap();

    for m in 0..6 {
        let leaf = mt.leaf_hash(m).unwrap();
        let path = mt.audit_path(m, None).unwrap();
        assert!(mt.validate_path(m, 6, &leaf, &root, &path).unwrap());
        assert!(validate_path(&mut CMH::new(), m, 6, &leaf, &root, &path).unwrap());
        // same digest size, different node rule
        assert!(!validate_path(&mut XOR128::new(), m, 6, &leaf, &root, &path).unwrap());
    }
}
