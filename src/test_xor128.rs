use crate::hash::*;
use crate::proof::{validate_path, AuditProof};
use crate::test_common::{get_xor_tree, Item, XorTree, XOR128};
use rand::Rng;
use std::hash::Hasher;

#[test]
fn test_hasher_simple() {
    let mut h = XOR128::new();
    "1234567812345678".hash(&mut h);
    h.reset();
    String::from("1234567812345678").hash(&mut h);
    assert_eq!(format!("{:#X}", h), "0x31323334353637383132333435363738");
    String::from("1234567812345678").hash(&mut h);
    assert_eq!(format!("{:#X}", h), "0x00000000000000000000000000000000");
    String::from("1234567812345678").hash(&mut h);
    assert_eq!(format!("{:#X}", h), "0x31323334353637383132333435363738");
}

#[test]
fn test_st() {
    let x = [String::from("ars"), String::from("zxc")];
    let mut mt: XorTree = XorTree::from_data(&x).unwrap();
    assert_eq!(mt.len(), 2);

    // 0x00 prefix shifts the entry one byte
    assert_eq!(
        hex::encode(mt.leaf_hash(0).unwrap()),
        "00617273000000000000000000000000"
    );
    assert_eq!(
        hex::encode(mt.leaf_hash(1).unwrap()),
        "007a7863000000000000000000000000"
    );
    // 0x01 || left || right folded over 16 bytes
    assert_eq!(
        hex::encode(mt.root_hash(None).unwrap()),
        "01001b0a100000000000000000000000"
    );
}

#[test]
fn test_write_t_equivalence() {
    let mut a = XOR128::new();
    let l = a.leaf(b"left");
    let r = a.leaf(b"right");

    a.reset();
    a.write_u8(<XOR128 as Algorithm<Item>>::INTERIOR);
    a.write(&l);
    a.write(&r);
    let manual = a.hash();
    assert_eq!(a.node(l, r), manual);
}

// Break one byte of one element of the proof.
fn modify(path: &mut [Item], leaf: &mut Item, root: &mut Item) {
    let mut rng = rand::thread_rng();
    let target = rng.gen_range(0..path.len() + 2);
    let byte = rng.gen_range(0..16);
    let mask: u8 = rng.gen_range(1..=255);

    if target < path.len() {
        path[target][byte] ^= mask;
    } else if target == path.len() {
        leaf[byte] ^= mask;
    } else {
        root[byte] ^= mask;
    }
}

#[test]
fn test_proofs() {
    let leafs = 1000;
    let mut mt = get_xor_tree(leafs);
    let mut a = XOR128::new();

    for n in [1, 2, 3, 7, 64, 513, 1000].iter().cloned() {
        let mut root = mt.root_hash(Some(n)).unwrap();
        for i in 0..n {
            let mut leaf = mt.leaf_hash(i).unwrap();
            let mut path = mt.audit_path(i, Some(n)).unwrap();
            assert!(validate_path(&mut a, i, n, &leaf, &root, &path).unwrap());

            // Break the proof here and assert negative validation.
            let saved = root;
            modify(&mut path, &mut leaf, &mut root);
            assert!(!validate_path(&mut a, i, n, &leaf, &root, &path).unwrap());
            root = saved;
        }
    }
}

#[test]
fn test_proof_bundle() {
    let mut mt = get_xor_tree(20);
    let proof: AuditProof<Item> = mt.audit_proof(13, None).unwrap();
    let mut a = XOR128::new();
    assert!(proof.validate(&mut a));
    assert!(proof.validate_with_data(&mut a, &(13usize * 93)));
    assert!(!proof.validate_with_data(&mut a, &(14usize * 93)));
}
