use super::BitVec;

#[test]
fn new_is_all_zero() {
    let v = BitVec::new(130);
    assert_eq!(v.len(), 130);
    assert!(v.is_zero());
    assert_eq!(v.count_ones(), 0);
}

#[test]
fn new_filled_sets_exactly_len_bits() {
    let v = BitVec::new_filled(70);
    assert_eq!(v.count_ones(), 70);
    assert!(v.get(0) && v.get(69));

    // Intersection with a filled vector is the identity, so the tail
    // bits of the last word must be zero.
    let mut single = BitVec::new(70);
    single.set(69);
    assert_eq!(single.intersect(&v), single);

    let empty = BitVec::new_filled(0);
    assert_eq!(empty.count_ones(), 0);
}

#[test]
fn set_get_clear() {
    let mut v = BitVec::new(70);
    v.set(0);
    v.set(63);
    v.set(64);
    v.set(69);
    assert!(v.get(0) && v.get(63) && v.get(64) && v.get(69));
    assert!(!v.get(1));
    assert_eq!(v.count_ones(), 4);

    v.clear(63);
    assert!(!v.get(63));
    assert_eq!(v.count_ones(), 3);
}

#[test]
fn value_ops_do_not_alias_inputs() {
    let mut a = BitVec::new(8);
    let mut b = BitVec::new(8);
    a.set(1);
    a.set(2);
    b.set(2);
    b.set(3);

    let u = a.union(&b);
    let i = a.intersect(&b);
    let d = a.difference(&b);

    // Inputs are untouched.
    assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(b.iter_ones().collect::<Vec<_>>(), vec![2, 3]);

    assert_eq!(u.iter_ones().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(i.iter_ones().collect::<Vec<_>>(), vec![2]);
    assert_eq!(d.iter_ones().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn in_place_ops() {
    let mut a = BitVec::new(8);
    let mut b = BitVec::new(8);
    a.set(0);
    b.set(0);
    b.set(1);

    a.union_with(&b);
    assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![0, 1]);

    a.subtract_with(&b);
    assert!(a.is_zero());

    a.set(0);
    a.set(1);
    let mut mask = BitVec::new(8);
    mask.set(1);
    a.intersect_with(&mask);
    assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn iter_ones_ascending() {
    let mut v = BitVec::new(200);
    for bit in [199, 0, 65, 64, 128] {
        v.set(bit);
    }
    assert_eq!(v.iter_ones().collect::<Vec<_>>(), vec![0, 64, 65, 128, 199]);
}

#[test]
fn equality_is_by_value() {
    let mut a = BitVec::new(16);
    let mut b = BitVec::new(16);
    assert_eq!(a, b);
    a.set(5);
    assert_ne!(a, b);
    b.set(5);
    assert_eq!(a, b);
}

#[test]
#[should_panic(expected = "length mismatch")]
fn length_mismatch_panics() {
    let a = BitVec::new(8);
    let b = BitVec::new(9);
    let _ = a.union(&b);
}
