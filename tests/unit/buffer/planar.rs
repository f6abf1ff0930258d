use super::*;

#[test]
fn zeroed_storage_matches_depth() {
    let s = Samples::zeroed(Depth::Sixteen, 6);
    assert_eq!(s.depth(), Depth::Sixteen);
    assert_eq!(s.len(), 6);
    assert!(s.as_slice::<u16>().is_some());
    assert!(s.as_slice::<u8>().is_none());

    let mut s = s;
    s.as_mut_slice::<u16>().unwrap()[5] = 0xbeef;
    assert_eq!(s.get(5), 0xbeef);
    assert!(s.as_mut_slice::<u8>().is_none());
}

#[test]
fn shallow_set_truncates_to_byte_range() {
    let mut s = Samples::zeroed(Depth::Eight, 2);
    s.set(0, 0x1ff);
    s.set(1, 7);
    assert_eq!(s.get(0), 0xff);
    assert_eq!(s.get(1), 7);
}

#[test]
fn layout_offsets_follow_strides() {
    let l = PlaneLayout {
        rowstride: 5,
        planestride: 20,
    };
    assert_eq!(l.offset(0, 0, 0), 0);
    assert_eq!(l.offset(2, 3, 1), 2 + 15 + 20);
}

#[test]
fn prefix_copies_leading_samples() {
    let mut s = Samples::zeroed(Depth::Sixteen, 4);
    s.set(1, 500);
    s.set(3, 9);
    assert_eq!(s.prefix(2), Samples::Deep(vec![0, 500]));
    assert_eq!(s.prefix(10).len(), 4);
}
