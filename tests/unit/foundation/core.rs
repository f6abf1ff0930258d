use super::*;

#[test]
fn intersect_and_union_behave_for_overlap() {
    let a = IntRect::new(0, 0, 10, 10);
    let b = IntRect::new(5, -2, 20, 4);
    assert_eq!(a.intersect(b), IntRect::new(5, 0, 10, 4));
    assert_eq!(a.union(b), IntRect::new(0, -2, 20, 10));
}

#[test]
fn disjoint_intersection_is_empty() {
    let a = IntRect::new(0, 0, 4, 4);
    let b = IntRect::new(10, 10, 12, 12);
    let i = a.intersect(b);
    assert!(i.is_empty());
    assert_eq!(i.width(), 0);
    assert_eq!(i.height(), 0);
}

#[test]
fn union_ignores_empty_operands() {
    let a = IntRect::new(3, 3, 6, 6);
    assert_eq!(IntRect::EMPTY.union(a), a);
    assert_eq!(a.union(IntRect::new(9, 9, 9, 12)), a);
}

#[test]
fn contains_rect_accepts_empty() {
    let a = IntRect::new(0, 0, 4, 4);
    assert!(a.contains_rect(IntRect::EMPTY));
    assert!(a.contains_rect(IntRect::new(1, 1, 4, 4)));
    assert!(!a.contains_rect(IntRect::new(1, 1, 5, 4)));
}

#[test]
fn hybrid_complements_only_spots() {
    let p = ColorPolarity::Hybrid;
    assert!(!p.complements(0, 5, 2));
    assert!(!p.complements(2, 5, 2));
    assert!(p.complements(3, 5, 2));
    assert!(p.complements(4, 5, 2));
    assert!(ColorPolarity::Subtractive.complements(0, 4, 0));
    assert!(!ColorPolarity::Additive.complements(3, 4, 4));
}

#[test]
fn depth_value_range() {
    assert!(Depth::Eight.check_value(255).is_ok());
    assert!(Depth::Eight.check_value(256).is_err());
    assert!(Depth::Sixteen.check_value(0xffff).is_ok());
    assert_eq!(Depth::Sixteen.bytes(), 2);
}
