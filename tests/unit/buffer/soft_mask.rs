use super::*;

#[test]
fn identity_transfer_is_exact_at_both_depths() {
    let tf = TransferFn::identity();
    assert!(tf.is_identity());
    for v in 0..=255u8 {
        assert_eq!(tf.apply8(v), v);
    }
    for v in [0u16, 1, 256, 257, 0x8000, 0xfffe, 0xffff] {
        assert_eq!(tf.apply16(v), v);
    }
}

#[test]
fn identity_table_detected_from_contents() {
    let tf = TransferFn::from_table((0..=255u8).collect()).unwrap();
    assert!(tf.is_identity());
    let inv = TransferFn::from_table((0..=255u8).rev().collect()).unwrap();
    assert!(!inv.is_identity());
}

#[test]
fn deep_lookup_hits_table_on_scaled_inputs() {
    let tf = TransferFn::from_table((0..=255u8).map(|v| v / 2).collect()).unwrap();
    for k in 0..=255u16 {
        assert_eq!(tf.apply16(k * 257), u16::from(tf.apply8(k as u8)) * 257);
    }
}

#[test]
fn deep_lookup_interpolates_between_entries() {
    let mut table = vec![0u8; 256];
    table[1] = 255;
    for v in table.iter_mut().skip(2) {
        *v = 255;
    }
    let tf = TransferFn::from_table(table).unwrap();
    let mid = tf.apply16(257 / 2);
    assert!(mid > 0x7000 && mid < 0x9000, "mid = {mid:#x}");
}

#[test]
fn wrong_table_length_is_rejected() {
    assert!(TransferFn::from_table(vec![0; 10]).is_err());
    assert!(serde_json::from_str::<TransferFn>("[1,2,3]").is_err());
}

#[test]
fn outside_rect_reads_background_through_transfer() {
    let rect = IntRect::new(0, 0, 2, 2);
    let inverse = TransferFn::from_table((0..=255u8).rev().collect()).unwrap();
    let mut mask = SoftMaskBuffer::new(rect, Depth::Eight, SoftMaskSubtype::Alpha)
        .with_transfer(inverse)
        .with_bg_alpha(10)
        .unwrap();
    mask.set(1, 1, 200).unwrap();
    assert_eq!(mask.sample::<u8>(1, 1), 55);
    assert_eq!(mask.sample::<u8>(5, 5), 245);
    assert!(mask.covers(IntRect::new(0, 0, 2, 1)));
    assert!(!mask.covers(IntRect::new(0, 0, 3, 1)));
}

#[test]
fn constant_mask_has_no_data() {
    let mask = SoftMaskBuffer::constant(IntRect::new(0, 0, 4, 4), Depth::Sixteen, 0x8000).unwrap();
    assert_eq!(mask.sample::<u16>(1, 1), 0x8000);
    assert!(!mask.covers(IntRect::new(0, 0, 1, 1)));
}

#[test]
fn background_alpha_resets_the_plane() {
    let rect = IntRect::new(0, 0, 3, 1);
    let mut mask = SoftMaskBuffer::new(rect, Depth::Sixteen, SoftMaskSubtype::DeviceColor)
        .with_bg_alpha(0x1234)
        .unwrap();
    assert_eq!((mask.raw(0, 0), mask.raw(2, 0), mask.raw(9, 9)), (0x1234, 0x1234, 0x1234));
    mask.set(1, 0, 7).unwrap();
    assert_eq!(mask.raw(1, 0), 7);
    assert!(mask.covers(rect));
}
