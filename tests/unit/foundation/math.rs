use super::*;

#[test]
fn div_max_rounds_products_at_both_depths() {
    assert_eq!(<u8 as Sample>::mul(200, 100), 78);
    assert_eq!(<u8 as Sample>::mul(255, 255), 255);
    assert_eq!(<u8 as Sample>::mul(0, 255), 0);
    assert_eq!(<u16 as Sample>::mul(0xffff, 0xffff), 0xffff);
    assert_eq!(<u16 as Sample>::mul(0x8000, 0xffff), 0x8000);
}

#[test]
fn div_max_rounds_negative_products() {
    assert_eq!(<u8 as Sample>::div_max(-255 * 100), -100);
    assert_eq!(<u8 as Sample>::div_max(-128), 0);
    assert_eq!(<u8 as Sample>::div_max(-129), -1);
    assert_eq!(<u16 as Sample>::div_max(-0xffff * 7), -7);
}

#[test]
fn div_max_stays_within_one_step_of_exact_rounding() {
    for x in -255 * 255..=255 * 255 {
        let exact = (x as f64 / 255.0).round() as i64;
        let got = <u8 as Sample>::div_max(x);
        assert!((got - exact).abs() <= 1, "x={x}: {got} vs {exact}");
        if x >= 0 {
            assert_eq!(got, exact, "x={x}");
        }
    }
}

#[test]
fn soft_light_16_terms_are_signed_correctly() {
    assert_eq!(<u16 as Sample>::soft_light_darken(0x8000, 0), 0x4000);
    assert_eq!(<u16 as Sample>::soft_light_darken(0xffff, 0), 0);
    assert_eq!(<u16 as Sample>::soft_light_lighten(0, 0xffff), 0);
    assert!(<u16 as Sample>::soft_light_lighten(0x8000, 0xffff) > 0);
}

#[test]
fn union_is_bounded_and_monotone() {
    for a in (0u8..=255).step_by(5) {
        for b in (0u8..=255).step_by(7) {
            let r = <u8 as Sample>::union(a, b);
            assert!(r >= a.max(b), "union({a}, {b}) = {r}");
        }
    }
    assert_eq!(<u16 as Sample>::union(0, 0), 0);
    assert_eq!(<u16 as Sample>::union(0xffff, 3), 0xffff);
}

#[test]
fn soft_light_16_matches_8_on_scaled_inputs() {
    for b in 0i64..=255 {
        let lo = <u8 as Sample>::soft_light_lighten(b, 255);
        let hi = <u16 as Sample>::soft_light_lighten(b * 257, 0xffff);
        assert!((lo * 257 - hi).abs() <= 257, "b={b}: {lo} vs {hi}");
    }
}

#[test]
fn ratio_16_16_rounds_to_nearest() {
    assert_eq!(ratio_16_16(1, 2), 0x8000);
    assert_eq!(ratio_16_16(255, 255), 0x10000);
}

#[test]
fn complement_and_clamp() {
    assert_eq!(<u8 as Sample>::complement(10), 245);
    assert_eq!(<u16 as Sample>::complement(0), 0xffff);
    assert_eq!(<u8 as Sample>::clamp_wide(-4), 0);
    assert_eq!(<u8 as Sample>::clamp_wide(300), 255);
    assert_eq!(<u8 as Sample>::from_u16(0x1234), 255);
}
