use super::*;

#[test]
fn sq_diff_matches_closed_form() {
    for (x, &v) in SQ_DIFF_8.iter().enumerate() {
        let x = x as f64;
        let expected = ((x - x * x / 255.0) * 65536.0 / 255.0 + 0.5).floor();
        assert!((f64::from(v) - expected).abs() <= 1.0, "x={x}: {v} vs {expected}");
    }
}

#[test]
fn soft_light_delta_vanishes_at_ends() {
    assert_eq!(SOFT_LIGHT_8[0], 0);
    assert_eq!(SOFT_LIGHT_8[255], 0);
    assert!(SOFT_LIGHT_8.iter().all(|&d| d <= 64));
}
