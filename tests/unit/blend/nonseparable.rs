use super::*;

#[test]
fn rgb_luminosity_of_gray_source_over_gray_backdrop_is_source() {
    let mut dst = [0u8; 3];
    luminosity_rgb(3, &mut dst, &[40, 40, 40], &[200, 200, 200]);
    assert_eq!(dst, [200, 200, 200]);
}

#[test]
fn rgb_luminosity_clips_back_into_range() {
    let mut dst = [0u8; 3];
    luminosity_rgb(3, &mut dst, &[255, 0, 0], &[250, 250, 250]);
    let y = (i64::from(dst[0]) * 77 + i64::from(dst[1]) * 151 + i64::from(dst[2]) * 28 + 128) >> 8;
    assert!((y - 250).abs() <= 2, "dst={dst:?} y={y}");
    assert!(dst[0] >= dst[1]);
}

#[test]
fn neutral_backdrop_saturation_returns_backdrop() {
    for procs in [BlendProcs::RGB, BlendProcs::CUSTOM] {
        let mut dst = [0u8; 3];
        (procs.saturation8)(3, &mut dst, &[90, 90, 90], &[255, 0, 10]);
        assert_eq!(dst, [90, 90, 90]);
        let mut deep = [0u16; 3];
        (procs.saturation16)(3, &mut deep, &[7, 7, 7], &[0xffff, 0, 3]);
        assert_eq!(deep, [7, 7, 7]);
    }
}

#[test]
fn saturation_of_neutral_source_desaturates() {
    let mut dst = [0u8; 3];
    saturation_rgb(3, &mut dst, &[200, 100, 50], &[30, 30, 30]);
    assert_eq!(dst[0], dst[1]);
    assert_eq!(dst[1], dst[2]);
}

#[test]
fn custom_saturation_uses_source_spread() {
    let mut dst = [0u8; 2];
    saturation_custom(2, &mut dst, &[100, 140], &[0, 80]);
    // backdrop spread 40, source spread 80: the result keeps the average and doubles the spread
    assert_eq!(dst, [80, 160]);
}

#[test]
fn cmyk_takes_black_and_spots_from_source() {
    let mut dst = [0u8; 5];
    luminosity_cmyk(5, &mut dst, &[10, 20, 30, 40, 50], &[10, 20, 30, 99, 98]);
    assert_eq!(&dst[3..], &[99, 98]);
    let mut dst = [0u8; 4];
    saturation_cmyk(4, &mut dst, &[60, 60, 60, 5], &[0, 128, 255, 222]);
    assert_eq!(dst, [60, 60, 60, 222]);
}

#[test]
fn custom_luminosity_of_gray_takes_source() {
    let mut dst = [0u16; 1];
    luminosity_custom(1, &mut dst, &[1000], &[0xfff0]);
    assert_eq!(dst, [0xfff0]);
}

#[test]
fn procs_selected_per_space() {
    assert!(std::ptr::fn_addr_eq(
        BlendProcs::for_space(BlendSpace::Gray).luminosity8,
        BlendProcs::CUSTOM.luminosity8
    ));
    assert_eq!(format!("{:?}", BlendProcs::for_space(BlendSpace::Cmyk)), "BlendProcs(\"CMYK\")");
}
