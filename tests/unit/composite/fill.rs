use super::*;
use crate::buffer::PixelBufferDesc;
use crate::foundation::core::tags;

fn rect(w: i32, h: i32) -> IntRect {
    IntRect::new(0, 0, w, h)
}

fn buffer(n_chan: usize, depth: Depth) -> PixelBuffer {
    PixelBuffer::new(&PixelBufferDesc {
        has_shape: true,
        has_alpha_g: true,
        has_tags: true,
        ..PixelBufferDesc::new(rect(2, 2), n_chan, depth)
    })
    .unwrap()
}

#[test]
fn clips_to_buffer_and_grows_dirty() {
    let mut buf = buffer(4, Depth::Eight);
    let color = DeviceColor::new(&[10, 20, 30]).with_tag(tags::VECTOR);
    fill_rectangle(&mut buf, IntRect::new(-5, 1, 1, 9), &color, &FillParams::opaque(Depth::Eight)).unwrap();
    assert_eq!(buf.dirty, IntRect::new(0, 1, 1, 2));
    assert_eq!(buf.pixel(0, 1).unwrap(), vec![10, 20, 30, 255, 255, 255, tags::VECTOR]);
    assert_eq!(buf.pixel(1, 1).unwrap(), vec![0; 7]);

    fill_rectangle(&mut buf, IntRect::new(5, 5, 9, 9), &color, &FillParams::opaque(Depth::Eight)).unwrap();
    assert_eq!(buf.dirty, IntRect::new(0, 1, 1, 2));
}

#[test]
fn subtractive_fill_stores_ink() {
    let mut buf = buffer(5, Depth::Sixteen);
    let color = DeviceColor::new(&[0, 1000, 65535, 7]);
    let params = FillParams::opaque(Depth::Sixteen).with_polarity(ColorPolarity::Subtractive);
    fill_rectangle(&mut buf, rect(1, 1), &color, &params).unwrap();
    assert_eq!(&buf.pixel(0, 0).unwrap()[..5], &[0, 1000, 65535, 7, 65535]);
}

#[test]
fn partial_alpha_merges_tags_and_unions_planes() {
    let mut buf = buffer(2, Depth::Eight);
    let first = DeviceColor::new(&[200]).with_tag(tags::TEXT);
    let second = DeviceColor::new(&[100]).with_tag(tags::IMAGE);
    let half = FillParams::opaque(Depth::Eight).with_alpha(128).with_shape(128);
    fill_rectangle(&mut buf, rect(1, 1), &first, &half).unwrap();
    fill_rectangle(&mut buf, rect(1, 1), &second, &half).unwrap();
    let px = buf.pixel(0, 0).unwrap();
    let expected = u16::from(<u8 as Sample>::union(128, 128));
    assert_eq!(px[1], expected);
    assert_eq!(px[2], expected);
    assert_eq!(px[3], expected);
    assert_eq!(px[4], tags::TEXT | tags::IMAGE);
}

#[test]
fn zero_alpha_touches_only_metadata() {
    let mut buf = buffer(4, Depth::Eight);
    fill_rectangle(&mut buf, rect(2, 2), &DeviceColor::new(&[9, 9, 9]), &FillParams::opaque(Depth::Eight)).unwrap();
    let before = buf.clone();
    let params = FillParams::opaque(Depth::Eight).with_alpha(0).with_shape(0);
    let color = DeviceColor::new(&[1, 2, 3]).with_tag(tags::IMAGE);
    fill_rectangle(&mut buf, rect(2, 2), &color, &params).unwrap();
    for p in 0..4 {
        assert_eq!(buf.get(1, 1, p).unwrap(), before.get(1, 1, p).unwrap());
    }
    assert_eq!(buf.get(1, 1, 6).unwrap(), tags::IMAGE);
}

#[test]
fn overprint_keeps_undrawn_components() {
    let mut buf = buffer(5, Depth::Eight);
    let sub = FillParams::opaque(Depth::Eight).with_polarity(ColorPolarity::Subtractive);
    fill_rectangle(&mut buf, rect(1, 1), &DeviceColor::new(&[50, 50, 50, 50]), &sub).unwrap();
    let over = FillParams {
        overprint: true,
        ctx: BlendContext::new(0b1000, false, true, 4),
        ..sub
    };
    fill_rectangle(&mut buf, rect(1, 1), &DeviceColor::new(&[1, 2, 3, 4]), &over).unwrap();
    assert_eq!(&buf.pixel(0, 0).unwrap()[..5], &[50, 50, 50, 4, 255]);
}

#[test]
fn component_count_and_ranges_are_validated() {
    let mut buf = buffer(4, Depth::Eight);
    let params = FillParams::opaque(Depth::Eight);
    assert!(fill_rectangle(&mut buf, rect(1, 1), &DeviceColor::new(&[1, 2]), &params).is_err());
    assert!(fill_rectangle(&mut buf, rect(1, 1), &DeviceColor::new(&[1, 2, 300]), &params).is_err());
    let deep = FillParams::opaque(Depth::Sixteen);
    assert!(fill_rectangle(&mut buf, rect(1, 1), &DeviceColor::new(&[1, 2, 3]), &deep).is_err());
}

#[test]
fn knockout_fill_replaces_by_shape() {
    let mut buf = buffer(2, Depth::Eight);
    let base = FillParams::opaque(Depth::Eight);
    fill_rectangle(&mut buf, rect(2, 1), &DeviceColor::new(&[40]).with_tag(tags::TEXT), &base).unwrap();

    let full = base.with_alpha(100);
    fill_rectangle_knockout(&mut buf, rect(1, 1), &DeviceColor::new(&[90]).with_tag(tags::IMAGE), &full).unwrap();
    assert_eq!(buf.pixel(0, 0).unwrap(), vec![90, 100, 255, 255, tags::IMAGE]);

    let none = base.with_shape(0);
    fill_rectangle_knockout(&mut buf, IntRect::new(1, 0, 2, 1), &DeviceColor::new(&[90]), &none).unwrap();
    assert_eq!(buf.pixel(1, 0).unwrap(), vec![40, 255, 255, 255, tags::TEXT]);
}

#[test]
fn inlined_normal_mix_matches_pixel_compositor() {
    let ctx = BlendContext::default();
    for a_s in (1u8..=255).step_by(17) {
        for a_b in (0u8..=255).step_by(15) {
            for (c_b, c_s) in [(0u8, 255u8), (255, 0), (40, 200), (128, 129)] {
                let src = [c_s, c_s / 2, 255 - c_s, a_s];
                let mut fast = [c_b, 255 - c_b, c_b / 3, a_b];
                let mut general = fast;
                normal_over(&mut fast, &src, 3);
                composite_pixel_alpha(&mut general, &src, 3, BlendMode::Normal, 3, &BlendProcs::RGB, &ctx);
                assert_eq!(fast, general, "a_s={a_s} a_b={a_b} c_b={c_b} c_s={c_s}");
            }
        }
    }
    let src = [0x1234u16, 0xfedc];
    let mut fast = [0xffffu16, 0x8000];
    let mut general = fast;
    normal_over(&mut fast, &src, 1);
    composite_pixel_alpha(&mut general, &src, 1, BlendMode::Normal, 1, &BlendProcs::CUSTOM, &ctx);
    assert_eq!(fast, general);
}
