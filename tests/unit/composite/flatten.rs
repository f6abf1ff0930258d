use super::*;
use crate::buffer::PixelBufferDesc;
use crate::foundation::core::IntRect;

fn gray(depth: Depth, pixels: &[(u16, u16)]) -> PixelBuffer {
    let rect = IntRect::new(0, 0, pixels.len() as i32, 1);
    let mut buf = PixelBuffer::new(&PixelBufferDesc::new(rect, 2, depth)).unwrap();
    for (x, &(c, a)) in pixels.iter().enumerate() {
        buf.set(x as i32, 0, 0, c).unwrap();
        buf.set(x as i32, 0, 1, a).unwrap();
    }
    buf
}

#[test]
fn transparent_pixels_take_background_and_opaque_keep_colour() {
    let mut buf = gray(Depth::Eight, &[(10, 0), (10, 255), (0, 128)]);
    flatten_onto_background(&mut buf, &[255]).unwrap();
    assert_eq!(buf.get(0, 0, 0).unwrap(), 255);
    assert_eq!(buf.get(1, 0, 0).unwrap(), 10);
    assert_eq!(buf.get(2, 0, 0).unwrap(), 127);
    assert_eq!(buf.get(2, 0, 1).unwrap(), 128);
}

#[test]
fn rows_are_encoded_in_requested_order() {
    let buf = gray(Depth::Sixteen, &[(0x1234, 0xffff), (0, 0)]);
    let rows = blended_rows(&buf, &[0xabcd], SampleSource::BigEndian).unwrap();
    assert_eq!(rows, vec![vec![0x12, 0x34, 0xab, 0xcd]]);
    assert_eq!(buf.get(1, 0, 0).unwrap(), 0);

    let shallow = gray(Depth::Eight, &[(7, 255)]);
    let rows = blended_rows(&shallow, &[0], SampleSource::NativeEndian).unwrap();
    assert_eq!(rows, vec![vec![7]]);
}

#[test]
fn background_must_match_colorants() {
    let mut buf = gray(Depth::Eight, &[(1, 1)]);
    assert!(flatten_onto_background(&mut buf, &[1, 2]).is_err());
    assert!(blended_rows(&buf, &[300], SampleSource::NativeEndian).is_err());
}
