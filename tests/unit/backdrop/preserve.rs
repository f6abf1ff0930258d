use super::*;
use crate::buffer::PixelBufferDesc;
use crate::foundation::core::tags;

fn buffer(rect: IntRect, n_chan: usize, depth: Depth, has_tags: bool) -> PixelBuffer {
    PixelBuffer::new(&PixelBufferDesc {
        has_tags,
        has_shape: true,
        ..PixelBufferDesc::new(rect, n_chan, depth)
    })
    .unwrap()
}

fn painted_parent(depth: Depth) -> PixelBuffer {
    let mut parent = buffer(IntRect::new(0, 0, 2, 2), 2, depth, true);
    for y in 0..2 {
        for x in 0..2 {
            let v = (10 + x + 2 * y) as u16;
            parent.set(x, y, 0, v).unwrap();
            parent.set(x, y, 1, 200).unwrap();
            parent.set(x, y, 2, 99).unwrap();
            parent.set(x, y, 3, tags::TEXT).unwrap();
        }
    }
    parent
}

struct Invert;

impl ColorTransform for Invert {
    fn transform_8(&self, src: PlanarRegion<'_, u8>, mut dst: PlanarRegionMut<'_, u8>) -> anyhow::Result<()> {
        for row in 0..src.height {
            for col in 0..src.width {
                dst.set(col, row, 0, 255 - src.get(col, row, 0));
            }
        }
        Ok(())
    }

    fn transform_16(&self, _: PlanarRegion<'_, u16>, _: PlanarRegionMut<'_, u16>) -> anyhow::Result<()> {
        anyhow::bail!("no 16-bit link")
    }
}

struct Identity;

impl ColorTransform for Identity {
    fn is_identity(&self) -> bool {
        true
    }

    fn transform_8(&self, _: PlanarRegion<'_, u8>, _: PlanarRegionMut<'_, u8>) -> anyhow::Result<()> {
        anyhow::bail!("identity transforms are never called")
    }

    fn transform_16(&self, _: PlanarRegion<'_, u16>, _: PlanarRegionMut<'_, u16>) -> anyhow::Result<()> {
        anyhow::bail!("identity transforms are never called")
    }
}

#[test]
fn copies_overlap_and_zero_fills_the_rest() {
    let parent = painted_parent(Depth::Eight);
    let mut buf = buffer(IntRect::new(1, 1, 3, 3), 2, Depth::Eight, true);
    buf.fill_plane(0, 77).unwrap();
    preserve_backdrop(&mut buf, &parent, false).unwrap();
    assert_eq!(buf.pixel(1, 1).unwrap(), vec![13, 200, 0, tags::TEXT]);
    assert_eq!(buf.pixel(2, 2).unwrap(), vec![0, 0, 0, 0]);
}

#[test]
fn knockout_snapshot_copy_targets_backdrop() {
    let mut parent = painted_parent(Depth::Sixteen);
    snapshot_backdrop(&mut parent);
    assert_eq!(parent.backdrop.as_ref().map(Samples::len), Some(8));
    let mut buf = buffer(IntRect::new(0, 0, 2, 2), 2, Depth::Sixteen, true);
    preserve_backdrop(&mut buf, &parent, true).unwrap();
    let bd = buf.backdrop.as_ref().unwrap();
    assert_eq!(bd.len(), 8);
    assert_eq!((bd.get(3), bd.get(7)), (13, 200));
    assert!(buf.data.as_slice::<u16>().unwrap().iter().all(|&v| v == 0));
}

#[test]
fn missing_snapshot_and_mismatches_are_errors() {
    let parent = painted_parent(Depth::Eight);
    let mut buf = buffer(IntRect::new(0, 0, 2, 2), 2, Depth::Eight, false);
    assert!(preserve_backdrop(&mut buf, &parent, true).is_err());
    let mut deep = buffer(IntRect::new(0, 0, 2, 2), 2, Depth::Sixteen, false);
    assert!(preserve_backdrop(&mut deep, &parent, false).is_err());
    let mut rgb = buffer(IntRect::new(0, 0, 2, 2), 4, Depth::Eight, false);
    assert!(preserve_backdrop(&mut rgb, &parent, false).is_err());
}

#[test]
fn colour_transform_converts_colour_and_copies_alpha() {
    let parent = painted_parent(Depth::Eight);
    let mut buf = buffer(IntRect::new(0, 0, 2, 2), 2, Depth::Eight, true);
    preserve_backdrop_cm(&mut buf, &parent, false, &Invert).unwrap();
    assert_eq!(buf.pixel(1, 0).unwrap(), vec![244, 200, 0, tags::TEXT]);

    let mut copied = buffer(IntRect::new(0, 0, 2, 2), 2, Depth::Eight, true);
    preserve_backdrop_cm(&mut copied, &parent, false, &Identity).unwrap();
    assert_eq!(copied.pixel(1, 0).unwrap(), vec![11, 200, 0, tags::TEXT]);
}

#[test]
fn colour_transform_failure_propagates() {
    let parent = painted_parent(Depth::Sixteen);
    let mut buf = buffer(IntRect::new(0, 0, 2, 2), 2, Depth::Sixteen, false);
    let err = preserve_backdrop_cm(&mut buf, &parent, false, &Invert).unwrap_err();
    assert!(matches!(err, TransError::ColorTransform(_)));
}
