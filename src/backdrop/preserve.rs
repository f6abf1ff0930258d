//! Initialise non-isolated and knockout groups from the buffer below them.

use crate::backdrop::transform::{ColorTransform, PlanarRegion, PlanarRegionMut};
use crate::buffer::{PixelBuffer, PlaneLayout, Samples};
use crate::foundation::core::{Depth, IntRect};
use crate::foundation::error::{TransError, TransResult};
use crate::foundation::math::Sample;

#[derive(Clone, Copy)]
struct Placement {
    layout: PlaneLayout,
    rect: IntRect,
}

impl Placement {
    fn of(buf: &PixelBuffer) -> Self {
        Self {
            layout: buf.layout(),
            rect: buf.rect,
        }
    }

    #[inline]
    fn offset(&self, x: i32, y: i32, plane: usize) -> usize {
        self.layout
            .offset((x - self.rect.x0) as usize, (y - self.rect.y0) as usize, plane)
    }
}

fn copy_plane<S: Sample>(
    dst: &mut [S],
    to: Placement,
    dst_plane: usize,
    src: &[S],
    from: Placement,
    src_plane: usize,
    region: IntRect,
) {
    let w = region.width();
    for y in region.y0..region.y1 {
        let d = to.offset(region.x0, y, dst_plane);
        let s = from.offset(region.x0, y, src_plane);
        dst[d..d + w].copy_from_slice(&src[s..s + w]);
    }
}

fn check_depth(buf: &PixelBuffer, parent: &PixelBuffer) -> TransResult<()> {
    if buf.depth != parent.depth {
        return Err(TransError::validation(format!(
            "group depth {:?} does not match parent depth {:?}",
            buf.depth, parent.depth
        )));
    }
    if buf.n_chan == 0 || parent.n_chan == 0 {
        return Err(TransError::validation("backdrop copy needs an alpha plane"));
    }
    Ok(())
}

/// Source samples and the destination storage, zeroed. With `from_backdrop` both sides
/// are knockout snapshots.
fn stores<'a, S: Sample>(
    buf: &'a mut PixelBuffer,
    parent: &'a PixelBuffer,
    from_backdrop: bool,
) -> TransResult<(&'a mut [S], &'a [S])> {
    let src = if from_backdrop {
        parent
            .backdrop
            .as_ref()
            .ok_or_else(|| TransError::validation("parent has no backdrop snapshot"))?
    } else {
        &parent.data
    };
    let src = S::samples(src)
        .ok_or_else(|| TransError::validation(format!("parent samples are not {:?}", S::DEPTH)))?;
    let dst = if from_backdrop {
        buf.backdrop
            .insert(Samples::zeroed(buf.depth, buf.n_chan * buf.planestride))
    } else {
        buf.data.fill(0);
        &mut buf.data
    };
    let dst = S::samples_mut(dst)
        .ok_or_else(|| TransError::validation(format!("group samples are not {:?}", S::DEPTH)))?;
    Ok((dst, src))
}

/// Copy the parent's colour, alpha and tag planes over the overlap of the two
/// rectangles into a freshly zeroed `buf`. Shape and alpha_g planes are not copied.
///
/// With `from_backdrop` the parent's knockout snapshot is copied into `buf.backdrop`
/// instead (colour and alpha only).
#[tracing::instrument(skip(buf, parent), fields(rect = ?buf.rect, parent = ?parent.rect))]
pub fn preserve_backdrop(
    buf: &mut PixelBuffer,
    parent: &PixelBuffer,
    from_backdrop: bool,
) -> TransResult<()> {
    check_depth(buf, parent)?;
    if buf.n_chan != parent.n_chan {
        return Err(TransError::validation(format!(
            "group has {} channels, parent has {}; use a colour transform",
            buf.n_chan, parent.n_chan
        )));
    }
    match buf.depth {
        Depth::Eight => copy_backdrop::<u8>(buf, parent, from_backdrop),
        Depth::Sixteen => copy_backdrop::<u16>(buf, parent, from_backdrop),
    }
}

fn copy_backdrop<S: Sample>(
    buf: &mut PixelBuffer,
    parent: &PixelBuffer,
    from_backdrop: bool,
) -> TransResult<()> {
    let region = buf.rect.intersect(parent.rect);
    let (to, from) = (Placement::of(buf), Placement::of(parent));
    let n_chan = buf.n_chan;
    let tags = match (buf.tag_plane(), parent.tag_plane()) {
        (Some(d), Some(s)) if !from_backdrop => Some((d, s)),
        _ => None,
    };
    let (dst, src) = stores::<S>(buf, parent, from_backdrop)?;
    if region.is_empty() {
        return Ok(());
    }
    for plane in 0..n_chan {
        copy_plane(dst, to, plane, src, from, plane, region);
    }
    if let Some((d, s)) = tags {
        copy_plane(dst, to, d, src, from, s, region);
    }
    Ok(())
}

/// [`preserve_backdrop`] through a colour conversion: colour planes go through one
/// `transform` call, alpha and tags are copied. An identity transform copies directly.
#[tracing::instrument(
    skip(buf, parent, transform),
    fields(rect = ?buf.rect, identity = transform.is_identity())
)]
pub fn preserve_backdrop_cm(
    buf: &mut PixelBuffer,
    parent: &PixelBuffer,
    from_backdrop: bool,
    transform: &dyn ColorTransform,
) -> TransResult<()> {
    if transform.is_identity() {
        return preserve_backdrop(buf, parent, from_backdrop);
    }
    check_depth(buf, parent)?;
    match buf.depth {
        Depth::Eight => transform_backdrop::<u8>(buf, parent, from_backdrop, transform),
        Depth::Sixteen => transform_backdrop::<u16>(buf, parent, from_backdrop, transform),
    }
}

fn transform_backdrop<S: Sample>(
    buf: &mut PixelBuffer,
    parent: &PixelBuffer,
    from_backdrop: bool,
    transform: &dyn ColorTransform,
) -> TransResult<()> {
    let region = buf.rect.intersect(parent.rect);
    let (to, from) = (Placement::of(buf), Placement::of(parent));
    let (dst_comp, src_comp) = (buf.n_colorants(), parent.n_colorants());
    let (dst_alpha, src_alpha) = (buf.alpha_plane(), parent.alpha_plane());
    let tags = match (buf.tag_plane(), parent.tag_plane()) {
        (Some(d), Some(s)) if !from_backdrop => Some((d, s)),
        _ => None,
    };
    let (dst, src) = stores::<S>(buf, parent, from_backdrop)?;
    if region.is_empty() {
        return Ok(());
    }
    let (width, height) = (region.width(), region.height());
    let s0 = from.offset(region.x0, region.y0, 0);
    let d0 = to.offset(region.x0, region.y0, 0);
    S::run_transform(
        transform,
        PlanarRegion {
            data: &src[s0..],
            layout: from.layout,
            width,
            height,
            n_planes: src_comp,
        },
        PlanarRegionMut {
            data: &mut dst[d0..],
            layout: to.layout,
            width,
            height,
            n_planes: dst_comp,
        },
    )
    .map_err(TransError::color_transform)?;
    copy_plane(dst, to, dst_alpha, src, from, src_alpha, region);
    if let Some((d, s)) = tags {
        copy_plane(dst, to, d, src, from, s, region);
    }
    Ok(())
}

/// Store the first `n_chan` planes of `buf` as its knockout backdrop.
pub fn snapshot_backdrop(buf: &mut PixelBuffer) {
    buf.backdrop = Some(buf.data.prefix(buf.n_chan * buf.planestride));
}

#[cfg(test)]
#[path = "../../tests/unit/backdrop/preserve.rs"]
mod tests;
