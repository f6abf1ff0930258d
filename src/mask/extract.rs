//! Reduce a rendered mask group to the single plane of a [`SoftMaskBuffer`].

use crate::buffer::{PixelBuffer, Samples, SoftMaskBuffer, SoftMaskSubtype};
use crate::foundation::core::{ColorPolarity, Depth, IntRect};
use crate::foundation::error::{TransError, TransResult};
use crate::foundation::math::Sample;

/// Where each mask sample comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MaskSource {
    /// Copy one plane verbatim.
    Plane(usize),
    /// Device luminosity, computed only where the group alpha is non-zero.
    Gray,
    Rgb,
    Cmyk,
}

impl MaskSource {
    fn for_group(
        subtype: SoftMaskSubtype,
        group: &PixelBuffer,
        polarity: ColorPolarity,
    ) -> TransResult<Self> {
        let n_comp = group.n_colorants();
        let subtractive = polarity == ColorPolarity::Subtractive;
        Ok(match subtype {
            SoftMaskSubtype::Alpha => Self::Plane(group.alpha_plane()),
            SoftMaskSubtype::Luminosity => Self::Plane(0),
            SoftMaskSubtype::DeviceColor => match n_comp {
                1 => Self::Gray,
                n if !subtractive && n >= 3 => Self::Rgb,
                n if subtractive && n >= 4 => Self::Cmyk,
                n => {
                    return Err(TransError::validation(format!(
                        "cannot derive luminosity from {n} {polarity:?} colorants"
                    )));
                }
            },
        })
    }
}

/// Fill `mask` from the mask `group` over the overlap of their rectangles.
///
/// Device-colour luminosity is only written where the group was painted (alpha != 0);
/// other pixels keep their current value, which starts out as the mask background.
pub fn extract_soft_mask(
    mask: &mut SoftMaskBuffer,
    group: &PixelBuffer,
    polarity: ColorPolarity,
) -> TransResult<()> {
    if mask.depth != group.depth {
        return Err(TransError::validation(format!(
            "soft mask depth {:?} does not match group depth {:?}",
            mask.depth, group.depth
        )));
    }
    if group.n_chan == 0 {
        return Ok(());
    }
    let source = MaskSource::for_group(mask.subtype, group, polarity)?;
    let region = mask.rect.intersect(group.rect);
    tracing::trace!(?region, subtype = ?mask.subtype, ?source, "extract soft mask");
    if region.is_empty() {
        return Ok(());
    }
    match group.depth {
        Depth::Eight => extract::<u8>(mask, group, source, region),
        Depth::Sixteen => extract::<u16>(mask, group, source, region),
    }
}

fn mask_samples_mut<S: Sample>(mask: &mut SoftMaskBuffer) -> TransResult<&mut [S]> {
    let len = mask.rowstride * mask.rect.height();
    let (depth, bg) = (mask.depth, mask.bg_alpha);
    let data = mask.data.get_or_insert_with(|| {
        let mut plane = Samples::zeroed(depth, len);
        plane.fill(bg);
        plane
    });
    S::samples_mut(data)
        .ok_or_else(|| TransError::validation(format!("soft mask plane is not {:?}", S::DEPTH)))
}

fn extract<S: Sample>(
    mask: &mut SoftMaskBuffer,
    group: &PixelBuffer,
    source: MaskSource,
    region: IntRect,
) -> TransResult<()> {
    let (mask_rect, mask_stride) = (mask.rect, mask.rowstride);
    let src = group.samples::<S>()?;
    let dst = mask_samples_mut::<S>(mask)?;
    let layout = group.layout();
    let ps = layout.planestride;
    let alpha = group.alpha_plane();
    let max = S::MAX as f64;

    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let s = layout.offset((x - group.rect.x0) as usize, (y - group.rect.y0) as usize, 0);
            let d = (x - mask_rect.x0) as usize + (y - mask_rect.y0) as usize * mask_stride;
            if let MaskSource::Plane(p) = source {
                dst[d] = src[s + p * ps];
                continue;
            }
            if src[s + alpha * ps] == S::ZERO {
                continue;
            }
            let c = |i: usize| src[s + i * ps].widen() as f64;
            let lum = match source {
                MaskSource::Rgb => 0.30 * c(0) + 0.59 * c(1) + 0.11 * c(2),
                MaskSource::Cmyk => {
                    (0.30 * (max - c(0)) + 0.59 * (max - c(1)) + 0.11 * (max - c(2))) * (max - c(3))
                        / max
                }
                MaskSource::Gray | MaskSource::Plane(_) => c(0),
            };
            dst[d] = S::clamp_wide((lum + 0.5) as i64);
        }
    }
    Ok(())
}

/// Un-premultiply a luminosity mask group (plane 0) against a black background using its
/// alpha plane. Used when a soft mask is itself rendered under a soft mask.
pub fn blend_mask_with_alpha(buf: &mut PixelBuffer) -> TransResult<()> {
    if buf.n_chan < 2 {
        return Err(TransError::validation(format!(
            "mask group needs a colour and an alpha plane, has {} channels",
            buf.n_chan
        )));
    }
    match buf.depth {
        Depth::Eight => blend_with_alpha::<u8>(buf),
        Depth::Sixteen => blend_with_alpha::<u16>(buf),
    }
}

fn blend_with_alpha<S: Sample>(buf: &mut PixelBuffer) -> TransResult<()> {
    let alpha_off = buf.alpha_plane() * buf.planestride;
    let (width, height, rowstride) = (buf.rect.width(), buf.rect.height(), buf.rowstride);
    let data = buf.samples_mut::<S>()?;
    for row in 0..height {
        for col in 0..width {
            let pos = row * rowstride + col;
            let a = data[pos + alpha_off];
            if a == S::ZERO {
                data[pos] = S::ZERO;
            } else if a != S::FULL {
                let comp = data[pos].widen();
                data[pos] = S::clamp_wide(comp + S::div_max(-comp * (S::MAX - a.widen())));
            }
        }
    }
    Ok(())
}

/// Copy `plane` of `src` into the mask plane over the overlap of their rectangles.
pub fn copy_mask_plane(dst: &mut SoftMaskBuffer, src: &PixelBuffer, plane: usize) -> TransResult<()> {
    if dst.depth != src.depth {
        return Err(TransError::validation(format!(
            "soft mask depth {:?} does not match group depth {:?}",
            dst.depth, src.depth
        )));
    }
    if plane >= src.n_planes {
        return Err(TransError::validation(format!(
            "plane {plane} out of range ({} planes)",
            src.n_planes
        )));
    }
    let region = dst.rect.intersect(src.rect);
    if region.is_empty() {
        return Ok(());
    }
    match src.depth {
        Depth::Eight => copy_rows::<u8>(dst, src, plane, region),
        Depth::Sixteen => copy_rows::<u16>(dst, src, plane, region),
    }
}

fn copy_rows<S: Sample>(
    dst: &mut SoftMaskBuffer,
    src: &PixelBuffer,
    plane: usize,
    region: IntRect,
) -> TransResult<()> {
    let (mask_rect, mask_stride) = (dst.rect, dst.rowstride);
    let from = src.samples::<S>()?;
    let to = mask_samples_mut::<S>(dst)?;
    let layout = src.layout();
    let width = region.width();
    for y in region.y0..region.y1 {
        let s = layout.offset(
            (region.x0 - src.rect.x0) as usize,
            (y - src.rect.y0) as usize,
            plane,
        );
        let d = (region.x0 - mask_rect.x0) as usize + (y - mask_rect.y0) as usize * mask_stride;
        to[d..d + width].copy_from_slice(&from[s..s + width]);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/mask/extract.rs"]
mod tests;
