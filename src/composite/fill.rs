use crate::blend::{BlendContext, BlendMode, BlendProcs};
use crate::buffer::PixelBuffer;
use crate::color::DeviceColor;
use crate::composite::pixel::{composite_knockout_simple, composite_pixel_alpha, first_blend_spot, merge_tag};
use crate::foundation::core::{ColorPolarity, Depth, IntRect, MAX_COLORANTS, MAX_PIXEL_SLOTS};
use crate::foundation::error::{TransError, TransResult};
use crate::foundation::math::{Sample, ratio_16_16};

/// Graphics state of one constant-colour fill.
#[derive(Clone, Copy, Debug)]
pub struct FillParams {
    /// Fill opacity in sample units of the target buffer.
    pub alpha: u16,
    /// Fill shape in sample units of the target buffer.
    pub shape: u16,
    pub blend_mode: BlendMode,
    pub polarity: ColorPolarity,
    /// Restrict subtractive write-back to the components drawn in `ctx`.
    pub overprint: bool,
    pub procs: BlendProcs,
    pub ctx: BlendContext,
}

impl FillParams {
    /// Opaque Normal fill at `depth`.
    pub fn opaque(depth: Depth) -> Self {
        Self {
            alpha: depth.max_value(),
            shape: depth.max_value(),
            blend_mode: BlendMode::Normal,
            polarity: ColorPolarity::Additive,
            overprint: false,
            procs: BlendProcs::default(),
            ctx: BlendContext::default(),
        }
    }

    pub fn with_alpha(mut self, alpha: u16) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_shape(mut self, shape: u16) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn with_polarity(mut self, polarity: ColorPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    fn writes_drawn_only(&self) -> bool {
        self.overprint && !self.polarity.is_additive()
    }
}

/// Specialised fill loops. Each one is the generic loop with some inputs fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FillKind {
    /// Zero opacity: colour and alpha cannot change, only shape and tags.
    MetadataOnly,
    Gray,
    Rgb,
    CmykNormal,
    Generic,
}

const GENERIC: u8 = 0;
const GRAY: u8 = 1;
const RGB: u8 = 2;
const CMYK_NORMAL: u8 = 3;

impl FillKind {
    fn select(buf: &PixelBuffer, params: &FillParams) -> Self {
        let n_comp = buf.n_colorants();
        let additive = params.polarity == ColorPolarity::Additive;
        if params.alpha == 0 {
            Self::MetadataOnly
        } else if n_comp == 1 && additive {
            Self::Gray
        } else if n_comp == 3 && additive && buf.num_spots == 0 {
            Self::Rgb
        } else if n_comp == 4
            && params.polarity == ColorPolarity::Subtractive
            && buf.num_spots == 0
            && params.blend_mode.is_normal()
        {
            Self::CmykNormal
        } else {
            Self::Generic
        }
    }
}

/// Per-call state shared by the fill loops.
struct Paint<S: Sample> {
    src: [S; MAX_PIXEL_SLOTS],
    complement: [bool; MAX_COLORANTS],
    n_comp: usize,
    shape: S,
    tag: S,
    first_blend_spot: usize,
    drawn_only: bool,
}

fn check_fill(buf: &PixelBuffer, color: &DeviceColor, params: &FillParams) -> TransResult<()> {
    if color.n_comp() != buf.n_colorants() {
        return Err(TransError::validation(format!(
            "fill colour has {} components, buffer has {}",
            color.n_comp(),
            buf.n_colorants()
        )));
    }
    for &v in &color.values {
        buf.depth.check_value(v)?;
    }
    buf.depth.check_value(params.alpha)?;
    buf.depth.check_value(params.shape)?;
    Ok(())
}

fn paint<S: Sample>(buf: &PixelBuffer, color: &DeviceColor, params: &FillParams) -> Paint<S> {
    let n_comp = buf.n_colorants();
    let mut src = [S::ZERO; MAX_PIXEL_SLOTS];
    let mut complement = [false; MAX_COLORANTS];
    for i in 0..n_comp {
        complement[i] = params.polarity.complements(i, n_comp, buf.num_spots);
        let v = S::from_u16(color.values[i]);
        src[i] = if complement[i] { v.complement() } else { v };
    }
    src[n_comp] = S::from_u16(params.alpha);
    Paint {
        src,
        complement,
        n_comp,
        shape: S::from_u16(params.shape),
        tag: S::from_u16(color.tag),
        first_blend_spot: first_blend_spot(n_comp, buf.num_spots, params.blend_mode),
        drawn_only: params.writes_drawn_only(),
    }
}

/// Clip `rect` to the buffer and grow its dirty rectangle. `None` when nothing is left.
fn clip(buf: &mut PixelBuffer, rect: IntRect) -> Option<IntRect> {
    let clipped = rect.intersect(buf.rect);
    if clipped.is_empty() {
        return None;
    }
    buf.dirty = buf.dirty.union(clipped);
    Some(clipped)
}

/// Composite a constant colour over `rect` of the buffer.
///
/// `color` holds device values (ink amounts for subtractive colorants); its tag is
/// copied into the tag plane where the result is opaque and merged elsewhere. Shape and
/// alpha_g planes are unioned with the fill shape and opacity.
pub fn fill_rectangle(
    buf: &mut PixelBuffer,
    rect: IntRect,
    color: &DeviceColor,
    params: &FillParams,
) -> TransResult<()> {
    if buf.n_chan == 0 {
        return Ok(());
    }
    check_fill(buf, color, params)?;
    let Some(region) = clip(buf, rect) else {
        return Ok(());
    };
    let kind = FillKind::select(buf, params);
    tracing::trace!(?region, ?kind, mode = %params.blend_mode, "fill rectangle");
    match buf.depth {
        Depth::Eight => fill_with::<u8>(buf, region, color, params, kind),
        Depth::Sixteen => fill_with::<u16>(buf, region, color, params, kind),
    }
}

fn fill_with<S: Sample>(
    buf: &mut PixelBuffer,
    region: IntRect,
    color: &DeviceColor,
    params: &FillParams,
    kind: FillKind,
) -> TransResult<()> {
    let p = paint::<S>(buf, color, params);
    match kind {
        FillKind::MetadataOnly => fill_metadata::<S>(buf, region, &p),
        FillKind::Gray => fill_loop::<S, GRAY>(buf, region, &p, params),
        FillKind::Rgb => fill_loop::<S, RGB>(buf, region, &p, params),
        FillKind::CmykNormal => fill_loop::<S, CMYK_NORMAL>(buf, region, &p, params),
        FillKind::Generic => fill_loop::<S, GENERIC>(buf, region, &p, params),
    }
}

fn fill_metadata<S: Sample>(buf: &mut PixelBuffer, region: IntRect, p: &Paint<S>) -> TransResult<()> {
    let (shape_plane, tag_plane) = (buf.shape_plane(), buf.tag_plane());
    if shape_plane.is_none() && tag_plane.is_none() {
        return Ok(());
    }
    let (layout, rect, alpha_plane) = (buf.layout(), buf.rect, buf.alpha_plane());
    let data = buf.samples_mut::<S>()?;
    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let base = layout.offset((x - rect.x0) as usize, (y - rect.y0) as usize, 0);
            let ps = layout.planestride;
            if let Some(sp) = shape_plane {
                data[base + sp * ps] = S::union(data[base + sp * ps], p.shape);
            }
            if let Some(tp) = tag_plane {
                let idx = base + tp * ps;
                data[idx] = if data[base + alpha_plane * ps] == S::FULL {
                    p.tag
                } else {
                    merge_tag(data[idx], p.tag)
                };
            }
        }
    }
    Ok(())
}

/// Normal-mode [`composite_pixel_alpha`] for a source whose alpha is non-zero.
#[inline]
fn normal_over<S: Sample>(dst: &mut [S], src: &[S], n_comp: usize) {
    let a_b = dst[n_comp];
    if a_b == S::ZERO {
        dst[..=n_comp].copy_from_slice(&src[..=n_comp]);
        return;
    }
    let a_s = src[n_comp];
    let a_r = S::union(a_b, a_s);
    let src_scale = ratio_16_16(a_s.widen(), a_r.widen());
    for i in 0..n_comp {
        let c_b = dst[i].widen();
        dst[i] = S::clamp_wide(((c_b << 16) + src_scale * (src[i].widen() - c_b) + 0x8000) >> 16);
    }
    dst[n_comp] = a_r;
}

fn fill_loop<S: Sample, const KIND: u8>(
    buf: &mut PixelBuffer,
    region: IntRect,
    p: &Paint<S>,
    params: &FillParams,
) -> TransResult<()> {
    let n_comp = match KIND {
        GRAY => 1,
        RGB => 3,
        CMYK_NORMAL => 4,
        _ => p.n_comp,
    };
    let mode = if KIND == CMYK_NORMAL { BlendMode::Normal } else { params.blend_mode };
    let normal = KIND != GENERIC && mode.is_normal();
    let complement = |i: usize| match KIND {
        GRAY | RGB => false,
        CMYK_NORMAL => true,
        _ => p.complement[i],
    };
    let (shape_plane, alpha_g_plane, tag_plane) = (buf.shape_plane(), buf.alpha_g_plane(), buf.tag_plane());
    let (layout, rect) = (buf.layout(), buf.rect);
    let ps = layout.planestride;
    let src_alpha = p.src[n_comp];
    let data = buf.samples_mut::<S>()?;
    let mut dst = [S::ZERO; MAX_PIXEL_SLOTS];

    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let base = layout.offset((x - rect.x0) as usize, (y - rect.y0) as usize, 0);
            for i in 0..n_comp {
                let v = data[base + i * ps];
                dst[i] = if complement(i) { v.complement() } else { v };
            }
            dst[n_comp] = data[base + n_comp * ps];
            if normal {
                normal_over(&mut dst, &p.src, n_comp);
            } else {
                composite_pixel_alpha(
                    &mut dst,
                    &p.src,
                    n_comp,
                    mode,
                    p.first_blend_spot,
                    &params.procs,
                    &params.ctx,
                );
            }
            for i in 0..n_comp {
                if !p.drawn_only || params.ctx.is_drawn(i) {
                    data[base + i * ps] = if complement(i) { dst[i].complement() } else { dst[i] };
                }
            }
            data[base + n_comp * ps] = dst[n_comp];
            if let Some(gp) = alpha_g_plane {
                data[base + gp * ps] = S::union(data[base + gp * ps], src_alpha);
            }
            if let Some(sp) = shape_plane {
                data[base + sp * ps] = S::union(data[base + sp * ps], p.shape);
            }
            if let Some(tp) = tag_plane {
                let idx = base + tp * ps;
                data[idx] = if dst[n_comp] == S::FULL {
                    p.tag
                } else {
                    merge_tag(data[idx], p.tag)
                };
            }
        }
    }
    Ok(())
}

/// Paint a constant colour into a knockout group: `params.shape` decides how much of the
/// destination is replaced by the colour at opacity `params.alpha`.
pub fn fill_rectangle_knockout(
    buf: &mut PixelBuffer,
    rect: IntRect,
    color: &DeviceColor,
    params: &FillParams,
) -> TransResult<()> {
    if buf.n_chan == 0 {
        return Ok(());
    }
    check_fill(buf, color, params)?;
    let Some(region) = clip(buf, rect) else {
        return Ok(());
    };
    tracing::trace!(?region, "fill rectangle knockout");
    match buf.depth {
        Depth::Eight => knockout_loop::<u8>(buf, region, color, params),
        Depth::Sixteen => knockout_loop::<u16>(buf, region, color, params),
    }
}

fn knockout_loop<S: Sample>(
    buf: &mut PixelBuffer,
    region: IntRect,
    color: &DeviceColor,
    params: &FillParams,
) -> TransResult<()> {
    let mut p = paint::<S>(buf, color, params);
    let n_comp = p.n_comp;
    p.src[n_comp] = p.shape;
    let opacity = S::from_u16(params.alpha);
    let (shape_plane, tag_plane) = (buf.shape_plane(), buf.tag_plane());
    let (layout, rect) = (buf.layout(), buf.rect);
    let ps = layout.planestride;
    let data = buf.samples_mut::<S>()?;
    let mut dst = [S::ZERO; MAX_PIXEL_SLOTS];

    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let base = layout.offset((x - rect.x0) as usize, (y - rect.y0) as usize, 0);
            for i in 0..n_comp {
                let v = data[base + i * ps];
                dst[i] = if p.complement[i] { v.complement() } else { v };
            }
            dst[n_comp] = data[base + n_comp * ps];
            let mut shape = shape_plane.map(|sp| data[base + sp * ps]);
            let mut tag = tag_plane.map(|tp| data[base + tp * ps]);
            composite_knockout_simple(&mut dst, shape.as_mut(), tag.as_mut(), &p.src, p.tag, n_comp, opacity);
            for i in 0..n_comp {
                data[base + i * ps] = if p.complement[i] { dst[i].complement() } else { dst[i] };
            }
            data[base + n_comp * ps] = dst[n_comp];
            if let (Some(sp), Some(v)) = (shape_plane, shape) {
                data[base + sp * ps] = v;
            }
            if let (Some(tp), Some(v)) = (tag_plane, tag) {
                data[base + tp * ps] = v;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composite/fill.rs"]
mod tests;
