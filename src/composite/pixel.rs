//! Single-pixel compositing.
//!
//! A pixel is a slice of `n_chan` colour samples in blending polarity followed by alpha
//! at index `n_chan`. Knockout helpers that need a source shape read it from
//! `n_chan + 1` where documented.

use crate::blend::{BlendContext, BlendMode, BlendProcs, blend_pixel};
use crate::foundation::core::{MAX_PIXEL_SLOTS, tags};
use crate::foundation::math::{Sample, ratio_16_16};

/// Porter-Duff union of two alphas.
#[inline]
pub fn union<S: Sample>(a: S, b: S) -> S {
    S::union(a, b)
}

/// `union(a1, a2 * mask)`.
#[inline]
pub fn union_mul<S: Sample>(a1: S, a2: S, mask: S) -> S {
    if mask == S::FULL {
        S::union(a1, a2)
    } else {
        S::union(a1, S::mul(a2, mask))
    }
}

/// Index of the first colour channel that is composited with Normal instead of `mode`.
#[inline]
pub fn first_blend_spot(n_chan: usize, num_spots: usize, mode: BlendMode) -> usize {
    if num_spots > 0 && !mode.is_valid_for_spot() {
        n_chan.saturating_sub(num_spots)
    } else {
        n_chan
    }
}

#[inline]
pub(crate) fn merge_tag<S: Sample>(dst: S, src: S) -> S {
    S::narrow((dst.widen() | src.widen()) & !i64::from(tags::UNTOUCHED))
}

/// Composite `src` over `backdrop` into `dst`. `a_s` and `a_b` must be non-zero.
#[allow(clippy::too_many_arguments)]
#[inline]
fn mix_over<S: Sample>(
    dst: &mut [S],
    backdrop: &[S],
    src: &[S],
    n_chan: usize,
    mode: BlendMode,
    first_blend_spot: usize,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    let a_s = src[n_chan];
    let a_b = backdrop[n_chan];
    let a_r = S::union(a_b, a_s);
    if a_r == S::ZERO {
        dst[n_chan] = S::ZERO;
        return;
    }
    let src_scale = ratio_16_16(a_s.widen(), a_r.widen());
    let interp = |c_b: i64, c: i64| S::clamp_wide(((c_b << 16) + src_scale * (c - c_b) + 0x8000) >> 16);

    if mode.is_normal() {
        for i in 0..n_chan {
            dst[i] = interp(backdrop[i].widen(), src[i].widen());
        }
    } else {
        let blended = first_blend_spot.min(n_chan);
        let mut blend = [S::ZERO; MAX_PIXEL_SLOTS];
        blend_pixel(&mut blend, backdrop, src, blended, mode, procs, ctx);
        let a_b = a_b.widen();
        for i in 0..n_chan {
            let c_s = src[i].widen();
            let c = if i < blended {
                c_s + S::div_max(a_b * (blend[i].widen() - c_s))
            } else {
                c_s
            };
            dst[i] = interp(backdrop[i].widen(), c);
        }
    }
    dst[n_chan] = a_r;
}

/// Composite a source pixel over the destination pixel in place.
///
/// No-op when the source alpha is 0; exact copy when the destination alpha is 0.
/// Channels at or past `first_blend_spot` are composited with Normal.
#[allow(clippy::too_many_arguments)]
pub fn composite_pixel_alpha<S: Sample>(
    dst: &mut [S],
    src: &[S],
    n_chan: usize,
    mode: BlendMode,
    first_blend_spot: usize,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    if src[n_chan] == S::ZERO {
        return;
    }
    if dst[n_chan] == S::ZERO {
        dst[..=n_chan].copy_from_slice(&src[..=n_chan]);
        return;
    }
    let mut backdrop = [S::ZERO; MAX_PIXEL_SLOTS];
    backdrop[..=n_chan].copy_from_slice(&dst[..=n_chan]);
    mix_over(dst, &backdrop, src, n_chan, mode, first_blend_spot, procs, ctx);
}

/// Composite `src` against a knockout `backdrop`, replacing whatever `dst` held.
#[allow(clippy::too_many_arguments)]
fn knockout_composite_pixel_alpha<S: Sample>(
    backdrop: &[S],
    tos_shape: S,
    dst: &mut [S],
    src: &[S],
    n_chan: usize,
    mode: BlendMode,
    first_blend_spot: usize,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    if src[n_chan] == S::ZERO {
        if tos_shape != S::ZERO {
            dst[..=n_chan].copy_from_slice(&backdrop[..=n_chan]);
        }
        return;
    }
    if backdrop[n_chan] == S::ZERO {
        dst[..=n_chan].copy_from_slice(&src[..=n_chan]);
        return;
    }
    mix_over(dst, backdrop, src, n_chan, mode, first_blend_spot, procs, ctx);
}

/// Knockout composite driven by the source shape at `src[n_chan + 1]`.
///
/// In Normal mode the shape interpolates (premultiplied) between the destination and the
/// source, so shape 0 leaves `dst` untouched and full shape copies colour and alpha. Other
/// modes composite over the destination wherever the shape is non-zero.
pub fn composite_knockout<S: Sample>(
    dst: &mut [S],
    src: &[S],
    n_chan: usize,
    mode: BlendMode,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    let shape = src[n_chan + 1];
    if shape == S::ZERO {
        return;
    }
    if mode.is_normal() {
        if shape == S::FULL {
            dst[..=n_chan].copy_from_slice(&src[..=n_chan]);
            return;
        }
        let mut shaped = [S::ZERO; MAX_PIXEL_SLOTS];
        shaped[..n_chan].copy_from_slice(&src[..n_chan]);
        shaped[n_chan] = shape;
        composite_knockout_simple(dst, None, None, &shaped, S::ZERO, n_chan, src[n_chan]);
    } else {
        let mut backdrop = [S::ZERO; MAX_PIXEL_SLOTS];
        backdrop[..=n_chan].copy_from_slice(&dst[..=n_chan]);
        mix_over(dst, &backdrop, src, n_chan, mode, n_chan, procs, ctx);
    }
}

/// Premultiplied interpolation from `(dst, dst_alpha)` towards `(src, src_alpha)` by
/// `shape`. Returns the result alpha.
fn shape_interpolate<S: Sample>(
    dst: &mut [S],
    src: &[S],
    n_chan: usize,
    shape: S,
    src_alpha: S,
) -> S {
    let max = S::MAX;
    let dst_alpha = dst[n_chan].widen();
    let shape_w = shape.widen();
    let src_alpha_w = src_alpha.widen();
    let result_alpha = S::clamp_wide(dst_alpha + S::div_max((src_alpha_w - dst_alpha) * shape_w));
    let ra = result_alpha.widen();
    if ra != 0 {
        for i in 0..n_chan {
            let t = dst[i].widen() * dst_alpha * (max - shape_w)
                + src[i].widen() * src_alpha_w * shape_w
                + ra * S::HALF;
            dst[i] = S::clamp_wide(t / (ra * max));
        }
    }
    dst[n_chan] = result_alpha;
    result_alpha
}

/// Knockout paint with the source shape at `src[n_chan]` and constant `opacity`.
///
/// Updates the destination shape (union) and tag (copy at full shape, merge otherwise).
#[allow(clippy::too_many_arguments)]
pub fn composite_knockout_simple<S: Sample>(
    dst: &mut [S],
    dst_shape: Option<&mut S>,
    dst_tag: Option<&mut S>,
    src: &[S],
    tag: S,
    n_chan: usize,
    opacity: S,
) {
    let src_shape = src[n_chan];
    if src_shape == S::ZERO {
        return;
    }
    if src_shape == S::FULL {
        dst[..n_chan].copy_from_slice(&src[..n_chan]);
        dst[n_chan] = opacity;
        if let Some(s) = dst_shape {
            *s = S::FULL;
        }
        if let Some(t) = dst_tag {
            *t = tag;
        }
        return;
    }
    shape_interpolate(dst, src, n_chan, src_shape, opacity);
    if let Some(s) = dst_shape {
        *s = S::union(*s, src_shape);
    }
    if let Some(t) = dst_tag {
        *t = merge_tag(*t, tag);
    }
}

/// Isolated knockout composite: `shape` and the group `shape_mask` decide how much of the
/// source (alpha scaled by `alpha_mask`) replaces the destination.
#[allow(clippy::too_many_arguments)]
pub fn composite_knockout_isolated<S: Sample>(
    dst: &mut [S],
    dst_shape: Option<&mut S>,
    dst_tag: Option<&mut S>,
    src: &[S],
    n_chan: usize,
    shape: S,
    tag: S,
    alpha_mask: S,
    shape_mask: S,
) {
    if shape == S::ZERO {
        return;
    }
    if shape == S::FULL && shape_mask == S::FULL {
        dst[..n_chan].copy_from_slice(&src[..n_chan]);
        dst[n_chan] = S::mul(src[n_chan], alpha_mask);
        if let Some(s) = dst_shape {
            *s = S::FULL;
        }
        if let Some(t) = dst_tag {
            *t = tag;
        }
        return;
    }
    let src_shape = S::mul(shape, shape_mask);
    let src_alpha = S::mul(src[n_chan], alpha_mask);
    shape_interpolate(dst, src, n_chan, src_shape, src_alpha);
    if let Some(s) = dst_shape {
        *s = S::union(*s, src_shape);
    }
    if let Some(t) = dst_tag {
        *t = merge_tag(*t, tag);
    }
}

/// Composite an isolated group pixel with group opacity `alpha`.
#[allow(clippy::too_many_arguments)]
pub fn composite_group<S: Sample>(
    dst: &mut [S],
    dst_alpha_g: Option<&mut S>,
    src: &[S],
    n_chan: usize,
    alpha: S,
    mode: BlendMode,
    first_blend_spot: usize,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    if alpha == S::FULL {
        composite_pixel_alpha(dst, src, n_chan, mode, first_blend_spot, procs, ctx);
        if let Some(ag) = dst_alpha_g {
            *ag = S::union(*ag, src[n_chan]);
        }
        return;
    }
    if src[n_chan] == S::ZERO {
        return;
    }
    let mut scaled = [S::ZERO; MAX_PIXEL_SLOTS];
    scaled[..n_chan].copy_from_slice(&src[..n_chan]);
    scaled[n_chan] = S::mul(src[n_chan], alpha);
    composite_pixel_alpha(dst, &scaled, n_chan, mode, first_blend_spot, procs, ctx);
    if let Some(ag) = dst_alpha_g {
        *ag = S::union(*ag, scaled[n_chan]);
    }
}

/// Solve `src = (ca, src_alpha_g) over base` for `ca`, writing colour into `ca`.
fn uncomposite<S: Sample>(ca: &mut [S], src: &[S], base: &[S], src_alpha_g: S, n_chan: usize) {
    let base_alpha = base[n_chan];
    if src_alpha_g == S::FULL || base_alpha == S::ZERO {
        ca[..n_chan].copy_from_slice(&src[..n_chan]);
        return;
    }
    let (ab, ag) = (base_alpha.widen(), src_alpha_g.widen());
    let scale = (ab * S::MAX * 2 + ag) / (ag << 1) - ab;
    for i in 0..n_chan {
        let (si, di) = (src[i].widen(), base[i].widen());
        ca[i] = S::clamp_wide(si + S::div_max((si - di) * scale));
    }
}

/// Composite a non-isolated group pixel: remove the backdrop already folded into `src`
/// (tracked by `src_alpha_g`), then composite with group opacity `alpha`.
#[allow(clippy::too_many_arguments)]
pub fn recomposite_group<S: Sample>(
    dst: &mut [S],
    dst_alpha_g: Option<&mut S>,
    src: &[S],
    src_alpha_g: S,
    n_chan: usize,
    alpha: S,
    mode: BlendMode,
    first_blend_spot: usize,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    if src_alpha_g == S::ZERO {
        return;
    }
    if mode.is_normal() && alpha == S::FULL {
        dst[..=n_chan].copy_from_slice(&src[..=n_chan]);
        if let Some(ag) = dst_alpha_g {
            *ag = S::union(*ag, src_alpha_g);
        }
        return;
    }
    let mut ca = [S::ZERO; MAX_PIXEL_SLOTS];
    uncomposite(&mut ca, src, dst, src_alpha_g, n_chan);
    ca[n_chan] = S::mul(src_alpha_g, alpha);
    if let Some(ag) = dst_alpha_g {
        *ag = S::union(*ag, ca[n_chan]);
    }
    composite_pixel_alpha(dst, &ca, n_chan, mode, first_blend_spot, procs, ctx);
}

/// Knockout composite of an isolated group pixel against the knockout group's initial
/// `backdrop`.
///
/// Zero `tos_shape` leaves `dst` unchanged, except that under a soft mask the effective
/// alpha is passed through.
#[allow(clippy::too_many_arguments)]
pub fn composite_knockout_group<S: Sample>(
    backdrop: &[S],
    tos_shape: S,
    dst: &mut [S],
    dst_alpha_g: Option<&mut S>,
    src: &[S],
    n_chan: usize,
    alpha: S,
    mode: BlendMode,
    first_blend_spot: usize,
    has_mask: bool,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    if tos_shape == S::ZERO {
        if has_mask {
            dst[n_chan] = alpha;
        }
        return;
    }
    if alpha == S::FULL {
        knockout_composite_pixel_alpha(
            backdrop,
            tos_shape,
            dst,
            src,
            n_chan,
            mode,
            first_blend_spot,
            procs,
            ctx,
        );
        if let Some(ag) = dst_alpha_g {
            *ag = S::union(*ag, src[n_chan]);
        }
        return;
    }
    if tos_shape != S::FULL || src[n_chan] == S::ZERO {
        return;
    }
    let mut scaled = [S::ZERO; MAX_PIXEL_SLOTS];
    scaled[..n_chan].copy_from_slice(&src[..n_chan]);
    scaled[n_chan] = S::mul(src[n_chan], alpha);
    knockout_composite_pixel_alpha(
        backdrop,
        tos_shape,
        dst,
        &scaled,
        n_chan,
        mode,
        first_blend_spot,
        procs,
        ctx,
    );
    if let Some(ag) = dst_alpha_g {
        *ag = S::union(*ag, scaled[n_chan]);
    }
}

/// Knockout composite of a non-isolated group pixel: uncomposite against the knockout
/// `backdrop`, then composite as [`composite_knockout_group`].
#[allow(clippy::too_many_arguments)]
pub fn knockout_recomposite_group<S: Sample>(
    backdrop: &[S],
    tos_shape: S,
    dst: &mut [S],
    dst_alpha_g: Option<&mut S>,
    src: &[S],
    src_alpha_g: S,
    n_chan: usize,
    alpha: S,
    mode: BlendMode,
    first_blend_spot: usize,
    has_mask: bool,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    if tos_shape == S::ZERO {
        if has_mask {
            dst[n_chan] = alpha;
        }
        return;
    }
    if src_alpha_g == S::ZERO {
        return;
    }
    let mut ca = [S::ZERO; MAX_PIXEL_SLOTS];
    uncomposite(&mut ca, src, backdrop, src_alpha_g, n_chan);
    ca[n_chan] = src_alpha_g;
    composite_knockout_group(
        backdrop,
        tos_shape,
        dst,
        dst_alpha_g,
        &ca,
        n_chan,
        alpha,
        mode,
        first_blend_spot,
        has_mask,
        procs,
        ctx,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pixel.rs"]
mod tests;
