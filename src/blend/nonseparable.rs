//! Luminosity and saturation primitives for the non-separable blend modes.
//!
//! Every helper writes the first `n_chan` colour channels of `dst`. Values are kept in
//! wide integers while clipping so the rescale can pull out-of-range results back
//! towards the target luminance.

use crate::foundation::core::MAX_COLORANTS;
use crate::foundation::math::Sample;

/// `fn(n_chan, dst, backdrop, src)`.
pub type NonSeparableFn<S> = fn(usize, &mut [S], &[S], &[S]);

/// Colour model used to pick the non-separable helpers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendSpace {
    Gray,
    #[default]
    Rgb,
    Cmyk,
    /// Any other component count; luminosity is the channel average.
    Custom,
}

/// Strategy table for Luminosity/Saturation at both depths.
#[derive(Clone, Copy)]
pub struct BlendProcs {
    pub luminosity8: NonSeparableFn<u8>,
    pub luminosity16: NonSeparableFn<u16>,
    pub saturation8: NonSeparableFn<u8>,
    pub saturation16: NonSeparableFn<u16>,
}

impl BlendProcs {
    pub const RGB: Self = Self {
        luminosity8: luminosity_rgb::<u8>,
        luminosity16: luminosity_rgb::<u16>,
        saturation8: saturation_rgb::<u8>,
        saturation16: saturation_rgb::<u16>,
    };

    pub const CMYK: Self = Self {
        luminosity8: luminosity_cmyk::<u8>,
        luminosity16: luminosity_cmyk::<u16>,
        saturation8: saturation_cmyk::<u8>,
        saturation16: saturation_cmyk::<u16>,
    };

    pub const CUSTOM: Self = Self {
        luminosity8: luminosity_custom::<u8>,
        luminosity16: luminosity_custom::<u16>,
        saturation8: saturation_custom::<u8>,
        saturation16: saturation_custom::<u16>,
    };

    pub fn for_space(space: BlendSpace) -> Self {
        match space {
            BlendSpace::Rgb => Self::RGB,
            BlendSpace::Cmyk => Self::CMYK,
            BlendSpace::Gray | BlendSpace::Custom => Self::CUSTOM,
        }
    }

    #[inline]
    pub fn luminosity<S: Sample>(&self) -> NonSeparableFn<S> {
        S::luminosity_proc(self)
    }

    #[inline]
    pub fn saturation<S: Sample>(&self) -> NonSeparableFn<S> {
        S::saturation_proc(self)
    }
}

impl Default for BlendProcs {
    fn default() -> Self {
        Self::RGB
    }
}

impl std::fmt::Debug for BlendProcs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if std::ptr::fn_addr_eq(self.luminosity8, Self::RGB.luminosity8) {
            "RGB"
        } else if std::ptr::fn_addr_eq(self.luminosity8, Self::CMYK.luminosity8) {
            "CMYK"
        } else if std::ptr::fn_addr_eq(self.luminosity8, Self::CUSTOM.luminosity8) {
            "CUSTOM"
        } else {
            "user"
        };
        f.debug_tuple("BlendProcs").field(&name).finish()
    }
}

#[inline]
fn rgb_y(r: i64, g: i64, b: i64) -> i64 {
    (r * 77 + g * 151 + b * 28 + 0x80) >> 8
}

/// Move `v` towards `y` by a 16.16 factor.
#[inline]
fn rescale(v: i64, y: i64, scale: i64) -> i64 {
    y + (((v - y) * scale + 0x8000) >> 16)
}

/// Scale factor pulling the extreme of `vals` back into `0..=max` around `y`.
fn clip_scale(vals: &[i64], y: i64, max: i64) -> i64 {
    let lo = vals.iter().copied().min().unwrap_or(y);
    let hi = vals.iter().copied().max().unwrap_or(y);
    let scale_min = if lo < 0 && y != lo {
        (y << 16) / (y - lo)
    } else {
        0x10000
    };
    let scale_max = if hi > max && hi != y {
        ((max - y) << 16) / (hi - y)
    } else {
        0x10000
    };
    scale_min.min(scale_max)
}

#[inline]
fn out_of_range(vals: &[i64], max: i64) -> bool {
    vals.iter().any(|&v| v < 0 || v > max)
}

fn store<S: Sample>(dst: &mut [S], vals: &[i64]) {
    for (d, &v) in dst.iter_mut().zip(vals) {
        *d = S::clamp_wide(v);
    }
}

pub fn luminosity_rgb<S: Sample>(n_chan: usize, dst: &mut [S], backdrop: &[S], src: &[S]) {
    if n_chan < 3 {
        return luminosity_custom(n_chan, dst, backdrop, src);
    }
    let (rb, gb, bb) = (backdrop[0].widen(), backdrop[1].widen(), backdrop[2].widen());
    let (rs, gs, bs) = (src[0].widen(), src[1].widen(), src[2].widen());
    let delta_y = rgb_y(rs - rb, gs - gb, bs - bb);
    let mut rgb = [rb + delta_y, gb + delta_y, bb + delta_y];
    if out_of_range(&rgb, S::MAX) {
        let y = rgb_y(rs, gs, bs);
        let scale = clip_scale(&rgb, y, S::MAX);
        for v in &mut rgb {
            *v = rescale(*v, y, scale);
        }
    }
    store(&mut dst[..3], &rgb);
}

pub fn luminosity_custom<S: Sample>(n_chan: usize, dst: &mut [S], backdrop: &[S], src: &[S]) {
    let n = n_chan.min(MAX_COLORANTS);
    if n == 0 {
        return;
    }
    let count = n as i64;
    let delta: i64 = (0..n).map(|i| src[i].widen() - backdrop[i].widen()).sum();
    let delta_y = (delta + count / 2) / count;
    let mut r = [0i64; MAX_COLORANTS];
    for i in 0..n {
        r[i] = backdrop[i].widen() + delta_y;
    }
    if out_of_range(&r[..n], S::MAX) {
        let y = (src[..n].iter().map(|s| s.widen()).sum::<i64>() + count / 2) / count;
        let scale = clip_scale(&r[..n], y, S::MAX);
        for v in &mut r[..n] {
            *v = rescale(*v, y, scale);
        }
    }
    store(&mut dst[..n], &r[..n]);
}

/// C, M, Y behave like RGB (they arrive complemented); K and spots come from the source.
pub fn luminosity_cmyk<S: Sample>(n_chan: usize, dst: &mut [S], backdrop: &[S], src: &[S]) {
    luminosity_rgb(n_chan.min(3), dst, backdrop, src);
    if n_chan > 3 {
        dst[3..n_chan].copy_from_slice(&src[3..n_chan]);
    }
}

pub fn saturation_rgb<S: Sample>(n_chan: usize, dst: &mut [S], backdrop: &[S], src: &[S]) {
    if n_chan < 3 {
        return saturation_custom(n_chan, dst, backdrop, src);
    }
    let b = [backdrop[0].widen(), backdrop[1].widen(), backdrop[2].widen()];
    let s = [src[0].widen(), src[1].widen(), src[2].widen()];
    let (min_b, max_b) = min_max(&b);
    if min_b == max_b {
        dst[..3].copy_from_slice(&backdrop[..3]);
        return;
    }
    let (min_s, max_s) = min_max(&s);
    let scale = ((max_s - min_s) << 16) / (max_b - min_b);
    let y = rgb_y(b[0], b[1], b[2]);
    let mut rgb = b.map(|v| rescale(v, y, scale));
    if out_of_range(&rgb, S::MAX) {
        let clip = clip_scale(&rgb, y, S::MAX);
        for v in &mut rgb {
            *v = rescale(*v, y, clip);
        }
    }
    store(&mut dst[..3], &rgb);
}

pub fn saturation_custom<S: Sample>(n_chan: usize, dst: &mut [S], backdrop: &[S], src: &[S]) {
    let n = n_chan.min(MAX_COLORANTS);
    if n == 0 {
        return;
    }
    let mut b = [0i64; MAX_COLORANTS];
    let mut s = [0i64; MAX_COLORANTS];
    for i in 0..n {
        b[i] = backdrop[i].widen();
        s[i] = src[i].widen();
    }
    let (min_b, max_b) = min_max(&b[..n]);
    if min_b == max_b {
        dst[..n].copy_from_slice(&backdrop[..n]);
        return;
    }
    let (min_s, max_s) = min_max(&s[..n]);
    let scale = ((max_s - min_s) << 16) / (max_b - min_b);
    let count = n as i64;
    let y = (b[..n].iter().sum::<i64>() + count / 2) / count;
    let mut r = [0i64; MAX_COLORANTS];
    for i in 0..n {
        r[i] = rescale(b[i], y, scale);
    }
    if out_of_range(&r[..n], S::MAX) {
        let clip = clip_scale(&r[..n], y, S::MAX);
        for v in &mut r[..n] {
            *v = rescale(*v, y, clip);
        }
    }
    store(&mut dst[..n], &r[..n]);
}

/// C, M, Y behave like RGB; K and spots come from the source, so a neutral CMY backdrop
/// keeps its C, M, Y and takes the source's black.
/// The backdrop's K is never kept, so Saturation over a CMYK group can change black.
pub fn saturation_cmyk<S: Sample>(n_chan: usize, dst: &mut [S], backdrop: &[S], src: &[S]) {
    saturation_rgb(n_chan.min(3), dst, backdrop, src);
    if n_chan > 3 {
        dst[3..n_chan].copy_from_slice(&src[3..n_chan]);
    }
}

fn min_max(vals: &[i64]) -> (i64, i64) {
    vals.iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
#[path = "../../tests/unit/blend/nonseparable.rs"]
mod tests;
