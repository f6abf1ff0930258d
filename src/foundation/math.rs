use std::fmt;

use crate::backdrop::{ColorTransform, PlanarRegion, PlanarRegionMut};
use crate::blend::nonseparable::{BlendProcs, NonSeparableFn};
use crate::blend::tables::{SOFT_LIGHT_8, SQ_DIFF_8};
use crate::buffer::planar::Samples;
use crate::buffer::soft_mask::TransferFn;
use crate::foundation::core::Depth;

/// An unsigned colour sample of known width.
///
/// All compositing math is written once against this trait and instantiated for `u8`
/// (8-bit buffers) and `u16` (deep buffers). Intermediates are widened to `i64`, which
/// holds every product of three samples plus the 16.16 scale factors.
pub trait Sample: Copy + Default + Eq + Ord + fmt::Debug + Send + Sync + 'static {
    const DEPTH: Depth;
    /// Largest sample value as a wide integer (255 or 65535).
    const MAX: i64;
    /// Rounding bias for the `>> SHIFT` idiom (0x80 or 0x8000).
    const HALF: i64;
    const SHIFT: u32;
    const ZERO: Self;
    const FULL: Self;

    fn widen(self) -> i64;

    /// Narrow a value already known to be in `0..=MAX`.
    fn narrow(v: i64) -> Self;

    fn from_u16(v: u16) -> Self;

    fn to_u16(self) -> u16;

    /// Saturating narrow.
    #[inline]
    fn clamp_wide(v: i64) -> Self {
        Self::narrow(v.clamp(0, Self::MAX))
    }

    #[inline]
    fn complement(self) -> Self {
        Self::narrow(Self::MAX - self.widen())
    }

    /// `round(x / MAX)` for a product of two samples.
    ///
    /// Negative `x` goes through the same arithmetic (flooring) shifts, so the result may
    /// be one step above exact rounding near a half, e.g. `-128 / 255` gives 0 at 8 bits.
    #[inline]
    fn div_max(x: i64) -> i64 {
        let t = x + Self::HALF;
        (t + (t >> Self::SHIFT)) >> Self::SHIFT
    }

    /// `round(a * b / MAX)`.
    #[inline]
    fn mul(a: Self, b: Self) -> Self {
        Self::narrow(Self::div_max(a.widen() * b.widen()))
    }

    /// Porter-Duff union `a + b - a*b/MAX`.
    #[inline]
    fn union(a: Self, b: Self) -> Self {
        let t = (Self::MAX - a.widen()) * (Self::MAX - b.widen());
        Self::narrow(Self::MAX - Self::div_max(t))
    }

    /// Darkening amount of SoftLight for `s < HALF`.
    fn soft_light_darken(b: i64, s: i64) -> i64;

    /// Lightening amount of SoftLight for `s >= HALF`.
    fn soft_light_lighten(b: i64, s: i64) -> i64;

    fn luminosity_proc(procs: &BlendProcs) -> NonSeparableFn<Self>;

    fn saturation_proc(procs: &BlendProcs) -> NonSeparableFn<Self>;

    fn transfer(tf: &TransferFn, v: Self) -> Self;

    fn samples(data: &Samples) -> Option<&[Self]>;

    fn samples_mut(data: &mut Samples) -> Option<&mut [Self]>;

    fn run_transform(
        transform: &dyn ColorTransform,
        src: PlanarRegion<'_, Self>,
        dst: PlanarRegionMut<'_, Self>,
    ) -> anyhow::Result<()>;
}

impl Sample for u8 {
    const DEPTH: Depth = Depth::Eight;
    const MAX: i64 = 0xff;
    const HALF: i64 = 0x80;
    const SHIFT: u32 = 8;
    const ZERO: Self = 0;
    const FULL: Self = 0xff;

    #[inline]
    fn widen(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn narrow(v: i64) -> Self {
        debug_assert!((0..=0xff).contains(&v), "u8 sample out of range: {v}");
        v as u8
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        v.min(0xff) as u8
    }

    #[inline]
    fn to_u16(self) -> u16 {
        u16::from(self)
    }

    #[inline]
    fn soft_light_darken(b: i64, s: i64) -> i64 {
        let t = (0xff - (s << 1)) * i64::from(SQ_DIFF_8[b as usize]) + 0x8000;
        t >> 16
    }

    #[inline]
    fn soft_light_lighten(b: i64, s: i64) -> i64 {
        let mut t = ((s << 1) - 0xff) * i64::from(SOFT_LIGHT_8[b as usize]);
        t += 0x80;
        t += t >> 8;
        t >> 8
    }

    fn luminosity_proc(procs: &BlendProcs) -> NonSeparableFn<Self> {
        procs.luminosity8
    }

    fn saturation_proc(procs: &BlendProcs) -> NonSeparableFn<Self> {
        procs.saturation8
    }

    #[inline]
    fn transfer(tf: &TransferFn, v: Self) -> Self {
        tf.apply8(v)
    }

    fn samples(data: &Samples) -> Option<&[Self]> {
        match data {
            Samples::Shallow(v) => Some(v),
            Samples::Deep(_) => None,
        }
    }

    fn samples_mut(data: &mut Samples) -> Option<&mut [Self]> {
        match data {
            Samples::Shallow(v) => Some(v),
            Samples::Deep(_) => None,
        }
    }

    fn run_transform(
        transform: &dyn ColorTransform,
        src: PlanarRegion<'_, Self>,
        dst: PlanarRegionMut<'_, Self>,
    ) -> anyhow::Result<()> {
        transform.transform_8(src, dst)
    }
}

impl Sample for u16 {
    const DEPTH: Depth = Depth::Sixteen;
    const MAX: i64 = 0xffff;
    const HALF: i64 = 0x8000;
    const SHIFT: u32 = 16;
    const ZERO: Self = 0;
    const FULL: Self = 0xffff;

    #[inline]
    fn widen(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn narrow(v: i64) -> Self {
        debug_assert!((0..=0xffff).contains(&v), "u16 sample out of range: {v}");
        v as u16
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        v
    }

    #[inline]
    fn to_u16(self) -> u16 {
        self
    }

    #[inline]
    fn soft_light_darken(b: i64, s: i64) -> i64 {
        let sq_diff = b - Self::div_max(b * b);
        Self::div_max((<Self as Sample>::MAX - (s << 1)) * sq_diff)
    }

    #[inline]
    fn soft_light_lighten(b: i64, s: i64) -> i64 {
        Self::div_max(((s << 1) - <Self as Sample>::MAX) * soft_light_delta_16(b))
    }

    fn luminosity_proc(procs: &BlendProcs) -> NonSeparableFn<Self> {
        procs.luminosity16
    }

    fn saturation_proc(procs: &BlendProcs) -> NonSeparableFn<Self> {
        procs.saturation16
    }

    #[inline]
    fn transfer(tf: &TransferFn, v: Self) -> Self {
        tf.apply16(v)
    }

    fn samples(data: &Samples) -> Option<&[Self]> {
        match data {
            Samples::Deep(v) => Some(v),
            Samples::Shallow(_) => None,
        }
    }

    fn samples_mut(data: &mut Samples) -> Option<&mut [Self]> {
        match data {
            Samples::Deep(v) => Some(v),
            Samples::Shallow(_) => None,
        }
    }

    fn run_transform(
        transform: &dyn ColorTransform,
        src: PlanarRegion<'_, Self>,
        dst: PlanarRegionMut<'_, Self>,
    ) -> anyhow::Result<()> {
        transform.transform_16(src, dst)
    }
}

/// SoftLight(b, 1) - b at 16-bit precision, interpolated from the 8-bit table.
///
/// Indexing by `b * 255 / 65535` keeps `b = 257 * k` exactly on entry `k`.
#[inline]
fn soft_light_delta_16(b: i64) -> i64 {
    let pos = b * 0xff;
    let idx = (pos / 0xffff) as usize;
    let frac = pos % 0xffff;
    let lo = i64::from(SOFT_LIGHT_8[idx]);
    let hi = i64::from(SOFT_LIGHT_8[(idx + 1).min(0xff)]);
    let v = lo * 0xffff + (hi - lo) * frac;
    (v * 257 + 0x7fff) / 0xffff
}

/// 16.16 fixed-point `num / den`, rounded. `den` must be non-zero.
#[inline]
pub(crate) fn ratio_16_16(num: i64, den: i64) -> i64 {
    debug_assert!(den != 0, "ratio with zero denominator");
    ((num << 16) + (den >> 1)) / den
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
