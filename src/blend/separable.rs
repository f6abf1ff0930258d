use crate::blend::context::BlendContext;
use crate::blend::mode::BlendMode;
use crate::blend::nonseparable::BlendProcs;
use crate::foundation::core::MAX_COLORANTS;
use crate::foundation::math::Sample;

/// Blend one separable channel. `b` and `s` are samples in `0..=S::MAX`.
///
/// Non-separable modes and CompatibleOverprint are handled by [`blend_pixel`]; here they
/// behave like Normal.
#[inline]
pub fn blend_channel<S: Sample>(mode: BlendMode, b: i64, s: i64) -> i64 {
    let max = S::MAX;
    match mode {
        BlendMode::Multiply => S::div_max(b * s),
        BlendMode::Screen => max - S::div_max((max - b) * (max - s)),
        BlendMode::Overlay => hard_mix::<S>(b, s, b < S::HALF),
        BlendMode::HardLight => hard_mix::<S>(b, s, s < S::HALF),
        BlendMode::SoftLight => {
            if s < S::HALF {
                b - S::soft_light_darken(b, s)
            } else {
                b + S::soft_light_lighten(b, s)
            }
        }
        BlendMode::ColorDodge => {
            let s = max - s;
            if b == 0 {
                0
            } else if b >= s {
                max
            } else {
                (2 * max * b + s) / (s << 1)
            }
        }
        BlendMode::ColorBurn => {
            let b = max - b;
            if b == 0 {
                max
            } else if b >= s {
                0
            } else {
                max - (2 * max * b + s) / (s << 1)
            }
        }
        BlendMode::Darken => b.min(s),
        BlendMode::Lighten => b.max(s),
        BlendMode::Difference => (b - s).abs(),
        BlendMode::Exclusion => S::div_max((max - b) * s + b * (max - s)),
        BlendMode::Compatible
        | BlendMode::Normal
        | BlendMode::Luminosity
        | BlendMode::Hue
        | BlendMode::Saturation
        | BlendMode::Color
        | BlendMode::CompatibleOverprint => s,
    }
}

/// Shared body of Overlay and HardLight: multiply below the split, screen above.
#[inline]
fn hard_mix<S: Sample>(b: i64, s: i64, low: bool) -> i64 {
    let max = S::MAX;
    let t = if low {
        2 * b * s
    } else {
        max * max - 2 * (max - b) * (max - s)
    };
    S::div_max(t)
}

/// Blend `n_chan` colour channels of `src` onto `backdrop`, writing `dst`.
///
/// Colorants must already be in blending polarity (subtractive ones complemented).
pub fn blend_pixel<S: Sample>(
    dst: &mut [S],
    backdrop: &[S],
    src: &[S],
    n_chan: usize,
    mode: BlendMode,
    procs: &BlendProcs,
    ctx: &BlendContext,
) {
    match mode {
        BlendMode::Normal | BlendMode::Compatible => dst[..n_chan].copy_from_slice(&src[..n_chan]),
        BlendMode::Luminosity => (procs.luminosity::<S>())(n_chan, dst, backdrop, src),
        BlendMode::Color => (procs.luminosity::<S>())(n_chan, dst, src, backdrop),
        BlendMode::Saturation => (procs.saturation::<S>())(n_chan, dst, backdrop, src),
        BlendMode::Hue => {
            let mut tmp = [S::ZERO; MAX_COLORANTS];
            let n = n_chan.min(MAX_COLORANTS);
            (procs.luminosity::<S>())(n, &mut tmp[..n], src, backdrop);
            (procs.saturation::<S>())(n, dst, &tmp[..n], backdrop);
        }
        BlendMode::CompatibleOverprint => overprint_pixel(dst, backdrop, src, n_chan, ctx),
        _ => {
            for i in 0..n_chan {
                let v = blend_channel::<S>(mode, backdrop[i].widen(), src[i].widen());
                dst[i] = S::clamp_wide(v);
            }
        }
    }
}

fn overprint_pixel<S: Sample>(
    dst: &mut [S],
    backdrop: &[S],
    src: &[S],
    n_chan: usize,
    ctx: &BlendContext,
) {
    if ctx.uses_overprint_mode() {
        let process = n_chan.min(4);
        for i in 0..process {
            dst[i] = if src[i] < S::FULL { src[i] } else { backdrop[i] };
        }
        dst[process..n_chan].copy_from_slice(&backdrop[process..n_chan]);
    } else {
        for i in 0..n_chan {
            dst[i] = if ctx.is_drawn(i) { src[i] } else { backdrop[i] };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/separable.rs"]
mod tests;
