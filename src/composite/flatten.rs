use crate::buffer::{PixelBuffer, SampleSource};
use crate::foundation::core::Depth;
use crate::foundation::error::{TransError, TransResult};
use crate::foundation::math::Sample;

#[inline]
fn over_background<S: Sample>(comp: S, alpha: S, bg: S) -> S {
    if alpha == S::ZERO {
        bg
    } else if alpha == S::FULL {
        comp
    } else {
        let c = comp.widen();
        S::clamp_wide(c + S::div_max((bg.widen() - c) * (S::MAX - alpha.widen())))
    }
}

fn check_background(buf: &PixelBuffer, bg: &[u16]) -> TransResult<()> {
    if bg.len() != buf.n_colorants() {
        return Err(TransError::validation(format!(
            "background has {} components, buffer has {}",
            bg.len(),
            buf.n_colorants()
        )));
    }
    for &v in bg {
        buf.depth.check_value(v)?;
    }
    Ok(())
}

/// Blend every pixel over the solid device colour `bg` in place. Alpha is left as is.
pub fn flatten_onto_background(buf: &mut PixelBuffer, bg: &[u16]) -> TransResult<()> {
    if buf.n_chan == 0 {
        return Ok(());
    }
    check_background(buf, bg)?;
    match buf.depth {
        Depth::Eight => flatten::<u8>(buf, bg),
        Depth::Sixteen => flatten::<u16>(buf, bg),
    }
}

fn flatten<S: Sample>(buf: &mut PixelBuffer, bg: &[u16]) -> TransResult<()> {
    let (n_comp, ps) = (buf.n_colorants(), buf.planestride);
    let data = buf.samples_mut::<S>()?;
    for pos in 0..ps {
        let a = data[pos + n_comp * ps];
        for (i, &b) in bg.iter().enumerate() {
            let idx = pos + i * ps;
            data[idx] = over_background(data[idx], a, S::from_u16(b));
        }
    }
    Ok(())
}

/// Chunky colour rows of `buf` composited over `bg`, encoded at the buffer depth in the
/// requested byte order. The buffer is not modified.
pub fn blended_rows(buf: &PixelBuffer, bg: &[u16], order: SampleSource) -> TransResult<Vec<Vec<u8>>> {
    if buf.n_chan == 0 {
        return Ok(Vec::new());
    }
    check_background(buf, bg)?;
    match buf.depth {
        Depth::Eight => rows::<u8>(buf, bg, order),
        Depth::Sixteen => rows::<u16>(buf, bg, order),
    }
}

fn rows<S: Sample>(buf: &PixelBuffer, bg: &[u16], order: SampleSource) -> TransResult<Vec<Vec<u8>>> {
    let data = buf.samples::<S>()?;
    let layout = buf.layout();
    let n_comp = buf.n_colorants();
    let (width, height) = (buf.rect.width(), buf.rect.height());
    let mut out = Vec::with_capacity(height);
    for row in 0..height {
        let mut line = Vec::with_capacity(width * n_comp * S::DEPTH.bytes());
        for col in 0..width {
            let a = data[layout.offset(col, row, n_comp)];
            for (i, &b) in bg.iter().enumerate() {
                let v = over_background(data[layout.offset(col, row, i)], a, S::from_u16(b));
                if S::DEPTH.is_deep() {
                    line.extend_from_slice(&order.encode(v.to_u16()));
                } else {
                    line.push(v.to_u16() as u8);
                }
            }
        }
        out.push(line);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/flatten.rs"]
mod tests;
