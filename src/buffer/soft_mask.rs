use crate::buffer::planar::Samples;
use crate::foundation::core::{Depth, IntRect};
use crate::foundation::error::{TransError, TransResult};
use crate::foundation::math::Sample;

/// Soft-mask transfer function: a 256-entry lookup applied to mask samples.
///
/// 16-bit lookups interpolate between neighbouring entries, so `v * 257` maps exactly
/// to `table[v] * 257`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct TransferFn {
    table: Vec<u8>,
    identity: bool,
}

impl TransferFn {
    pub const LEN: usize = 256;

    pub fn identity() -> Self {
        Self {
            table: (0..=255u8).collect(),
            identity: true,
        }
    }

    pub fn from_table(table: Vec<u8>) -> TransResult<Self> {
        if table.len() != Self::LEN {
            return Err(TransError::validation(format!(
                "transfer function needs {} entries, got {}",
                Self::LEN,
                table.len()
            )));
        }
        let identity = table.iter().enumerate().all(|(i, &v)| usize::from(v) == i);
        Ok(Self { table, identity })
    }

    /// Hint only: lookups through an identity table are exact either way.
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    pub fn table(&self) -> &[u8] {
        &self.table
    }

    #[inline]
    pub fn apply8(&self, v: u8) -> u8 {
        self.table[usize::from(v)]
    }

    #[inline]
    pub fn apply16(&self, v: u16) -> u16 {
        if self.identity {
            return v;
        }
        let pos = u32::from(v) * 255;
        let idx = (pos / 0xffff) as usize;
        let frac = i64::from(pos % 0xffff);
        let lo = i64::from(self.table[idx]) * 257;
        let hi = i64::from(self.table[(idx + 1).min(0xff)]) * 257;
        let v = lo + ((hi - lo) * frac + 0x7fff).div_euclid(0xffff);
        v.clamp(0, 0xffff) as u16
    }

    #[inline]
    pub fn apply<S: Sample>(&self, v: S) -> S {
        S::transfer(self, v)
    }
}

impl Default for TransferFn {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<Vec<u8>> for TransferFn {
    type Error = TransError;

    fn try_from(table: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_table(table)
    }
}

impl From<TransferFn> for Vec<u8> {
    fn from(tf: TransferFn) -> Self {
        tf.table
    }
}

/// What a rendered mask group is reduced to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SoftMaskSubtype {
    /// The group's alpha plane.
    #[default]
    Alpha,
    /// A group already rendered in a luminosity blending space; plane 0 holds Y.
    Luminosity,
    /// Luminosity computed from device colour channels.
    DeviceColor,
}

/// Single-plane soft mask.
///
/// Pixels outside `rect`, or every pixel when `data` is absent, read `bg_alpha`.
#[derive(Clone, Debug, PartialEq)]
pub struct SoftMaskBuffer {
    pub rect: IntRect,
    pub rowstride: usize,
    pub depth: Depth,
    pub data: Option<Samples>,
    pub transfer: TransferFn,
    pub subtype: SoftMaskSubtype,
    pub bg_alpha: u16,
}

impl SoftMaskBuffer {
    /// A mask whose plane starts out at the background alpha (0).
    pub fn new(rect: IntRect, depth: Depth, subtype: SoftMaskSubtype) -> Self {
        let width = rect.width();
        Self {
            rect,
            rowstride: width,
            depth,
            data: Some(Samples::zeroed(depth, width * rect.height())),
            transfer: TransferFn::identity(),
            subtype,
            bg_alpha: 0,
        }
    }

    /// A mask with no data plane: every pixel reads the background alpha.
    pub fn constant(rect: IntRect, depth: Depth, bg_alpha: u16) -> TransResult<Self> {
        Ok(Self {
            rect,
            rowstride: rect.width(),
            depth,
            data: None,
            transfer: TransferFn::identity(),
            subtype: SoftMaskSubtype::Alpha,
            bg_alpha: depth.check_value(bg_alpha)?,
        })
    }

    pub fn with_transfer(mut self, transfer: TransferFn) -> Self {
        self.transfer = transfer;
        self
    }

    /// Set the background alpha and reset the mask plane, if any, to it.
    pub fn with_bg_alpha(mut self, bg_alpha: u16) -> TransResult<Self> {
        self.bg_alpha = self.depth.check_value(bg_alpha)?;
        if let Some(data) = self.data.as_mut() {
            data.fill(self.bg_alpha);
        }
        Ok(self)
    }

    /// Raw (pre-transfer) sample; the background alpha outside the data.
    pub fn raw(&self, x: i32, y: i32) -> u16 {
        match &self.data {
            Some(data) if self.rect.contains(x, y) => {
                let col = (x - self.rect.x0) as usize;
                let row = (y - self.rect.y0) as usize;
                data.get(col + row * self.rowstride)
            }
            _ => self.bg_alpha,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, value: u16) -> TransResult<()> {
        let value = self.depth.check_value(value)?;
        let rect = self.rect;
        let rowstride = self.rowstride;
        let data = self
            .data
            .as_mut()
            .ok_or_else(|| TransError::validation("soft mask has no data plane"))?;
        if !rect.contains(x, y) {
            return Err(TransError::validation(format!(
                "mask sample ({x}, {y}) outside {rect:?}"
            )));
        }
        data.set((x - rect.x0) as usize + (y - rect.y0) as usize * rowstride, value);
        Ok(())
    }

    /// Transfer-mapped mask value used as the effective alpha factor at `(x, y)`.
    #[inline]
    pub fn sample<S: Sample>(&self, x: i32, y: i32) -> S {
        self.transfer.apply(S::from_u16(self.raw(x, y)))
    }

    /// Return `true` when every pixel of `region` reads mask data (not the background).
    pub fn covers(&self, region: IntRect) -> bool {
        self.data.is_some() && self.rect.contains_rect(region)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/soft_mask.rs"]
mod tests;
