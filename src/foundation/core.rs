use crate::foundation::error::{TransError, TransResult};

/// Half-open integer device rectangle `[x0, x1) x [y0, y1)`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct IntRect {
    /// Inclusive left edge.
    pub x0: i32,
    /// Inclusive top edge.
    pub y0: i32,
    /// Exclusive right edge.
    pub x1: i32,
    /// Exclusive bottom edge.
    pub y1: i32,
}

impl IntRect {
    /// Create a rectangle from its corners. Inverted corners produce an empty rectangle.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from origin and size.
    pub const fn from_origin_size(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Canonical empty rectangle.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Return `true` when the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Width in pixels; 0 for empty rectangles.
    pub fn width(self) -> usize {
        if self.x1 > self.x0 {
            (self.x1 - self.x0) as usize
        } else {
            0
        }
    }

    /// Height in pixels; 0 for empty rectangles.
    pub fn height(self) -> usize {
        if self.y1 > self.y0 {
            (self.y1 - self.y0) as usize
        } else {
            0
        }
    }

    /// Overlap of two rectangles (possibly empty).
    pub fn intersect(self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    /// Smallest rectangle containing both. Empty operands are ignored.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Return `true` when `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Return `true` when `other` is entirely inside `self`.
    pub fn contains_rect(self, other: Self) -> bool {
        other.is_empty()
            || (other.x0 >= self.x0
                && other.y0 >= self.y0
                && other.x1 <= self.x1
                && other.y1 <= self.y1)
    }
}

/// Per-channel sample precision.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// One byte per sample.
    #[default]
    Eight,
    /// Two native-endian bytes per sample ("deep" buffers).
    Sixteen,
}

impl Depth {
    /// Bytes per sample.
    pub fn bytes(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2,
        }
    }

    /// Largest sample value.
    pub fn max_value(self) -> u16 {
        match self {
            Self::Eight => 0xff,
            Self::Sixteen => 0xffff,
        }
    }

    pub fn is_deep(self) -> bool {
        self == Self::Sixteen
    }

    /// Validate that `value` is representable at this depth.
    pub fn check_value(self, value: u16) -> TransResult<u16> {
        if value > self.max_value() {
            return Err(TransError::validation(format!(
                "sample value {value} exceeds {self:?}-bit range"
            )));
        }
        Ok(value)
    }
}

/// How stored colorant samples relate to blending-space values.
///
/// Subtractive colorants are stored as ink amounts and complemented (`max - x`) while
/// blending so that every blend formula sees "0 = no light".
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolarity {
    /// Gray/RGB style: samples are used as stored.
    #[default]
    Additive,
    /// CMYK(+spot) style: every colorant is complemented.
    Subtractive,
    /// Additive process colorants followed by subtractive spot colorants.
    Hybrid,
}

impl ColorPolarity {
    /// Return `true` when colorant `index` (of `n_comp`, the last `num_spots` being spots)
    /// is complemented while blending.
    #[inline]
    pub fn complements(self, index: usize, n_comp: usize, num_spots: usize) -> bool {
        match self {
            Self::Additive => false,
            Self::Subtractive => true,
            Self::Hybrid => index >= n_comp.saturating_sub(num_spots),
        }
    }

    pub fn is_additive(self) -> bool {
        self == Self::Additive
    }
}

/// Graphical object tags stored in the optional tag plane.
pub mod tags {
    /// Nothing painted yet. Must stay zero: fresh tag planes are zero-filled.
    pub const UNTOUCHED: u16 = 0x0;
    pub const TEXT: u16 = 0x1;
    pub const IMAGE: u16 = 0x2;
    pub const VECTOR: u16 = 0x4;
    pub const UNKNOWN: u16 = 0x40;
    pub const DEVICE_ENCODES_TAGS: u16 = 0x80;
}

/// Largest number of colour channels (process + spot) a pixel may carry.
pub const MAX_COLORANTS: usize = 64;

/// Colour channels plus alpha, shape and alpha_g scratch slots.
pub const MAX_PIXEL_SLOTS: usize = MAX_COLORANTS + 3;

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
