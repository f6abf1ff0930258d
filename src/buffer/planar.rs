use crate::foundation::core::Depth;
use crate::foundation::math::Sample;

/// Planar sample storage at one of the two supported depths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Samples {
    Shallow(Vec<u8>),
    Deep(Vec<u16>),
}

impl Samples {
    pub fn zeroed(depth: Depth, len: usize) -> Self {
        match depth {
            Depth::Eight => Self::Shallow(vec![0; len]),
            Depth::Sixteen => Self::Deep(vec![0; len]),
        }
    }

    pub fn depth(&self) -> Depth {
        match self {
            Self::Shallow(_) => Depth::Eight,
            Self::Deep(_) => Depth::Sixteen,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Shallow(v) => v.len(),
            Self::Deep(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one sample widened to `u16`. Panics when `idx` is out of range.
    #[inline]
    pub fn get(&self, idx: usize) -> u16 {
        match self {
            Self::Shallow(v) => u16::from(v[idx]),
            Self::Deep(v) => v[idx],
        }
    }

    /// Store one sample, truncating to the storage depth's range.
    #[inline]
    pub fn set(&mut self, idx: usize, value: u16) {
        match self {
            Self::Shallow(v) => v[idx] = value.min(0xff) as u8,
            Self::Deep(v) => v[idx] = value,
        }
    }

    pub fn fill(&mut self, value: u16) {
        match self {
            Self::Shallow(v) => v.fill(value.min(0xff) as u8),
            Self::Deep(v) => v.fill(value),
        }
    }

    /// Copy of the first `len` samples (clamped to the storage length).
    pub fn prefix(&self, len: usize) -> Self {
        match self {
            Self::Shallow(v) => Self::Shallow(v[..len.min(v.len())].to_vec()),
            Self::Deep(v) => Self::Deep(v[..len.min(v.len())].to_vec()),
        }
    }

    pub fn as_slice<S: Sample>(&self) -> Option<&[S]> {
        S::samples(self)
    }

    pub fn as_mut_slice<S: Sample>(&mut self) -> Option<&mut [S]> {
        S::samples_mut(self)
    }
}

/// Geometry of a planar region inside some sample slice, in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    pub rowstride: usize,
    pub planestride: usize,
}

impl PlaneLayout {
    #[inline]
    pub fn offset(&self, col: usize, row: usize, plane: usize) -> usize {
        col + row * self.rowstride + plane * self.planestride
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/planar.rs"]
mod tests;
