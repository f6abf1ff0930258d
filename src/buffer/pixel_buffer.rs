use crate::blend::BlendMode;
use crate::buffer::planar::{PlaneLayout, Samples};
use crate::foundation::core::{Depth, IntRect, MAX_COLORANTS};
use crate::foundation::error::{TransError, TransResult};
use crate::foundation::math::Sample;

/// Serializable description of a group buffer, used to construct [`PixelBuffer`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PixelBufferDesc {
    pub rect: IntRect,
    /// Colour channels plus alpha.
    pub n_chan: usize,
    pub depth: Depth,
    pub has_shape: bool,
    pub has_alpha_g: bool,
    pub has_tags: bool,
    pub isolated: bool,
    pub knockout: bool,
    pub num_spots: usize,
    /// Group opacity in sample units. `None` means fully opaque.
    pub alpha: Option<u16>,
    /// Group shape in sample units. `None` means full shape.
    pub shape: Option<u16>,
    pub blend_mode: BlendMode,
}

impl Default for PixelBufferDesc {
    fn default() -> Self {
        Self {
            rect: IntRect::EMPTY,
            n_chan: 4,
            depth: Depth::Eight,
            has_shape: false,
            has_alpha_g: false,
            has_tags: false,
            isolated: true,
            knockout: false,
            num_spots: 0,
            alpha: None,
            shape: None,
            blend_mode: BlendMode::Normal,
        }
    }
}

impl PixelBufferDesc {
    pub fn new(rect: IntRect, n_chan: usize, depth: Depth) -> Self {
        Self {
            rect,
            n_chan,
            depth,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> TransResult<()> {
        if self.n_chan > MAX_COLORANTS + 1 {
            return Err(TransError::validation(format!(
                "n_chan {} exceeds {} colorants plus alpha",
                self.n_chan, MAX_COLORANTS
            )));
        }
        if self.n_chan > 0 && self.num_spots >= self.n_chan {
            return Err(TransError::validation(format!(
                "num_spots {} leaves no room for alpha in {} channels",
                self.num_spots, self.n_chan
            )));
        }
        if let Some(a) = self.alpha {
            self.depth.check_value(a)?;
        }
        if let Some(s) = self.shape {
            self.depth.check_value(s)?;
        }
        Ok(())
    }
}

/// Planar group buffer.
///
/// Sample `(x, y, c)` lives at `(x - rect.x0) + (y - rect.y0) * rowstride + c *
/// planestride` of [`PixelBuffer::data`]. Plane order is
/// `[C0..Cn-2, Alpha, (Shape), (AlphaG), (Tags)]`. Strides are kept in samples; the
/// byte strides used on the wire are available through [`PixelBuffer::rowstride_bytes`]
/// and [`PixelBuffer::planestride_bytes`].
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pub rect: IntRect,
    pub dirty: IntRect,
    pub n_chan: usize,
    pub n_planes: usize,
    pub rowstride: usize,
    pub planestride: usize,
    pub depth: Depth,
    pub isolated: bool,
    pub knockout: bool,
    pub has_shape: bool,
    pub has_alpha_g: bool,
    pub has_tags: bool,
    pub num_spots: usize,
    pub alpha: u16,
    pub shape: u16,
    pub blend_mode: BlendMode,
    pub data: Samples,
    /// Snapshot of the first `n_chan` planes, same layout as `data`.
    pub backdrop: Option<Samples>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer (fully transparent, all tags untouched).
    pub fn new(desc: &PixelBufferDesc) -> TransResult<Self> {
        desc.validate()?;
        let width = desc.rect.width();
        let height = desc.rect.height();
        let n_planes = desc.n_chan
            + usize::from(desc.has_shape)
            + usize::from(desc.has_alpha_g)
            + usize::from(desc.has_tags);
        let planestride = width * height;
        let max = desc.depth.max_value();
        Ok(Self {
            rect: desc.rect,
            dirty: IntRect::EMPTY,
            n_chan: desc.n_chan,
            n_planes,
            rowstride: width,
            planestride,
            depth: desc.depth,
            isolated: desc.isolated,
            knockout: desc.knockout,
            has_shape: desc.has_shape,
            has_alpha_g: desc.has_alpha_g,
            has_tags: desc.has_tags,
            num_spots: desc.num_spots,
            alpha: desc.alpha.unwrap_or(max),
            shape: desc.shape.unwrap_or(max),
            blend_mode: desc.blend_mode,
            data: Samples::zeroed(desc.depth, planestride * n_planes),
            backdrop: None,
        })
    }

    pub fn deep(&self) -> bool {
        self.depth.is_deep()
    }

    /// Colour channels, excluding alpha.
    pub fn n_colorants(&self) -> usize {
        self.n_chan.saturating_sub(1)
    }

    pub fn alpha_plane(&self) -> usize {
        self.n_colorants()
    }

    pub fn shape_plane(&self) -> Option<usize> {
        self.has_shape.then_some(self.n_chan)
    }

    pub fn alpha_g_plane(&self) -> Option<usize> {
        self.has_alpha_g
            .then_some(self.n_chan + usize::from(self.has_shape))
    }

    pub fn tag_plane(&self) -> Option<usize> {
        self.has_tags.then_some(
            self.n_chan + usize::from(self.has_shape) + usize::from(self.has_alpha_g),
        )
    }

    pub fn rowstride_bytes(&self) -> usize {
        self.rowstride * self.depth.bytes()
    }

    pub fn planestride_bytes(&self) -> usize {
        self.planestride * self.depth.bytes()
    }

    pub fn layout(&self) -> PlaneLayout {
        PlaneLayout {
            rowstride: self.rowstride,
            planestride: self.planestride,
        }
    }

    /// Sample index of `(x, y, plane)` in device coordinates, or `None` outside the buffer.
    pub fn index(&self, x: i32, y: i32, plane: usize) -> Option<usize> {
        if !self.rect.contains(x, y) || plane >= self.n_planes {
            return None;
        }
        let col = (x - self.rect.x0) as usize;
        let row = (y - self.rect.y0) as usize;
        Some(self.layout().offset(col, row, plane))
    }

    pub fn get(&self, x: i32, y: i32, plane: usize) -> TransResult<u16> {
        let idx = self.checked_index(x, y, plane)?;
        Ok(self.data.get(idx))
    }

    pub fn set(&mut self, x: i32, y: i32, plane: usize, value: u16) -> TransResult<()> {
        let idx = self.checked_index(x, y, plane)?;
        self.data.set(idx, self.depth.check_value(value)?);
        Ok(())
    }

    /// Read the `n_planes` samples at `(x, y)`.
    pub fn pixel(&self, x: i32, y: i32) -> TransResult<Vec<u16>> {
        (0..self.n_planes).map(|p| self.get(x, y, p)).collect()
    }

    /// Fill every sample of `plane` with `value`.
    pub fn fill_plane(&mut self, plane: usize, value: u16) -> TransResult<()> {
        if plane >= self.n_planes {
            return Err(TransError::validation(format!(
                "plane {plane} out of range ({} planes)",
                self.n_planes
            )));
        }
        let value = self.depth.check_value(value)?;
        let start = plane * self.planestride;
        for i in start..start + self.planestride {
            self.data.set(i, value);
        }
        Ok(())
    }

    pub fn samples<S: Sample>(&self) -> TransResult<&[S]> {
        S::samples(&self.data).ok_or_else(|| self.depth_mismatch::<S>())
    }

    pub fn samples_mut<S: Sample>(&mut self) -> TransResult<&mut [S]> {
        let depth = self.depth;
        S::samples_mut(&mut self.data).ok_or_else(|| {
            TransError::validation(format!(
                "buffer holds {depth:?} samples, {:?} requested",
                S::DEPTH
            ))
        })
    }

    fn checked_index(&self, x: i32, y: i32, plane: usize) -> TransResult<usize> {
        self.index(x, y, plane).ok_or_else(|| {
            TransError::validation(format!(
                "sample ({x}, {y}, {plane}) outside buffer {:?} with {} planes",
                self.rect, self.n_planes
            ))
        })
    }

    fn depth_mismatch<S: Sample>(&self) -> TransError {
        TransError::validation(format!(
            "buffer holds {:?} samples, {:?} requested",
            self.depth,
            S::DEPTH
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/pixel_buffer.rs"]
mod tests;
