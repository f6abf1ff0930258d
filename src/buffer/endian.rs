use crate::buffer::pixel_buffer::PixelBuffer;
use crate::buffer::planar::Samples;
use crate::foundation::error::{TransError, TransResult};

/// Byte order of 16-bit samples entering or leaving the crate.
///
/// Compositing always works on native-endian `u16`; conversion happens only here.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    #[default]
    NativeEndian,
    BigEndian,
}

impl SampleSource {
    #[inline]
    pub fn encode(self, v: u16) -> [u8; 2] {
        match self {
            Self::NativeEndian => v.to_ne_bytes(),
            Self::BigEndian => v.to_be_bytes(),
        }
    }

    #[inline]
    pub fn decode(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::NativeEndian => u16::from_ne_bytes(bytes),
            Self::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    /// Append `samples` to `out`; 8-bit samples are copied as-is.
    pub fn extend_bytes(self, samples: &Samples, range: std::ops::Range<usize>, out: &mut Vec<u8>) {
        match samples {
            Samples::Shallow(v) => out.extend_from_slice(&v[range]),
            Samples::Deep(v) => {
                for &s in &v[range] {
                    out.extend_from_slice(&self.encode(s));
                }
            }
        }
    }
}

impl PixelBuffer {
    /// Rows of `plane` covering `rect`, packed tightly, in the requested byte order.
    pub fn plane_bytes(&self, plane: usize, order: SampleSource) -> TransResult<Vec<u8>> {
        self.check_plane(plane)?;
        let width = self.rect.width();
        let mut out = Vec::with_capacity(width * self.rect.height() * self.depth.bytes());
        for row in 0..self.rect.height() {
            let start = plane * self.planestride + row * self.rowstride;
            order.extend_bytes(&self.data, start..start + width, &mut out);
        }
        Ok(out)
    }

    /// Replace `plane` with tightly packed rows in the given byte order.
    pub fn load_plane(&mut self, plane: usize, bytes: &[u8], order: SampleSource) -> TransResult<()> {
        self.check_plane(plane)?;
        let width = self.rect.width();
        let bps = self.depth.bytes();
        let expected = width * self.rect.height() * bps;
        if bytes.len() != expected {
            return Err(TransError::validation(format!(
                "plane {plane} expects {expected} bytes, got {}",
                bytes.len()
            )));
        }
        for (i, chunk) in bytes.chunks_exact(bps).enumerate() {
            let (row, col) = (i / width, i % width);
            let idx = plane * self.planestride + row * self.rowstride + col;
            let v = if bps == 1 {
                u16::from(chunk[0])
            } else {
                order.decode([chunk[0], chunk[1]])
            };
            self.data.set(idx, v);
        }
        Ok(())
    }

    fn check_plane(&self, plane: usize) -> TransResult<()> {
        if plane >= self.n_planes {
            return Err(TransError::validation(format!(
                "plane {plane} out of range ({} planes)",
                self.n_planes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/endian.rs"]
mod tests;
