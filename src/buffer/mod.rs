pub mod endian;
pub mod pixel_buffer;
pub mod planar;
pub mod soft_mask;

pub use endian::SampleSource;
pub use pixel_buffer::{PixelBuffer, PixelBufferDesc};
pub use planar::{PlaneLayout, Samples};
pub use soft_mask::{SoftMaskBuffer, SoftMaskSubtype, TransferFn};
