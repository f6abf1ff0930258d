//! pdftrans is a PDF 1.4 transparency compositing engine.
//!
//! It paints into planar 8- or 16-bit pixel buffers that carry colour, alpha and optional
//! shape, group-alpha and tag planes, and implements the compositing model on top of them:
//!
//! - All sixteen blend modes over additive, subtractive and hybrid colorants
//! - Rectangle fills, including knockout fills, into a group buffer
//! - Isolated, non-isolated and knockout group composition under an optional soft mask
//! - Soft-mask extraction from luminosity and alpha groups
//! - Backdrop preservation with or without a colour transform, and flattening for output
#![forbid(unsafe_code)]

pub mod backdrop;
pub mod blend;
pub mod buffer;
pub mod color;
pub mod composite;
mod foundation;
pub mod mask;

pub use crate::foundation::config::CompositorConfig;
pub use crate::foundation::core::{ColorPolarity, Depth, IntRect, MAX_COLORANTS, tags};
pub use crate::foundation::error::{TransError, TransResult};
pub use crate::foundation::math::Sample;

pub use crate::backdrop::{ColorTransform, PlanarRegion, PlanarRegionMut};
pub use crate::blend::{BlendContext, BlendMode, BlendProcs, BlendSpace};
pub use crate::buffer::{PixelBuffer, PixelBufferDesc, SampleSource, SoftMaskBuffer, SoftMaskSubtype};
pub use crate::color::DeviceColor;
pub use crate::composite::{ComposeParams, FillParams};
