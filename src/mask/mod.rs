pub mod extract;

pub use extract::{blend_mask_with_alpha, copy_mask_plane, extract_soft_mask};
