pub mod preserve;
pub mod transform;

pub use preserve::{preserve_backdrop, preserve_backdrop_cm, snapshot_backdrop};
pub use transform::{ColorTransform, PlanarRegion, PlanarRegionMut};
