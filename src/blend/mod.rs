pub mod context;
pub mod mode;
pub mod nonseparable;
pub mod separable;
pub(crate) mod tables;

pub use context::BlendContext;
pub use mode::BlendMode;
pub use nonseparable::{BlendProcs, BlendSpace, NonSeparableFn};
pub use separable::{blend_channel, blend_pixel};
