pub mod fill;
pub mod flatten;
pub mod group;
pub mod path;
pub mod pixel;

pub use fill::{FillParams, fill_rectangle, fill_rectangle_knockout};
pub use flatten::{blended_rows, flatten_onto_background};
pub use group::{ComposeParams, compose_group, compose_group_via};
pub use path::{ComposeConfig, ComposePath, MaskCoverage, select_compose_path};
pub use pixel::{
    composite_group, composite_knockout, composite_knockout_group, composite_knockout_isolated,
    composite_knockout_simple, composite_pixel_alpha, first_blend_spot, knockout_recomposite_group,
    recomposite_group, union, union_mul,
};
