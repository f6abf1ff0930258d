pub mod packing;

pub use packing::{DeviceColor, NO_COLOR_INDEX, decode_color, pack_color, unpack_color};
