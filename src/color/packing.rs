//! Device colour indices: colorant samples packed most significant first, with an
//! optional object tag above the colorants.

use smallvec::SmallVec;

use crate::foundation::core::{ColorPolarity, Depth, tags};
use crate::foundation::error::{TransError, TransResult};

/// Reserved index meaning "no colour". [`pack_color`] never returns it.
pub const NO_COLOR_INDEX: u64 = u64::MAX;

/// Colorant values in device units (ink amounts for subtractive colorants) plus the
/// object tag painted with them.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceColor {
    pub values: SmallVec<[u16; 8]>,
    #[serde(default)]
    pub tag: u16,
}

impl DeviceColor {
    pub fn new(values: &[u16]) -> Self {
        Self {
            values: SmallVec::from_slice(values),
            tag: tags::UNTOUCHED,
        }
    }

    pub fn with_tag(mut self, tag: u16) -> Self {
        self.tag = tag;
        self
    }

    pub fn n_comp(&self) -> usize {
        self.values.len()
    }

    pub fn pack(&self, depth: Depth, with_tag: bool) -> TransResult<u64> {
        pack_color(&self.values, depth, with_tag.then_some(self.tag))
    }
}

fn packed_bits(n_comp: usize, depth: Depth, tagged: bool) -> TransResult<u32> {
    let bits = n_comp * depth.bytes() * 8 + if tagged { 8 } else { 0 };
    if bits > 64 {
        return Err(TransError::validation(format!(
            "{n_comp} colorants at {depth:?} depth{} need {bits} bits, more than 64",
            if tagged { " plus a tag" } else { "" }
        )));
    }
    Ok(bits as u32)
}

/// Pack device colorant `values` into an index, most significant colorant first.
///
/// The tag (without [`tags::DEVICE_ENCODES_TAGS`]) occupies the byte above the colorants.
/// An all-ones result is nudged off [`NO_COLOR_INDEX`] by flipping its low bit.
pub fn pack_color(values: &[u16], depth: Depth, tag: Option<u16>) -> TransResult<u64> {
    packed_bits(values.len(), depth, tag.is_some())?;
    let bits = depth.bytes() as u32 * 8;
    let mut color = tag.map_or(0, |t| u64::from(t & !tags::DEVICE_ENCODES_TAGS & 0xff));
    for &v in values {
        color = (color << bits) | u64::from(depth.check_value(v)?);
    }
    Ok(if color == NO_COLOR_INDEX { color ^ 1 } else { color })
}

/// Split an index back into `n_comp` device values and the tag byte above them.
pub fn decode_color(index: u64, n_comp: usize, depth: Depth) -> TransResult<DeviceColor> {
    let total = packed_bits(n_comp, depth, false)?;
    let bits = depth.bytes() as u32 * 8;
    let mask = u64::from(depth.max_value());
    let mut values: SmallVec<[u16; 8]> = SmallVec::from_elem(0, n_comp);
    let mut rest = index;
    for v in values.iter_mut().rev() {
        *v = (rest & mask) as u16;
        rest = rest.checked_shr(bits).unwrap_or(0);
    }
    let tag = index.checked_shr(total).unwrap_or(0) & 0xff;
    Ok(DeviceColor {
        values,
        tag: tag as u16,
    })
}

/// Unpack an index into blending-polarity samples.
///
/// Subtractive colorants come back complemented (`max - ink`). For [`ColorPolarity::Hybrid`]
/// the index carries only the `n_comp - num_spots` additive process colorants; the spot
/// colorants are absent from it and unpack as "no ink".
pub fn unpack_color(
    index: u64,
    n_comp: usize,
    depth: Depth,
    polarity: ColorPolarity,
    num_spots: usize,
) -> TransResult<SmallVec<[u16; 8]>> {
    let max = depth.max_value();
    let encoded = match polarity {
        ColorPolarity::Hybrid => n_comp.saturating_sub(num_spots),
        _ => n_comp,
    };
    let device = decode_color(index, encoded, depth)?;
    let mut out: SmallVec<[u16; 8]> = SmallVec::with_capacity(n_comp);
    for i in 0..n_comp {
        let ink = device.values.get(i).copied().unwrap_or(0);
        out.push(if polarity.complements(i, n_comp, num_spots) {
            max - ink
        } else {
            ink
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/color/packing.rs"]
mod tests;
