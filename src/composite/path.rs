use crate::buffer::{PixelBuffer, SoftMaskBuffer};
use crate::composite::group::ComposeParams;
use crate::foundation::core::IntRect;

/// How a soft mask relates to the composed region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskCoverage {
    None,
    /// Mask data covers every pixel of the region.
    Full,
    /// Some pixels read the mask background.
    Partial,
}

/// Static facts about one group composition, gathered once per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComposeConfig {
    pub empty: bool,
    pub nos_knockout: bool,
    pub nos_isolated: bool,
    pub tos_isolated: bool,
    pub normal: bool,
    /// Either buffer carries a shape plane.
    pub has_shape: bool,
    /// The destination carries an alpha_g plane.
    pub has_alpha_g: bool,
    /// Either buffer carries a tag plane.
    pub has_tags: bool,
    pub mask: MaskCoverage,
    pub has_backdrop: bool,
    pub num_spots: usize,
    /// Subtractive output restricted to the drawn components.
    pub overprint: bool,
}

impl ComposeConfig {
    pub fn new(
        tos: &PixelBuffer,
        nos: &PixelBuffer,
        mask: Option<&SoftMaskBuffer>,
        params: &ComposeParams,
        region: IntRect,
    ) -> Self {
        let mask = match mask {
            None => MaskCoverage::None,
            Some(m) if m.covers(region) => MaskCoverage::Full,
            Some(_) => MaskCoverage::Partial,
        };
        Self {
            empty: tos.n_chan == 0 || nos.n_chan == 0 || region.is_empty(),
            nos_knockout: nos.knockout,
            nos_isolated: nos.isolated,
            tos_isolated: tos.isolated,
            normal: tos.blend_mode.is_normal(),
            has_shape: tos.has_shape || nos.has_shape,
            has_alpha_g: nos.has_alpha_g,
            has_tags: tos.has_tags || nos.has_tags,
            mask,
            has_backdrop: nos.backdrop.is_some(),
            num_spots: nos.num_spots,
            overprint: params.writes_drawn_only(),
        }
    }
}

/// Compositing loop chosen for a [`ComposeConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComposePath {
    /// Nothing to do.
    Noop,
    /// Non-knockout destination without shape, alpha_g or tag planes, a fully covering (or
    /// absent) mask and plain write-back.
    Simple {
        tos_isolated: bool,
        masked: bool,
        normal: bool,
    },
    /// Knockout isolated destination with a fully covering (or absent) mask.
    KnockoutIsolated { masked: bool },
    /// Every flag decided per call.
    General,
}

/// Pick the compositing loop for `cfg`. Every specialised path computes exactly what
/// [`ComposePath::General`] computes for the configurations it accepts.
pub fn select_compose_path(cfg: &ComposeConfig) -> ComposePath {
    if cfg.empty {
        return ComposePath::Noop;
    }
    if cfg.mask == MaskCoverage::Partial {
        return ComposePath::General;
    }
    let masked = cfg.mask == MaskCoverage::Full;
    if cfg.nos_knockout {
        if cfg.nos_isolated {
            return ComposePath::KnockoutIsolated { masked };
        }
        return ComposePath::General;
    }
    if cfg.has_shape || cfg.has_alpha_g || cfg.has_tags || cfg.overprint {
        return ComposePath::General;
    }
    ComposePath::Simple {
        tos_isolated: cfg.tos_isolated,
        masked,
        normal: cfg.normal,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/path.rs"]
mod tests;
