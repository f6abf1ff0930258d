use crate::blend::{BlendContext, BlendMode, BlendProcs, BlendSpace};
use crate::composite::{ComposeParams, FillParams};
use crate::foundation::core::{ColorPolarity, Depth, MAX_COLORANTS};
use crate::foundation::error::{TransError, TransResult};

/// Device-level compositor settings.
///
/// Loaded from JSON (all fields optional) and turned into the parameter structs the
/// compositing entry points take.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompositorConfig {
    /// How stored colorants relate to blending values.
    #[serde(default)]
    pub polarity: ColorPolarity,
    /// Colour model used by the non-separable blend modes.
    #[serde(default)]
    pub blend_space: BlendSpace,
    /// Subtractive write-back limited to `drawn_comps`.
    #[serde(default)]
    pub overprint: bool,
    /// PostScript overprint mode 1.
    #[serde(default)]
    pub overprint_mode: bool,
    /// Bit `i` set when device component `i` is painted.
    #[serde(default = "default_drawn_comps")]
    pub drawn_comps: u64,
    /// Device colour component count.
    #[serde(default = "default_num_components")]
    pub num_components: usize,
}

fn default_drawn_comps() -> u64 {
    u64::MAX
}

fn default_num_components() -> usize {
    3
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            polarity: ColorPolarity::default(),
            blend_space: BlendSpace::default(),
            overprint: false,
            overprint_mode: false,
            drawn_comps: default_drawn_comps(),
            num_components: default_num_components(),
        }
    }
}

impl CompositorConfig {
    pub fn from_json_str(s: &str) -> TransResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| TransError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_string(&self) -> TransResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TransError::serde(e.to_string()))
    }

    pub fn validate(&self) -> TransResult<()> {
        if self.num_components == 0 || self.num_components > MAX_COLORANTS {
            return Err(TransError::validation(format!(
                "num_components must be in 1..={MAX_COLORANTS}, got {}",
                self.num_components
            )));
        }
        let wanted = match self.blend_space {
            BlendSpace::Gray => Some(1),
            BlendSpace::Rgb => Some(3),
            BlendSpace::Cmyk => Some(4),
            BlendSpace::Custom => None,
        };
        if let Some(n) = wanted
            && self.num_components < n
        {
            return Err(TransError::validation(format!(
                "{:?} blending needs at least {n} components, got {}",
                self.blend_space, self.num_components
            )));
        }
        if self.blend_space == BlendSpace::Cmyk && self.polarity == ColorPolarity::Additive {
            return Err(TransError::validation(
                "CMYK blending space requires subtractive polarity",
            ));
        }
        if self.overprint_mode && !self.overprint {
            return Err(TransError::validation("overprint_mode requires overprint"));
        }
        Ok(())
    }

    pub fn procs(&self) -> BlendProcs {
        BlendProcs::for_space(self.blend_space)
    }

    pub fn blend_context(&self) -> BlendContext {
        BlendContext::new(
            self.drawn_comps,
            self.overprint_mode,
            self.polarity == ColorPolarity::Subtractive,
            self.num_components,
        )
    }

    pub fn compose_params(&self) -> ComposeParams {
        ComposeParams::new(self.polarity)
            .with_procs(self.procs())
            .with_context(self.blend_context())
            .with_overprint(self.overprint)
    }

    /// Fill parameters for one paint operation at `depth`.
    pub fn fill_params(&self, depth: Depth, alpha: u16, shape: u16, mode: BlendMode) -> FillParams {
        FillParams {
            alpha: alpha.min(depth.max_value()),
            shape: shape.min(depth.max_value()),
            blend_mode: mode,
            polarity: self.polarity,
            overprint: self.overprint,
            procs: self.procs(),
            ctx: self.blend_context(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
