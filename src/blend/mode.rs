use std::fmt;
use std::str::FromStr;

use crate::foundation::error::TransError;

/// PDF blend modes plus the internal CompatibleOverprint mode.
///
/// Discriminants follow the conventional PDF ordering and are what [`BlendMode::from_raw`]
/// decodes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum BlendMode {
    Compatible = 0,
    #[default]
    Normal,
    Multiply,
    Screen,
    Difference,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    Exclusion,
    HardLight,
    Overlay,
    SoftLight,
    Luminosity,
    Hue,
    Saturation,
    Color,
    /// Emulates PostScript overprint on CMYK(+spot) devices.
    CompatibleOverprint,
}

impl BlendMode {
    pub const ALL: [Self; 18] = [
        Self::Compatible,
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Difference,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::Exclusion,
        Self::HardLight,
        Self::Overlay,
        Self::SoftLight,
        Self::Luminosity,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::CompatibleOverprint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Compatible => "Compatible",
            Self::Normal => "Normal",
            Self::Multiply => "Multiply",
            Self::Screen => "Screen",
            Self::Difference => "Difference",
            Self::Darken => "Darken",
            Self::Lighten => "Lighten",
            Self::ColorDodge => "ColorDodge",
            Self::ColorBurn => "ColorBurn",
            Self::Exclusion => "Exclusion",
            Self::HardLight => "HardLight",
            Self::Overlay => "Overlay",
            Self::SoftLight => "SoftLight",
            Self::Luminosity => "Luminosity",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Color => "Color",
            Self::CompatibleOverprint => "CompatibleOverprint",
        }
    }

    /// Decode a raw ordinal. Unknown values fall back to `Normal`.
    pub fn from_raw(raw: u8) -> Self {
        match Self::ALL.get(usize::from(raw)) {
            Some(mode) => *mode,
            None => {
                #[cfg(debug_assertions)]
                tracing::warn!(raw, "unknown blend mode ordinal, using Normal");
                Self::Normal
            }
        }
    }

    pub fn is_normal(self) -> bool {
        matches!(self, Self::Normal | Self::Compatible)
    }

    pub fn is_non_separable(self) -> bool {
        matches!(
            self,
            Self::Luminosity | Self::Hue | Self::Saturation | Self::Color
        )
    }

    /// Return `true` when spot colorants may be blended with this mode.
    ///
    /// Modes that are not white-preserving, and the non-separable ones, fall back to
    /// Normal for spot channels.
    pub fn is_valid_for_spot(self) -> bool {
        !matches!(
            self,
            Self::Difference
                | Self::Exclusion
                | Self::Hue
                | Self::Saturation
                | Self::Color
                | Self::Luminosity
        )
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = TransError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TransError::validation(format!("unknown blend mode name '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mode.rs"]
mod tests;
