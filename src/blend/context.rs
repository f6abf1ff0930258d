/// Device state consulted by CompatibleOverprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlendContext {
    /// Bit `i` set when colorant `i` was painted by the current operation.
    pub drawn_comps: u64,
    /// PostScript overprint mode 1 (zero ink leaves the backdrop visible).
    pub overprint_mode: bool,
    pub subtractive: bool,
    /// Device colour component count.
    pub num_components: usize,
}

impl BlendContext {
    pub fn new(drawn_comps: u64, overprint_mode: bool, subtractive: bool, num_components: usize) -> Self {
        Self {
            drawn_comps,
            overprint_mode,
            subtractive,
            num_components,
        }
    }

    /// Every component marked as drawn.
    pub fn all_drawn(subtractive: bool, num_components: usize) -> Self {
        Self::new(u64::MAX, false, subtractive, num_components)
    }

    #[inline]
    pub fn is_drawn(&self, comp: usize) -> bool {
        comp < 64 && (self.drawn_comps >> comp) & 1 != 0
    }

    /// Overprint mode rules apply (CMYK-like subtractive device with overprint mode on).
    #[inline]
    pub fn uses_overprint_mode(&self) -> bool {
        self.overprint_mode && self.num_components > 3 && self.subtractive
    }
}
