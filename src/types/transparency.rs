//! Transparency values for CAD entities

use std::fmt;

/// Entity transparency as a percentage (0 = opaque, 90 = most transparent)
///
/// The value 255 is the by-layer sentinel the format uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transparency(u8);

impl Transparency {
    /// Fully opaque
    pub const OPAQUE: Transparency = Transparency(0);

    /// Maximum transparency the format allows (90%)
    pub const TRANSPARENT: Transparency = Transparency(90);

    /// Transparency taken from the owning layer
    pub const BY_LAYER: Transparency = Transparency(255);

    /// Create a transparency from a percentage, clamped to 0-90
    pub fn from_percent(percent: u8) -> Self {
        Transparency(percent.min(90))
    }

    /// Percentage value, or `None` for the by-layer sentinel
    pub fn as_percent(&self) -> Option<u8> {
        if *self == Transparency::BY_LAYER {
            None
        } else {
            Some(self.0)
        }
    }

    /// Check if fully opaque
    pub fn is_opaque(&self) -> bool {
        self.0 == 0
    }

    /// Check if transparency resolves through the owning layer
    pub fn is_by_layer(&self) -> bool {
        *self == Transparency::BY_LAYER
    }
}

impl Default for Transparency {
    fn default() -> Self {
        Transparency::BY_LAYER
    }
}

impl fmt::Display for Transparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_percent() {
            Some(p) => write!(f, "{}%", p),
            None => write!(f, "ByLayer"),
        }
    }
}
