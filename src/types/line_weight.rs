//! Line weight values for CAD entities

use std::fmt;

/// Line weight in hundredths of a millimeter, or a symbolic resolution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineWeight {
    /// Weight taken from the owning layer
    #[default]
    ByLayer,
    /// Weight taken from the containing block reference
    ByBlock,
    /// The application default weight
    Standard,
    /// Explicit weight, hundredths of a millimeter
    Value(i16),
}

impl LineWeight {
    /// 0.00 mm (hairline)
    pub const W0_00: LineWeight = LineWeight::Value(0);
    /// 0.25 mm
    pub const W0_25: LineWeight = LineWeight::Value(25);
    /// 0.50 mm
    pub const W0_50: LineWeight = LineWeight::Value(50);
    /// 1.00 mm
    pub const W1_00: LineWeight = LineWeight::Value(100);
    /// 2.11 mm (heaviest defined weight)
    pub const W2_11: LineWeight = LineWeight::Value(211);

    /// Interpret a raw format value: -1 by-layer, -2 by-block, -3 default
    pub fn from_value(value: i16) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            -3 => LineWeight::Standard,
            v => LineWeight::Value(v),
        }
    }

    /// Raw value as the format encodes it
    pub fn as_i16(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Standard => -3,
            LineWeight::Value(v) => *v,
        }
    }

    /// Explicit weight in millimeters, if one is set
    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Standard => write!(f, "Default"),
            LineWeight::Value(v) => write!(f, "{:.2} mm", *v as f64 / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(LineWeight::default(), LineWeight::ByLayer);
    }

    #[test]
    fn test_from_value() {
        assert_eq!(LineWeight::from_value(-1), LineWeight::ByLayer);
        assert_eq!(LineWeight::from_value(-2), LineWeight::ByBlock);
        assert_eq!(LineWeight::from_value(-3), LineWeight::Standard);
        assert_eq!(LineWeight::from_value(25), LineWeight::W0_25);
    }

    #[test]
    fn test_round_trip() {
        for v in [-3_i16, -2, -1, 0, 25, 211] {
            assert_eq!(LineWeight::from_value(v).as_i16(), v);
        }
    }

    #[test]
    fn test_millimeters() {
        assert_eq!(LineWeight::W0_50.millimeters(), Some(0.5));
        assert_eq!(LineWeight::ByLayer.millimeters(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(LineWeight::W0_25.to_string(), "0.25 mm");
        assert_eq!(LineWeight::ByBlock.to_string(), "ByBlock");
    }
}
