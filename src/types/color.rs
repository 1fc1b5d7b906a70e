//! Color representation for CAD entities

use std::fmt;

/// Entity color
///
/// Colors resolve either through the owning layer/block or as an explicit
/// AutoCAD Color Index (ACI) or true-color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Color taken from the owning layer
    #[default]
    ByLayer,
    /// Color taken from the containing block reference
    ByBlock,
    /// AutoCAD Color Index value (1-255)
    Index(u8),
    /// True color (24-bit RGB)
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// ACI 1 (red)
    pub const RED: Color = Color::Index(1);
    /// ACI 2 (yellow)
    pub const YELLOW: Color = Color::Index(2);
    /// ACI 3 (green)
    pub const GREEN: Color = Color::Index(3);
    /// ACI 4 (cyan)
    pub const CYAN: Color = Color::Index(4);
    /// ACI 5 (blue)
    pub const BLUE: Color = Color::Index(5);
    /// ACI 6 (magenta)
    pub const MAGENTA: Color = Color::Index(6);
    /// ACI 7 (white/black depending on background)
    pub const WHITE: Color = Color::Index(7);

    /// Interpret a raw color index the way the file format encodes it:
    /// 0 means by-block, 256 means by-layer, negatives carry the index of
    /// a switched-off layer.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            i if (1..=255).contains(&i) => Color::Index(i as u8),
            i if i < 0 && i >= -255 => Color::Index((-i) as u8),
            _ => Color::ByLayer,
        }
    }

    /// Create a true color from RGB components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Raw index value as the format encodes it, if this is an indexed color
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::ByLayer => Some(256),
            Color::Index(i) => Some(*i as u16),
            Color::Rgb { .. } => None,
        }
    }

    /// RGB components, if this is a true color
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Rgb { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        }
    }

    /// Check if the color resolves through the owning layer
    pub fn is_by_layer(&self) -> bool {
        matches!(self, Color::ByLayer)
    }

    /// Check if the color resolves through the containing block
    pub fn is_by_block(&self) -> bool {
        matches!(self, Color::ByBlock)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "ACI {}", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_by_layer() {
        assert_eq!(Color::default(), Color::ByLayer);
        assert!(Color::default().is_by_layer());
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Color::from_index(0), Color::ByBlock);
        assert_eq!(Color::from_index(256), Color::ByLayer);
        assert_eq!(Color::from_index(1), Color::RED);
        assert_eq!(Color::from_index(-7), Color::WHITE);
    }

    #[test]
    fn test_index_round_trip() {
        assert_eq!(Color::ByBlock.index(), Some(0));
        assert_eq!(Color::ByLayer.index(), Some(256));
        assert_eq!(Color::Index(42).index(), Some(42));
        assert_eq!(Color::from_rgb(1, 2, 3).index(), None);
    }

    #[test]
    fn test_rgb() {
        let c = Color::from_rgb(10, 20, 30);
        assert_eq!(c.rgb(), Some((10, 20, 30)));
        assert_eq!(Color::RED.rgb(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::ByLayer.to_string(), "ByLayer");
        assert_eq!(Color::Index(5).to_string(), "ACI 5");
        assert_eq!(Color::from_rgb(1, 2, 3).to_string(), "RGB(1, 2, 3)");
    }
}
