use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::constants::GOLD;
use crate::descriptor::DescriptorError;

/// Which craft the surface simulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    /// Symmetric paper-cutting: paint removes paper
    Cut,
    /// Brush calligraphy: paint deposits ink
    Write,
}

/// How painted coverage combines with the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Destination-out: covered pixels become fully transparent
    Erase,
    /// Source-over with a straight-alpha RGBA color
    Over([u8; 4]),
    /// Source-atop: like `Over` but only onto pixels that already have alpha,
    /// and the destination alpha is preserved
    Atop([u8; 4]),
}

/// Fill rule for path filling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Number of mirror-replicated placements around the buffer center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SymmetryMode {
    One,
    Two,
    Four,
    #[default]
    Eight,
    Twelve,
}

impl SymmetryMode {
    pub const ALL: [SymmetryMode; 5] = [
        SymmetryMode::One,
        SymmetryMode::Two,
        SymmetryMode::Four,
        SymmetryMode::Eight,
        SymmetryMode::Twelve,
    ];

    /// Total placements painted per action
    pub fn placements(self) -> u32 {
        match self {
            SymmetryMode::One => 1,
            SymmetryMode::Two => 2,
            SymmetryMode::Four => 4,
            SymmetryMode::Eight => 8,
            SymmetryMode::Twelve => 12,
        }
    }

    /// Rotational sectors; each sector holds a mirrored pair except in `One`
    pub fn sectors(self) -> u32 {
        match self {
            SymmetryMode::One => 1,
            other => other.placements() / 2,
        }
    }

    /// Whether each sector also paints a horizontally mirrored placement
    pub fn is_mirrored(self) -> bool {
        self != SymmetryMode::One
    }
}

impl TryFrom<u8> for SymmetryMode {
    type Error = DescriptorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SymmetryMode::One),
            2 => Ok(SymmetryMode::Two),
            4 => Ok(SymmetryMode::Four),
            8 => Ok(SymmetryMode::Eight),
            12 => Ok(SymmetryMode::Twelve),
            other => Err(DescriptorError::UnsupportedSymmetry(other)),
        }
    }
}

impl From<SymmetryMode> for u8 {
    fn from(mode: SymmetryMode) -> Self {
        mode.placements() as u8
    }
}

/// Active drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    CutBrush,
    Stamp,
    InkBrush,
}

/// Ink colors offered in calligraphy mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InkColor {
    #[default]
    Black,
    Gold,
}

impl InkColor {
    /// Fill style of the ink, straight alpha
    pub fn rgba(self) -> [u8; 4] {
        match self {
            InkColor::Black => [20, 20, 20, 230],
            InkColor::Gold => [GOLD[0], GOLD[1], GOLD[2], 230],
        }
    }
}

/// A pointer sample in buffer pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Milliseconds on the host's monotonic clock
    pub time_ms: f64,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64, time_ms: f64) -> Self {
        Self { x, y, time_ms }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn distance(&self, other: &StrokePoint) -> f64 {
        self.point().distance(other.point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_counts() {
        assert_eq!(SymmetryMode::One.sectors(), 1);
        assert_eq!(SymmetryMode::Two.sectors(), 1);
        assert_eq!(SymmetryMode::Four.sectors(), 2);
        assert_eq!(SymmetryMode::Eight.sectors(), 4);
        assert_eq!(SymmetryMode::Twelve.sectors(), 6);
        assert!(!SymmetryMode::One.is_mirrored());
        assert!(SymmetryMode::Two.is_mirrored());
    }

    #[test]
    fn test_symmetry_from_u8() {
        for mode in SymmetryMode::ALL {
            assert_eq!(SymmetryMode::try_from(u8::from(mode)).unwrap(), mode);
        }
        assert!(matches!(
            SymmetryMode::try_from(3),
            Err(DescriptorError::UnsupportedSymmetry(3))
        ));
    }

    #[test]
    fn test_ink_colors_are_mostly_opaque() {
        assert_eq!(InkColor::Black.rgba()[3], 230);
        assert_eq!(InkColor::Gold.rgba()[..3], GOLD);
    }
}
