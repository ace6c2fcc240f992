//! Read-only paper, couplet and stamp descriptors
//!
//! Descriptors are owned by the host's catalog. Path data is SVG path syntax
//! in a normalized 0-100 frame and is parsed once, up front.

use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::DrawMode;

/// Errors produced while turning catalog data into descriptors
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Invalid SVG path data: {0}")]
    InvalidPath(#[from] kurbo::SvgParseError),

    #[error("Unsupported symmetry mode: {0}")]
    UnsupportedSymmetry(u8),

    #[error("Invalid font data: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
}

fn parse_path(data: &str) -> Result<BezPath, DescriptorError> {
    Ok(BezPath::from_svg(data)?)
}

/// Bounding outline of a solid template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperShape {
    Circle,
    Square,
    Diamond,
    Octagon,
}

/// How the red paper of a cut-mode template is laid down
#[derive(Debug, Clone, PartialEq)]
pub enum PaperDescriptor {
    /// Plain geometric sheet
    Solid { shape: PaperShape },
    /// Sheet cut to a normalized outline (even-odd)
    Silhouette { path: BezPath },
    /// Heavy character outline, optionally joined by an extra normalized path
    Skeleton { glyph: char, extra_path: Option<BezPath> },
}

impl PaperDescriptor {
    pub fn solid(shape: PaperShape) -> Self {
        PaperDescriptor::Solid { shape }
    }

    pub fn silhouette(path: &str) -> Result<Self, DescriptorError> {
        Ok(PaperDescriptor::Silhouette {
            path: parse_path(path)?,
        })
    }

    pub fn skeleton(glyph: char, extra_path: Option<&str>) -> Result<Self, DescriptorError> {
        Ok(PaperDescriptor::Skeleton {
            glyph,
            extra_path: extra_path.map(parse_path).transpose()?,
        })
    }
}

impl Default for PaperDescriptor {
    fn default() -> Self {
        PaperDescriptor::solid(PaperShape::Circle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoupletFormat {
    Vertical,
    Horizontal,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperTexture {
    Plain,
    Speckled,
    Clouds,
    Dragon,
}

/// Calligraphy paper style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoupletPaper {
    pub id: String,
    pub format: CoupletFormat,
    /// width / height
    pub ratio: f64,
    pub texture: PaperTexture,
}

impl CoupletPaper {
    pub fn new(id: impl Into<String>, format: CoupletFormat, ratio: f64, texture: PaperTexture) -> Self {
        Self {
            id: id.into(),
            format,
            ratio,
            texture,
        }
    }

    /// Character guide grid as (rows, columns), if this paper has one.
    ///
    /// Seven and five character couplets are recognized by id; every
    /// horizontal scroll carries four.
    pub fn guide_grid(&self) -> Option<(u32, u32)> {
        if self.id.contains("vertical_7") {
            Some((7, 1))
        } else if self.id.contains("vertical_5") {
            Some((5, 1))
        } else if self.format == CoupletFormat::Horizontal {
            Some((1, 4))
        } else {
            None
        }
    }

    /// Whether the square dragon border and scales are drawn
    pub fn has_dragon_border(&self) -> bool {
        self.texture == PaperTexture::Dragon && self.format == CoupletFormat::Square
    }
}

/// Stamp outline, parsed from its 0-100 normalized path data
#[derive(Debug, Clone, PartialEq)]
pub struct StampShape {
    path: BezPath,
}

impl StampShape {
    pub fn from_svg(data: &str) -> Result<Self, DescriptorError> {
        Ok(Self {
            path: parse_path(data)?,
        })
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }
}

/// Whatever the surface renders underneath the user's work
#[derive(Debug, Clone, PartialEq)]
pub enum BaseContent {
    Template(PaperDescriptor),
    Couplet(CoupletPaper),
}

impl BaseContent {
    pub fn mode(&self) -> DrawMode {
        match self {
            BaseContent::Template(_) => DrawMode::Cut,
            BaseContent::Couplet(_) => DrawMode::Write,
        }
    }

    /// Mandated width / height of the buffer
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            BaseContent::Template(_) => 1.0,
            BaseContent::Couplet(paper) => paper.ratio,
        }
    }
}
