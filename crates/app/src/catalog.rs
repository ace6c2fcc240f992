//! Built-in templates, couplet papers and stamps
//!
//! A small subset of the shipped catalog, enough to open a session from the
//! command line. Entries are kept in wire form and go through the same
//! conversion as host messages.

use hongzhi_ipc::{CoupletFormatKind, PaperSpec, PaperTextureKind, ShapeKind, TemplateSpec};

use crate::error::AppError;

/// Stamp outlines in a 0-100 box
const STAMPS: &[(&str, &str)] = &[
    (
        "ingot",
        "M10 40 Q10 70 30 80 Q50 95 70 80 Q90 70 90 40 Q90 20 70 30 Q50 10 30 30 Q10 20 10 40 Z",
    ),
    ("diamond", "M50 5 L85 50 L50 95 L15 50 Z"),
    (
        "star",
        "M50 2 L63 40 L98 40 L70 60 L80 95 L50 75 L20 95 L30 60 L2 40 L37 40 Z",
    ),
    (
        "heart",
        "M50 30 C50 30 20 10 5 35 C-5 55 50 95 50 95 C50 95 105 55 95 35 C80 10 50 30 50 30 Z",
    ),
];

/// A cut template together with the symmetry it opens with
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTemplate {
    pub symmetry: u8,
    pub spec: TemplateSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Template(CatalogTemplate),
    Paper(PaperSpec),
}

/// Outline of a built-in stamp
pub fn stamp_path(id: &str) -> Option<&'static str> {
    STAMPS.iter().find(|(name, _)| *name == id).map(|(_, path)| *path)
}

pub fn template(id: &str) -> Option<CatalogTemplate> {
    let (symmetry, spec) = match id {
        "circle_base" => (8, TemplateSpec::Solid { shape: ShapeKind::Circle }),
        "diamond_base" => (4, TemplateSpec::Solid { shape: ShapeKind::Square }),
        "octagon_base" => (8, TemplateSpec::Solid { shape: ShapeKind::Octagon }),
        "fu" => (
            1,
            TemplateSpec::Skeleton {
                glyph: '福',
                extra_path: None,
            },
        ),
        "dumpling" => (
            1,
            TemplateSpec::Silhouette {
                path: "M 15 55 Q 50 95 85 55 Q 90 45 80 40 Q 50 15 20 40 Q 10 45 15 55 Z".to_string(),
            },
        ),
        "snowflake" => (
            12,
            TemplateSpec::Silhouette {
                path: "M 50 5 Q 65 25 89 27 Q 75 50 89 73 Q 65 75 50 95 Q 35 75 11 73 Q 25 50 11 27 Q 35 25 50 5 Z"
                    .to_string(),
            },
        ),
        _ => return None,
    };
    Some(CatalogTemplate { symmetry, spec })
}

pub fn paper(id: &str) -> Option<PaperSpec> {
    let (format, ratio, texture) = match id {
        "square_fu" => (CoupletFormatKind::Square, 1.0, PaperTextureKind::Dragon),
        "vertical_7" => (CoupletFormatKind::Vertical, 0.25, PaperTextureKind::Clouds),
        "vertical_5" => (CoupletFormatKind::Vertical, 0.3, PaperTextureKind::Speckled),
        "horizontal" => (CoupletFormatKind::Horizontal, 3.5, PaperTextureKind::Plain),
        _ => return None,
    };
    Some(PaperSpec {
        id: id.to_string(),
        format,
        ratio,
        texture,
    })
}

/// Look up a template or paper by id
pub fn lookup(id: &str) -> Result<CatalogEntry, AppError> {
    if let Some(template) = template(id) {
        return Ok(CatalogEntry::Template(template));
    }
    paper(id)
        .map(CatalogEntry::Paper)
        .ok_or_else(|| AppError::UnknownEntry(id.to_string()))
}
