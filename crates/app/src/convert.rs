//! Wire payloads to engine types

use hongzhi_ipc::{
    CoupletFormatKind, InkColorKind, PaperSpec, PaperTextureKind, SettingsUpdate, ShapeKind, TemplateSpec,
    ToolKind,
};
use hongzhi_painting::{
    CoupletFormat, CoupletPaper, DescriptorError, DrawMode, DrawSettings, InkColor, PaperDescriptor, PaperShape,
    PaperTexture, StampShape, SymmetryMode, Tool, default_brush_size,
};

use crate::catalog;

/// Brush sizes the controls allow, in logical pixels
pub const MIN_BRUSH_SIZE: f64 = 2.0;
pub const MAX_BRUSH_SIZE: f64 = 40.0;

pub fn template_from_spec(spec: &TemplateSpec) -> Result<PaperDescriptor, DescriptorError> {
    match spec {
        TemplateSpec::Solid { shape } => Ok(PaperDescriptor::solid(match shape {
            ShapeKind::Circle => PaperShape::Circle,
            ShapeKind::Square => PaperShape::Square,
            ShapeKind::Diamond => PaperShape::Diamond,
            ShapeKind::Octagon => PaperShape::Octagon,
        })),
        TemplateSpec::Silhouette { path } => PaperDescriptor::silhouette(path),
        TemplateSpec::Skeleton { glyph, extra_path } => PaperDescriptor::skeleton(*glyph, extra_path.as_deref()),
    }
}

pub fn paper_from_spec(spec: &PaperSpec) -> CoupletPaper {
    let format = match spec.format {
        CoupletFormatKind::Vertical => CoupletFormat::Vertical,
        CoupletFormatKind::Horizontal => CoupletFormat::Horizontal,
        CoupletFormatKind::Square => CoupletFormat::Square,
    };
    let texture = match spec.texture {
        PaperTextureKind::Plain => PaperTexture::Plain,
        PaperTextureKind::Speckled => PaperTexture::Speckled,
        PaperTextureKind::Clouds => PaperTexture::Clouds,
        PaperTextureKind::Dragon => PaperTexture::Dragon,
    };
    CoupletPaper::new(spec.id.clone(), format, spec.ratio, texture)
}

/// Build drawing settings for a session in `mode`. `stamp_path` may name a
/// built-in stamp or carry path data directly.
pub fn settings_from_update(update: &SettingsUpdate, mode: DrawMode) -> Result<DrawSettings, DescriptorError> {
    let stamp = update
        .stamp_path
        .as_deref()
        .map(|path| StampShape::from_svg(catalog::stamp_path(path).unwrap_or(path)))
        .transpose()?;
    let brush_size = if update.brush_size.is_finite() {
        update.brush_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
    } else {
        default_brush_size(mode)
    };
    Ok(DrawSettings {
        symmetry: SymmetryMode::try_from(update.symmetry)?,
        brush_size,
        tool: match update.tool {
            ToolKind::CutBrush => Tool::CutBrush,
            ToolKind::Stamp => Tool::Stamp,
            ToolKind::InkBrush => Tool::InkBrush,
        },
        stamp,
        ink_color: match update.ink_color {
            InkColorKind::Black => InkColor::Black,
            InkColorKind::Gold => InkColor::Gold,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(symmetry: u8, brush_size: f64) -> SettingsUpdate {
        SettingsUpdate {
            symmetry,
            brush_size,
            tool: ToolKind::Stamp,
            stamp_path: Some("diamond".to_string()),
            ink_color: InkColorKind::Gold,
        }
    }

    #[test]
    fn test_settings_conversion() {
        let settings = settings_from_update(&update(12, 10.0), DrawMode::Cut).unwrap();
        assert_eq!(settings.symmetry, SymmetryMode::Twelve);
        assert_eq!(settings.tool, Tool::Stamp);
        assert_eq!(settings.ink_color, InkColor::Gold);
        assert!(settings.stamp.is_some());
    }

    #[test]
    fn test_brush_size_is_clamped() {
        assert_eq!(settings_from_update(&update(1, 0.5), DrawMode::Cut).unwrap().brush_size, 2.0);
        assert_eq!(settings_from_update(&update(1, 400.0), DrawMode::Cut).unwrap().brush_size, 40.0);
        assert_eq!(settings_from_update(&update(1, f64::NAN), DrawMode::Cut).unwrap().brush_size, 8.0);
        assert_eq!(settings_from_update(&update(1, f64::NAN), DrawMode::Write).unwrap().brush_size, 12.0);
    }

    #[test]
    fn test_bad_settings_are_rejected() {
        assert!(matches!(
            settings_from_update(&update(3, 8.0), DrawMode::Cut),
            Err(DescriptorError::UnsupportedSymmetry(3))
        ));
        let mut bad_stamp = update(4, 8.0);
        bad_stamp.stamp_path = Some("M 10 10 X 5 5".to_string());
        assert!(matches!(
            settings_from_update(&bad_stamp, DrawMode::Cut),
            Err(DescriptorError::InvalidPath(_))
        ));
    }
}
