//! PNG export of the final buffer

use std::path::Path;

use hongzhi_painting::RasterSurface;
use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::error::AppError;

/// Write the buffer as an RGBA PNG. Cut-away paper stays transparent.
pub fn export_png(surface: &RasterSurface, path: &Path) -> Result<(), AppError> {
    let (width, height) = (surface.width, surface.height);
    let image = RgbaImage::from_raw(width, height, surface.as_bytes().to_vec())
        .ok_or(AppError::BufferMismatch { width, height })?;
    image.save_with_format(path, ImageFormat::Png)?;
    info!("Exported {}x{} buffer to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_roundtrips_pixels() {
        let mut surface = RasterSurface::new(4, 3, 1.0);
        surface.set_pixel(1, 2, [217, 34, 34, 255]);
        let path = std::env::temp_dir().join(format!("hongzhi-export-{}.png", std::process::id()));

        export_png(&surface, &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(1, 2).0, [217, 34, 34, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
