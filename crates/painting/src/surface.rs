//! CPU RGBA8 raster surface

use tracing::debug;

use crate::types::Composite;

/// Fully transparent pixel; the only "unoccupied" value.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Rectangle of pixels modified since the host last presented the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DirtyRegion {
    fn union(self, other: DirtyRegion) -> DirtyRegion {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y1 = (self.y + self.height).max(other.y + other.height);
        DirtyRegion {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }
}

/// Immutable full copy of a surface's pixels, retained for undo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Box<[[u8; 4]]>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }
}

/// An RGBA8 CPU surface (straight alpha, row-major)
pub struct RasterSurface {
    /// Surface dimensions in device pixels
    pub width: u32,
    pub height: u32,
    device_pixel_ratio: f32,
    pixels: Vec<[u8; 4]>,
    dirty: Option<DirtyRegion>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl RasterSurface {
    /// Create a new surface initialized to transparent black
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            device_pixel_ratio,
            pixels: vec![TRANSPARENT; pixel_count],
            dirty: None,
        }
    }

    /// Device pixel ratio the surface was sized for
    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.device_pixel_ratio = ratio;
    }

    /// Replace the pixel storage if the dimensions differ.
    /// Returns true if a new buffer was allocated.
    pub fn reallocate(&mut self, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        debug!(
            "RasterSurface::reallocate: {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.pixels = vec![TRANSPARENT; (width as usize) * (height as usize)];
        self.mark_all_dirty();
        true
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
        self.mark_all_dirty();
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Whether the pixel holds any paint at all
    #[inline]
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).is_some_and(|p| p != TRANSPARENT)
    }

    /// Combine a color into one pixel. Returns true if the pixel changed.
    #[inline]
    pub fn composite_pixel(&mut self, x: u32, y: u32, composite: Composite) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = self.index(x, y);
        let dst = self.pixels[index];
        let out = match composite {
            Composite::Erase => TRANSPARENT,
            Composite::Over(src) => source_over(src, dst),
            Composite::Atop(src) => source_atop(src, dst),
        };
        self.pixels[index] = out;
        out != dst
    }

    /// Independent copy of the current pixels
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone().into_boxed_slice(),
        }
    }

    /// Overwrite the pixels verbatim from a snapshot.
    ///
    /// Returns false (and leaves the surface untouched) when the snapshot was
    /// taken at different dimensions.
    pub fn restore(&mut self, snapshot: &Snapshot) -> bool {
        if snapshot.width != self.width || snapshot.height != self.height {
            debug!(
                "RasterSurface::restore: snapshot {}x{} does not fit {}x{}",
                snapshot.width, snapshot.height, self.width, self.height
            );
            return false;
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        self.mark_all_dirty();
        true
    }

    /// Get raw pixel data for upload or export (RGBA8, row-major)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get direct access to pixel data (for advanced operations)
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Get mutable access to pixel data (for advanced operations)
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.pixels
    }

    /// Record a modified rectangle (clamped to the surface)
    pub fn mark_region_dirty(&mut self, x: u32, y: u32, w: u32, h: u32) {
        if w == 0 || h == 0 || x >= self.width || y >= self.height {
            return;
        }
        let region = DirtyRegion {
            x,
            y,
            width: w.min(self.width - x),
            height: h.min(self.height - y),
        };
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(region),
            None => region,
        });
    }

    pub fn mark_all_dirty(&mut self) {
        self.mark_region_dirty(0, 0, self.width, self.height);
    }

    /// Get the modified region and reset tracking
    pub fn take_dirty_region(&mut self) -> Option<DirtyRegion> {
        self.dirty.take()
    }

    /// Check if anything changed since the last `take_dirty_region`
    #[inline]
    pub fn has_dirty_region(&self) -> bool {
        self.dirty.is_some()
    }
}

/// Straight-alpha source-over
#[inline]
pub fn source_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return TRANSPARENT;
    }
    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Straight-alpha source-atop: color only lands where the destination has
/// alpha, and the destination alpha is kept
#[inline]
pub fn source_atop(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    if dst[3] == 0 || src[3] == 0 {
        return dst;
    }
    let sa = src[3] as f32 / 255.0;
    let channel = |i: usize| {
        let c = src[i] as f32 * sa + dst[i] as f32 * (1.0 - sa);
        c.round().clamp(0.0, 255.0) as u8
    };
    [channel(0), channel(1), channel(2), dst[3]]
}
