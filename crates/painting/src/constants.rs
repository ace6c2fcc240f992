/// Upper bound on `width * height` of the raster buffer (4000 x 4000).
pub const MAX_PIXEL_BUDGET: u64 = 16_000_000;

/// Paper red used for cut-mode base content.
pub const PAPER_COLOR: [u8; 4] = [0xD9, 0x22, 0x22, 0xFF];

/// Couplet paper gradient endpoints (top-left to bottom-right).
pub const COUPLET_GRADIENT_START: [u8; 3] = [0xD9, 0x22, 0x22];
pub const COUPLET_GRADIENT_END: [u8; 3] = [0xB9, 0x1C, 0x1C];

/// Gold used for specks, guides and the gold ink.
pub const GOLD: [u8; 3] = [250, 204, 21];

/// Seed for the fixed paper fiber texture.
pub const TEXTURE_SEED: u64 = 0x6A69_616E_7A68_6921;

/// Tolerance (buffer pixels) used when flattening curves to polylines.
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// Normalized coordinate space of pattern and paper descriptors.
pub const DESCRIPTOR_EXTENT: f64 = 100.0;

/// Reference brush size and buffer width for stamp scaling.
pub const STAMP_BRUSH_REFERENCE: f64 = 20.0;
pub const STAMP_BUFFER_REFERENCE: f64 = 200.0;
