//! Hongzhi drawing engine - symmetric paper-cutting and brush calligraphy
//!
//! This crate provides the raster engine behind both drawing modes:
//! - [`surface`] - CPU RGBA8 surface with snapshots and dirty tracking
//! - [`raster`] - Coverage rasterization of kurbo shapes
//! - [`base`] - Paper sheet and couplet paper rendering
//! - [`symmetry`] - Dihedral replication of paint actions
//! - [`stamp`] - Stamp placement through the symmetry group
//! - [`smoothing`] - Jitter filter and midpoint smoothing for cut strokes
//! - [`ink`] - Velocity-dependent ink width
//! - [`prune`] - Removal of severed paper pieces
//! - [`history`] - Bounded snapshot stack
//! - [`pipeline`] - The drawing session tying it all together

pub mod base;
pub mod constants;
pub mod descriptor;
pub mod history;
pub mod ink;
pub mod pipeline;
pub mod prune;
pub mod raster;
pub mod sizing;
pub mod smoothing;
pub mod stamp;
pub mod surface;
pub mod symmetry;
pub mod types;

pub use constants::*;
pub use descriptor::*;
pub use history::HistoryStack;
pub use ink::{InkDab, InkPhysicsModel};
pub use pipeline::*;
pub use prune::{ConnectivityPruner, PruneReport};
pub use sizing::{PointerMapping, SurfaceLayout, compute_layout};
pub use smoothing::StrokeSmoother;
pub use stamp::StampCompositor;
pub use surface::*;
pub use symmetry::{SymmetryCompositor, dihedral_transforms};
pub use types::*;
