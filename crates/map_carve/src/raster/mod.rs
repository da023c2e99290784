//! Raster operators bridging SDF primitives, scalar fields, and masks.
//!
//! Three families live here:
//! - rasterize: sample SDF primitives into a [`crate::grid::ScalarField`] and
//!   threshold fields into a [`crate::grid::MaskGrid`];
//! - stamp: write discs, rects, and brushed lines directly into a mask
//!   (clip-not-fail paths for procedural hot loops);
//! - flood: the border-connected flood-fill classifier.
pub mod flood;
pub mod rasterize;
pub mod stamp;

pub use flood::flood_fill_border_connected_not_solid;
pub use rasterize::{compose_rasterize_into, rasterize_into, threshold, ThresholdMode};
pub use stamp::{draw_line, fill_rect, stamp_brush, stamp_disc, Brush};
