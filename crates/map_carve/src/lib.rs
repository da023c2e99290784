#![forbid(unsafe_code)]
//! map_carve: deterministic grid-based procedural content generation.
//!
//! Modules:
//! - grid: the rectangular index space, bit-packed masks, and scalar fields
//! - rng: the counter-based deterministic generator threaded through every algorithm
//! - sdf: signed-distance primitives and boolean composition
//! - raster: SDF rasterization, thresholding, stamps, lines, and flood fill
//! - layout: seeded strategies (walks, rooms, corridor-first, BSP, room grid)
//! - pipeline: the staged multi-layer run context and sequential runner
//!
//! Everything is reproducible bit for bit: for a fixed seed, config, and
//! domain, two runs produce identical `snapshot_hash64` values for every
//! output layer and field.
pub mod error;
pub mod grid;
pub mod layout;
pub mod pipeline;
pub mod raster;
pub mod rng;
pub mod sdf;

/// Convenient re-exports for common types. Import with `use map_carve::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Domain, MaskGrid, Rect, ScalarField};
    pub use crate::layout::{
        bsp_partition, bsp_rooms, carve, corridor_first, pick_cardinal, pick_skewed_cardinal,
        room_grid, rooms_and_corridors, walk, BspConfig, BspRoomsConfig, Cardinal, CarveConfig,
        CorridorFirstConfig, CorridorStyle, RoomGridConfig, RoomsConfig, RoomsOutcome, WalkConfig,
    };
    pub use crate::pipeline::{
        run_stages, BaseTerrainStage, DungeonLayout, DungeonStage, FieldId, LayerId, MapContext,
        MapStage, RunInputs, Tunables,
    };
    pub use crate::raster::{
        compose_rasterize_into, draw_line, fill_rect, flood_fill_border_connected_not_solid,
        rasterize_into, stamp_brush, stamp_disc, threshold, Brush, ThresholdMode,
    };
    pub use crate::rng::{sanitize_seed, GenRng};
    pub use crate::sdf::{compose, CsgOp, SdfPrimitive};
}
