//! Seeded layout strategies: random walks, rooms and corridors, BSP
//! partitioning, and the coarse room grid.
//!
//! Every strategy takes `(&mut MaskGrid, &mut GenRng, &Config)`, consumes the
//! generator in a fixed caller-visible order, and is a pure function of the
//! seed state, config, and domain: identical inputs always produce an
//! identical final mask and an identical RNG end-state.
use crate::rng::GenRng;

pub mod bsp;
pub mod corridor_first;
pub mod room_grid;
pub mod rooms;
pub mod walk;

pub use bsp::{bsp_partition, bsp_rooms, BspConfig, BspRoomsConfig, CorridorStyle};
pub use corridor_first::{corridor_first, CorridorFirstConfig};
pub use room_grid::{room_grid, RoomGridConfig};
pub use rooms::{rooms_and_corridors, RoomsConfig, RoomsOutcome};
pub use walk::{carve, walk, CarveConfig, WalkConfig};

/// One of the four axis directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    PosX,
    NegX,
    PosY,
    NegY,
}

impl Cardinal {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Cardinal::PosX => (1, 0),
            Cardinal::NegX => (-1, 0),
            Cardinal::PosY => (0, 1),
            Cardinal::NegY => (0, -1),
        }
    }
}

/// Uniform pick among the four cardinals. Consumes one draw.
pub fn pick_cardinal(rng: &mut GenRng) -> Cardinal {
    match rng.next_u32() & 3 {
        0 => Cardinal::PosX,
        1 => Cardinal::NegX,
        2 => Cardinal::PosY,
        _ => Cardinal::NegY,
    }
}

/// Skewed cardinal pick. Consumes exactly two draws: first the axis (50/50),
/// then the sign with probability `0.5 + 0.5 * skew` of choosing the
/// positive direction, skew clamped to `[-1, 1]`.
///
/// The sign comparison is `<=` against the drawn float, so a draw landing
/// exactly on the boundary probability resolves to the positive branch.
/// Changing it to `<` would shift every downstream snapshot hash.
pub fn pick_skewed_cardinal(rng: &mut GenRng, skew_x: f32, skew_y: f32) -> Cardinal {
    let axis_is_x = rng.next_f32() < 0.5;
    let skew = if axis_is_x { skew_x } else { skew_y }.clamp(-1.0, 1.0);
    let positive = rng.next_f32() <= 0.5 + 0.5 * skew;
    match (axis_is_x, positive) {
        (true, true) => Cardinal::PosX,
        (true, false) => Cardinal::NegX,
        (false, true) => Cardinal::PosY,
        (false, false) => Cardinal::NegY,
    }
}
