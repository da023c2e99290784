//! Room-grid dungeon: rooms laid out on a coarse stride lattice.
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{MaskGrid, Rect};
use crate::layout::rooms::RoomsOutcome;
use crate::raster::stamp::{draw_line, fill_rect, Brush};
use crate::rng::GenRng;

/// Configuration for [`room_grid`].
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct RoomGridConfig {
    /// Coarse cell edge in grid cells. Rooms never cross coarse cells.
    pub stride: u32,
    /// Probability of a coarse cell receiving a room.
    pub keep_chance: f32,
    /// Minimum room edge, inclusive.
    pub min_room_size: u32,
    /// Maximum room edge, inclusive; must fit the stride.
    pub max_room_size: u32,
    pub corridor_brush: Brush,
}

impl RoomGridConfig {
    pub fn new(stride: u32, keep_chance: f32, min_room_size: u32, max_room_size: u32) -> Self {
        Self {
            stride,
            keep_chance,
            min_room_size,
            max_room_size,
            corridor_brush: Brush::Disc(0),
        }
    }

    pub fn with_corridor_brush(mut self, brush: Brush) -> Self {
        self.corridor_brush = brush;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(Error::InvalidArgument("stride must be >= 1".into()));
        }
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(Error::InvalidArgument(format!(
                "malformed room size range: [{}, {}]",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.max_room_size > self.stride {
            return Err(Error::InvalidArgument(format!(
                "max_room_size {} exceeds stride {}",
                self.max_room_size, self.stride
            )));
        }
        if !(0.0..=1.0).contains(&self.keep_chance) {
            return Err(Error::InvalidArgument(format!(
                "keep_chance out of [0, 1]: {}",
                self.keep_chance
            )));
        }
        self.corridor_brush.validate()
    }
}

/// Scans the coarse lattice row-major, draws one selection float per coarse
/// cell, stamps a jittered room inside every selected cell, and connects
/// consecutive selections with corridors.
pub fn room_grid(
    mask: &mut MaskGrid,
    rng: &mut GenRng,
    config: &RoomGridConfig,
) -> Result<RoomsOutcome> {
    config.validate()?;
    let domain = mask.domain();
    let stride = config.stride as i32;
    let cells_x = domain.width() as i32 / stride;
    let cells_y = domain.height() as i32 / stride;

    let mut outcome = RoomsOutcome::default();

    for cy in 0..cells_y {
        for cx in 0..cells_x {
            if rng.next_f32() >= config.keep_chance {
                continue;
            }
            let room_w = rng.next_range_u32(config.min_room_size, config.max_room_size)? as i32;
            let room_h = rng.next_range_u32(config.min_room_size, config.max_room_size)? as i32;
            let offset_x = rng.next_range_i32(0, stride - room_w)?;
            let offset_y = rng.next_range_i32(0, stride - room_h)?;

            let x = cx * stride + offset_x;
            let y = cy * stride + offset_y;
            let room = Rect::new(x, y, x + room_w, y + room_h);
            fill_rect(mask, room, true, false)?;
            outcome.centers.push(room.center());
            outcome.rooms_placed += 1;
        }
    }

    for pair in outcome.centers.windows(2) {
        draw_line(mask, pair[0], pair[1], config.corridor_brush, true)?;
    }

    debug!(
        coarse_cells = cells_x * cells_y,
        rooms = outcome.rooms_placed,
        carved = mask.count_ones(),
        "room grid finished"
    );

    Ok(outcome)
}
