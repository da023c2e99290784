//! Rooms-and-corridors composer: rectangular rooms placed by bounded random
//! attempts, then connected in placement order by brushed corridors.
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::{MaskGrid, Rect};
use crate::raster::stamp::{draw_line, fill_rect, Brush};
use crate::rng::GenRng;

/// Configuration for [`rooms_and_corridors`].
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct RoomsConfig {
    /// Rooms to try to place.
    pub room_count: u32,
    /// Minimum room edge, inclusive.
    pub min_room_size: u32,
    /// Maximum room edge, inclusive.
    pub max_room_size: u32,
    /// Border kept clear of rooms on every side of the domain.
    pub padding: u32,
    /// Placement attempts per room before it is skipped.
    pub attempts_per_room: u32,
    /// Accept rooms whose footprint overlaps already-set cells.
    pub allow_overlap: bool,
    /// Brush used for the connecting corridors.
    pub corridor_brush: Brush,
}

impl RoomsConfig {
    pub fn new(room_count: u32, min_room_size: u32, max_room_size: u32) -> Self {
        Self {
            room_count,
            min_room_size,
            max_room_size,
            padding: 1,
            attempts_per_room: 16,
            allow_overlap: false,
            corridor_brush: Brush::Disc(0),
        }
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_attempts_per_room(mut self, attempts: u32) -> Self {
        self.attempts_per_room = attempts;
        self
    }

    pub fn with_allow_overlap(mut self, allow: bool) -> Self {
        self.allow_overlap = allow;
        self
    }

    pub fn with_corridor_brush(mut self, brush: Brush) -> Self {
        self.corridor_brush = brush;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_room_size == 0 {
            return Err(Error::InvalidArgument("min_room_size must be >= 1".into()));
        }
        if self.min_room_size > self.max_room_size {
            return Err(Error::InvalidArgument(format!(
                "malformed room size range: [{}, {}]",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.attempts_per_room == 0 {
            return Err(Error::InvalidArgument(
                "attempts_per_room must be >= 1".into(),
            ));
        }
        self.corridor_brush.validate()
    }
}

/// Outcome of a room-placing strategy. A sparser-than-requested result is
/// reported here, never as an error.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct RoomsOutcome {
    /// Rooms actually stamped.
    pub rooms_placed: u32,
    /// Room centers in placement order.
    pub centers: Vec<(i32, i32)>,
}

/// Places up to `room_count` axis-aligned rooms and connects consecutive
/// room centers with corridors.
///
/// Every attempt draws width, height, and a top-left corner inside the
/// padded bounds; rejected attempts consume their draws all the same, so the
/// draw stream depends only on config and domain. Rooms that fail all
/// attempts are skipped.
pub fn rooms_and_corridors(
    mask: &mut MaskGrid,
    rng: &mut GenRng,
    config: &RoomsConfig,
) -> Result<RoomsOutcome> {
    config.validate()?;
    let domain = mask.domain();
    let pad = config.padding as i32;
    let width = domain.width() as i32;
    let height = domain.height() as i32;

    let mut outcome = RoomsOutcome::default();

    for _ in 0..config.room_count {
        for _ in 0..config.attempts_per_room {
            let room_w = rng.next_range_u32(config.min_room_size, config.max_room_size)? as i32;
            let room_h = rng.next_range_u32(config.min_room_size, config.max_room_size)? as i32;

            let max_x = width - pad - room_w;
            let max_y = height - pad - room_h;
            if max_x < pad || max_y < pad {
                // Sampled size cannot fit this domain; the attempt is spent.
                continue;
            }
            let x = rng.next_range_i32(pad, max_x)?;
            let y = rng.next_range_i32(pad, max_y)?;
            let room = Rect::new(x, y, x + room_w, y + room_h);

            if !config.allow_overlap && footprint_occupied(mask, room) {
                continue;
            }

            fill_rect(mask, room, true, false)?;
            outcome.centers.push(room.center());
            outcome.rooms_placed += 1;
            break;
        }
    }

    for pair in outcome.centers.windows(2) {
        draw_line(mask, pair[0], pair[1], config.corridor_brush, true)?;
    }

    if outcome.rooms_placed < config.room_count {
        warn!(
            requested = config.room_count,
            placed = outcome.rooms_placed,
            "not every room could be placed"
        );
    }
    debug!(
        placed = outcome.rooms_placed,
        carved = mask.count_ones(),
        "rooms and corridors finished"
    );

    Ok(outcome)
}

fn footprint_occupied(mask: &MaskGrid, room: Rect) -> bool {
    for y in room.y_min..room.y_max {
        for x in room.x_min..room.x_max {
            if mask.get_unchecked(x, y) {
                return true;
            }
        }
    }
    false
}
