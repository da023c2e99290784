//! Corridor-first dungeon: corridors are carved before rooms, and rooms are
//! placed preferentially at corridor endpoints and dead-ends.
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::{MaskGrid, Rect};
use crate::layout::rooms::RoomsOutcome;
use crate::layout::walk::{walk, WalkConfig};
use crate::raster::stamp::{fill_rect, Brush};
use crate::rng::GenRng;

/// Configuration for [`corridor_first`].
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct CorridorFirstConfig {
    /// Corridors carved as chained random walks.
    pub corridor_count: u32,
    /// Minimum corridor length, inclusive.
    pub min_corridor_length: u32,
    /// Maximum corridor length, inclusive.
    pub max_corridor_length: u32,
    /// Direction attempts per walk step.
    pub max_retries: u32,
    /// Brush used while carving corridors.
    pub corridor_brush: Brush,
    /// Rooms stamped on shuffled endpoint/dead-end candidates.
    pub room_count: u32,
    /// Minimum room edge, inclusive.
    pub min_room_size: u32,
    /// Maximum room edge, inclusive.
    pub max_room_size: u32,
}

impl CorridorFirstConfig {
    pub fn new(corridor_count: u32, corridor_length: u32, room_count: u32) -> Self {
        Self {
            corridor_count,
            min_corridor_length: corridor_length,
            max_corridor_length: corridor_length,
            max_retries: 4,
            corridor_brush: Brush::Disc(0),
            room_count,
            min_room_size: 3,
            max_room_size: 6,
        }
    }

    pub fn with_corridor_length_range(mut self, min: u32, max: u32) -> Self {
        self.min_corridor_length = min;
        self.max_corridor_length = max;
        self
    }

    pub fn with_room_size_range(mut self, min: u32, max: u32) -> Self {
        self.min_room_size = min;
        self.max_room_size = max;
        self
    }

    pub fn with_corridor_brush(mut self, brush: Brush) -> Self {
        self.corridor_brush = brush;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.corridor_count == 0 {
            return Err(Error::InvalidArgument("corridor_count must be >= 1".into()));
        }
        if self.min_corridor_length > self.max_corridor_length {
            return Err(Error::InvalidArgument(format!(
                "malformed corridor length range: [{}, {}]",
                self.min_corridor_length, self.max_corridor_length
            )));
        }
        if self.max_retries == 0 {
            return Err(Error::InvalidArgument("max_retries must be >= 1".into()));
        }
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(Error::InvalidArgument(format!(
                "malformed room size range: [{}, {}]",
                self.min_room_size, self.max_room_size
            )));
        }
        self.corridor_brush.validate()
    }
}

/// Carves chained corridors from the domain center, then stamps rooms on a
/// seeded shuffle of corridor endpoints and dead-ends.
///
/// A dead-end is a set cell with exactly one set 4-neighbor. Candidate order
/// is endpoints in carve order, then dead-ends in row-major scan order, then
/// a Fisher-Yates shuffle driven solely by the seeded generator.
pub fn corridor_first(
    mask: &mut MaskGrid,
    rng: &mut GenRng,
    config: &CorridorFirstConfig,
) -> Result<RoomsOutcome> {
    config.validate()?;
    let domain = mask.domain();

    let mut endpoints: Vec<(i32, i32)> = Vec::with_capacity(config.corridor_count as usize);
    let mut current = (domain.width() as i32 / 2, domain.height() as i32 / 2);

    for _ in 0..config.corridor_count {
        let length = rng.next_range_u32(config.min_corridor_length, config.max_corridor_length)?;
        let corridor = WalkConfig::new(current, length)
            .with_max_retries(config.max_retries)
            .with_brush(config.corridor_brush);
        current = walk(mask, rng, &corridor)?;
        endpoints.push(current);
    }

    let mut candidates = endpoints.clone();
    for y in 0..domain.height() as i32 {
        for x in 0..domain.width() as i32 {
            if mask.get_unchecked(x, y)
                && set_neighbor_count(mask, x, y) == 1
                && !candidates.contains(&(x, y))
            {
                candidates.push((x, y));
            }
        }
    }

    // Fisher-Yates, high index down, one draw per swap.
    for i in (1..candidates.len()).rev() {
        let j = rng.next_index(i + 1);
        candidates.swap(i, j);
    }

    let mut outcome = RoomsOutcome::default();
    for candidate in candidates.into_iter().take(config.room_count as usize) {
        let room_w = rng.next_range_u32(config.min_room_size, config.max_room_size)? as i32;
        let room_h = rng.next_range_u32(config.min_room_size, config.max_room_size)? as i32;
        let room = Rect::new(
            candidate.0 - room_w / 2,
            candidate.1 - room_h / 2,
            candidate.0 - room_w / 2 + room_w,
            candidate.1 - room_h / 2 + room_h,
        );
        let clipped = room.clamp_to(domain);
        if clipped.is_degenerate() {
            continue;
        }
        fill_rect(mask, clipped, true, false)?;
        outcome.centers.push(clipped.center());
        outcome.rooms_placed += 1;
    }

    if outcome.rooms_placed < config.room_count {
        warn!(
            requested = config.room_count,
            placed = outcome.rooms_placed,
            "not every room found a corridor candidate"
        );
    }
    debug!(
        corridors = config.corridor_count,
        rooms = outcome.rooms_placed,
        carved = mask.count_ones(),
        "corridor-first dungeon finished"
    );

    Ok(outcome)
}

fn set_neighbor_count(mask: &MaskGrid, x: i32, y: i32) -> u32 {
    let domain = mask.domain();
    let mut count = 0;
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let (nx, ny) = (x + dx, y + dy);
        if domain.in_bounds(nx, ny) && mask.get_unchecked(nx, ny) {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Domain;

    fn grid(w: u32, h: u32) -> MaskGrid {
        MaskGrid::new(Domain::new(w, h).unwrap())
    }

    #[test]
    fn carves_corridors_and_places_rooms() {
        let config = CorridorFirstConfig::new(6, 20, 4);
        let mut mask = grid(64, 64);
        let outcome = corridor_first(&mut mask, &mut GenRng::new(1), &config).unwrap();
        assert!(outcome.rooms_placed > 0);
        assert!(outcome.rooms_placed <= 4);
        assert!(mask.count_ones() > 0);
    }

    #[test]
    fn is_deterministic() {
        let config = CorridorFirstConfig::new(5, 30, 6)
            .with_corridor_length_range(10, 40)
            .with_room_size_range(3, 7);
        let mut a = grid(64, 64);
        let mut b = grid(64, 64);
        let outcome_a = corridor_first(&mut a, &mut GenRng::new(33), &config).unwrap();
        let outcome_b = corridor_first(&mut b, &mut GenRng::new(33), &config).unwrap();
        assert_eq!(outcome_a.centers, outcome_b.centers);
        assert_eq!(a.snapshot_hash64(true), b.snapshot_hash64(true));
    }

    #[test]
    fn dead_end_detection_counts_neighbors() {
        let mut mask = grid(8, 8);
        mask.set(2, 2, true).unwrap();
        mask.set(3, 2, true).unwrap();
        mask.set(4, 2, true).unwrap();
        // Line ends are dead-ends, the middle is not.
        assert_eq!(set_neighbor_count(&mask, 2, 2), 1);
        assert_eq!(set_neighbor_count(&mask, 3, 2), 2);
        assert_eq!(set_neighbor_count(&mask, 4, 2), 1);
    }

    #[test]
    fn malformed_config_is_rejected() {
        let mut mask = grid(16, 16);
        let mut rng = GenRng::new(1);
        assert!(corridor_first(&mut mask, &mut rng, &CorridorFirstConfig::new(0, 5, 1)).is_err());
        assert!(corridor_first(
            &mut mask,
            &mut rng,
            &CorridorFirstConfig::new(2, 5, 1).with_corridor_length_range(9, 3)
        )
        .is_err());
        assert!(corridor_first(
            &mut mask,
            &mut rng,
            &CorridorFirstConfig::new(2, 5, 1).with_room_size_range(0, 3)
        )
        .is_err());
    }
}
