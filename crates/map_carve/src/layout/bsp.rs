//! Binary space partitioning and the room-first dungeon built on it.
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{MaskGrid, Rect};
use crate::layout::rooms::RoomsOutcome;
use crate::raster::stamp::{draw_line, fill_rect, Brush};
use crate::rng::GenRng;

/// Configuration for [`bsp_partition`].
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct BspConfig {
    /// No emitted leaf has a width or height below this.
    pub min_leaf_size: u32,
    /// Maximum split recursion depth.
    pub max_depth: u32,
}

impl BspConfig {
    pub fn new(min_leaf_size: u32, max_depth: u32) -> Self {
        Self {
            min_leaf_size,
            max_depth,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_leaf_size == 0 {
            return Err(Error::InvalidArgument("min_leaf_size must be >= 1".into()));
        }
        Ok(())
    }
}

/// How consecutive room centers are connected.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorStyle {
    /// Single Bresenham line between centers.
    Direct,
    /// Horizontal-then-vertical "L" of two axis-aligned segments.
    ManhattanL,
}

/// Recursively splits `rect` into leaves no smaller than `min_leaf_size` per
/// axis, emitting them into `out` in left-then-right recursion order.
///
/// `out` is a caller-provided fixed-capacity list: emission stops when
/// `out.len()` reaches `out.capacity()`, and the partitioner never grows it.
/// The split axis is drawn 50/50 when both axes can split (no draw when only
/// one can), and the split offset is drawn uniformly from the valid band.
pub fn bsp_partition(
    rect: Rect,
    rng: &mut GenRng,
    config: &BspConfig,
    out: &mut Vec<Rect>,
) -> Result<()> {
    config.validate()?;
    if rect.is_degenerate() {
        return Err(Error::InvalidArgument(format!(
            "degenerate partition rect: [{}, {}) x [{}, {})",
            rect.x_min, rect.x_max, rect.y_min, rect.y_max
        )));
    }
    split_recursive(rect, 0, rng, config, out)?;
    Ok(())
}

fn split_recursive(
    rect: Rect,
    depth: u32,
    rng: &mut GenRng,
    config: &BspConfig,
    out: &mut Vec<Rect>,
) -> Result<()> {
    let min_leaf = config.min_leaf_size as i32;
    let can_split_x = rect.width() >= 2 * min_leaf;
    let can_split_y = rect.height() >= 2 * min_leaf;

    if depth >= config.max_depth || (!can_split_x && !can_split_y) {
        if out.len() < out.capacity() {
            out.push(rect);
        }
        return Ok(());
    }

    let split_vertical = if can_split_x && can_split_y {
        rng.next_f32() < 0.5
    } else {
        can_split_x
    };

    let (left, right) = if split_vertical {
        let split = rng.next_range_i32(rect.x_min + min_leaf, rect.x_max - min_leaf)?;
        (
            Rect::new(rect.x_min, rect.y_min, split, rect.y_max),
            Rect::new(split, rect.y_min, rect.x_max, rect.y_max),
        )
    } else {
        let split = rng.next_range_i32(rect.y_min + min_leaf, rect.y_max - min_leaf)?;
        (
            Rect::new(rect.x_min, rect.y_min, rect.x_max, split),
            Rect::new(rect.x_min, split, rect.x_max, rect.y_max),
        )
    };

    split_recursive(left, depth + 1, rng, config, out)?;
    split_recursive(right, depth + 1, rng, config, out)?;
    Ok(())
}

/// Configuration for [`bsp_rooms`].
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct BspRoomsConfig {
    pub bsp: BspConfig,
    /// Each leaf is shrunk by this before stamping.
    pub room_padding: u32,
    /// Capacity of the leaf list, and so the maximum room count.
    pub max_rooms: u32,
    pub corridor_style: CorridorStyle,
    pub corridor_brush: Brush,
}

impl BspRoomsConfig {
    pub fn new(min_leaf_size: u32, max_depth: u32, max_rooms: u32) -> Self {
        Self {
            bsp: BspConfig::new(min_leaf_size, max_depth),
            room_padding: 1,
            max_rooms,
            corridor_style: CorridorStyle::ManhattanL,
            corridor_brush: Brush::Disc(0),
        }
    }

    pub fn with_room_padding(mut self, padding: u32) -> Self {
        self.room_padding = padding;
        self
    }

    pub fn with_corridor_style(mut self, style: CorridorStyle) -> Self {
        self.corridor_style = style;
        self
    }

    pub fn with_corridor_brush(mut self, brush: Brush) -> Self {
        self.corridor_brush = brush;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rooms == 0 {
            return Err(Error::InvalidArgument("max_rooms must be >= 1".into()));
        }
        self.bsp.validate()?;
        self.corridor_brush.validate()
    }
}

/// Partitions the whole domain, stamps one padded room per leaf, and
/// connects room centers in leaf-emission order.
///
/// Leaves that shrink or clamp to nothing are skipped without error.
pub fn bsp_rooms(
    mask: &mut MaskGrid,
    rng: &mut GenRng,
    config: &BspRoomsConfig,
) -> Result<RoomsOutcome> {
    config.validate()?;
    let domain = mask.domain();

    let mut leaves: Vec<Rect> = Vec::with_capacity(config.max_rooms as usize);
    bsp_partition(Rect::of_domain(domain), rng, &config.bsp, &mut leaves)?;

    let mut outcome = RoomsOutcome::default();
    for leaf in &leaves {
        let room = leaf.shrink(config.room_padding as i32).clamp_to(domain);
        if room.is_degenerate() {
            continue;
        }
        fill_rect(mask, room, true, false)?;
        outcome.centers.push(room.center());
        outcome.rooms_placed += 1;
    }

    for pair in outcome.centers.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        match config.corridor_style {
            CorridorStyle::Direct => {
                draw_line(mask, a, b, config.corridor_brush, true)?;
            }
            CorridorStyle::ManhattanL => {
                let elbow = (b.0, a.1);
                draw_line(mask, a, elbow, config.corridor_brush, true)?;
                draw_line(mask, elbow, b, config.corridor_brush, true)?;
            }
        }
    }

    debug!(
        leaves = leaves.len(),
        rooms = outcome.rooms_placed,
        carved = mask.count_ones(),
        "bsp dungeon finished"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Domain;

    fn grid(w: u32, h: u32) -> MaskGrid {
        MaskGrid::new(Domain::new(w, h).unwrap())
    }

    #[test]
    fn no_leaf_falls_below_min_size() {
        let config = BspConfig::new(6, 8);
        let mut leaves = Vec::with_capacity(64);
        bsp_partition(
            Rect::new(0, 0, 64, 64),
            &mut GenRng::new(1),
            &config,
            &mut leaves,
        )
        .unwrap();
        assert!(!leaves.is_empty());
        for leaf in &leaves {
            assert!(leaf.width() >= 6, "leaf too narrow: {leaf:?}");
            assert!(leaf.height() >= 6, "leaf too short: {leaf:?}");
        }
    }

    #[test]
    fn leaves_tile_the_input_rect() {
        let config = BspConfig::new(4, 6);
        let mut leaves = Vec::with_capacity(128);
        bsp_partition(
            Rect::new(0, 0, 32, 32),
            &mut GenRng::new(9),
            &config,
            &mut leaves,
        )
        .unwrap();
        let area: i32 = leaves.iter().map(|l| l.width() * l.height()).sum();
        assert_eq!(area, 32 * 32);
    }

    #[test]
    fn emission_respects_capacity() {
        let config = BspConfig::new(2, 10);
        let mut leaves = Vec::with_capacity(4);
        bsp_partition(
            Rect::new(0, 0, 64, 64),
            &mut GenRng::new(2),
            &config,
            &mut leaves,
        )
        .unwrap();
        assert!(leaves.len() <= 4);
        assert_eq!(leaves.capacity(), 4);
    }

    #[test]
    fn unsplittable_rect_is_its_own_leaf() {
        let config = BspConfig::new(8, 4);
        let mut leaves = Vec::with_capacity(8);
        let rect = Rect::new(0, 0, 10, 10);
        bsp_partition(rect, &mut GenRng::new(1), &config, &mut leaves).unwrap();
        assert_eq!(leaves, vec![rect]);
    }

    #[test]
    fn partition_is_deterministic() {
        let config = BspConfig::new(5, 7);
        let mut a = Vec::with_capacity(64);
        let mut b = Vec::with_capacity(64);
        bsp_partition(Rect::new(0, 0, 48, 40), &mut GenRng::new(17), &config, &mut a).unwrap();
        bsp_partition(Rect::new(0, 0, 48, 40), &mut GenRng::new(17), &config, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bsp_rooms_carves_and_reproduces() {
        let config = BspRoomsConfig::new(8, 5, 32);
        let mut a = grid(64, 64);
        let mut b = grid(64, 64);
        let outcome_a = bsp_rooms(&mut a, &mut GenRng::new(3), &config).unwrap();
        let outcome_b = bsp_rooms(&mut b, &mut GenRng::new(3), &config).unwrap();
        assert!(outcome_a.rooms_placed > 0);
        assert_eq!(outcome_a.centers, outcome_b.centers);
        assert_eq!(a.snapshot_hash64(true), b.snapshot_hash64(true));
    }

    #[test]
    fn corridor_styles_differ() {
        let direct = BspRoomsConfig::new(8, 5, 32).with_corridor_style(CorridorStyle::Direct);
        let manhattan = BspRoomsConfig::new(8, 5, 32);
        let mut a = grid(64, 64);
        let mut b = grid(64, 64);
        bsp_rooms(&mut a, &mut GenRng::new(3), &direct).unwrap();
        bsp_rooms(&mut b, &mut GenRng::new(3), &manhattan).unwrap();
        // Same rooms, same draw stream; only the corridor shape changes.
        assert_ne!(a.snapshot_hash64(true), b.snapshot_hash64(true));
    }

    #[test]
    fn degenerate_rect_is_rejected() {
        let config = BspConfig::new(2, 3);
        let mut leaves = Vec::with_capacity(4);
        assert!(bsp_partition(
            Rect::new(0, 0, 0, 8),
            &mut GenRng::new(1),
            &config,
            &mut leaves
        )
        .is_err());
    }
}
