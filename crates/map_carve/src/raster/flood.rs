//! Border-connected flood-fill classifier.
//!
//! Classifies every cell reachable from the grid border through 4-connected
//! non-solid cells. The canonical use is separating border-connected water
//! ("ocean") from enclosed pools ("lakes"): anything the fill does not reach
//! and is not solid is enclosed.
//!
//! Determinism: the border seed order is fixed (top row left to right, then
//! bottom row, then left column excluding corners, then right column
//! excluding corners), the queue is strict FIFO, and neighbor expansion
//! order is `+X, -X, +Y, -Y`.
use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::grid::MaskGrid;

const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Marks in `dst` every cell reachable from the border through non-solid
/// cells. `dst` is fully overwritten; both grids must share dimensions.
/// Out-of-domain neighbors are skipped, never read.
pub fn flood_fill_border_connected_not_solid(solid: &MaskGrid, dst: &mut MaskGrid) -> Result<()> {
    if solid.domain() != dst.domain() {
        return Err(Error::domain_mismatch(solid.domain(), dst.domain()));
    }
    dst.clear();

    let domain = solid.domain();
    let w = domain.width() as i32;
    let h = domain.height() as i32;
    let mut queue: VecDeque<(i32, i32)> = VecDeque::new();

    let mut try_seed = |x: i32, y: i32, dst: &mut MaskGrid, queue: &mut VecDeque<(i32, i32)>| {
        if !solid.get_unchecked(x, y) && !dst.get_unchecked(x, y) {
            dst.set_unchecked(x, y, true);
            queue.push_back((x, y));
        }
    };

    for x in 0..w {
        try_seed(x, 0, dst, &mut queue);
    }
    if h > 1 {
        for x in 0..w {
            try_seed(x, h - 1, dst, &mut queue);
        }
    }
    for y in 1..h - 1 {
        try_seed(0, y, dst, &mut queue);
    }
    if w > 1 {
        for y in 1..h - 1 {
            try_seed(w - 1, y, dst, &mut queue);
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let (nx, ny) = (x + dx, y + dy);
            if !domain.in_bounds(nx, ny) {
                continue;
            }
            if solid.get_unchecked(nx, ny) || dst.get_unchecked(nx, ny) {
                continue;
            }
            dst.set_unchecked(nx, ny, true);
            queue.push_back((nx, ny));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Domain, Rect};
    use crate::raster::stamp::fill_rect;

    fn grid(w: u32, h: u32) -> MaskGrid {
        MaskGrid::new(Domain::new(w, h).unwrap())
    }

    #[test]
    fn mismatched_domains_are_rejected() {
        let solid = grid(8, 8);
        let mut dst = grid(8, 9);
        assert!(matches!(
            flood_fill_border_connected_not_solid(&solid, &mut dst),
            Err(Error::DomainMismatch { .. })
        ));
    }

    #[test]
    fn empty_solid_floods_everything() {
        let solid = grid(8, 8);
        let mut dst = grid(8, 8);
        flood_fill_border_connected_not_solid(&solid, &mut dst).unwrap();
        assert_eq!(dst.count_ones(), 64);
    }

    #[test]
    fn full_solid_floods_nothing() {
        let mut solid = grid(8, 8);
        solid.fill(true);
        let mut dst = grid(8, 8);
        dst.fill(true); // stale content must be overwritten
        flood_fill_border_connected_not_solid(&solid, &mut dst).unwrap();
        assert_eq!(dst.count_ones(), 0);
    }

    // The donut scenario: a 10x10 solid block with a carved 4x4 hole. The
    // hole is enclosed water, everything outside the block is deep water.
    #[test]
    fn donut_separates_ocean_from_lake() {
        let mut solid = grid(16, 16);
        fill_rect(&mut solid, Rect::new(3, 3, 13, 13), true, false).unwrap();
        fill_rect(&mut solid, Rect::new(6, 6, 10, 10), false, false).unwrap();

        let mut deep_water = grid(16, 16);
        flood_fill_border_connected_not_solid(&solid, &mut deep_water).unwrap();

        assert!(deep_water.get(0, 0).unwrap());
        assert!(!deep_water.get(4, 4).unwrap()); // land
        assert!(!deep_water.get(7, 7).unwrap()); // enclosed lake
        assert_eq!(deep_water.count_ones(), 156);
    }

    #[test]
    fn fill_is_deterministic() {
        let mut solid = grid(32, 32);
        fill_rect(&mut solid, Rect::new(4, 4, 20, 20), true, false).unwrap();
        fill_rect(&mut solid, Rect::new(8, 8, 12, 12), false, false).unwrap();

        let mut a = grid(32, 32);
        let mut b = grid(32, 32);
        flood_fill_border_connected_not_solid(&solid, &mut a).unwrap();
        flood_fill_border_connected_not_solid(&solid, &mut b).unwrap();
        assert_eq!(a.snapshot_hash64(true), b.snapshot_hash64(true));
    }

    #[test]
    fn single_row_domain_is_handled() {
        let mut solid = grid(8, 1);
        solid.set(4, 0, true).unwrap();
        let mut dst = grid(8, 1);
        flood_fill_border_connected_not_solid(&solid, &mut dst).unwrap();
        assert_eq!(dst.count_ones(), 7);
    }
}
