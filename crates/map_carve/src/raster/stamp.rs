//! Direct mask rasterization: brushes, disc stamps, rect fills, and line
//! drawing.
//!
//! These are the clip-not-fail paths: out-of-bounds coordinates are silently
//! skipped so high-iteration procedural loops never abort at the grid edge.
//! Malformed arguments (negative radii, inverted rects without clamping)
//! still fail fast at the call boundary.
use crate::error::{Error, Result};
use crate::grid::{MaskGrid, Rect};

/// Brush shape stamped at every traversed point of a line (and usable on its
/// own). Radius `0` means a single cell. The brush is a parameter of
/// [`draw_line`], decoupled from the traversal, so alternative shapes slot in
/// without touching the Bresenham walk.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brush {
    /// All cells with `dx^2 + dy^2 <= r^2`.
    Disc(i32),
    /// All cells with `|dx| <= r` and `|dy| <= r`.
    Square(i32),
}

impl Brush {
    pub fn radius(&self) -> i32 {
        match *self {
            Brush::Disc(r) | Brush::Square(r) => r,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius() < 0 {
            return Err(Error::InvalidArgument(format!(
                "negative brush radius: {}",
                self.radius()
            )));
        }
        Ok(())
    }
}

/// Stamps a disc of `radius` around `(cx, cy)`, clipped to the grid. Radius
/// `0` writes the single (clipped) center cell. Out-of-bounds centers clip,
/// they never error; a negative radius errors.
pub fn stamp_disc(mask: &mut MaskGrid, cx: i32, cy: i32, radius: i32, value: bool) -> Result<()> {
    if radius < 0 {
        return Err(Error::InvalidArgument(format!(
            "negative disc radius: {radius}"
        )));
    }
    let domain = mask.domain();
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if domain.in_bounds(x, y) {
                mask.set_unchecked(x, y, value);
            }
        }
    }
    Ok(())
}

/// Stamps `brush` at `(x, y)`, clipped to the grid.
pub fn stamp_brush(mask: &mut MaskGrid, x: i32, y: i32, brush: Brush, value: bool) -> Result<()> {
    brush.validate()?;
    match brush {
        Brush::Disc(radius) => stamp_disc(mask, x, y, radius, value),
        Brush::Square(radius) => {
            let domain = mask.domain();
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let (sx, sy) = (x + dx, y + dy);
                    if domain.in_bounds(sx, sy) {
                        mask.set_unchecked(sx, sy, value);
                    }
                }
            }
            Ok(())
        }
    }
}

/// Fills a rectangle. With `clamp_to_domain` the rect is clipped and the
/// call never errors; without it, any out-of-bounds or degenerate rect is
/// rejected with `OutOfRange`.
pub fn fill_rect(mask: &mut MaskGrid, rect: Rect, value: bool, clamp_to_domain: bool) -> Result<()> {
    let domain = mask.domain();
    let rect = if clamp_to_domain {
        rect.clamp_to(domain)
    } else {
        if rect.is_degenerate() {
            return Err(Error::InvalidArgument(format!(
                "degenerate rect: [{}, {}) x [{}, {})",
                rect.x_min, rect.x_max, rect.y_min, rect.y_max
            )));
        }
        if !domain.in_bounds(rect.x_min, rect.y_min)
            || !domain.in_bounds(rect.x_max - 1, rect.y_max - 1)
        {
            return Err(Error::out_of_range(rect.x_min, rect.y_min, domain));
        }
        rect
    };
    for y in rect.y_min..rect.y_max {
        for x in rect.x_min..rect.x_max {
            mask.set_unchecked(x, y, value);
        }
    }
    Ok(())
}

/// Draws a brushed line from `a` to `b` with integer Bresenham traversal.
///
/// Endpoint-inclusive: both `a` and `b` are always stamped when in-bounds.
/// Reversal-invariant: endpoints are canonically ordered before traversal,
/// so drawing B to A stamps exactly the cells of A to B.
pub fn draw_line(
    mask: &mut MaskGrid,
    a: (i32, i32),
    b: (i32, i32),
    brush: Brush,
    value: bool,
) -> Result<()> {
    brush.validate()?;
    let ((x0, y0), (x1, y1)) = if (a.1, a.0) <= (b.1, b.0) { (a, b) } else { (b, a) };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        stamp_brush(mask, x, y, brush, value)?;
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Domain;

    fn grid(w: u32, h: u32) -> MaskGrid {
        MaskGrid::new(Domain::new(w, h).unwrap())
    }

    #[test]
    fn zero_radius_disc_writes_one_cell() {
        let mut mask = grid(8, 8);
        stamp_disc(&mut mask, 3, 3, 0, true).unwrap();
        assert_eq!(mask.count_ones(), 1);
        assert!(mask.get(3, 3).unwrap());
    }

    #[test]
    fn disc_clips_at_edges_without_error() {
        let mut mask = grid(8, 8);
        stamp_disc(&mut mask, 0, 0, 2, true).unwrap();
        let corner_count = mask.count_ones();
        assert!(corner_count > 0);

        // Fully out-of-bounds center still succeeds and writes nothing.
        let mut empty = grid(8, 8);
        stamp_disc(&mut empty, -10, -10, 2, true).unwrap();
        assert_eq!(empty.count_ones(), 0);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let mut mask = grid(8, 8);
        assert!(matches!(
            stamp_disc(&mut mask, 3, 3, -1, true),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            draw_line(&mut mask, (0, 0), (3, 3), Brush::Disc(-2), true),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn square_brush_covers_block() {
        let mut mask = grid(8, 8);
        stamp_brush(&mut mask, 4, 4, Brush::Square(1), true).unwrap();
        assert_eq!(mask.count_ones(), 9);
        // Disc of the same radius is a plus shape, strictly smaller.
        let mut disc = grid(8, 8);
        stamp_brush(&mut disc, 4, 4, Brush::Disc(1), true).unwrap();
        assert_eq!(disc.count_ones(), 5);
    }

    #[test]
    fn fill_rect_clamped_clips_silently() {
        let mut mask = grid(8, 8);
        fill_rect(&mut mask, Rect::new(-2, -2, 3, 3), true, true).unwrap();
        assert_eq!(mask.count_ones(), 9);
    }

    #[test]
    fn fill_rect_unclamped_rejects_out_of_bounds() {
        let mut mask = grid(8, 8);
        assert!(matches!(
            fill_rect(&mut mask, Rect::new(-1, 0, 3, 3), true, false),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            fill_rect(&mut mask, Rect::new(3, 3, 3, 5), true, false),
            Err(Error::InvalidArgument(_))
        ));
        fill_rect(&mut mask, Rect::new(1, 1, 4, 4), true, false).unwrap();
        assert_eq!(mask.count_ones(), 9);
    }

    #[test]
    fn line_endpoints_are_always_stamped() {
        let endpoints = [
            ((0, 0), (63, 63)),
            ((5, 60), (60, 5)),
            ((0, 31), (63, 31)),
            ((31, 0), (31, 63)),
            ((7, 7), (7, 7)),
            ((62, 1), (3, 58)),
        ];
        for (a, b) in endpoints {
            let mut mask = grid(64, 64);
            draw_line(&mut mask, a, b, Brush::Disc(0), true).unwrap();
            assert!(mask.get(a.0, a.1).unwrap(), "start {a:?} not stamped");
            assert!(mask.get(b.0, b.1).unwrap(), "end {b:?} not stamped");
        }
    }

    #[test]
    fn line_is_reversal_invariant() {
        let cases = [
            ((1, 2), (60, 40), Brush::Disc(0)),
            ((60, 40), (1, 2), Brush::Disc(0)),
            ((10, 50), (50, 10), Brush::Disc(2)),
            ((0, 0), (63, 1), Brush::Square(1)),
        ];
        for (a, b, brush) in cases {
            let mut forward = grid(64, 64);
            let mut backward = grid(64, 64);
            draw_line(&mut forward, a, b, brush, true).unwrap();
            draw_line(&mut backward, b, a, brush, true).unwrap();
            assert_eq!(
                forward.snapshot_hash64(true),
                backward.snapshot_hash64(true),
                "line {a:?}..{b:?} not reversal-invariant"
            );
        }
    }

    #[test]
    fn line_clips_outside_the_grid() {
        let mut mask = grid(8, 8);
        draw_line(&mut mask, (-5, 3), (12, 3), Brush::Disc(0), true).unwrap();
        assert_eq!(mask.count_ones(), 8);
    }
}
