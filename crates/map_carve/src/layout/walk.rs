//! Random-walk carving: the single walk primitive and its iterated form.
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::MaskGrid;
use crate::layout::pick_skewed_cardinal;
use crate::raster::stamp::{stamp_brush, Brush};
use crate::rng::GenRng;

/// Configuration for a single random walk.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct WalkConfig {
    /// Starting cell; must be in-bounds.
    pub start: (i32, i32),
    /// Number of steps to attempt.
    pub walk_length: u32,
    /// Direction attempts per step before the walk gives up early.
    pub max_retries: u32,
    /// Directional bias along X, in `[-1, 1]`.
    pub skew_x: f32,
    /// Directional bias along Y, in `[-1, 1]`.
    pub skew_y: f32,
    /// Brush stamped at the start and at every accepted step.
    pub brush: Brush,
}

impl WalkConfig {
    pub fn new(start: (i32, i32), walk_length: u32) -> Self {
        Self {
            start,
            walk_length,
            max_retries: 4,
            skew_x: 0.0,
            skew_y: 0.0,
            brush: Brush::Disc(0),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_skew(mut self, skew_x: f32, skew_y: f32) -> Self {
        self.skew_x = skew_x;
        self.skew_y = skew_y;
        self
    }

    pub fn with_brush(mut self, brush: Brush) -> Self {
        self.brush = brush;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(Error::InvalidArgument("max_retries must be >= 1".into()));
        }
        self.brush.validate()
    }
}

/// Carves a single skewed random walk into `mask` and returns the final
/// position.
///
/// The start cell is stamped first. Each of the `walk_length` steps tries up
/// to `max_retries` skewed-cardinal moves until one lands in-bounds; if none
/// does, the walk ends early. Every accepted move is stamped with the
/// configured brush.
pub fn walk(mask: &mut MaskGrid, rng: &mut GenRng, config: &WalkConfig) -> Result<(i32, i32)> {
    config.validate()?;
    let domain = mask.domain();
    let (mut x, mut y) = config.start;
    if !domain.in_bounds(x, y) {
        return Err(Error::out_of_range(x, y, domain));
    }

    stamp_brush(mask, x, y, config.brush, true)?;

    'steps: for _ in 0..config.walk_length {
        for _ in 0..config.max_retries {
            let (dx, dy) = pick_skewed_cardinal(rng, config.skew_x, config.skew_y).delta();
            let (nx, ny) = (x + dx, y + dy);
            if domain.in_bounds(nx, ny) {
                x = nx;
                y = ny;
                stamp_brush(mask, x, y, config.brush, true)?;
                continue 'steps;
            }
        }
        break;
    }

    Ok((x, y))
}

/// Configuration for the iterated walk.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct CarveConfig {
    /// Walk parameters shared by every iteration; `walk_length` is ignored
    /// in favor of the sampled per-iteration length.
    pub walk: WalkConfig,
    /// Number of walks accumulated into the mask.
    pub iterations: u32,
    /// Minimum per-iteration walk length, inclusive.
    pub min_length: u32,
    /// Maximum per-iteration walk length, inclusive.
    pub max_length: u32,
    /// For iterations after the first, probability of restarting from a
    /// uniformly sampled currently-set cell instead of the previous end.
    pub random_start_chance: f32,
}

impl CarveConfig {
    pub fn new(start: (i32, i32), iterations: u32, min_length: u32, max_length: u32) -> Self {
        Self {
            walk: WalkConfig::new(start, min_length),
            iterations,
            min_length,
            max_length,
            random_start_chance: 0.0,
        }
    }

    pub fn with_walk(mut self, walk: WalkConfig) -> Self {
        self.walk = walk;
        self
    }

    pub fn with_random_start_chance(mut self, chance: f32) -> Self {
        self.random_start_chance = chance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidArgument("iterations must be >= 1".into()));
        }
        if self.min_length > self.max_length {
            return Err(Error::InvalidArgument(format!(
                "malformed length range: [{}, {}]",
                self.min_length, self.max_length
            )));
        }
        if !(0.0..=1.0).contains(&self.random_start_chance) {
            return Err(Error::InvalidArgument(format!(
                "random_start_chance out of [0, 1]: {}",
                self.random_start_chance
            )));
        }
        self.walk.validate()
    }
}

/// Runs `iterations` walks accumulating into the same mask and returns the
/// final position of the last walk.
///
/// The per-iteration length is sampled from `[min_length, max_length]`
/// inclusive; when the range is a single value no RNG is consumed for it, so
/// a one-iteration carve is draw-for-draw identical to [`walk`]. Iterations
/// after the first always draw one float for the restart decision, whatever
/// the outcome.
pub fn carve(mask: &mut MaskGrid, rng: &mut GenRng, config: &CarveConfig) -> Result<(i32, i32)> {
    config.validate()?;

    let mut current = config.walk.start;
    for iteration in 0..config.iterations {
        if iteration > 0 && rng.next_f32() < config.random_start_chance {
            if let Some(restart) = mask.try_get_random_set_bit(rng) {
                current = restart;
            }
        }

        let length = rng.next_range_u32(config.min_length, config.max_length)?;
        let mut iteration_walk = config.walk;
        iteration_walk.start = current;
        iteration_walk.walk_length = length;
        current = walk(mask, rng, &iteration_walk)?;
    }

    debug!(
        iterations = config.iterations,
        carved = mask.count_ones(),
        "iterated walk finished"
    );
    Ok(current)
}
