//! Grid containers: the rectangular index space, bit-packed occupancy masks,
//! and dense scalar fields.
//!
//! Everything in this module is row-major: `index(x, y) = x + y * width`.
use std::fmt;

use crate::error::{Error, Result};

pub mod field;
pub mod mask;

pub use field::ScalarField;
pub use mask::MaskGrid;

/// Immutable rectangular integer index space shared by all grids of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    width: u32,
    height: u32,
}

impl Domain {
    /// Creates a domain; both dimensions must be at least 1.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "domain dimensions must be >= 1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Row-major cell index. Callers must prove bounds.
    pub fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y));
        x as usize + y as usize * self.width as usize
    }

    /// Inverse of [`Domain::index`].
    pub fn coords(&self, index: usize) -> (i32, i32) {
        debug_assert!(index < self.len());
        let w = self.width as usize;
        ((index % w) as i32, (index / w) as i32)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Integer rectangle with exclusive max corner, used for BSP leaves and
/// rect fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Rect {
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// The full rectangle of a domain.
    pub fn of_domain(domain: Domain) -> Self {
        Self::new(0, 0, domain.width() as i32, domain.height() as i32)
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Integer center cell.
    pub fn center(&self) -> (i32, i32) {
        (
            self.x_min + self.width() / 2,
            self.y_min + self.height() / 2,
        )
    }

    /// Shrinks every edge inward by `pad`. May produce a degenerate rect.
    pub fn shrink(&self, pad: i32) -> Self {
        Self::new(
            self.x_min + pad,
            self.y_min + pad,
            self.x_max - pad,
            self.y_max - pad,
        )
    }

    /// Clamps all edges into the domain.
    pub fn clamp_to(&self, domain: Domain) -> Self {
        Self::new(
            self.x_min.clamp(0, domain.width() as i32),
            self.y_min.clamp(0, domain.height() as i32),
            self.x_max.clamp(0, domain.width() as i32),
            self.y_max.clamp(0, domain.height() as i32),
        )
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64 starting value.
pub(crate) fn fnv1a_init() -> u64 {
    FNV_OFFSET
}

/// Feeds one 64-bit value (little-endian bytes) into an FNV-1a 64 hash.
pub(crate) fn fnv1a_u64(mut hash: u64, value: u64) -> u64 {
    for byte in value.to_le_bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
