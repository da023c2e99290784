//! Dense scalar field over a [`Domain`].
//!
//! [`ScalarField`] stores one `f32` per cell in row-major order and follows
//! the same ownership discipline as [`crate::grid::MaskGrid`]: zero-initialized on
//! creation, not `Clone`, duplicated only through [`ScalarField::copy_from`].
use crate::error::{Error, Result};
use crate::grid::{fnv1a_init, fnv1a_u64, Domain};

/// Dense float grid (heights, distances).
#[derive(Debug)]
pub struct ScalarField {
    domain: Domain,
    data: Vec<f32>,
}

impl ScalarField {
    /// Creates a zero-filled field.
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            data: vec![0.0; domain.len()],
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Bounds-checked read.
    pub fn get(&self, x: i32, y: i32) -> Result<f32> {
        if !self.domain.in_bounds(x, y) {
            return Err(Error::out_of_range(x, y, self.domain));
        }
        Ok(self.get_unchecked(x, y))
    }

    /// Bounds-checked write.
    pub fn set(&mut self, x: i32, y: i32, value: f32) -> Result<()> {
        if !self.domain.in_bounds(x, y) {
            return Err(Error::out_of_range(x, y, self.domain));
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Read without a coordinate bounds branch. Callers must prove bounds.
    pub fn get_unchecked(&self, x: i32, y: i32) -> f32 {
        self.data[self.domain.index(x, y)]
    }

    /// Write without a coordinate bounds branch. Callers must prove bounds.
    pub fn set_unchecked(&mut self, x: i32, y: i32, value: f32) {
        let index = self.domain.index(x, y);
        self.data[index] = value;
    }

    /// Sets every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Whole-field copy; dimensions must match.
    pub fn copy_from(&mut self, other: &ScalarField) -> Result<()> {
        if self.domain != other.domain {
            return Err(Error::domain_mismatch(self.domain, other.domain));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Stable 64-bit FNV-1a fingerprint over (optionally) the dimensions and
    /// then every cell's bit pattern in index order.
    pub fn snapshot_hash64(&self, include_dimensions: bool) -> u64 {
        let mut hash = fnv1a_init();
        if include_dimensions {
            hash = fnv1a_u64(hash, self.domain.width() as u64);
            hash = fnv1a_u64(hash, self.domain.height() as u64);
            hash = fnv1a_u64(hash, self.domain.len() as u64);
        }
        for value in &self.data {
            hash = fnv1a_u64(hash, value.to_bits() as u64);
        }
        hash
    }
}
