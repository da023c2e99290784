//! SDF rasterization and field thresholding.
//!
//! Rasterization samples every cell center `(x + 0.5, y + 0.5)` in grid
//! units. The loops allocate nothing; fields must be pre-allocated to the
//! domain being rasterized.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::grid::{MaskGrid, ScalarField};
use crate::sdf::{compose, CsgOp, SdfPrimitive};

/// Comparison applied when converting a field into a mask.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdMode {
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl ThresholdMode {
    fn accepts(&self, value: f32, threshold: f32) -> bool {
        match self {
            ThresholdMode::Greater => value > threshold,
            ThresholdMode::GreaterEqual => value >= threshold,
            ThresholdMode::Less => value < threshold,
            ThresholdMode::LessEqual => value <= threshold,
        }
    }
}

/// Writes the signed distance of `primitive` at every cell center.
pub fn rasterize_into(field: &mut ScalarField, primitive: &SdfPrimitive) {
    let domain = field.domain();
    for y in 0..domain.height() as i32 {
        for x in 0..domain.width() as i32 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            field.set_unchecked(x, y, primitive.distance(p));
        }
    }
}

/// Evaluates both primitives per cell, composes them with `op`, and writes
/// the result. `invert` negates the final value, swapping inside and outside
/// at threshold time.
pub fn compose_rasterize_into(
    field: &mut ScalarField,
    a: &SdfPrimitive,
    b: &SdfPrimitive,
    op: CsgOp,
    invert: bool,
) {
    let domain = field.domain();
    let sign = if invert { -1.0 } else { 1.0 };
    for y in 0..domain.height() as i32 {
        for x in 0..domain.width() as i32 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let d = compose(a.distance(p), b.distance(p), op);
            field.set_unchecked(x, y, sign * d);
        }
    }
}

/// Converts a field into a mask: a cell is set when its value passes the
/// comparison against `value`. Dimensions must match.
pub fn threshold(
    field: &ScalarField,
    mask: &mut MaskGrid,
    value: f32,
    mode: ThresholdMode,
) -> Result<()> {
    if field.domain() != mask.domain() {
        return Err(Error::domain_mismatch(field.domain(), mask.domain()));
    }
    let domain = field.domain();
    for y in 0..domain.height() as i32 {
        for x in 0..domain.width() as i32 {
            mask.set_unchecked(x, y, mode.accepts(field.get_unchecked(x, y), value));
        }
    }
    Ok(())
}
