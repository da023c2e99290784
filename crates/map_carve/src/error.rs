//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Checked accessors and operators fail fast; the clip-not-fail rasterization
//! paths (disc stamps, line brushes, clamped rect fills, flood-fill neighbor
//! expansion) never produce these errors by design.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("coordinates ({x}, {y}) out of range for {width}x{height} domain")]
    OutOfRange { x: i32, y: i32, width: u32, height: u32 },

    #[error("domain mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DomainMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("'{0}' accessed before creation")]
    NotCreated(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn out_of_range(x: i32, y: i32, domain: crate::grid::Domain) -> Self {
        Error::OutOfRange {
            x,
            y,
            width: domain.width(),
            height: domain.height(),
        }
    }

    pub(crate) fn domain_mismatch(left: crate::grid::Domain, right: crate::grid::Domain) -> Self {
        Error::DomainMismatch {
            left_width: left.width(),
            left_height: left.height(),
            right_width: right.width(),
            right_height: right.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reports_coordinates_and_dimensions() {
        let domain = crate::grid::Domain::new(4, 3).unwrap();
        let err = Error::out_of_range(7, -1, domain);
        assert_eq!(
            err.to_string(),
            "coordinates (7, -1) out of range for 4x3 domain"
        );
    }

    #[test]
    fn domain_mismatch_reports_both_sides() {
        let a = crate::grid::Domain::new(4, 3).unwrap();
        let b = crate::grid::Domain::new(5, 5).unwrap();
        let err = Error::domain_mismatch(a, b);
        assert_eq!(err.to_string(), "domain mismatch: 4x3 vs 5x5");
    }
}
