//! Signed distance primitives and their boolean composition.
//!
//! All distances use the negative-inside convention: `0` on the boundary,
//! negative inside the shape, positive outside. Evaluation is pure and
//! allocation-free; positions are in grid units where cell `(x, y)` has its
//! center at `(x + 0.5, y + 0.5)`.
use glam::Vec2;

/// A pure signed-distance shape.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SdfPrimitive {
    /// Circle of `radius` around `center`.
    Circle { center: Vec2, radius: f32 },
    /// Axis-aligned box of `half_extent` around `center`.
    Box { center: Vec2, half_extent: Vec2 },
    /// Capsule: segment `a`..`b` inflated by `radius`.
    Capsule { a: Vec2, b: Vec2, radius: f32 },
}

impl SdfPrimitive {
    /// Signed distance from `p` to the shape boundary.
    pub fn distance(&self, p: Vec2) -> f32 {
        match *self {
            SdfPrimitive::Circle { center, radius } => p.distance(center) - radius,
            SdfPrimitive::Box {
                center,
                half_extent,
            } => {
                let q = (p - center).abs() - half_extent;
                q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0)
            }
            SdfPrimitive::Capsule { a, b, radius } => {
                let pa = p - a;
                let ba = b - a;
                let h = (pa.dot(ba) / ba.dot(ba)).clamp(0.0, 1.0);
                (pa - ba * h).length() - radius
            }
        }
    }
}

/// Boolean composition of two signed distances.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsgOp {
    Union,
    Intersect,
    Subtract,
}

/// Composes two signed distances: union is `min`, intersection is `max`,
/// subtraction is `max(da, -db)`.
pub fn compose(da: f32, db: f32, op: CsgOp) -> f32 {
    match op {
        CsgOp::Union => da.min(db),
        CsgOp::Intersect => da.max(db),
        CsgOp::Subtract => da.max(-db),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_distance_signs() {
        let circle = SdfPrimitive::Circle {
            center: Vec2::new(5.0, 5.0),
            radius: 2.0,
        };
        assert!(circle.distance(Vec2::new(5.0, 5.0)) < 0.0);
        assert_eq!(circle.distance(Vec2::new(7.0, 5.0)), 0.0);
        assert!(circle.distance(Vec2::new(9.0, 5.0)) > 0.0);
    }

    #[test]
    fn box_distance_signs() {
        let shape = SdfPrimitive::Box {
            center: Vec2::new(0.0, 0.0),
            half_extent: Vec2::new(2.0, 1.0),
        };
        assert!(shape.distance(Vec2::new(0.0, 0.0)) < 0.0);
        assert_eq!(shape.distance(Vec2::new(2.0, 0.0)), 0.0);
        assert_eq!(shape.distance(Vec2::new(0.0, 1.0)), 0.0);
        assert!(shape.distance(Vec2::new(3.0, 0.0)) > 0.0);
        // Corner distance is Euclidean.
        let corner = shape.distance(Vec2::new(3.0, 2.0));
        assert!((corner - 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn capsule_distance_signs() {
        let capsule = SdfPrimitive::Capsule {
            a: Vec2::new(0.0, 0.0),
            b: Vec2::new(4.0, 0.0),
            radius: 1.0,
        };
        assert!(capsule.distance(Vec2::new(2.0, 0.0)) < 0.0);
        assert_eq!(capsule.distance(Vec2::new(2.0, 1.0)), 0.0);
        assert!(capsule.distance(Vec2::new(2.0, 2.0)) > 0.0);
        // Endpoint caps are rounded.
        assert_eq!(capsule.distance(Vec2::new(-1.0, 0.0)), 0.0);
    }

    #[test]
    fn compose_modes() {
        assert_eq!(compose(-1.0, 2.0, CsgOp::Union), -1.0);
        assert_eq!(compose(-1.0, 2.0, CsgOp::Intersect), 2.0);
        assert_eq!(compose(-1.0, -2.0, CsgOp::Subtract), 2.0);
        assert_eq!(compose(-3.0, 2.0, CsgOp::Subtract), -2.0);
    }
}
