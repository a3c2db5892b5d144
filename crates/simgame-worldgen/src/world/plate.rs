//! Tectonic plates and the classification of plate-pair boundaries.

use std::collections::BTreeMap;

use glam::Vec2;

/// Index into the world's plate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlateId(pub u32);

impl PlateId {
    /// The id as a vector index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How two plates meet. Ordered by strength: later variants dominate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BoundaryType {
    /// Same plate, or plates that never touch.
    #[default]
    None = 0,
    /// Plates sliding past each other.
    Transform = 1,
    /// Plates separating.
    Divergent = 2,
    /// Plates colliding.
    Convergent = 3,
}

impl BoundaryType {
    /// Stable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Transform => "TRANSFORM",
            Self::Divergent => "DIVERGENT",
            Self::Convergent => "CONVERGENT",
        }
    }

    /// Decode the on-disk discriminant.
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::None),
            1 => Some(Self::Transform),
            2 => Some(Self::Divergent),
            3 => Some(Self::Convergent),
            _ => None,
        }
    }

    /// Classify the boundary between plates A and B.
    ///
    /// Compares the direction of B's velocity relative to A against the
    /// direction from A's centroid to B's. `threshold_cos` is the cosine of
    /// the divergence threshold angle.
    pub fn classify(
        centroid_a: Vec2,
        velocity_a: Vec2,
        centroid_b: Vec2,
        velocity_b: Vec2,
        threshold_cos: f32,
    ) -> Self {
        let relative = velocity_b - velocity_a;
        if relative.length() < 1e-4 {
            return Self::Transform;
        }
        let d = (centroid_b - centroid_a).normalize_or_zero();
        let v = relative.normalize();
        let c = v.dot(d);
        if c > threshold_cos {
            Self::Convergent
        } else if c < -threshold_cos {
            Self::Divergent
        } else {
            Self::Transform
        }
    }
}

/// A group of regions sharing base height, velocity, and crust type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TectonicPlate {
    /// Plate centre in world units.
    pub centroid: Vec2,
    /// Drift vector; used only for boundary classification.
    pub velocity: Vec2,
    /// Continental crust (`true`) or oceanic crust.
    pub is_continental: bool,
    /// Mean plate elevation in metres.
    pub absolute_height: f32,
    /// Boundary type with every adjacent plate. Symmetric across the pair.
    pub boundaries: BTreeMap<PlateId, BoundaryType>,
}

impl TectonicPlate {
    /// Boundary with `other`, or [`BoundaryType::None`] when they do not touch.
    pub fn boundary_with(&self, other: PlateId) -> BoundaryType {
        self.boundaries.get(&other).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COS_30: f32 = 0.866_025_4;

    #[test]
    fn test_boundary_ordering_by_strength() {
        assert!(BoundaryType::None < BoundaryType::Transform);
        assert!(BoundaryType::Transform < BoundaryType::Divergent);
        assert!(BoundaryType::Divergent < BoundaryType::Convergent);
    }

    #[test]
    fn test_discriminant_roundtrip() {
        for b in [
            BoundaryType::None,
            BoundaryType::Transform,
            BoundaryType::Divergent,
            BoundaryType::Convergent,
        ] {
            assert_eq!(BoundaryType::from_u8(b as u8), Some(b));
        }
        assert_eq!(BoundaryType::from_u8(4), None);
    }

    #[test]
    fn test_classify_cases() {
        let a = Vec2::ZERO;
        let b = Vec2::new(100.0, 0.0);
        // Relative velocity along A->B.
        assert_eq!(
            BoundaryType::classify(a, Vec2::ZERO, b, Vec2::new(1.0, 0.0), COS_30),
            BoundaryType::Convergent
        );
        // Relative velocity against A->B.
        assert_eq!(
            BoundaryType::classify(a, Vec2::ZERO, b, Vec2::new(-1.0, 0.0), COS_30),
            BoundaryType::Divergent
        );
        // Perpendicular.
        assert_eq!(
            BoundaryType::classify(a, Vec2::ZERO, b, Vec2::new(0.0, 1.0), COS_30),
            BoundaryType::Transform
        );
        // No relative motion.
        let v = Vec2::new(0.3, 0.2);
        assert_eq!(BoundaryType::classify(a, v, b, v, COS_30), BoundaryType::Transform);
    }

    #[test]
    fn test_classify_swapped_pair_is_consistent() {
        // Swapping A and B negates both vectors, so the dot product is unchanged.
        let (ca, va) = (Vec2::new(10.0, 40.0), Vec2::new(0.5, -0.1));
        let (cb, vb) = (Vec2::new(90.0, 10.0), Vec2::new(-0.2, 0.4));
        assert_eq!(
            BoundaryType::classify(ca, va, cb, vb, COS_30),
            BoundaryType::classify(cb, vb, ca, va, COS_30)
        );
    }

    #[test]
    fn test_boundary_with_missing_is_none() {
        let plate = TectonicPlate::default();
        assert_eq!(plate.boundary_with(PlateId(3)), BoundaryType::None);
    }
}
