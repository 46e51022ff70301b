//! Table-space geometry: poses and Bezier curves over glam vectors.
//!
//! The table is the XY plane; Z is depth (more negative = closer to the
//! viewer). Rotations are unit quaternions so interpolation between two
//! card orientations takes the shortest arc.

pub use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Toward the viewer.
pub const TOWARD_VIEWER: Vec3 = Vec3::NEG_Z;

/// Position plus rotation of a card on the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A pose with identity rotation.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// A pose turned `degrees` counter-clockwise about the table normal.
    #[must_use]
    pub fn turned(position: Vec3, degrees: f32) -> Self {
        Self::new(position, Quat::from_rotation_z(degrees.to_radians()))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}

/// Bezier point at `u` over any number of control points (de Casteljau).
///
/// An empty slice yields the origin; one point is returned as-is.
#[must_use]
pub fn bezier(u: f32, points: &[Vec3]) -> Vec3 {
    match points {
        [] => Vec3::ZERO,
        [only] => *only,
        [a, b] => a.lerp(*b, u),
        _ => {
            let n = points.len();
            let head = bezier(u, &points[..n - 1]);
            let tail = bezier(u, &points[1..]);
            head.lerp(tail, u)
        }
    }
}

/// Rotational counterpart of [`bezier`], blending with slerp.
#[must_use]
pub fn bezier_rotation(u: f32, rotations: &[Quat]) -> Quat {
    match rotations {
        [] => Quat::IDENTITY,
        [only] => *only,
        [a, b] => a.slerp(*b, u),
        _ => {
            let n = rotations.len();
            let head = bezier_rotation(u, &rotations[..n - 1]);
            let tail = bezier_rotation(u, &rotations[1..]);
            head.slerp(tail, u)
        }
    }
}
