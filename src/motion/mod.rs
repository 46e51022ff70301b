//! Card motion: easing curves, table geometry, and the per-tick scheduler.
//!
//! ## Key Types
//!
//! - `Easing`: Progress curves
//! - `Pose`: Card transform on the table, over glam's `Vec3` and `Quat`
//! - `MotionEngine`: Arena of in-flight moves, advanced once per tick
//! - `MotionNotice`: Typed completion notification for a specific card

pub mod easing;
pub mod engine;
pub mod geometry;

pub use easing::Easing;
pub use engine::{
    Motion, MotionCompleted, MotionEngine, MotionNotice, MovePurpose, Sample, DEFAULT_MOVE_DURATION,
};
pub use geometry::{bezier, bezier_rotation, Pose, Quat, Vec2, Vec3, TOWARD_VIEWER};
