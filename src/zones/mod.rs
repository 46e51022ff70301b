//! Card containers: draw pile, discard pile, target slot and hands.
//!
//! ## Key Types
//!
//! - `PileManager`: Owns the card arena and moves cards between containers
//! - `SlotDef`: Where a container sits on the table (from `core::config`)

pub mod manager;

pub use manager::{PileManager, DISCARD_SORT_STRIDE, DRAW_SORT_STRIDE, HAND_SORT_STRIDE, TARGET_SORT_ORDER};

// Re-export slot types from core for convenience
pub use crate::core::config::{LayoutConfig, SlotDef, SlotKind};
