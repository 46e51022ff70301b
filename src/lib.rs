//! # bartok
//!
//! Turn and card-animation core for the Bartok card game.
//!
//! ## Design Principles
//!
//! 1. **Tick-Driven**: The host loop calls `tick(now)`; nothing blocks and
//!    nothing runs on its own thread. Waiting for a deal or an animation is
//!    state inspected on each tick.
//!
//! 2. **N-Player First**: Every API takes the seat count from the table.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Plain Data**: Cards are records in an arena indexed by `CardId`.
//!    Motion lives in a central scheduler, not on the cards.
//!
//! ## Architecture
//!
//! - **Typed Completion Notices**: A move can carry a `MotionNotice` that is
//!   delivered exactly once when the card settles. All motions advance
//!   before any notice is acted on, so no card moves twice in one tick.
//!
//! - **Persistent Piles**: O(1) snapshots via `im-rs` for render frames.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, table and layout configuration, errors
//! - `cards`: Card definitions, runtime card records, deck registry
//! - `motion`: Easing, geometry, per-card motion scheduler
//! - `zones`: Draw pile, discard pile, target and hands
//! - `rules`: Play validation
//! - `games`: The Bartok match state machine

pub mod cards;
pub mod core;
pub mod games;
pub mod motion;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    GameError, GameRng, LayoutConfig, PileKind, PlayRejection, Player, PlayerId, PlayerMap,
    PlayerRole, SlotDef, SlotKind, TableConfig, TurnDirection,
};

pub use crate::cards::{Card, CardDefinition, CardId, CardLocation, CardState, Deck, Rank, Suit};

pub use crate::motion::{Easing, MotionEngine, MotionNotice, Pose, Quat, Vec3};

pub use crate::zones::PileManager;

pub use crate::rules::{PlayRules, RuleSet};

pub use crate::games::bartok::{
    Bartok, CardView, FirstLegalPlay, RandomLegalPlay, TableSnapshot, TurnChoice, TurnDelegate, TurnPhase,
};
