//! Core table types: players, RNG, configuration and errors.
//!
//! Nothing in here knows about card motion or turn flow; games build on
//! these via `TableConfig` and `LayoutConfig`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{
    LayoutConfig, SlotDef, SlotKind, TableConfig, TurnDirection, CARD_HEIGHT, CARD_WIDTH, MAX_PLAYERS,
    MIN_PLAYERS,
};
pub use error::{GameError, PileKind, PlayRejection};
pub use player::{Player, PlayerId, PlayerMap, PlayerRole};
pub use rng::GameRng;
