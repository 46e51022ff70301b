//! Card system: definitions, instances, and the deck registry.
//!
//! ## Key Types
//!
//! - `CardId`: Index of a physical card in the match
//! - `CardDefinition`: Rank, suit and face sprite id
//! - `Card`: Runtime card record (location, state, pose, stacking)
//! - `Deck`: The full card list, with lookup by face name

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, Rank, Suit};
pub use instance::{Card, CardLocation, CardState};
pub use registry::Deck;
