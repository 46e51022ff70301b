//! Bartok: shed your hand by matching the target card's rank or suit.
//!
//! The match runs off the host loop's `tick(now)`:
//! - `start_match` shuffles and deals with staggered card starts
//! - when the last dealt card settles, the first target is revealed and the
//!   seat after the human takes the first turn
//! - a seat plays a matching card onto the target or draws one card; the
//!   turn passes once that card has settled
//! - the first seat to empty its hand wins
//!
//! Supports 2-8 seats; seat 0 is the human by default.

mod dealer;
mod delegate;
mod game;
mod phase;
mod snapshot;

pub use dealer::{deal, deal_order, shuffle};
pub use delegate::{FirstLegalPlay, RandomLegalPlay, TurnChoice, TurnDelegate, TurnView};
pub use game::Bartok;
pub use phase::TurnPhase;
pub use snapshot::{CardView, TableSnapshot};
