//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use bartok::cards::{CardDefinition, Deck};
use bartok::core::{PlayerRole, TableConfig};
use bartok::games::bartok::{Bartok, TurnPhase};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test subscriber once.
///
/// Idempotent and race-safe: every test calls it, tests run on parallel
/// threads, and `try_init` never panics when a subscriber is already set.
/// Level from `TEST_LOG`, then `RUST_LOG`, then `warn`. Output goes through
/// the test writer so the harness captures it.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Deck from face names, in the given order.
pub fn deck_of(names: &[&str]) -> Deck {
    let definitions = names
        .iter()
        .map(|name| CardDefinition::parse(name).unwrap_or_else(|| panic!("bad card name {name}")))
        .collect();
    Deck::new(definitions).unwrap()
}

/// Every seat human, so nothing acts unless the test asks.
pub fn human_table(players: usize) -> TableConfig {
    TableConfig::new(players).with_roles(vec![PlayerRole::Human; players])
}

/// Tick in 50ms steps until the game reaches `phase`.
pub fn run_until(game: &mut Bartok, now: &mut f32, phase: TurnPhase) {
    for _ in 0..100_000 {
        if game.phase() == phase {
            return;
        }
        *now += 0.05;
        game.tick(*now).unwrap();
    }
    panic!("never reached {phase:?}, stuck in {:?}", game.phase());
}

/// Start a match and tick until the first turn.
pub fn dealt_game(game: &mut Bartok) -> f32 {
    let mut now = 0.0;
    game.start_match(now).unwrap();
    run_until(game, &mut now, TurnPhase::AwaitingPlay);
    now
}
