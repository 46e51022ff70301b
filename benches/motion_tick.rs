//! Per-tick cost of the motion scheduler and of a full table tick.
//!
//! Run with: cargo bench --bench motion_tick

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bartok::cards::{Card, CardDefinition, CardId, Deck};
use bartok::core::{PlayerRole, TableConfig};
use bartok::games::bartok::Bartok;
use bartok::motion::{MotionEngine, MovePurpose, Pose, Vec3};

fn moving_deck() -> (MotionEngine, Vec<Card>) {
    let deck = Deck::standard();
    let mut engine = MotionEngine::new(deck.len());
    let mut cards: Vec<Card> = deck.iter().map(|(id, def)| Card::new(id, def.clone())).collect();
    for (i, card) in cards.iter_mut().enumerate() {
        let end = Pose::turned(Vec3::new(i as f32 * 0.1, 4.0, 0.0), i as f32);
        engine.set_start_time(card.id(), i as f32 * 0.01);
        engine.begin_move(card, end, MovePurpose::Hand).unwrap();
    }
    (engine, cards)
}

fn bench_engine_tick(c: &mut Criterion) {
    c.bench_function("engine_tick_52_in_flight", |b| {
        let (engine, cards) = moving_deck();
        b.iter_batched(
            || (engine.clone(), cards.clone()),
            |(mut engine, mut cards)| black_box(engine.tick(black_box(0.3), &mut cards)),
            criterion::BatchSize::SmallInput,
        );
    });

    c.bench_function("engine_tick_idle", |b| {
        let mut engine = MotionEngine::new(52);
        let mut cards = vec![Card::new(CardId(0), CardDefinition::parse("S1").unwrap())];
        b.iter(|| black_box(engine.tick(black_box(1.0), &mut cards)));
    });
}

fn bench_table_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_tick_during_deal");
    for players in [2usize, 4, 8] {
        let cards_per_player = if players == 8 { 5 } else { 7 };
        let config = TableConfig::new(players)
            .with_roles(vec![PlayerRole::Computer; players])
            .with_cards_per_player(cards_per_player);
        group.bench_with_input(BenchmarkId::from_parameter(players), &config, |b, config| {
            b.iter_batched(
                || {
                    let mut game = Bartok::standard(config.clone()).unwrap();
                    game.start_match(0.0).unwrap();
                    game
                },
                |mut game| {
                    for step in 1..=30 {
                        game.tick(step as f32 / 60.0).unwrap();
                    }
                    black_box(game.snapshot())
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine_tick, bench_table_tick);
criterion_main!(benches);
