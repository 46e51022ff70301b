//! Turn flow: validation, resolution, reshuffle and game over.

mod common;

use bartok::cards::{CardId, CardLocation, CardState, Rank};
use bartok::core::{GameError, LayoutConfig, PileKind, PlayRejection, PlayerId, PlayerRole, TableConfig};
use bartok::games::bartok::{Bartok, RandomLegalPlay, TableSnapshot, TurnPhase};
use bartok::rules::RuleSet;

use common::{dealt_game, deck_of, human_table, init_logging, run_until};

/// Six clubs: every card matches every other, so all plays are legal.
fn all_clubs_game(cards_per_player: usize) -> Bartok {
    let deck = deck_of(&["C1", "C2", "C3", "C4", "C5", "C6"]);
    let config = human_table(2).with_cards_per_player(cards_per_player);
    Bartok::new(config, LayoutConfig::standard(2), deck).unwrap()
}

#[test]
fn test_invalid_plays_leave_table_unchanged() {
    init_logging();
    let mut game = Bartok::standard(human_table(3).with_seed(5)).unwrap();
    let mut now = dealt_game(&mut game);
    now += 1.0;
    game.tick(now).unwrap();
    let before: TableSnapshot = game.snapshot();

    let current = game.current_player();
    let other = PlayerId::new(0);
    assert_ne!(current, other);

    // Not this player's turn.
    let card = game.piles().hand(other)[0];
    let err = game.request_play(other, card).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidPlay {
            player: other,
            card: Some(card),
            reason: PlayRejection::NotYourTurn,
        }
    );

    // Someone else's card.
    let err = game.request_play(current, card).unwrap_err();
    assert!(matches!(err, GameError::InvalidPlay { reason: PlayRejection::NotInHand, .. }));

    // The target itself.
    let target = game.piles().target().unwrap();
    let err = game.request_play(current, target).unwrap_err();
    assert!(matches!(err, GameError::InvalidPlay { reason: PlayRejection::NotInHand, .. }));

    // Drawing out of turn.
    let err = game.request_draw(other).unwrap_err();
    assert!(matches!(err, GameError::InvalidPlay { reason: PlayRejection::NotYourTurn, .. }));

    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_non_matching_card_rejected() {
    init_logging();
    // Find a seeded deal where the current player holds a non-matching card.
    for seed in 0..64 {
        let mut game = Bartok::standard(human_table(2).with_seed(seed)).unwrap();
        dealt_game(&mut game);
        let player = game.current_player();
        let legal = game.legal_plays(player);
        let Some(&card) = game.piles().hand(player).iter().find(|id| !legal.contains(id)) else {
            continue;
        };

        let before = game.snapshot();
        let err = game.request_play(player, card).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidPlay {
                player,
                card: Some(card),
                reason: PlayRejection::NoMatch,
            }
        );
        assert_eq!(game.snapshot(), before);
        return;
    }
    panic!("no seed produced a non-matching card");
}

#[test]
fn test_play_moves_card_and_discards_old_target() {
    init_logging();
    let mut game = all_clubs_game(2);
    let mut now = dealt_game(&mut game);

    let player = game.current_player();
    let old_target = game.piles().target().unwrap();
    let card = game.piles().hand(player)[0];
    game.request_play(player, card).unwrap();

    assert_eq!(game.phase(), TurnPhase::Resolving);
    assert_eq!(game.piles().target(), Some(card));
    assert_eq!(game.card(card).unwrap().state(), CardState::ToTarget);
    assert_eq!(game.card(old_target).unwrap().location(), CardLocation::Discard);
    assert_eq!(game.card(old_target).unwrap().state(), CardState::ToDiscard);
    assert_eq!(game.piles().hand(player).len(), 1);

    run_until(&mut game, &mut now, TurnPhase::AwaitingPlay);
    assert_eq!(game.current_player(), PlayerId::new(0));
    assert_eq!(game.card(card).unwrap().state(), CardState::Target);
    assert!(game.piles().is_consistent());
}

#[test]
fn test_emptying_hand_ends_the_game() {
    init_logging();
    let mut game = all_clubs_game(1);
    let mut now = dealt_game(&mut game);

    let player = game.current_player();
    let card = game.piles().hand(player)[0];
    game.request_play(player, card).unwrap();
    assert_eq!(game.winner(), None);

    run_until(&mut game, &mut now, TurnPhase::GameOver);
    assert_eq!(game.winner(), Some(player));

    let err = game.request_draw(PlayerId::new(0)).unwrap_err();
    assert!(matches!(err, GameError::InvalidPlay { reason: PlayRejection::WrongPhase, .. }));
}

#[test]
fn test_empty_draw_pile_reshuffles_discard() {
    init_logging();
    // 4 dealt, 1 target, 1 left to draw.
    let mut game = all_clubs_game(2);
    let mut now = dealt_game(&mut game);
    let (p1, p0) = (PlayerId::new(1), PlayerId::new(0));

    game.request_draw(p1).unwrap();
    assert!(game.piles().draw_pile().is_empty());
    run_until(&mut game, &mut now, TurnPhase::AwaitingPlay);

    let card = game.piles().hand(p0)[0];
    game.request_play(p0, card).unwrap();
    run_until(&mut game, &mut now, TurnPhase::AwaitingPlay);
    assert_eq!(game.piles().discard_pile().len(), 1);

    let recycled = game.piles().discard_pile()[0];
    let drawn = game.request_draw(p1).unwrap();

    assert_eq!(drawn, recycled);
    assert_eq!(game.piles().target(), Some(card));
    assert!(game.piles().discard_pile().is_empty());
    assert!(game.piles().draw_pile().is_empty());
    assert_eq!(game.piles().hand(p1).len(), 4);
    assert!(game.piles().is_consistent());
}

#[test]
fn test_empty_draw_pile_without_reshuffle_fails() {
    init_logging();
    let deck = deck_of(&["C1", "C2", "C3", "C4", "C5", "C6"]);
    let config = human_table(2).with_cards_per_player(2).with_reshuffle(false);
    let mut game = Bartok::new(config, LayoutConfig::standard(2), deck).unwrap();
    let mut now = dealt_game(&mut game);
    let (p1, p0) = (PlayerId::new(1), PlayerId::new(0));

    game.request_draw(p1).unwrap();
    run_until(&mut game, &mut now, TurnPhase::AwaitingPlay);
    let card = game.piles().hand(p0)[0];
    game.request_play(p0, card).unwrap();
    run_until(&mut game, &mut now, TurnPhase::AwaitingPlay);

    let before = game.snapshot();
    assert_eq!(game.request_draw(p1), Err(GameError::EmptyPile(PileKind::Draw)));
    assert_eq!(game.snapshot(), before);

    // The stuck player can still pass.
    assert_eq!(game.pass_turn(), Ok(p0));
}

#[test]
fn test_turn_order_wraps_around() {
    init_logging();
    let mut game = Bartok::standard(human_table(3)).unwrap();
    let mut now = dealt_game(&mut game);

    let mut seen = Vec::new();
    for _ in 0..4 {
        let player = game.current_player();
        seen.push(player);
        game.request_draw(player).unwrap();
        run_until(&mut game, &mut now, TurnPhase::AwaitingPlay);
    }
    assert_eq!(seen, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(0), PlayerId::new(1)]);

    game.reverse_direction();
    assert_eq!(game.pass_turn(), Ok(PlayerId::new(1)));
}

#[test]
fn test_crazy_eights_accepts_off_suit_eight() {
    init_logging();
    for seed in 0..64 {
        let config = human_table(2).with_seed(seed).with_rules(RuleSet::CrazyEights);
        let mut game = Bartok::standard(config).unwrap();
        dealt_game(&mut game);

        let player = game.current_player();
        let target = game.card(game.piles().target().unwrap()).unwrap().clone();
        let off_suit_eight = game.piles().hand(player).iter().copied().find(|&id| {
            let card = game.card(id).unwrap();
            card.rank() == Rank::EIGHT && card.suit() != target.suit() && target.rank() != Rank::EIGHT
        });
        let Some(card) = off_suit_eight else {
            continue;
        };

        assert!(game.legal_plays(player).contains(&card));
        game.request_play(player, card).unwrap();
        assert_eq!(game.piles().target(), Some(card));
        return;
    }
    panic!("no seed dealt an off-suit eight");
}

#[test]
fn test_computer_seats_finish_a_match() {
    init_logging();
    let config = TableConfig::new(4)
        .with_roles(vec![PlayerRole::Computer; 4])
        .with_seed(2024);
    let mut game = Bartok::standard(config).unwrap().with_delegate(RandomLegalPlay);
    let mut now = 0.0;
    game.start_match(now).unwrap();

    run_until(&mut game, &mut now, TurnPhase::GameOver);

    let winner = game.winner().unwrap();
    assert!(game.piles().hand(winner).is_empty());
    assert_eq!(game.piles().counted_cards(), 52);
    assert!(game.piles().is_consistent());
}

#[test]
fn test_computer_waits_for_think_time() {
    init_logging();
    let config = TableConfig::new(2).with_computer_think_time(2.0);
    let mut game = Bartok::standard(config).unwrap();
    let now = dealt_game(&mut game);
    assert_eq!(game.current_player(), PlayerId::new(1));

    game.tick(now + 1.0).unwrap();
    assert_eq!(game.phase(), TurnPhase::AwaitingPlay);

    game.tick(now + 2.5).unwrap();
    assert_eq!(game.phase(), TurnPhase::Resolving);
}

#[test]
fn test_instant_computer_waits_a_tick_after_the_reveal() {
    init_logging();
    let config = TableConfig::new(2).with_seed(1).with_computer_think_time(0.0);
    let mut game = Bartok::standard(config).unwrap();
    let mut now = 0.0;
    game.start_match(now).unwrap();

    // Tick until the deal completes; the reveal and the first turn share a tick.
    while game.phase() == TurnPhase::Dealing {
        now += 0.05;
        game.tick(now).unwrap();
    }
    assert_eq!(game.phase(), TurnPhase::AwaitingPlay);
    assert_eq!(game.current_player(), PlayerId::new(1));
    let revealed = game.piles().target().unwrap();
    assert_eq!(game.card(revealed).unwrap().location(), CardLocation::Target);
    assert!(game.piles().discard_pile().is_empty());

    // The computer acts on the next tick.
    now += 0.05;
    game.tick(now).unwrap();
    assert_eq!(game.phase(), TurnPhase::Resolving);
    assert!(game.piles().is_consistent());
}

#[test]
fn test_snapshot_bytes_round_trip() {
    init_logging();
    let mut game = Bartok::standard(human_table(2).with_seed(8)).unwrap();
    dealt_game(&mut game);

    let snapshot = game.snapshot();
    let restored = TableSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, snapshot);

    let target = restored.target.unwrap();
    assert_eq!(restored.card(target).unwrap().location, CardLocation::Target);
    assert!(matches!(
        TableSnapshot::from_bytes(&[1, 2, 3]),
        Err(GameError::Codec(_))
    ));
    assert_eq!(restored.cards.len(), 52);
    assert_eq!(restored.card(CardId(60)), None);
}

#[test]
fn test_paint_order_puts_draw_pile_head_in_front() {
    init_logging();
    let mut game = Bartok::standard(human_table(2).with_seed(3)).unwrap();
    dealt_game(&mut game);

    let snapshot = game.snapshot();
    let painted = snapshot.paint_order();
    assert_eq!(painted.len(), 52);
    assert!(painted
        .windows(2)
        .all(|w| (w[0].layer, w[0].sort_order) <= (w[1].layer, w[1].sort_order)));

    // Among draw pile cards the head paints last, so it sits on top.
    let head = snapshot.draw_pile[0];
    let last_draw = painted
        .iter()
        .filter(|v| v.location == CardLocation::DrawPile)
        .last()
        .unwrap();
    assert_eq!(last_draw.id, head);
}
