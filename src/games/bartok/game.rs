//! Bartok match state machine.

use tracing::{debug, info, warn};

use super::dealer;
use super::delegate::{FirstLegalPlay, TurnChoice, TurnDelegate, TurnView};
use super::phase::TurnPhase;
use super::snapshot::{CardView, TableSnapshot};
use crate::cards::{Card, CardId, Deck};
use crate::core::{
    GameError, GameRng, LayoutConfig, PileKind, PlayRejection, PlayerId, PlayerMap, PlayerRole, TableConfig,
};
use crate::motion::{MotionCompleted, MotionEngine, MotionNotice};
use crate::rules::PlayRules;
use crate::zones::PileManager;

/// One Bartok table, driven by the host loop's [`Bartok::tick`].
///
/// The host owns the value and feeds it monotonically increasing times.
/// Human input arrives through [`Bartok::request_play`] and
/// [`Bartok::request_draw`]; computer seats act through the
/// [`TurnDelegate`] from inside `tick`.
///
/// ```
/// use bartok::core::TableConfig;
/// use bartok::games::bartok::{Bartok, TurnPhase};
///
/// let mut game = Bartok::standard(TableConfig::new(4).with_seed(1)).unwrap();
/// game.start_match(0.0).unwrap();
/// assert_eq!(game.phase(), TurnPhase::Dealing);
///
/// let mut now = 0.0;
/// while game.phase() == TurnPhase::Dealing {
///     now += 1.0 / 60.0;
///     game.tick(now).unwrap();
/// }
/// assert_eq!(game.phase(), TurnPhase::AwaitingPlay);
/// assert!(game.piles().target().is_some());
/// ```
#[derive(Debug)]
pub struct Bartok {
    config: TableConfig,
    deck: Deck,
    piles: PileManager,
    motion: MotionEngine,
    rng: GameRng,
    phase: TurnPhase,
    current: PlayerId,
    winner: Option<PlayerId>,
    /// Clock time at which the current turn began.
    turn_started: f32,
    delegate: Box<dyn TurnDelegate>,
}

impl Bartok {
    /// Set up a table. Every card starts face down in the draw pile.
    pub fn new(config: TableConfig, layout: LayoutConfig, deck: Deck) -> Result<Self, GameError> {
        config.validate()?;

        let needed = config.cards_per_player * config.player_count() + 1;
        if deck.len() < needed {
            return Err(GameError::InvalidConfig(format!(
                "deck of {} cards cannot deal {} to {} players plus a target",
                deck.len(),
                config.cards_per_player,
                config.player_count()
            )));
        }

        let piles = PileManager::new(&deck, &config.roles, layout, config.hand_fan_degrees)?;
        let motion = MotionEngine::with_timing(deck.len(), config.move_duration, config.move_easing)?;
        let rng = GameRng::new(config.seed);

        Ok(Self {
            config,
            deck,
            piles,
            motion,
            rng,
            phase: TurnPhase::Idle,
            current: PlayerId::new(0),
            winner: None,
            turn_started: 0.0,
            delegate: Box::new(FirstLegalPlay),
        })
    }

    /// Standard 52-card deck on the default table layout.
    pub fn standard(config: TableConfig) -> Result<Self, GameError> {
        let layout = LayoutConfig::standard(config.player_count());
        Self::new(config, layout, Deck::standard())
    }

    /// Replace the computer-seat delegate.
    #[must_use]
    pub fn with_delegate(mut self, delegate: impl TurnDelegate + 'static) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn piles(&self) -> &PileManager {
        &self.piles
    }

    #[must_use]
    pub fn motion(&self) -> &MotionEngine {
        &self.motion
    }

    /// Clock time of the latest tick.
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.motion.clock()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.piles.card(id)
    }

    /// Look a card up by face name, e.g. `"C7"` or `"H13"`.
    #[must_use]
    pub fn find_card(&self, name: &str) -> Option<CardId> {
        self.deck.find(name)
    }

    /// Cards `player` could legally play right now, in hand order.
    #[must_use]
    pub fn legal_plays(&self, player: PlayerId) -> Vec<CardId> {
        self.config
            .rules
            .legal_plays(self.piles.hand(player), self.piles.cards(), self.piles.target())
    }

    #[must_use]
    pub fn card_view(&self, id: CardId) -> Option<CardView> {
        self.piles.card(id).map(CardView::from)
    }

    /// Render views of every card, indexed by `CardId`.
    #[must_use]
    pub fn card_views(&self) -> Vec<CardView> {
        self.piles.cards().iter().map(CardView::from).collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        let piles = &self.piles;
        TableSnapshot {
            phase: self.phase,
            current_player: self.current,
            winner: self.winner,
            clock: self.motion.clock(),
            draw_pile: piles.draw_pile().clone(),
            discard_pile: piles.discard_pile().clone(),
            target: piles.target(),
            hands: PlayerMap::new(piles.player_count(), |id| piles.hand(id).to_vec()),
            cards: self.card_views(),
        }
    }

    // === Host entry points ===

    /// Shuffle and deal. The engine clock moves to `now`; dealt cards start
    /// moving from there, staggered.
    pub fn start_match(&mut self, now: f32) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::Idle)?;
        self.piles.advance(&mut self.motion, now);

        self.piles.shuffle_draw_pile(&mut self.motion, &mut self.rng);
        let last = dealer::deal(
            &mut self.piles,
            &mut self.motion,
            self.config.cards_per_player,
            self.config.deal_stagger,
        )?;

        info!(
            players = self.piles.player_count(),
            cards_per_player = self.config.cards_per_player,
            seed = self.rng.seed(),
            "match started"
        );
        match last {
            Some(card) => {
                self.motion.notify_on_finish(card, MotionNotice::DealComplete);
                self.phase = TurnPhase::Dealing;
                Ok(())
            }
            None => self.finish_deal(),
        }
    }

    /// Advance every motion to `now`, then act on the moves that finished
    /// and let a computer seat take its turn.
    pub fn tick(&mut self, now: f32) -> Result<(), GameError> {
        let completed = self.piles.advance(&mut self.motion, now);
        for done in completed {
            self.on_motion_complete(done)?;
        }
        self.run_computer_turn(now)
    }

    /// Play `card` from `player`'s hand onto the target.
    ///
    /// A rejected play changes nothing. On success the turn ends once the
    /// card has settled on the target.
    pub fn request_play(&mut self, player: PlayerId, card: CardId) -> Result<(), GameError> {
        if let Err(reason) = self.check_play(player, card) {
            debug!(player = %player, card = %card, %reason, "play rejected");
            return Err(GameError::InvalidPlay {
                player,
                card: Some(card),
                reason,
            });
        }

        self.piles.move_to_target(&mut self.motion, card)?;
        self.motion.notify_on_finish(card, MotionNotice::PlayResolved(player));
        self.phase = TurnPhase::Resolving;
        info!(player = %player, card = %card, remaining = self.piles.hand(player).len(), "card played");
        Ok(())
    }

    /// Draw one card into `player`'s hand. The turn ends once it settles.
    ///
    /// An empty draw pile is refilled from the discard pile first when
    /// reshuffling is enabled.
    pub fn request_draw(&mut self, player: PlayerId) -> Result<CardId, GameError> {
        if let Err(reason) = self.check_turn(player) {
            debug!(player = %player, %reason, "draw rejected");
            return Err(GameError::InvalidPlay {
                player,
                card: None,
                reason,
            });
        }

        let card = match self.piles.draw(PileKind::Draw) {
            Ok(card) => card,
            Err(GameError::EmptyPile(PileKind::Draw))
                if self.config.reshuffle_discard && !self.piles.discard_pile().is_empty() =>
            {
                self.piles.reshuffle_discard(&mut self.motion, &mut self.rng);
                self.piles.draw(PileKind::Draw)?
            }
            Err(err) => {
                warn!(player = %player, "draw pile exhausted");
                return Err(err);
            }
        };

        self.piles.add_to_hand(&mut self.motion, player, card)?;
        self.motion.notify_on_finish(card, MotionNotice::DrawResolved(player));
        self.phase = TurnPhase::Resolving;
        info!(player = %player, card = %card, "card drawn");
        Ok(card)
    }

    /// Skip the current player's turn. Only allowed while awaiting a play.
    pub fn pass_turn(&mut self) -> Result<PlayerId, GameError> {
        self.expect_phase(TurnPhase::AwaitingPlay)?;
        Ok(self.advance_turn())
    }

    /// Flip the turn direction for the rest of the match.
    pub fn reverse_direction(&mut self) {
        self.config.turn_direction = self.config.turn_direction.reversed();
        debug!(direction = ?self.config.turn_direction, "turn direction reversed");
    }

    /// Gather every card back into the draw pile and return to `Idle`.
    /// The RNG keeps its stream, so the next match deals differently.
    pub fn reset(&mut self) {
        if self.phase.in_progress() {
            info!(phase = ?self.phase, "match abandoned");
        }
        self.piles.gather(&mut self.motion);
        self.phase = TurnPhase::Idle;
        self.current = PlayerId::new(0);
        self.winner = None;
        self.turn_started = 0.0;
        info!("table reset");
    }

    // === Transitions ===

    fn on_motion_complete(&mut self, done: MotionCompleted) -> Result<(), GameError> {
        match done.notice {
            MotionNotice::DealComplete => {
                if self.phase == TurnPhase::Dealing {
                    self.finish_deal()?;
                }
            }
            MotionNotice::PlayResolved(player) => {
                if self.piles.hand(player).is_empty() {
                    self.phase = TurnPhase::GameOver;
                    self.winner = Some(player);
                    info!(winner = %player, "game over");
                } else {
                    self.advance_turn();
                }
            }
            MotionNotice::DrawResolved(_) => {
                self.advance_turn();
            }
        }
        Ok(())
    }

    /// Reveal the first target and hand the first turn to the seat after
    /// the human.
    fn finish_deal(&mut self) -> Result<(), GameError> {
        let first = self.piles.draw(PileKind::Draw)?;
        self.piles.move_to_target(&mut self.motion, first)?;

        let players = self.piles.player_count();
        self.current = PlayerId::new(0).offset(self.config.turn_direction.step(), players);
        self.phase = TurnPhase::AwaitingPlay;
        self.turn_started = self.motion.clock();
        info!(target = %first, first_player = %self.current, "deal complete");
        Ok(())
    }

    fn advance_turn(&mut self) -> PlayerId {
        let players = self.piles.player_count();
        self.current = self.current.offset(self.config.turn_direction.step(), players);
        self.phase = TurnPhase::AwaitingPlay;
        self.turn_started = self.motion.clock();
        debug!(player = %self.current, "turn passed");
        self.current
    }

    /// Never acts in the tick that began the turn: cards moved by that
    /// tick's completions must not be moved again before the next one.
    fn run_computer_turn(&mut self, now: f32) -> Result<(), GameError> {
        if self.phase != TurnPhase::AwaitingPlay
            || self.config.role(self.current) != Some(PlayerRole::Computer)
            || now <= self.turn_started
            || now - self.turn_started < self.config.computer_think_time
        {
            return Ok(());
        }

        let player = self.current;
        let legal = self.legal_plays(player);
        let view = TurnView {
            player,
            hand: self.piles.hand(player),
            legal: &legal,
            target: self.piles.target(),
            cards: self.piles.cards(),
        };
        let choice = self.delegate.choose(&view, &mut self.rng);

        if let TurnChoice::Play(card) = choice {
            match self.request_play(player, card) {
                Ok(()) => return Ok(()),
                Err(err) => warn!(player = %player, error = %err, "delegate chose an illegal play; drawing"),
            }
        }
        match self.request_draw(player) {
            Ok(_) => Ok(()),
            Err(GameError::EmptyPile(_)) => {
                warn!(player = %player, "nothing to play or draw; passing");
                self.advance_turn();
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    // === Validation ===

    fn expect_phase(&self, expected: TurnPhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), PlayRejection> {
        if self.phase != TurnPhase::AwaitingPlay {
            return Err(PlayRejection::WrongPhase);
        }
        if player != self.current {
            return Err(PlayRejection::NotYourTurn);
        }
        Ok(())
    }

    fn check_play(&self, player: PlayerId, card: CardId) -> Result<(), PlayRejection> {
        self.check_turn(player)?;
        let holds = self.piles.player(player).is_some_and(|p| p.holds(card));
        let Some(played) = self.piles.card(card).filter(|_| holds) else {
            return Err(PlayRejection::NotInHand);
        };
        let target = self.piles.target().and_then(|t| self.piles.card(t));
        if !self.config.rules.can_play(played, target) {
            return Err(PlayRejection::NoMatch);
        }
        Ok(())
    }
}
