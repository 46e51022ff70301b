//! Central motion scheduler.
//!
//! Every in-flight card move is a plain `Motion` record in an arena indexed
//! by `CardId`. Once per tick the engine walks the arena, poses each moving
//! card, settles the ones that arrived, and returns their completion
//! notices. Nothing reacts to a completion until the whole arena has been
//! advanced, so a reaction that starts a new move is first sampled on the
//! next tick.
//!
//! ## Timing
//!
//! `progress = (now - start_time) / duration`:
//! - `< 0`: not started yet (staggered deals); the card holds its start pose
//! - `[0, 1)`: eased Bezier/slerp between start and end
//! - `>= 1`: snapped exactly to the end pose and settled
//!
//! A move starts at the engine clock (the time of the latest tick) unless a
//! start time was pre-set with [`MotionEngine::set_start_time`]. The pre-set
//! value is kept until the move completes, so re-issuing the move for the
//! same card (a hand re-fan, say) keeps the original stagger.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use super::easing::Easing;
use super::geometry::{bezier, bezier_rotation, Pose, Quat, Vec3};
use crate::cards::{Card, CardId, CardState};
use crate::core::{GameError, PlayerId};

/// Seconds a card takes to travel between two places.
pub const DEFAULT_MOVE_DURATION: f32 = 0.5;

/// What to tell the game when a particular card's move completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionNotice {
    /// The last dealt card reached its hand.
    DealComplete,
    /// A played card reached the target.
    PlayResolved(PlayerId),
    /// A drawn card reached its hand.
    DrawResolved(PlayerId),
}

/// A delivered completion notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionCompleted {
    pub card: CardId,
    pub notice: MotionNotice,
}

/// Where a move is headed, which decides the card's in-transit state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovePurpose {
    DrawPile,
    Hand,
    Target,
    Discard,
    Generic,
}

impl MovePurpose {
    #[must_use]
    pub const fn transit_state(self) -> CardState {
        match self {
            MovePurpose::DrawPile => CardState::ToDrawPile,
            MovePurpose::Hand => CardState::ToHand,
            MovePurpose::Target => CardState::ToTarget,
            MovePurpose::Discard => CardState::ToDiscard,
            MovePurpose::Generic => CardState::To,
        }
    }
}

/// Result of evaluating a motion at some instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// Start time not reached; pose is the start pose.
    Waiting(Pose),
    /// In flight.
    Moving(Pose),
    /// Done; pose is exactly the end pose.
    Arrived(Pose),
}

impl Sample {
    #[must_use]
    pub fn pose(self) -> Pose {
        match self {
            Sample::Waiting(p) | Sample::Moving(p) | Sample::Arrived(p) => p,
        }
    }
}

/// One card's in-flight move.
#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    points: SmallVec<[Vec3; 4]>,
    rotations: SmallVec<[Quat; 4]>,
    start_time: f32,
    duration: f32,
}

impl Motion {
    /// Two-point move from `start` to `end`.
    #[must_use]
    pub fn new(start: Pose, end: Pose, start_time: f32, duration: f32) -> Self {
        Self {
            points: smallvec![start.position, end.position],
            rotations: smallvec![start.rotation, end.rotation],
            start_time,
            duration,
        }
    }

    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// `start_time + duration`; at or past this the move has arrived.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration
    }

    #[must_use]
    pub fn start_pose(&self) -> Pose {
        Pose::new(self.points[0], self.rotations[0])
    }

    #[must_use]
    pub fn end_pose(&self) -> Pose {
        Pose::new(self.points[self.points.len() - 1], self.rotations[self.rotations.len() - 1])
    }

    /// Raw, unclamped progress at `now`.
    #[must_use]
    pub fn progress(&self, now: f32) -> f32 {
        (now - self.start_time) / self.duration
    }

    #[must_use]
    pub fn sample(&self, now: f32, easing: Easing) -> Sample {
        let u = self.progress(now);
        if u < 0.0 {
            Sample::Waiting(self.start_pose())
        } else if u >= 1.0 || now >= self.end_time() {
            Sample::Arrived(self.end_pose())
        } else {
            let eased = easing.ease(u);
            Sample::Moving(Pose::new(
                bezier(eased, &self.points),
                bezier_rotation(eased, &self.rotations),
            ))
        }
    }
}

/// Arena of per-card motions plus the per-card timing and notice slots.
#[derive(Clone, Debug)]
pub struct MotionEngine {
    clock: f32,
    duration: f32,
    easing: Easing,
    motions: Vec<Option<Motion>>,
    start_times: Vec<Option<f32>>,
    notices: Vec<Option<MotionNotice>>,
}

impl MotionEngine {
    /// Engine sized for `card_count` cards with the default move duration.
    #[must_use]
    pub fn new(card_count: usize) -> Self {
        Self {
            clock: 0.0,
            duration: DEFAULT_MOVE_DURATION,
            easing: Easing::default(),
            motions: vec![None; card_count],
            start_times: vec![None; card_count],
            notices: vec![None; card_count],
        }
    }

    /// Engine with a custom default duration and easing.
    pub fn with_timing(card_count: usize, duration: f32, easing: Easing) -> Result<Self, GameError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "move duration must be positive, got {duration}"
            )));
        }
        Ok(Self {
            duration,
            easing,
            ..Self::new(card_count)
        })
    }

    /// Time of the latest tick; new moves start here.
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Pre-set the start time for the card's next move.
    pub fn set_start_time(&mut self, card: CardId, at: f32) {
        self.ensure(card);
        self.start_times[card.index()] = Some(at);
    }

    #[must_use]
    pub fn start_time(&self, card: CardId) -> Option<f32> {
        self.start_times.get(card.index()).copied().flatten()
    }

    /// Register a notice to deliver when the card's current (or next) move
    /// completes. Delivered once, then cleared.
    pub fn notify_on_finish(&mut self, card: CardId, notice: MotionNotice) {
        self.ensure(card);
        self.notices[card.index()] = Some(notice);
    }

    #[must_use]
    pub fn pending_notice(&self, card: CardId) -> Option<MotionNotice> {
        self.notices.get(card.index()).copied().flatten()
    }

    /// Start moving `card` from its current pose to `end` with the default
    /// duration. Overwrites any move already in flight.
    pub fn begin_move(&mut self, card: &mut Card, end: Pose, purpose: MovePurpose) -> Result<(), GameError> {
        let duration = self.duration;
        self.begin_move_with_duration(card, end, purpose, duration)
    }

    /// [`MotionEngine::begin_move`] with an explicit duration.
    ///
    /// Rejects non-positive or non-finite durations and non-finite end
    /// poses without touching the card.
    pub fn begin_move_with_duration(
        &mut self,
        card: &mut Card,
        end: Pose,
        purpose: MovePurpose,
        duration: f32,
    ) -> Result<(), GameError> {
        let id = card.id();
        if !(duration.is_finite() && duration > 0.0) {
            return Err(GameError::InvalidMotionRequest {
                card: id,
                reason: "duration must be positive",
            });
        }
        if !end.is_finite() {
            return Err(GameError::InvalidMotionRequest {
                card: id,
                reason: "end pose is not finite",
            });
        }

        self.ensure(id);
        let start_time = self.start_times[id.index()].unwrap_or(self.clock);
        self.motions[id.index()] = Some(Motion::new(card.pose, end, start_time, duration));
        card.state = purpose.transit_state();

        trace!(card = %id, ?purpose, start_time, "begin move");
        Ok(())
    }

    /// Drop any move, start time and notice for the card. The card keeps
    /// whatever pose it has.
    pub(crate) fn halt(&mut self, card: CardId) {
        if let Some(slot) = self.motions.get_mut(card.index()) {
            *slot = None;
            self.start_times[card.index()] = None;
            self.notices[card.index()] = None;
        }
    }

    /// Forget every move and reset the clock.
    pub fn clear(&mut self) {
        self.motions.iter_mut().for_each(|m| *m = None);
        self.start_times.iter_mut().for_each(|t| *t = None);
        self.notices.iter_mut().for_each(|n| *n = None);
        self.clock = 0.0;
    }

    #[must_use]
    pub fn motion(&self, card: CardId) -> Option<&Motion> {
        self.motions.get(card.index()).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_moving(&self, card: CardId) -> bool {
        self.motion(card).is_some()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.motions.iter().filter(|m| m.is_some()).count()
    }

    /// No card is moving.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.motions.iter().all(Option::is_none)
    }

    /// Advance every active motion to `now`.
    ///
    /// `cards` must be the card arena, indexed by `CardId`. Returns the
    /// notices of moves that completed this tick, in card order.
    pub fn tick(&mut self, now: f32, cards: &mut [Card]) -> Vec<MotionCompleted> {
        self.clock = now;
        let mut completed = Vec::new();

        for idx in 0..self.motions.len() {
            let Some(motion) = &self.motions[idx] else {
                continue;
            };
            let Some(card) = cards.get_mut(idx) else {
                debug_assert!(false, "motion for card {idx} outside the arena");
                self.motions[idx] = None;
                continue;
            };

            match motion.sample(now, self.easing) {
                Sample::Waiting(pose) | Sample::Moving(pose) => card.pose = pose,
                Sample::Arrived(pose) => {
                    card.pose = pose;
                    card.state = card.state.settled();
                    self.motions[idx] = None;
                    self.start_times[idx] = None;

                    if let Some(notice) = self.notices[idx].take() {
                        debug!(card = %card.id(), ?notice, "move complete");
                        completed.push(MotionCompleted {
                            card: card.id(),
                            notice,
                        });
                    }
                }
            }
        }

        completed
    }

    fn ensure(&mut self, card: CardId) {
        let needed = card.index() + 1;
        if self.motions.len() < needed {
            self.motions.resize(needed, None);
            self.start_times.resize(needed, None);
            self.notices.resize(needed, None);
        }
    }
}
