//! Table configuration types.
//!
//! The host provides, at setup:
//! - `LayoutConfig`: Slot geometry (draw pile, discard pile, target, one
//!   hand slot per seat), as parsed from a layout description
//! - `TableConfig`: Seats, deal size, timing, rules, seed
//!
//! Both are immutable for the rest of the match and serde-friendly so a
//! host can load them from whatever format it uses.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::player::{PlayerId, PlayerRole};
use crate::motion::{Easing, Quat, Vec2, Vec3, DEFAULT_MOVE_DURATION};
use crate::rules::RuleSet;

pub const CARD_WIDTH: f32 = 2.0;
pub const CARD_HEIGHT: f32 = 3.5;

/// Seats supported at one table.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// What a layout slot is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Slot,
    DrawPile,
    DiscardPile,
    Target,
    Hand,
}

/// One slot of a layout description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotDef {
    pub id: u32,
    pub kind: SlotKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub face_up: bool,
    #[serde(default = "default_layer_name")]
    pub layer_name: String,
    #[serde(default)]
    pub layer_id: i32,
    #[serde(default)]
    pub hidden_by: Vec<u32>,
    /// Degrees about the table normal.
    #[serde(default)]
    pub rot: f32,
    /// Per-card offset for piles laid out as a stack.
    #[serde(default)]
    pub stagger: Vec2,
    #[serde(default)]
    pub player: Option<PlayerId>,
}

fn default_layer_name() -> String {
    "Default".to_string()
}

impl SlotDef {
    #[must_use]
    pub fn new(kind: SlotKind, x: f32, y: f32) -> Self {
        Self {
            id: 0,
            kind,
            x,
            y,
            face_up: false,
            layer_name: default_layer_name(),
            layer_id: 0,
            hidden_by: Vec::new(),
            rot: 0.0,
            stagger: Vec2::ZERO,
            player: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_layer(mut self, name: impl Into<String>, id: i32) -> Self {
        self.layer_name = name.into();
        self.layer_id = id;
        self
    }

    #[must_use]
    pub fn with_rot(mut self, degrees: f32) -> Self {
        self.rot = degrees;
        self
    }

    #[must_use]
    pub fn with_stagger(mut self, x: f32, y: f32) -> Self {
        self.stagger = Vec2::new(x, y);
        self
    }

    #[must_use]
    pub fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    #[must_use]
    pub fn for_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Slot position on the table plane, before the layout centre offset.
    #[must_use]
    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.rot.is_finite()
            && self.stagger.x.is_finite()
            && self.stagger.y.is_finite()
    }
}

/// Slot geometry of a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Offset applied to every slot.
    #[serde(default)]
    pub center: Vec3,
    pub draw_pile: SlotDef,
    pub discard_pile: SlotDef,
    pub target: SlotDef,
    /// One hand slot per seat, indexed by seat.
    pub hands: Vec<SlotDef>,
}

impl LayoutConfig {
    /// Piles in the middle, hands around the table clockwise from the
    /// human seat at the bottom.
    ///
    /// ```
    /// use bartok::core::{LayoutConfig, PlayerId};
    ///
    /// let layout = LayoutConfig::standard(4);
    /// let human = layout.hand_slot(PlayerId::new(0)).unwrap();
    /// assert_eq!((human.x, human.y, human.rot), (0.0, -8.0, 0.0));
    /// ```
    #[must_use]
    pub fn standard(player_count: usize) -> Self {
        let hands = (0..player_count)
            .map(|seat| {
                let degrees = (-360.0 * seat as f32 / player_count as f32).rem_euclid(360.0);
                let at = Quat::from_rotation_z(degrees.to_radians()) * Vec3::new(0.0, -8.0, 0.0);
                SlotDef::new(SlotKind::Hand, round_to_grid(at.x), round_to_grid(at.y))
                    .with_id(10 + seat as u32)
                    .with_rot(degrees)
                    .with_layer("Hand", 3)
                    .for_player(PlayerId::new(seat as u8))
            })
            .collect();

        Self {
            center: Vec3::ZERO,
            draw_pile: SlotDef::new(SlotKind::DrawPile, 1.5, 0.0)
                .with_id(1)
                .with_stagger(0.05, 0.0)
                .with_layer("Draw", 1),
            discard_pile: SlotDef::new(SlotKind::DiscardPile, -1.5, 0.0)
                .with_id(2)
                .with_layer("Discard", 2)
                .face_up(),
            target: SlotDef::new(SlotKind::Target, -1.5, 0.0)
                .with_id(3)
                .with_layer("Target", 4)
                .face_up(),
            hands,
        }
    }

    #[must_use]
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    #[must_use]
    pub fn hand_slot(&self, player: PlayerId) -> Option<&SlotDef> {
        self.hands.get(player.index())
    }

    /// Table position of a slot, centre offset included.
    #[must_use]
    pub fn anchor(&self, slot: &SlotDef) -> Vec3 {
        self.center + slot.pos()
    }

    /// Check slot kinds, finiteness and that every seat has a hand slot.
    pub fn validate(&self, player_count: usize) -> Result<(), GameError> {
        if self.hands.len() < player_count {
            return Err(GameError::InvalidConfig(format!(
                "layout has {} hand slots for {} players",
                self.hands.len(),
                player_count
            )));
        }
        let expectations = [
            (&self.draw_pile, SlotKind::DrawPile),
            (&self.discard_pile, SlotKind::DiscardPile),
            (&self.target, SlotKind::Target),
        ];
        for (slot, kind) in expectations {
            if slot.kind != kind {
                return Err(GameError::InvalidConfig(format!(
                    "slot {} is {:?}, expected {:?}",
                    slot.id, slot.kind, kind
                )));
            }
        }
        let all = std::iter::once(&self.draw_pile)
            .chain([&self.discard_pile, &self.target])
            .chain(self.hands.iter());
        for slot in all {
            if !slot.is_finite() {
                return Err(GameError::InvalidConfig(format!("slot {} has non-finite geometry", slot.id)));
            }
        }
        if !self.center.is_finite() {
            return Err(GameError::InvalidConfig("layout centre is not finite".into()));
        }
        Ok(())
    }
}

fn round_to_grid(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

/// Order in which turns pass around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Increasing seat index.
    #[default]
    Clockwise,
    CounterClockwise,
}

impl TurnDirection {
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            TurnDirection::Clockwise => 1,
            TurnDirection::CounterClockwise => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            TurnDirection::Clockwise => TurnDirection::CounterClockwise,
            TurnDirection::CounterClockwise => TurnDirection::Clockwise,
        }
    }
}

/// Match configuration.
///
/// ## Example
///
/// ```
/// use bartok::core::{PlayerRole, TableConfig};
///
/// let config = TableConfig::new(4).with_seed(7).with_cards_per_player(5);
/// assert_eq!(config.player_count(), 4);
/// assert_eq!(config.roles[0], PlayerRole::Human);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// One role per seat.
    pub roles: Vec<PlayerRole>,
    pub cards_per_player: usize,
    /// Seconds between consecutive dealt cards starting to move.
    pub deal_stagger: f32,
    pub move_duration: f32,
    pub move_easing: Easing,
    /// Angle between adjacent cards in a fanned hand.
    pub hand_fan_degrees: f32,
    pub turn_direction: TurnDirection,
    /// Refill an empty draw pile from the discard pile.
    pub reshuffle_discard: bool,
    /// Seconds a computer seat waits before acting.
    pub computer_think_time: f32,
    pub rules: RuleSet,
    pub seed: u64,
}

impl TableConfig {
    /// Seat 0 human, every other seat computer-controlled.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        let roles = (0..player_count)
            .map(|seat| if seat == 0 { PlayerRole::Human } else { PlayerRole::Computer })
            .collect();
        Self {
            roles,
            cards_per_player: 7,
            deal_stagger: 0.1,
            move_duration: DEFAULT_MOVE_DURATION,
            move_easing: Easing::default(),
            hand_fan_degrees: 10.0,
            turn_direction: TurnDirection::Clockwise,
            reshuffle_discard: true,
            computer_think_time: 0.5,
            rules: RuleSet::default(),
            seed: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn role(&self, player: PlayerId) -> Option<PlayerRole> {
        self.roles.get(player.index()).copied()
    }

    #[must_use]
    pub fn with_roles(mut self, roles: Vec<PlayerRole>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn with_cards_per_player(mut self, count: usize) -> Self {
        self.cards_per_player = count;
        self
    }

    #[must_use]
    pub fn with_deal_stagger(mut self, seconds: f32) -> Self {
        self.deal_stagger = seconds;
        self
    }

    #[must_use]
    pub fn with_move_timing(mut self, duration: f32, easing: Easing) -> Self {
        self.move_duration = duration;
        self.move_easing = easing;
        self
    }

    #[must_use]
    pub fn with_hand_fan(mut self, degrees: f32) -> Self {
        self.hand_fan_degrees = degrees;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: TurnDirection) -> Self {
        self.turn_direction = direction;
        self
    }

    #[must_use]
    pub fn with_reshuffle(mut self, enabled: bool) -> Self {
        self.reshuffle_discard = enabled;
        self
    }

    #[must_use]
    pub fn with_computer_think_time(mut self, seconds: f32) -> Self {
        self.computer_think_time = seconds;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let players = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(GameError::InvalidConfig(format!(
                "player count must be {MIN_PLAYERS}-{MAX_PLAYERS}, got {players}"
            )));
        }
        if !(self.move_duration.is_finite() && self.move_duration > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "move duration must be positive, got {}",
                self.move_duration
            )));
        }
        let non_negative = [
            ("deal stagger", self.deal_stagger),
            ("computer think time", self.computer_think_time),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::InvalidConfig(format!("{name} must be >= 0, got {value}")));
            }
        }
        if !self.hand_fan_degrees.is_finite() {
            return Err(GameError::InvalidConfig("hand fan angle is not finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_seats() {
        let layout = LayoutConfig::standard(4);
        assert!(layout.validate(4).is_ok());

        let seats: Vec<_> = layout.hands.iter().map(|s| (s.x, s.y, s.rot)).collect();
        assert_eq!(
            seats,
            vec![(0.0, -8.0, 0.0), (-8.0, 0.0, 270.0), (0.0, 8.0, 180.0), (8.0, 0.0, 90.0)]
        );
        assert_eq!(layout.hands[2].player, Some(PlayerId::new(2)));
    }

    #[test]
    fn test_layout_validation() {
        let layout = LayoutConfig::standard(2);
        assert!(layout.validate(3).is_err());

        let mut broken = LayoutConfig::standard(2);
        broken.target.kind = SlotKind::Hand;
        assert!(broken.validate(2).is_err());

        let mut broken = LayoutConfig::standard(2);
        broken.hands[1].rot = f32::NAN;
        assert!(broken.validate(2).is_err());
    }

    #[test]
    fn test_anchor_applies_center() {
        let layout = LayoutConfig::standard(2).with_center(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(layout.anchor(&layout.draw_pile), Vec3::new(2.5, 1.0, 0.0));
    }

    #[test]
    fn test_slot_json_defaults() {
        let json = r#"{ "id": 4, "kind": "Hand", "x": 0.0, "y": -8.0, "player": 0 }"#;
        let slot: SlotDef = serde_json::from_str(json).unwrap();

        assert_eq!(slot.layer_name, "Default");
        assert_eq!(slot.stagger, Vec2::ZERO);
        assert_eq!(slot.player, Some(PlayerId::new(0)));
        assert!(slot.hidden_by.is_empty());
    }

    #[test]
    fn test_table_config_validation() {
        assert!(TableConfig::new(4).validate().is_ok());
        assert!(TableConfig::new(1).validate().is_err());
        assert!(TableConfig::new(9).validate().is_err());
        assert!(TableConfig::new(2).with_move_timing(0.0, Easing::Linear).validate().is_err());
        assert!(TableConfig::new(2).with_deal_stagger(-0.1).validate().is_err());
        assert!(TableConfig::new(2).with_computer_think_time(f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_table_config_round_trip() {
        let config = TableConfig::new(3).with_seed(99).with_direction(TurnDirection::CounterClockwise);
        let json = serde_json::to_string(&config).unwrap();
        let back: TableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(TurnDirection::Clockwise.step(), 1);
        assert_eq!(TurnDirection::Clockwise.reversed().step(), -1);
    }
}
