//! Fight Events
//!
//! Typed events emitted by the simulation, consumed by the demo binary and
//! by hosts that want to drive sound or UI effects off the frame loop.

use serde::{Deserialize, Serialize};

use crate::game::combat::PunchHit;
use crate::game::fighter::FighterSide;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Knockouts processed first
    Knockout = 0,
    /// Then landed punches
    PunchLanded = 1,
    /// Then bout outcomes
    MatchEnded = 2,
    /// Then screen transitions
    ScreenChange = 3,
    /// Lowest priority
    Other = 255,
}

/// Fight event data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum FightEventData {
    /// A new match started from the menu
    MatchStarted,

    /// A punch connected
    PunchLanded {
        /// Who landed it
        attacker: FighterSide,
        /// Who took it
        defender: FighterSide,
        /// Damage applied
        damage: f32,
        /// Defender health after the hit
        health_after: f32,
    },

    /// A fighter was knocked out
    Knockout {
        /// Who went down
        fighter: FighterSide,
        /// Who landed the finishing punch
        by: FighterSide,
    },

    /// The bout outcome was decided
    MatchEnded {
        /// Winning side; `None` on a mutual knockout
        winner: Option<FighterSide>,
    },

    /// Escape during play returned to the menu
    ReturnedToMenu,

    /// The exit screen was entered; the frame loop stops
    ExitRequested,
}

/// A fight event with frame stamp and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FightEvent {
    /// Frame when the event occurred
    pub frame: u64,

    /// Processing priority
    pub priority: EventPriority,

    /// Fighter involved (for tie-breaking)
    pub side: Option<FighterSide>,

    /// Event data
    pub data: FightEventData,
}

impl FightEvent {
    /// Create a new event.
    pub fn new(frame: u64, priority: EventPriority, data: FightEventData) -> Self {
        let side = match &data {
            FightEventData::PunchLanded { attacker, .. } => Some(*attacker),
            FightEventData::Knockout { fighter, .. } => Some(*fighter),
            FightEventData::MatchEnded { winner } => *winner,
            _ => None,
        };

        Self {
            frame,
            priority,
            side,
            data,
        }
    }

    /// Create a match-started event.
    pub fn match_started(frame: u64) -> Self {
        Self::new(frame, EventPriority::ScreenChange, FightEventData::MatchStarted)
    }

    /// Create a punch-landed event from a hit report.
    pub fn punch_landed(frame: u64, hit: &PunchHit) -> Self {
        Self::new(
            frame,
            EventPriority::PunchLanded,
            FightEventData::PunchLanded {
                attacker: hit.attacker,
                defender: hit.defender,
                damage: hit.damage,
                health_after: hit.health_after,
            },
        )
    }

    /// Create a knockout event.
    pub fn knockout(frame: u64, fighter: FighterSide, by: FighterSide) -> Self {
        Self::new(
            frame,
            EventPriority::Knockout,
            FightEventData::Knockout { fighter, by },
        )
    }

    /// Create a match-ended event.
    pub fn match_ended(frame: u64, winner: Option<FighterSide>) -> Self {
        Self::new(frame, EventPriority::MatchEnded, FightEventData::MatchEnded { winner })
    }

    /// Create a returned-to-menu event.
    pub fn returned_to_menu(frame: u64) -> Self {
        Self::new(frame, EventPriority::ScreenChange, FightEventData::ReturnedToMenu)
    }

    /// Create an exit-requested event.
    pub fn exit_requested(frame: u64) -> Self {
        Self::new(frame, EventPriority::ScreenChange, FightEventData::ExitRequested)
    }
}

impl PartialEq for FightEvent {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.priority == other.priority
            && self.side == other.side
    }
}

impl Eq for FightEvent {}

impl PartialOrd for FightEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FightEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: frame, then priority, then side
        self.frame
            .cmp(&other.frame)
            .then(self.priority.cmp(&other.priority))
            .then(self.side.cmp(&other.side))
    }
}
