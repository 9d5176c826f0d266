//! Game State
//!
//! The single process-wide state object: current screen, the two fighters,
//! the menu, and the bout outcome. Constructed once at startup and passed
//! by mutable reference into the frame loop; nothing here is global.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::hash::{compute_state_digest, StateDigest};
use crate::game::events::FightEvent;
use crate::game::fighter::{Fighter, FighterSide};
use crate::game::screen::{default_buttons, MenuButton, Screen};

/// How a bout ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One side knocked the other out
    Winner(FighterSide),
    /// Mutual knockout on the same frame
    Draw,
}

/// Complete state of the game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Bout identifier, shared with any recording of this session
    pub bout_id: Uuid,

    /// Frames elapsed since startup
    pub frame: u64,

    /// Current screen
    pub screen: Screen,

    /// False once the exit screen is entered; the host loop must stop
    /// issuing update/draw calls
    pub running: bool,

    /// The two fighters, indexed by [`FighterSide`]
    pub fighters: [Fighter; 2],

    /// Menu buttons (hit-tested only while on the menu)
    pub buttons: Vec<MenuButton>,

    /// Outcome of the current match, once decided
    pub outcome: Option<Outcome>,

    /// Events generated this frame (drained by the orchestrator)
    #[serde(skip)]
    pending_events: Vec<FightEvent>,
}

impl GameState {
    /// Create the initial state: menu screen, fighters at spawn.
    pub fn new() -> Self {
        Self::with_bout_id(Uuid::new_v4())
    }

    /// Create the initial state with a known bout id (used by replay).
    pub fn with_bout_id(bout_id: Uuid) -> Self {
        Self {
            bout_id,
            frame: 0,
            screen: Screen::Menu,
            running: true,
            fighters: [
                Fighter::new(FighterSide::Left),
                Fighter::new(FighterSide::Right),
            ],
            buttons: default_buttons(),
            outcome: None,
            pending_events: Vec::new(),
        }
    }

    /// Get a fighter by side.
    #[inline]
    pub fn fighter(&self, side: FighterSide) -> &Fighter {
        &self.fighters[side.index()]
    }

    /// Get a fighter mutably by side.
    #[inline]
    pub fn fighter_mut(&mut self, side: FighterSide) -> &mut Fighter {
        &mut self.fighters[side.index()]
    }

    /// Start a match from the menu: reset both fighters and switch to the
    /// game screen.
    pub fn start_match(&mut self) {
        for fighter in &mut self.fighters {
            fighter.reset();
        }
        self.outcome = None;
        self.screen = Screen::Game;
        info!(bout_id = %self.bout_id, frame = self.frame, "match started");
        self.push_event(FightEvent::match_started(self.frame));
    }

    /// Return to the menu from play. Fighters are left as they stand.
    pub fn return_to_menu(&mut self) {
        self.screen = Screen::Menu;
        debug!(frame = self.frame, "returned to menu");
        self.push_event(FightEvent::returned_to_menu(self.frame));
    }

    /// Enter the terminal exit screen and stop the loop.
    pub fn enter_exit(&mut self) {
        self.screen = Screen::Exit;
        self.running = false;
        info!(frame = self.frame, "exit requested");
        self.push_event(FightEvent::exit_requested(self.frame));
    }

    /// Record the bout outcome if it has not been decided yet.
    ///
    /// Only the first decision per match sticks; later knockouts of an
    /// already-decided bout change nothing.
    pub fn record_outcome(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);

        let winner = match outcome {
            Outcome::Winner(side) => Some(side),
            Outcome::Draw => None,
        };
        info!(frame = self.frame, ?winner, "match ended");
        self.push_event(FightEvent::match_ended(self.frame, winner));
    }

    /// Check if the exit screen has been entered.
    #[inline]
    pub fn is_exited(&self) -> bool {
        matches!(self.screen, Screen::Exit)
    }

    /// Compute the digest of the simulation-relevant state.
    ///
    /// Menu geometry and sprite handles are static and excluded.
    pub fn digest(&self) -> StateDigest {
        compute_state_digest(self.frame, |hasher| {
            hasher.update_uuid(self.bout_id.as_bytes());
            hasher.update_u8(self.screen as u8);
            hasher.update_bool(self.running);

            match self.outcome {
                None => hasher.update_u8(0),
                Some(Outcome::Winner(side)) => {
                    hasher.update_u8(1);
                    hasher.update_u8(side as u8);
                }
                Some(Outcome::Draw) => hasher.update_u8(2),
            }

            for fighter in &self.fighters {
                hasher.update_u8(fighter.side as u8);
                hasher.update_vec2(fighter.position);
                hasher.update_f32(fighter.vertical_velocity);
                hasher.update_bool(fighter.airborne);
                hasher.update_f32(fighter.punch_cooldown);
                hasher.update_f32(fighter.health);
                hasher.update_u8(fighter.animation as u8);
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<FightEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a fight event.
    pub fn push_event(&mut self, event: FightEvent) {
        self.pending_events.push(event);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
