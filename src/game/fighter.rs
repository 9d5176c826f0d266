//! Fighter State and Kinematics
//!
//! Per-fighter movement, jump arc, punch cooldown, and animation state.
//! All tuning values are design constants; fighters differ only in slot
//! and sprite set.

use serde::{Deserialize, Serialize};

use crate::core::timing::sanitize_dt;
use crate::core::vec2::Vec2;
use crate::game::combat::{HIT_ACTIVE_WINDOW, PUNCH_COOLDOWN};
use crate::game::input::FighterInput;

// =============================================================================
// DESIGN CONSTANTS
// =============================================================================

/// Left edge of the arena (world units).
pub const ARENA_MIN_X: f32 = 50.0;

/// Right edge of the arena (world units).
pub const ARENA_MAX_X: f32 = 750.0;

/// Horizontal movement speed, units/second.
pub const MOVE_SPEED: f32 = 200.0;

/// Upward velocity applied when a jump starts, units/second.
pub const JUMP_VELOCITY: f32 = 300.0;

/// Downward acceleration while airborne, units/second^2.
pub const GRAVITY: f32 = 600.0;

/// Full health at match start.
pub const MAX_HEALTH: f32 = 100.0;

/// Spawn X for the left-slot fighter.
pub const LEFT_SPAWN_X: f32 = 200.0;

/// Spawn X for the right-slot fighter.
pub const RIGHT_SPAWN_X: f32 = 600.0;

// =============================================================================
// FIGHTER SLOT
// =============================================================================

/// Which of the two arena slots a fighter occupies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum FighterSide {
    /// Left slot, spawns at [`LEFT_SPAWN_X`]
    Left = 0,
    /// Right slot, spawns at [`RIGHT_SPAWN_X`]
    Right = 1,
}

impl FighterSide {
    /// Array index for this slot.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The opposing slot.
    #[inline]
    pub fn opponent(self) -> FighterSide {
        match self {
            FighterSide::Left => FighterSide::Right,
            FighterSide::Right => FighterSide::Left,
        }
    }

    /// Spawn X position for this slot.
    #[inline]
    pub fn spawn_x(self) -> f32 {
        match self {
            FighterSide::Left => LEFT_SPAWN_X,
            FighterSide::Right => RIGHT_SPAWN_X,
        }
    }
}

// =============================================================================
// ANIMATION STATE
// =============================================================================

/// Fighter animation state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Animation {
    /// Standing / moving
    #[default]
    Idle = 0,
    /// Punch in progress (cooldown running)
    Punching = 1,
    /// Health reached zero; frozen until the next match
    KnockedOut = 2,
}

/// Opaque sprite resource handles for one fighter.
///
/// Identifiers are platform-neutral; the render adapter resolves them to
/// actual assets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterSprites {
    /// Handle for the idle pose
    pub idle: String,
    /// Handle for the punch pose
    pub punch: String,
    /// Handle for the knocked-out pose
    pub ko: String,
}

impl FighterSprites {
    /// Default sprite set for a slot.
    pub fn for_side(side: FighterSide) -> Self {
        let prefix = match side {
            FighterSide::Left => "fighter_left",
            FighterSide::Right => "fighter_right",
        };
        Self {
            idle: format!("{prefix}_idle"),
            punch: format!("{prefix}_punch"),
            ko: format!("{prefix}_ko"),
        }
    }

    /// Handle for an animation state.
    pub fn for_animation(&self, animation: Animation) -> &str {
        match animation {
            Animation::Idle => &self.idle,
            Animation::Punching => &self.punch,
            Animation::KnockedOut => &self.ko,
        }
    }
}

// =============================================================================
// FIGHTER
// =============================================================================

/// State of one fighter.
///
/// `position.y` is height above the ground line, not a screen row; the
/// render adapter maps world coordinates onto the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    /// Arena slot
    pub side: FighterSide,

    /// Position; y is height above ground
    pub position: Vec2,

    /// Horizontal movement speed, units/second
    pub speed: f32,

    /// Vertical velocity while airborne, units/second
    pub vertical_velocity: f32,

    /// Currently in a jump arc
    pub airborne: bool,

    /// Seconds until the next punch may trigger; the window just after
    /// triggering doubles as the active-hit window
    pub punch_cooldown: f32,

    /// Remaining health, clamped to [0, MAX_HEALTH]
    pub health: f32,

    /// Current animation state
    pub animation: Animation,

    /// Sprite resource handles
    pub sprites: FighterSprites,
}

impl Fighter {
    /// Create a fighter at its slot's spawn point with full health.
    pub fn new(side: FighterSide) -> Self {
        Self {
            side,
            position: Vec2::new(side.spawn_x(), 0.0),
            speed: MOVE_SPEED,
            vertical_velocity: 0.0,
            airborne: false,
            punch_cooldown: 0.0,
            health: MAX_HEALTH,
            animation: Animation::Idle,
            sprites: FighterSprites::for_side(side),
        }
    }

    /// Reset to spawn for a new match. Sprites and speed are kept.
    pub fn reset(&mut self) {
        self.position = Vec2::new(self.side.spawn_x(), 0.0);
        self.vertical_velocity = 0.0;
        self.airborne = false;
        self.punch_cooldown = 0.0;
        self.health = MAX_HEALTH;
        self.animation = Animation::Idle;
    }

    /// Check if this fighter is knocked out.
    #[inline]
    pub fn is_knocked_out(&self) -> bool {
        self.animation == Animation::KnockedOut
    }

    /// Check if this fighter's punch is currently able to deal damage.
    ///
    /// True during the first [`HIT_ACTIVE_WINDOW`] seconds after a punch
    /// triggers: the cooldown was just set to [`PUNCH_COOLDOWN`] and has
    /// not yet decayed past the derived threshold.
    #[inline]
    pub fn hit_active(&self) -> bool {
        self.animation == Animation::Punching
            && self.punch_cooldown > PUNCH_COOLDOWN - HIT_ACTIVE_WINDOW
    }

    /// Advance this fighter by one frame.
    ///
    /// A knocked-out fighter is frozen: position, health, and timers never
    /// change again until [`Fighter::reset`].
    pub fn advance(&mut self, dt: f32, input: FighterInput) {
        let dt = sanitize_dt(dt);

        if self.is_knocked_out() {
            return;
        }

        // Horizontal movement, clamped to the arena
        if input.left_held() {
            self.position.x -= self.speed * dt;
        }
        if input.right_held() {
            self.position.x += self.speed * dt;
        }
        self.position.x = self.position.x.clamp(ARENA_MIN_X, ARENA_MAX_X);

        // Jump arc; one jump per landing, no input buffering
        if !self.airborne && input.jump_pressed() {
            self.airborne = true;
            self.vertical_velocity = JUMP_VELOCITY;
        }
        if self.airborne {
            self.position.y += self.vertical_velocity * dt;
            self.vertical_velocity -= GRAVITY * dt;
            if self.position.y <= 0.0 {
                self.position.y = 0.0;
                self.vertical_velocity = 0.0;
                self.airborne = false;
            }
        }

        // Cooldown decay, floored at zero
        if self.punch_cooldown > 0.0 {
            self.punch_cooldown = (self.punch_cooldown - dt).max(0.0);
        }

        // Punch trigger. Jump and punch are independent: a punch started
        // while airborne is permitted.
        if input.punch_pressed() && self.punch_cooldown <= 0.0 {
            self.animation = Animation::Punching;
            self.punch_cooldown = PUNCH_COOLDOWN;
        } else if self.punch_cooldown < PUNCH_COOLDOWN - HIT_ACTIVE_WINDOW && !self.airborne {
            self.animation = Animation::Idle;
        }
    }

    /// Apply punch damage to this fighter.
    ///
    /// Health floors at zero; reaching zero forces the animation to
    /// `KnockedOut` regardless of any cooldown in progress. Returns the
    /// remaining health.
    pub fn take_punch(&mut self, damage: f32) -> f32 {
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            self.animation = Animation::KnockedOut;
        }
        self.health
    }
}

// =============================================================================
// TESTS
// =============================================================================
