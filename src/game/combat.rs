//! Punch Resolution and Body Separation
//!
//! Damage is dealt only inside the active-hit window: the brief interval
//! right after a punch triggers, derived from the cooldown constants below
//! rather than hard-coded as a second threshold.

use serde::{Deserialize, Serialize};

use crate::game::fighter::{Fighter, FighterSide};

// =============================================================================
// COMBAT CONSTANTS
// =============================================================================

/// Seconds between punch triggers. The cooldown timer is also the
/// active-window marker: a punch deals damage while the remaining cooldown
/// is within [`HIT_ACTIVE_WINDOW`] of this value.
pub const PUNCH_COOLDOWN: f32 = 0.5;

/// Seconds after a punch triggers during which contact deals damage.
pub const HIT_ACTIVE_WINDOW: f32 = 0.05;

/// Maximum horizontal distance at which a punch connects.
pub const PUNCH_REACH: f32 = 60.0;

/// Body collision radius; two fighters never interpenetrate closer than
/// twice this.
pub const BODY_RADIUS: f32 = 30.0;

/// Health removed per landed punch.
pub const PUNCH_DAMAGE: f32 = 3.0;

// =============================================================================
// PUNCH RESOLUTION
// =============================================================================

/// Report of one landed punch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PunchHit {
    /// Who landed the punch
    pub attacker: FighterSide,
    /// Who took it
    pub defender: FighterSide,
    /// Damage applied
    pub damage: f32,
    /// Defender health after the hit
    pub health_after: f32,
    /// The hit reduced the defender to zero
    pub knockout: bool,
}

/// Check whether an attacker's punch connects with a defender right now.
///
/// Requires the attacker to be inside the active-hit window, the defender
/// within reach, and the defender still standing.
#[inline]
pub fn punch_lands(attacker: &Fighter, defender: &Fighter) -> bool {
    attacker.hit_active()
        && (attacker.position.x - defender.position.x).abs() < PUNCH_REACH
        && defender.health > 0.0
}

/// Evaluate one ordered attacker/defender pair and apply damage on contact.
pub fn check_punch(attacker: &Fighter, defender: &mut Fighter) -> Option<PunchHit> {
    if !punch_lands(attacker, defender) {
        return None;
    }

    let health_after = defender.take_punch(PUNCH_DAMAGE);
    Some(PunchHit {
        attacker: attacker.side,
        defender: defender.side,
        damage: PUNCH_DAMAGE,
        health_after,
        knockout: defender.is_knocked_out(),
    })
}

/// Resolve punches for both orderings of the pair, once per frame.
///
/// Both orderings are evaluated against the same pre-damage state before
/// either hit is applied, so evaluation order cannot matter and a
/// simultaneous mutual knockout is possible.
pub fn resolve_punches(fighters: &mut [Fighter; 2]) -> Vec<PunchHit> {
    let lands_lr = punch_lands(&fighters[0], &fighters[1]);
    let lands_rl = punch_lands(&fighters[1], &fighters[0]);

    let mut hits = Vec::new();
    if lands_lr {
        let attacker = fighters[0].side;
        let health_after = fighters[1].take_punch(PUNCH_DAMAGE);
        hits.push(PunchHit {
            attacker,
            defender: fighters[1].side,
            damage: PUNCH_DAMAGE,
            health_after,
            knockout: fighters[1].is_knocked_out(),
        });
    }
    if lands_rl {
        let attacker = fighters[1].side;
        let health_after = fighters[0].take_punch(PUNCH_DAMAGE);
        hits.push(PunchHit {
            attacker,
            defender: fighters[0].side,
            damage: PUNCH_DAMAGE,
            health_after,
            knockout: fighters[0].is_knocked_out(),
        });
    }
    hits
}

// =============================================================================
// BODY SEPARATION
// =============================================================================

/// Push two overlapping fighters apart.
///
/// Each fighter is a circle of [`BODY_RADIUS`]. When the horizontal center
/// distance drops below the combined radii, both are re-centered
/// symmetrically around their shared midpoint, each moving half the
/// overlap. The pre-push left/right ordering is always preserved; slot
/// order breaks an exact positional tie. Runs unconditionally: a
/// knocked-out fighter still occupies space.
pub fn resolve_overlap(a: &mut Fighter, b: &mut Fighter) {
    let min_separation = BODY_RADIUS * 2.0;
    let dx = b.position.x - a.position.x;
    if dx.abs() >= min_separation {
        return;
    }

    let mid = (a.position.x + b.position.x) * 0.5;
    let a_stays_left = if a.position.x != b.position.x {
        a.position.x < b.position.x
    } else {
        a.side <= b.side
    };

    if a_stays_left {
        a.position.x = mid - BODY_RADIUS;
        b.position.x = mid + BODY_RADIUS;
    } else {
        a.position.x = mid + BODY_RADIUS;
        b.position.x = mid - BODY_RADIUS;
    }
}

// =============================================================================
// TESTS
// =============================================================================
