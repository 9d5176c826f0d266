//! Draw Surface
//!
//! The core does not render. Once per frame the host asks for an ordered
//! list of [`DrawCommand`]s and executes them with whatever graphics stack
//! it has; texture identifiers stay opaque strings end to end.
//!
//! Commands use canvas coordinates (800x600, y growing downward). Fighter
//! height-above-ground is mapped onto the canvas here, at the boundary,
//! not inside the simulation.

use serde::{Deserialize, Serialize};

use crate::game::combat::BODY_RADIUS;
use crate::game::fighter::{Fighter, FighterSide, MAX_HEALTH};
use crate::game::screen::{MenuButton, Screen};
use crate::game::state::{GameState, Outcome};

// =============================================================================
// CANVAS LAYOUT
// =============================================================================

/// Canvas width the layout targets.
pub const CANVAS_WIDTH: f32 = 800.0;

/// Canvas height the layout targets.
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Canvas Y of the ground line fighters stand on.
pub const GROUND_LINE_Y: f32 = 500.0;

/// Drawn fighter width (matches the collision diameter).
pub const FIGHTER_WIDTH: f32 = BODY_RADIUS * 2.0;

/// Drawn fighter height.
pub const FIGHTER_HEIGHT: f32 = 120.0;

/// Health bar width at full health.
pub const HEALTH_BAR_WIDTH: f32 = 300.0;

/// Health bar height.
pub const HEALTH_BAR_HEIGHT: f32 = 20.0;

/// Canvas Y of the health bar centers.
pub const HEALTH_BAR_Y: f32 = 40.0;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// RGB color, each channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Create a color from channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// White
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Health bar fill
    pub const HEALTH_RED: Self = Self::rgb(0.8, 0.1, 0.1);
    /// Button fill
    pub const BUTTON_GRAY: Self = Self::rgb(0.3, 0.3, 0.35);
}

/// One primitive for the host to draw. Commands are emitted back-to-front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Filled/outlined rectangle centered at (cx, cy).
    Rect {
        /// Center X
        cx: f32,
        /// Center Y
        cy: f32,
        /// Width
        w: f32,
        /// Height
        h: f32,
        /// Fill color
        fill: Color,
        /// Optional texture resource identifier
        texture: Option<String>,
        /// Outline opacity in [0, 1]; 0 disables the outline
        outline_opacity: f32,
        /// Outline width in pixels
        outline_width: f32,
    },

    /// Text anchored at (x, y).
    Text {
        /// Anchor X
        x: f32,
        /// Anchor Y
        y: f32,
        /// Glyph size in pixels
        size: f32,
        /// The string to draw
        text: String,
        /// Fill color
        fill: Color,
    },
}

impl DrawCommand {
    /// Plain filled rectangle, no texture, no outline.
    pub fn filled_rect(cx: f32, cy: f32, w: f32, h: f32, fill: Color) -> Self {
        DrawCommand::Rect {
            cx,
            cy,
            w,
            h,
            fill,
            texture: None,
            outline_opacity: 0.0,
            outline_width: 0.0,
        }
    }
}

// =============================================================================
// SCENE BUILDING
// =============================================================================

/// Build the draw list for the current screen.
///
/// Pure function of state: same state, same commands.
pub fn draw(state: &GameState) -> Vec<DrawCommand> {
    match state.screen {
        Screen::Menu => draw_menu(state),
        Screen::Game => draw_game(state),
        // Nothing is drawn on the frame the loop stops
        Screen::Exit => Vec::new(),
    }
}

fn draw_menu(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(1 + state.buttons.len() * 2);

    commands.push(DrawCommand::Text {
        x: CANVAS_WIDTH / 2.0 - 160.0,
        y: 150.0,
        size: 70.0,
        text: "ARENA DUEL".to_string(),
        fill: Color::WHITE,
    });

    for button in &state.buttons {
        commands.extend(draw_button(button));
    }

    commands
}

fn draw_button(button: &MenuButton) -> [DrawCommand; 2] {
    [
        DrawCommand::Rect {
            cx: button.center.x,
            cy: button.center.y,
            w: button.width,
            h: button.height,
            fill: Color::BUTTON_GRAY,
            texture: None,
            outline_opacity: 1.0,
            outline_width: 2.0,
        },
        DrawCommand::Text {
            x: button.center.x - button.label.len() as f32 * 7.0,
            y: button.center.y + 10.0,
            size: 28.0,
            text: button.label.clone(),
            fill: Color::WHITE,
        },
    ]
}

fn draw_game(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(8);

    // Arena floor
    commands.push(DrawCommand::filled_rect(
        CANVAS_WIDTH / 2.0,
        GROUND_LINE_Y + 50.0,
        CANVAS_WIDTH,
        100.0,
        Color::rgb(0.2, 0.2, 0.2),
    ));

    for fighter in &state.fighters {
        commands.push(draw_fighter(fighter));
    }

    commands.extend(draw_health_bar(state.fighter(FighterSide::Left)));
    commands.extend(draw_health_bar(state.fighter(FighterSide::Right)));

    if let Some(outcome) = state.outcome {
        let text = match outcome {
            Outcome::Winner(FighterSide::Left) => "Left fighter wins!",
            Outcome::Winner(FighterSide::Right) => "Right fighter wins!",
            Outcome::Draw => "Double knockout!",
        };
        commands.push(DrawCommand::Text {
            x: CANVAS_WIDTH / 2.0 - 170.0,
            y: 200.0,
            size: 48.0,
            text: text.to_string(),
            fill: Color::WHITE,
        });
    }

    commands
}

/// Map a fighter onto the canvas. World y is height above the ground
/// line; the canvas y axis points down.
fn draw_fighter(fighter: &Fighter) -> DrawCommand {
    let sprite = fighter.sprites.for_animation(fighter.animation);
    DrawCommand::Rect {
        cx: fighter.position.x,
        cy: GROUND_LINE_Y - fighter.position.y - FIGHTER_HEIGHT / 2.0,
        w: FIGHTER_WIDTH,
        h: FIGHTER_HEIGHT,
        fill: Color::WHITE,
        texture: Some(sprite.to_string()),
        outline_opacity: 0.0,
        outline_width: 0.0,
    }
}

/// Health bar: an outlined frame plus a fill that drains toward the
/// fighter's own edge of the screen.
fn draw_health_bar(fighter: &Fighter) -> [DrawCommand; 2] {
    let (frame_cx, anchor_x) = match fighter.side {
        FighterSide::Left => (50.0 + HEALTH_BAR_WIDTH / 2.0, 50.0),
        FighterSide::Right => (
            CANVAS_WIDTH - 50.0 - HEALTH_BAR_WIDTH / 2.0,
            CANVAS_WIDTH - 50.0,
        ),
    };

    let fraction = (fighter.health / MAX_HEALTH).clamp(0.0, 1.0);
    let fill_width = HEALTH_BAR_WIDTH * fraction;
    let fill_cx = match fighter.side {
        FighterSide::Left => anchor_x + fill_width / 2.0,
        FighterSide::Right => anchor_x - fill_width / 2.0,
    };

    [
        DrawCommand::Rect {
            cx: frame_cx,
            cy: HEALTH_BAR_Y,
            w: HEALTH_BAR_WIDTH,
            h: HEALTH_BAR_HEIGHT,
            fill: Color::BLACK,
            texture: None,
            outline_opacity: 1.0,
            outline_width: 2.0,
        },
        DrawCommand::filled_rect(
            fill_cx,
            HEALTH_BAR_Y,
            fill_width,
            HEALTH_BAR_HEIGHT - 4.0,
            Color::HEALTH_RED,
        ),
    ]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fighter::Animation;
    use crate::game::state::GameState;
    use uuid::Uuid;

    #[test]
    fn test_menu_scene_lists_buttons() {
        let state = GameState::with_bout_id(Uuid::nil());
        let commands = draw(&state);

        let labels: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"Play"));
        assert!(labels.contains(&"Quit"));
    }

    #[test]
    fn test_game_scene_uses_animation_sprite() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        state.screen = Screen::Game;
        state.fighters[0].animation = Animation::KnockedOut;

        let commands = draw(&state);
        let textures: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect {
                    texture: Some(t), ..
                } => Some(t.as_str()),
                _ => None,
            })
            .collect();

        assert!(textures.contains(&"fighter_left_ko"));
        assert!(textures.contains(&"fighter_right_idle"));
    }

    #[test]
    fn test_health_bar_fill_is_proportional() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        state.screen = Screen::Game;
        state.fighters[0].health = 50.0;

        let commands = draw(&state);
        let has_half_bar = commands.iter().any(|c| {
            matches!(
                c,
                DrawCommand::Rect { w, fill, .. }
                    if *fill == Color::HEALTH_RED && (*w - HEALTH_BAR_WIDTH / 2.0).abs() < 1e-3
            )
        });
        assert!(has_half_bar);
    }

    #[test]
    fn test_outcome_banner_drawn_once_decided() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        state.screen = Screen::Game;

        let before: Vec<_> = draw(&state);
        assert!(!before.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text.contains("wins")
        )));

        state.outcome = Some(Outcome::Winner(crate::game::fighter::FighterSide::Right));
        let after = draw(&state);
        assert!(after.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "Right fighter wins!"
        )));
    }

    #[test]
    fn test_exit_scene_is_empty() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        state.screen = Screen::Exit;
        assert!(draw(&state).is_empty());
    }

    #[test]
    fn test_draw_is_pure() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        state.screen = Screen::Game;
        assert_eq!(draw(&state), draw(&state));
    }

    #[test]
    fn test_fighter_maps_onto_ground_line() {
        let mut state = GameState::with_bout_id(Uuid::nil());
        state.screen = Screen::Game;
        state.fighters[0].position.y = 50.0;

        let commands = draw(&state);
        let fighter_cy = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Rect {
                    cy,
                    texture: Some(t),
                    ..
                } if t == "fighter_left_idle" => Some(*cy),
                _ => None,
            })
            .expect("left fighter drawn");

        // 50 units off the ground lifts the rect by 50 canvas pixels
        assert_eq!(fighter_cy, GROUND_LINE_Y - 50.0 - FIGHTER_HEIGHT / 2.0);
    }
}
