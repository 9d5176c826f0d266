//! Screens and Menu Buttons
//!
//! The top-level mode the game is in, plus the menu's clickable buttons.
//! Transitions are driven by the frame orchestrator.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Top-level UI/game mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Screen {
    /// Title menu (initial)
    #[default]
    Menu = 0,
    /// Active match
    Game = 1,
    /// Terminal; the frame loop stops the frame this is entered
    Exit = 2,
}

/// What clicking a menu button does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ButtonAction {
    /// Start a match (resets both fighters)
    Play = 0,
    /// Leave the game, same as Escape on the menu
    Quit = 1,
}

/// A clickable menu button with a centered, axis-aligned hit-region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuButton {
    /// Display label
    pub label: String,

    /// Action on click
    pub action: ButtonAction,

    /// Center of the hit rectangle
    pub center: Vec2,

    /// Hit rectangle width
    pub width: f32,

    /// Hit rectangle height
    pub height: f32,
}

impl MenuButton {
    /// Create a button.
    pub fn new(
        label: impl Into<String>,
        action: ButtonAction,
        center: Vec2,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            label: label.into(),
            action,
            center,
            width,
            height,
        }
    }

    /// Hit-test a point against this button. Bounds are inclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        x >= self.center.x - half_w
            && x <= self.center.x + half_w
            && y >= self.center.y - half_h
            && y <= self.center.y + half_h
    }
}

/// The stock menu layout: Play and Quit, stacked.
pub fn default_buttons() -> Vec<MenuButton> {
    vec![
        MenuButton::new("Play", ButtonAction::Play, Vec2::new(400.0, 250.0), 200.0, 50.0),
        MenuButton::new("Quit", ButtonAction::Quit, Vec2::new(400.0, 330.0), 200.0, 50.0),
    ]
}
