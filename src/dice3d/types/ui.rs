//! UI-related types and components
//!
//! This module contains the hint line, the result panel, the action buttons,
//! and the share status line.

use bevy::prelude::*;

use hongbao_dice_core::Place;

pub const BACKGROUND_RED: Color = Color::srgb(0.545, 0.0, 0.0);
pub const GOLD: Color = Color::srgb(1.0, 0.84, 0.0);
pub const IVORY: Color = Color::srgb(1.0, 0.98, 0.92);

pub const BUTTON_NORMAL: Color = Color::srgb(0.75, 0.1, 0.1);
pub const BUTTON_HOVERED: Color = Color::srgb(0.85, 0.2, 0.15);
pub const BUTTON_PRESSED: Color = Color::srgb(0.6, 0.45, 0.0);

/// Marker for the hint line above the dice
#[derive(Component)]
pub struct HintText;

/// Marker for the result panel root (hidden until the reveal)
#[derive(Component)]
pub struct ResultPanelRoot;

/// Marker for the formatted amount
#[derive(Component)]
pub struct AmountText;

/// Container of the per-die mini dice on the share card
#[derive(Component)]
pub struct BreakdownRow;

/// Marker for the line reporting share/download outcomes
#[derive(Component)]
pub struct ShareStatusText;

/// What a UI button does when pressed
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Share,
    Download,
    Restart,
}

impl ButtonAction {
    pub fn label(self) -> &'static str {
        match self {
            ButtonAction::Share => "Share",
            ButtonAction::Download => "Download",
            ButtonAction::Restart => "Play again",
        }
    }
}

/// Latest share/download outcome shown under the result panel
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct ShareStatus {
    pub message: String,
}

impl ShareStatus {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn clear(&mut self) {
        self.message.clear();
    }
}

/// Optional font able to draw the CJK place labels
#[derive(Resource, Default, Clone)]
pub struct UiFont {
    pub handle: Option<Handle<Font>>,
}

impl UiFont {
    pub fn text_font(&self, font_size: f32) -> TextFont {
        TextFont {
            font: self.handle.clone().unwrap_or_default(),
            font_size,
            ..default()
        }
    }

    /// The CJK label when a font is loaded, the English place name otherwise
    pub fn place_label(&self, place: Place) -> String {
        if self.handle.is_some() {
            format!("{}位", place.label())
        } else {
            place.english_name().to_string()
        }
    }

    pub fn title(&self) -> &'static str {
        if self.handle.is_some() {
            "新年擲骰子"
        } else {
            "Hongbao Dice"
        }
    }
}
