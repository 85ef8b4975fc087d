//! Small geometry types shared between the settings, the registry and the GUI

use serde::{Deserialize, Serialize};

/// Screen position of a panel's top-left corner in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Position> for [f32; 2] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y]
    }
}

impl From<Position> for egui::Pos2 {
    fn from(pos: Position) -> Self {
        egui::pos2(pos.x, pos.y)
    }
}

impl From<egui::Pos2> for Position {
    fn from(pos: egui::Pos2) -> Self {
        Self::new(pos.x, pos.y)
    }
}

/// Width and height in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

impl From<Dimensions> for egui::Vec2 {
    fn from(dim: Dimensions) -> Self {
        egui::vec2(dim.width, dim.height)
    }
}
