//! Display List for overlay rendering
//!
//! The layout engine never draws directly; it issues [`DrawText`] operations
//! against a [`DrawSurface`]. A [`DisplayList`] records them so they can be
//! serialized to JavaScript or replayed onto another surface (SVG).

use serde::{Deserialize, Serialize};

/// One positioned text draw
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DrawText {
    /// Field this draw belongs to
    pub field: String,

    /// Text exactly as it should appear
    pub text: String,

    /// X position in points from the left page edge
    pub x: f32,

    /// Baseline Y position in points from the bottom page edge
    pub y: f32,

    /// Font size in points
    pub font_size: f32,
}

/// Anything text draws can be issued against
pub trait DrawSurface {
    fn draw_text(&mut self, op: &DrawText);
}

/// Flat recording of every draw in a render pass
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub page_width: f32,
    pub page_height: f32,
    pub font_family: String,
    pub items: Vec<DrawText>,
}

impl DisplayList {
    pub fn new(page_width: f32, page_height: f32, font_family: impl Into<String>) -> Self {
        Self {
            page_width,
            page_height,
            font_family: font_family.into(),
            items: Vec::new(),
        }
    }

    /// First draw issued for `field`
    pub fn find(&self, field: &str) -> Option<&DrawText> {
        self.items.iter().find(|item| item.field == field)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Issue every recorded draw, in order, against another surface
    pub fn replay(&self, surface: &mut dyn DrawSurface) {
        for item in &self.items {
            surface.draw_text(item);
        }
    }
}

impl DrawSurface for DisplayList {
    fn draw_text(&mut self, op: &DrawText) {
        self.items.push(op.clone());
    }
}
