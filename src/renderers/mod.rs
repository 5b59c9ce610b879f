//! Renderers module for the character sheet overlay
//!
//! This module contains placement and output logic for turning derived
//! values into positioned text on a fixed page layout.

pub mod display_list;
pub mod field_spec;
pub mod layout_engine;
pub mod svg;

// Re-export commonly used types
pub use display_list::{DisplayList, DrawSurface, DrawText};
pub use field_spec::{Alignment, FieldSpec, FieldTable};
pub use layout_engine::{
    effective_font_size, signed_text, LayoutEngine, RenderRequest, DEFAULT_MIN_FONT_SIZE,
};
pub use svg::SvgOverlay;
