//! Layout Engine - places field values into fixed page regions
//!
//! For each request the engine looks up the field's [`FieldSpec`], applies
//! signed formatting, shrinks the font when the text overruns the field's
//! character budget, centers it on the anchor when asked to, and issues one
//! [`DrawText`] against the surface.
//!
//! Text width is approximated as `font_size / 4` per character, the metric the
//! template coordinates were tuned against. Fields are independent: placement
//! order never changes the result and overlaps are not resolved.

use super::display_list::{DrawSurface, DrawText};
use super::field_spec::{Alignment, FieldSpec, FieldTable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Smallest font size auto-fit shrinks to; longer text is clipped visually
pub const DEFAULT_MIN_FONT_SIZE: f32 = 5.0;

/// Approximate glyph advance as a fraction of the font size
const GLYPH_WIDTH_RATIO: f32 = 0.25;

/// A value destined for one named field
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub field: String,
    pub value: String,

    /// Replaces the field's default font size; auto-fit still applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl RenderRequest {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            font_size: None,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }
}

/// Prefix positive integers with `+` for signed fields.
///
/// Values that already carry a sign, and values that are not integers, are
/// returned unchanged.
pub fn signed_text<'a>(spec: &FieldSpec, value: &'a str) -> Cow<'a, str> {
    if !spec.signed {
        return Cow::Borrowed(value);
    }
    let trimmed = value.trim();
    if trimmed.starts_with('+') {
        return Cow::Borrowed(value);
    }
    match trimmed.parse::<i64>() {
        Ok(number) if number > 0 => Cow::Owned(format!("+{}", trimmed)),
        Ok(_) => Cow::Borrowed(value),
        Err(_) => {
            log::warn!("Signed field '{}' got non-numeric value '{}'", spec.name, value);
            Cow::Borrowed(value)
        }
    }
}

/// Font size after auto-fit: `size * limit / length` when the text overruns,
/// never below `min_font_size`. `size` is the override when one is given,
/// otherwise the spec default.
pub fn effective_font_size(
    spec: &FieldSpec,
    size_override: Option<f32>,
    length: usize,
    min_font_size: f32,
) -> f32 {
    let size = size_override
        .filter(|size| *size > 0.0)
        .unwrap_or(spec.default_font_size);
    if !spec.auto_fit || length <= spec.max_length {
        return size;
    }
    let shrunk = size * spec.max_length as f32 / length as f32;
    shrunk.max(min_font_size)
}

/// Places values onto a surface using a static field table
pub struct LayoutEngine<'t> {
    table: &'t FieldTable,
    min_font_size: f32,
}

impl<'t> LayoutEngine<'t> {
    pub fn new(table: &'t FieldTable) -> Self {
        Self {
            table,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
        }
    }

    pub fn with_min_font_size(mut self, min_font_size: f32) -> Self {
        self.min_font_size = min_font_size;
        self
    }

    pub fn table(&self) -> &'t FieldTable {
        self.table
    }

    /// Compute the draw for one field without issuing it.
    ///
    /// # Panics
    /// When `field` is not in the table. The table is static, so an unknown
    /// name means the caller and the table disagree at build time.
    pub fn layout(&self, field: &str, value: &str) -> DrawText {
        self.layout_sized(field, value, None)
    }

    /// [`LayoutEngine::layout`] with an optional font size replacing the
    /// spec default. Zero or negative overrides are ignored.
    pub fn layout_sized(&self, field: &str, value: &str, font_size: Option<f32>) -> DrawText {
        let Some(spec) = self.table.get(field) else {
            panic!("No field spec for '{}'", field);
        };

        let text = signed_text(spec, value).into_owned();
        let length = text.chars().count();
        let font_size = effective_font_size(spec, font_size, length, self.min_font_size);

        // Fractional quarter of the size, not the integer `size / 4` of the
        // legacy layout: 9pt text shifts 2.25 per character rather than 2.
        let x = match spec.alignment {
            Alignment::Centered => spec.x - font_size * GLYPH_WIDTH_RATIO * length as f32,
            Alignment::Left | Alignment::Right => spec.x,
        };
        let y = spec.y - font_size * GLYPH_WIDTH_RATIO;

        DrawText {
            field: spec.name.to_string(),
            text,
            x,
            y,
            font_size,
        }
    }

    /// Lay out one field and draw it. Calling twice draws twice.
    pub fn place(&self, surface: &mut dyn DrawSurface, field: &str, value: &str) {
        self.draw(surface, self.layout(field, value));
    }

    /// Place a request, honoring its font size override
    pub fn place_request(&self, surface: &mut dyn DrawSurface, request: &RenderRequest) {
        let op = self.layout_sized(&request.field, &request.value, request.font_size);
        self.draw(surface, op);
    }

    fn draw(&self, surface: &mut dyn DrawSurface, op: DrawText) {
        log::debug!(
            "Placing '{}' = '{}' at ({:.1}, {:.1}) size {:.1}",
            op.field,
            op.text,
            op.x,
            op.y,
            op.font_size
        );
        surface.draw_text(&op);
    }

    pub fn place_all(&self, surface: &mut dyn DrawSurface, requests: &[RenderRequest]) {
        for request in requests {
            self.place_request(surface, request);
        }
    }
}
