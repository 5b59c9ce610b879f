//! WASM API for character sheet rendering
//!
//! JavaScript-facing entry points. Every function takes the export as text,
//! runs the pipeline and hands back plain JS objects (JSON-compatible) or
//! strings. Failures come back as `Error` objects carrying the message.

use crate::config::RenderConfig;
use crate::pipeline::{character_record, SheetRenderer};
use crate::record::TreeRecordBuilder;
use crate::renderers::SvgOverlay;
use crate::text;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    let msg = format!("{}: {}", context, err);
    log::error!("{}", msg);
    js_sys::Error::new(&msg).into()
}

/// Serialize with plain objects instead of JS `Map`s
fn serialize<T: Serialize>(value: &T, context: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| js_error(context, e))
}

fn load_config(config_json: Option<String>) -> Result<RenderConfig, JsValue> {
    match config_json {
        Some(json) if !json.trim().is_empty() => {
            RenderConfig::from_json(&json).map_err(|e| js_error("Config error", e))
        }
        _ => Ok(RenderConfig::default()),
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Repair legacy-encoded Cyrillic text
#[wasm_bindgen(js_name = repairText)]
pub fn repair_text(input: &str) -> String {
    text::repair(input)
}

/// Build the generic record of an export, for inspection
#[wasm_bindgen(js_name = buildCharacterRecord)]
pub fn build_character_record(xml: &str) -> Result<JsValue, JsValue> {
    log::info!("buildCharacterRecord called ({} bytes)", xml.len());

    let root = TreeRecordBuilder::new()
        .build_from_str(xml)
        .map_err(|e| js_error("Record build error", e))?;
    let character = character_record(&root).map_err(|e| js_error("Record build error", e))?;

    serialize(character, "Record serialization error")
}

/// Render an export into a display list of positioned text draws
#[wasm_bindgen(js_name = renderCharacterSheet)]
pub fn render_character_sheet(xml: &str, config_json: Option<String>) -> Result<JsValue, JsValue> {
    log::info!("renderCharacterSheet called ({} bytes)", xml.len());

    let renderer = SheetRenderer::new(load_config(config_json)?);
    let list = renderer
        .render_str(xml)
        .map_err(|e| js_error("Render error", e))?;

    serialize(&list, "Display list serialization error")
}

/// Render an export into a standalone SVG overlay
#[wasm_bindgen(js_name = renderOverlaySvg)]
pub fn render_overlay_svg(xml: &str, config_json: Option<String>) -> Result<String, JsValue> {
    log::info!("renderOverlaySvg called ({} bytes)", xml.len());

    let renderer = SheetRenderer::new(load_config(config_json)?);
    let list = renderer
        .render_str(xml)
        .map_err(|e| js_error("Render error", e))?;

    Ok(SvgOverlay::from_display_list(&list))
}
