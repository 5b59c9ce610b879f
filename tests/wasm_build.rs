//! WASM build test
//!
//! Checks that the exported JavaScript entry points work in a browser.
#![cfg(target_arch = "wasm32")]

use charsheet_wasm::api::{render_character_sheet, render_overlay_svg, repair_text};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const RANGER: &str = include_str!("fixtures/ranger.xml");

#[wasm_bindgen_test]
fn test_repair_text() {
    assert_eq!(repair_text("\u{cf}\u{f0}\u{e8}\u{e2}\u{e5}\u{f2}"), "Привет");
}

#[wasm_bindgen_test]
fn test_render_overlay_svg() {
    let svg = render_overlay_svg(RANGER, None).unwrap();
    assert!(svg.contains(">Leila</text>"));
}

#[wasm_bindgen_test]
fn test_render_character_sheet_rejects_bad_config() {
    assert!(render_character_sheet(RANGER, Some("{ not json".to_string())).is_err());
    assert!(render_character_sheet(RANGER, None).is_ok());
}

#[wasm_bindgen_test]
fn test_malformed_export_is_an_error() {
    assert!(render_overlay_svg("<root>", None).is_err());
}
