//! Character Sheet Overlay WASM Module
//!
//! Turns a character export (a labeled XML tree, possibly with legacy-encoded
//! Cyrillic) into positioned text for a fixed-layout sheet template:
//!
//! - [`text`]: legacy text repair
//! - [`record`]: schema-free record building
//! - [`stats`]: derived values (modifiers, weapons, spellcasting, armor class)
//! - [`renderers`]: field placement and overlay output
//! - [`pipeline`]: the glue that runs one render pass

pub mod api;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod record;
pub mod renderers;
pub mod stats;
pub mod text;

// Re-export commonly used types
pub use config::RenderConfig;
pub use errors::{SheetError, SheetResult};
pub use pipeline::{character_record, OverlayOnly, PageMerge, SheetRenderer};
pub use record::{GenericRecord, OptionalField, RecordError, TreeRecordBuilder};
pub use renderers::{DisplayList, DrawSurface, DrawText, FieldSpec, FieldTable, LayoutEngine};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("Logger already installed");
    }

    log::info!("Character sheet WASM module initialized");
}
