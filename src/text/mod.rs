//! Text handling
//!
//! Repair of legacy-encoded Cyrillic found in character exports.

pub mod codec;

pub use codec::{encode_legacy, repair, repair_value};
