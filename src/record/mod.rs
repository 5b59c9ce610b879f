//! Schema-free character records
//!
//! Exports vary between tool versions, so nothing here assumes a fixed shape:
//! [`TreeRecordBuilder`] turns whatever tree it is given into a
//! [`GenericRecord`], and readers ask for fields by name.

pub mod builder;
pub mod errors;
pub mod generic;

pub use builder::{decode_input, slugify, BuilderOptions, TreeRecordBuilder};
pub use errors::{OptionalField, RecordError, RecordResult};
pub use generic::GenericRecord;
