//! Schema-free record structure
//!
//! A [`GenericRecord`] is what the tree builder produces from an export: text
//! leaves, ordered structs keyed by normalized tag names, and sequences for
//! repeated tags. Records are immutable once built; callers read fields by
//! name and get [`RecordError::FieldNotFound`] when an export lacks one.

use super::errors::{RecordError, RecordResult};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Path shown in errors for lookups made directly on a record
const ROOT_PATH: &str = "<root>";

/// One node of a built record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericRecord {
    /// Repaired text value
    Leaf(String),

    /// Uniquely-named fields, keyed in first-appearance order
    Struct {
        fields: Vec<(String, GenericRecord)>,
        /// Field index of each source child, in source order. Empty for
        /// records assembled by hand.
        order: Vec<usize>,
    },

    /// Repeated same-tag children, in source order
    Sequence(Vec<GenericRecord>),
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

fn shown_path(path: &str) -> String {
    if path.is_empty() {
        ROOT_PATH.to_string()
    } else {
        path.to_string()
    }
}

/// Parse leaf text as an integer.
///
/// Empty text reads as zero; exporters write blank number nodes for unset
/// values. Decimal text is floored.
fn parse_int(text: &str, path: &str) -> RecordResult<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.floor() as i64),
        _ => Err(RecordError::InvalidNumber {
            path: shown_path(path),
            value: trimmed.to_string(),
        }),
    }
}

fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "1" | "yes" | "true" | "on"
    )
}

fn push_flattened<'a>(out: &mut Vec<(&'a str, &'a GenericRecord)>, key: &'a str, value: &'a GenericRecord) {
    match value {
        GenericRecord::Sequence(items) => out.extend(items.iter().map(|item| (key, item))),
        _ => out.push((key, value)),
    }
}

/// Walk source children in order. A field that several children fed is a
/// sequence holding them in turn; a field fed once is flattened as a whole.
fn ordered_entries<'a>(
    fields: &'a [(String, GenericRecord)],
    order: &[usize],
) -> Vec<(&'a str, &'a GenericRecord)> {
    let mut fed = vec![0usize; fields.len()];
    for &index in order {
        if let Some(count) = fed.get_mut(index) {
            *count += 1;
        }
    }

    let mut taken = vec![0usize; fields.len()];
    let mut out = Vec::with_capacity(order.len());
    for &index in order {
        let Some((key, value)) = fields.get(index) else {
            continue;
        };
        match value {
            GenericRecord::Sequence(items) if fed[index] > 1 => {
                if let Some(item) = items.get(taken[index]) {
                    out.push((key.as_str(), item));
                }
                taken[index] += 1;
            }
            _ => push_flattened(&mut out, key, value),
        }
    }
    out
}

impl GenericRecord {
    pub fn leaf(text: impl Into<String>) -> Self {
        GenericRecord::Leaf(text.into())
    }

    /// Struct without source order; entries follow field order
    pub fn from_fields(fields: Vec<(String, GenericRecord)>) -> Self {
        GenericRecord::Struct {
            fields,
            order: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, GenericRecord::Leaf(_))
    }

    /// Look up a direct child by field name.
    ///
    /// On a sequence the name is an index (`"0"`, `"1"`, ...).
    pub fn get(&self, name: &str) -> RecordResult<&GenericRecord> {
        self.child(name, "")
    }

    fn child(&self, name: &str, path: &str) -> RecordResult<&GenericRecord> {
        let not_found = || RecordError::FieldNotFound {
            field: name.to_string(),
            path: shown_path(path),
        };

        match self {
            GenericRecord::Struct { fields, .. } => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value)
                .ok_or_else(not_found),
            GenericRecord::Sequence(items) => name
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))
                .ok_or_else(not_found),
            GenericRecord::Leaf(_) => Err(RecordError::NotAContainer {
                path: shown_path(path),
            }),
        }
    }

    /// Walk a dotted path such as `abilities.strength.score`
    pub fn path(&self, dotted: &str) -> RecordResult<&GenericRecord> {
        let mut current = self;
        let mut walked = String::new();
        for segment in dotted.split('.').filter(|s| !s.is_empty()) {
            current = current.child(segment, &walked)?;
            walked = join_path(&walked, segment);
        }
        Ok(current)
    }

    pub fn text(&self) -> RecordResult<&str> {
        match self {
            GenericRecord::Leaf(text) => Ok(text),
            _ => Err(RecordError::NotALeaf {
                path: ROOT_PATH.to_string(),
            }),
        }
    }

    /// Text of the leaf at a dotted path
    pub fn text_at(&self, dotted: &str) -> RecordResult<&str> {
        match self.path(dotted)? {
            GenericRecord::Leaf(text) => Ok(text),
            _ => Err(RecordError::NotALeaf {
                path: shown_path(dotted),
            }),
        }
    }

    pub fn as_i64(&self) -> RecordResult<i64> {
        parse_int(self.text()?, "")
    }

    /// Integer value of the leaf at a dotted path
    pub fn int_at(&self, dotted: &str) -> RecordResult<i64> {
        parse_int(self.text_at(dotted)?, dotted)
    }

    /// Exporter flags: `1`, `yes`, `true` and `on` are set, anything else is not
    pub fn as_bool(&self) -> RecordResult<bool> {
        Ok(parse_flag(self.text()?))
    }

    pub fn bool_at(&self, dotted: &str) -> RecordResult<bool> {
        Ok(parse_flag(self.text_at(dotted)?))
    }

    /// Children with their field names.
    ///
    /// Sequence-valued struct fields are flattened under their shared key.
    /// Items of a field whose tag repeated in the source are interleaved back
    /// into source order. Items of a bare sequence have an empty key. Leaves
    /// have no entries.
    pub fn entries(&self) -> Vec<(&str, &GenericRecord)> {
        match self {
            GenericRecord::Struct { fields, order } if !order.is_empty() => {
                ordered_entries(fields, order)
            }
            GenericRecord::Struct { fields, .. } => {
                let mut out = Vec::with_capacity(fields.len());
                for (key, value) in fields {
                    push_flattened(&mut out, key, value);
                }
                out
            }
            GenericRecord::Sequence(items) => items.iter().map(|item| ("", item)).collect(),
            GenericRecord::Leaf(_) => Vec::new(),
        }
    }

    /// Child records in order, see [`GenericRecord::entries`]
    pub fn members(&self) -> Vec<&GenericRecord> {
        self.entries().into_iter().map(|(_, value)| value).collect()
    }

    /// Field names of a struct, in source order
    pub fn keys(&self) -> Vec<&str> {
        match self {
            GenericRecord::Struct { fields, .. } => fields.iter().map(|(key, _)| key.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GenericRecord::Struct { fields, .. } => fields.len(),
            GenericRecord::Sequence(items) => items.len(),
            GenericRecord::Leaf(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for GenericRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GenericRecord::Leaf(text) => serializer.serialize_str(text),
            GenericRecord::Struct { fields, .. } => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            GenericRecord::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
