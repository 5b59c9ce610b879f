//! Legacy Cyrillic text repair
//!
//! Character exports written by older tools store Cyrillic in two broken forms:
//!
//! - **Single-byte glyphs**: each letter is the Windows-1251 byte value read back
//!   as a Latin-1 character (`Ï` for `П`, `ð` for `р`, ...). Bytes 192..=255 cover
//!   the 64-letter alphabet in order; 168 and 184 are `Ё` and `ё`.
//! - **Numeric references**: the same byte values written literally as `&#NNN;`,
//!   together with a handful of punctuation references.
//!
//! [`repair`] undoes both. It never fails: characters outside the legacy range
//! (already-correct Unicode) pass through untouched, which also makes the
//! function idempotent on its own output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Display;

/// First legacy code of the alphabet (`А`)
const FIRST_LETTER_CODE: u32 = 192;

/// Last legacy code of the alphabet (`я`)
const LAST_LETTER_CODE: u32 = 255;

/// Unicode code point of `А`; the 64 letters `А..я` are contiguous from here
const CYRILLIC_CAPITAL_A: u32 = 0x0410;

const LEGACY_YO_UPPER: u32 = 168;
const LEGACY_YO_LOWER: u32 = 184;

/// Punctuation references the exporter writes instead of the character itself
const NAMED_REFERENCES: [(u32, char); 7] = [
    (8226, '•'),
    (8212, '—'),
    (8722, '−'),
    (8217, '’'),
    (8211, '–'),
    (LEGACY_YO_LOWER, 'ё'),
    (LEGACY_YO_UPPER, 'Ё'),
];

static NUMERIC_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(\d{1,7});").expect("numeric reference pattern is valid"));

/// Map a legacy code (168, 184 or 192..=255) to its Cyrillic letter
fn letter_for_code(code: u32) -> Option<char> {
    match code {
        FIRST_LETTER_CODE..=LAST_LETTER_CODE => {
            char::from_u32(CYRILLIC_CAPITAL_A + (code - FIRST_LETTER_CODE))
        }
        LEGACY_YO_LOWER => Some('ё'),
        LEGACY_YO_UPPER => Some('Ё'),
        _ => None,
    }
}

/// Inverse of [`letter_for_code`]
fn code_for_letter(letter: char) -> Option<u32> {
    match letter {
        'ё' => Some(LEGACY_YO_LOWER),
        'Ё' => Some(LEGACY_YO_UPPER),
        'А'..='я' => Some(letter as u32 - CYRILLIC_CAPITAL_A + FIRST_LETTER_CODE),
        _ => None,
    }
}

/// Decode one character that may be a single-byte legacy glyph.
///
/// Anything that cannot be represented as a single Latin-1 byte is already
/// proper Unicode and is returned as is.
fn decode_glyph(c: char) -> char {
    let code = c as u32;
    if code > 0xFF {
        return c;
    }
    letter_for_code(code).unwrap_or(c)
}

fn decode_reference(caps: &Captures) -> String {
    let token = &caps[0];
    let Ok(code) = caps[1].parse::<u32>() else {
        return token.to_string();
    };

    if let Some((_, ch)) = NAMED_REFERENCES.iter().find(|(named, _)| *named == code) {
        return ch.to_string();
    }

    match code {
        FIRST_LETTER_CODE..=LAST_LETTER_CODE => letter_for_code(code)
            .map(String::from)
            .unwrap_or_else(|| token.to_string()),
        _ => token.to_string(),
    }
}

/// Repair legacy-encoded text into canonical Unicode.
///
/// Empty input returns an empty string. Unknown numeric references are left
/// in place.
pub fn repair(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let decoded: String = text.chars().map(decode_glyph).collect();
    if !decoded.contains("&#") {
        return decoded;
    }

    NUMERIC_REFERENCE
        .replace_all(&decoded, decode_reference)
        .into_owned()
}

/// Stringify and repair a non-string value (integers, mostly)
pub fn repair_value<T: Display>(value: T) -> String {
    repair(&value.to_string())
}

/// Encode Cyrillic letters as the numeric references the legacy exporter writes.
///
/// `repair(&encode_legacy(t)) == t` for any text.
pub fn encode_legacy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match code_for_letter(ch) {
            Some(code) => {
                out.push_str("&#");
                out.push_str(&code.to_string());
                out.push(';');
            }
            None => out.push(ch),
        }
    }
    out
}
