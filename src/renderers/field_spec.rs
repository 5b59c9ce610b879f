//! Field placement table
//!
//! Every region the overlay can write into is declared here once. The table is
//! built on first use and never mutated afterwards; the layout engine borrows
//! it for the whole render pass.
//!
//! Coordinates are in points with the origin at the bottom-left page corner
//! (612 × 792, the character sheet template).

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Horizontal placement relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Centered,
}

/// Static layout of one named output region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub default_font_size: f32,
    /// Character budget before auto-fit shrinks the font
    pub max_length: usize,
    pub alignment: Alignment,
    pub auto_fit: bool,
    /// Positive numbers get a `+` prefix
    pub signed: bool,
}

impl FieldSpec {
    /// Centered, auto-fitting, unsigned field
    pub const fn new(name: &'static str, x: f32, y: f32, default_font_size: f32, max_length: usize) -> Self {
        Self {
            name,
            x,
            y,
            default_font_size,
            max_length,
            alignment: Alignment::Centered,
            auto_fit: true,
            signed: false,
        }
    }

    pub const fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub const fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub const fn fixed_size(mut self) -> Self {
        self.auto_fit = false;
        self
    }
}

/// Lookup table of field specs by name
#[derive(Debug, Clone)]
pub struct FieldTable {
    specs: Vec<FieldSpec>,
    index: HashMap<&'static str, usize>,
}

impl FieldTable {
    /// Build a table; a later spec with a duplicate name replaces the earlier one
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        let mut index = HashMap::with_capacity(specs.len());
        for (position, spec) in specs.iter().enumerate() {
            if index.insert(spec.name, position).is_some() {
                log::warn!("Field '{}' declared twice, keeping the last", spec.name);
            }
        }
        Self { specs, index }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&position| &self.specs[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The bundled character sheet layout
    pub fn character_sheet() -> &'static FieldTable {
        &CHARACTER_SHEET
    }
}

static CHARACTER_SHEET: Lazy<FieldTable> = Lazy::new(|| FieldTable::new(character_sheet_fields()));

/// Vertical distance between rows of the save and skill lists
const LIST_ROW_STEP: f32 = 13.5;

const ABILITY_KEYS: [&str; 6] = [
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
];

const SKILL_KEYS: [&str; 18] = [
    "acrobatics",
    "animal_handling",
    "arcana",
    "athletics",
    "deception",
    "history",
    "insight",
    "intimidation",
    "investigation",
    "medicine",
    "nature",
    "perception",
    "performance",
    "persuasion",
    "religion",
    "sleight_of_hand",
    "stealth",
    "survival",
];

/// Names are leaked once for the lifetime of the process; the table is static
fn leak_name(name: String) -> &'static str {
    Box::leak(name.into_boxed_str())
}

fn character_sheet_fields() -> Vec<FieldSpec> {
    let mut specs = vec![
        // Header
        FieldSpec::new("character_name", 128.0, 722.0, 16.0, 22),
        FieldSpec::new("class_level", 300.0, 735.0, 9.0, 20),
        FieldSpec::new("background", 395.0, 735.0, 9.0, 16),
        FieldSpec::new("race", 300.0, 710.0, 9.0, 16),
        FieldSpec::new("alignment", 395.0, 710.0, 9.0, 16),
        FieldSpec::new("experience", 490.0, 710.0, 9.0, 10),
        // Combat block
        FieldSpec::new("proficiency_bonus", 98.0, 655.0, 12.0, 3).signed(),
        FieldSpec::new("armor_class", 237.0, 646.0, 16.0, 3).fixed_size(),
        FieldSpec::new("armor_class_explanation", 237.0, 630.0, 6.0, 36),
        FieldSpec::new("initiative", 293.0, 646.0, 16.0, 3).signed(),
        FieldSpec::new("speed", 350.0, 646.0, 16.0, 4),
        FieldSpec::new("hp_max", 300.0, 598.0, 9.0, 5),
        FieldSpec::new("passive_perception", 40.0, 196.0, 10.0, 3).fixed_size(),
        // Spellcasting
        FieldSpec::new("spellcasting_ability", 470.0, 300.0, 9.0, 12),
        FieldSpec::new("spell_save_dc", 520.0, 300.0, 12.0, 3),
        FieldSpec::new("spell_attack_bonus", 565.0, 300.0, 12.0, 3).signed(),
    ];

    for (row, &key) in ABILITY_KEYS.iter().enumerate() {
        let box_y = 622.0 - 72.0 * row as f32;
        specs.push(FieldSpec::new(leak_name(format!("{}_mod", key)), 45.0, box_y, 18.0, 3).signed());
        specs.push(FieldSpec::new(key, 45.0, box_y - 24.0, 10.0, 3).fixed_size());

        let save_y = 612.0 - LIST_ROW_STEP * row as f32;
        specs.push(
            FieldSpec::new(leak_name(format!("{}_save", key)), 112.0, save_y, 8.0, 3)
                .signed()
                .aligned(Alignment::Right),
        );
    }

    for (row, key) in SKILL_KEYS.iter().enumerate() {
        let y = 505.0 - LIST_ROW_STEP * row as f32;
        specs.push(
            FieldSpec::new(leak_name(format!("skill_{}", key)), 112.0, y, 8.0, 3)
                .signed()
                .aligned(Alignment::Right),
        );
    }

    for row in 0..3 {
        let y = 380.0 - 20.0 * row as f32;
        let n = row + 1;
        specs.push(
            FieldSpec::new(leak_name(format!("weapon{}_name", n)), 220.0, y, 9.0, 14)
                .aligned(Alignment::Left),
        );
        specs.push(FieldSpec::new(leak_name(format!("weapon{}_attack", n)), 312.0, y, 9.0, 4));
        specs.push(FieldSpec::new(leak_name(format!("weapon{}_damage", n)), 370.0, y, 8.0, 14));
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::STANDARD_SKILLS;

    #[test]
    fn test_builder_methods() {
        let spec = FieldSpec::new("x", 1.0, 2.0, 10.0, 4)
            .signed()
            .aligned(Alignment::Left)
            .fixed_size();
        assert!(spec.signed);
        assert!(!spec.auto_fit);
        assert_eq!(spec.alignment, Alignment::Left);
    }

    #[test]
    fn test_character_sheet_table() {
        let table = FieldTable::character_sheet();
        assert_eq!(table.len(), 16 + 6 * 3 + 18 + 3 * 3);
        assert!(table.get("strength_mod").unwrap().signed);
        assert!(!table.get("strength").unwrap().signed);
        assert_eq!(table.get("weapon2_name").unwrap().y, 360.0);
        assert!(table.get("no_such_field").is_none());
    }

    #[test]
    fn test_every_standard_skill_has_a_region() {
        let table = FieldTable::character_sheet();
        for (key, _) in STANDARD_SKILLS {
            assert!(table.contains(&format!("skill_{}", key)), "missing skill_{}", key);
        }
    }

    #[test]
    fn test_duplicate_names_keep_last() {
        let table = FieldTable::new(vec![
            FieldSpec::new("a", 1.0, 1.0, 10.0, 3),
            FieldSpec::new("a", 2.0, 2.0, 10.0, 3),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").unwrap().x, 2.0);
    }
}
