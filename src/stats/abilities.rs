//! Ability scores, modifiers and saving throws

use crate::record::{GenericRecord, OptionalField, RecordResult};
use serde::{Deserialize, Serialize};

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Field key under `abilities` in an export
    pub fn key(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }

    /// Recognise an ability from free text: full English or Russian name, or
    /// the three-letter abbreviation. Case-insensitive.
    pub fn from_word(word: &str) -> Option<Ability> {
        let word = word.trim().to_lowercase();
        match word.as_str() {
            "strength" | "str" | "сила" => Some(Ability::Strength),
            "dexterity" | "dex" | "ловкость" => Some(Ability::Dexterity),
            "constitution" | "con" | "телосложение" => Some(Ability::Constitution),
            "intelligence" | "int" | "интеллект" => Some(Ability::Intelligence),
            "wisdom" | "wis" | "мудрость" => Some(Ability::Wisdom),
            "charisma" | "cha" | "харизма" => Some(Ability::Charisma),
            _ => None,
        }
    }
}

/// Render an integer with an explicit `+` when positive.
///
/// Negative values keep their minus sign and zero is bare.
pub fn format_signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Modifier for a raw score: `floor((score - 10) / 2)`
pub fn score_modifier(score: i64) -> i64 {
    (score - 10).div_euclid(2)
}

pub fn ability_score(record: &GenericRecord, ability: Ability) -> RecordResult<i64> {
    record.int_at(&format!("abilities.{}.score", ability.key()))
}

/// Exported `bonus` when present, otherwise derived from the score
pub fn ability_modifier(record: &GenericRecord, ability: Ability) -> RecordResult<i64> {
    let bonus = record
        .int_at(&format!("abilities.{}.bonus", ability.key()))
        .optional()?;
    match bonus {
        Some(bonus) => Ok(bonus),
        None => ability_score(record, ability).map(score_modifier),
    }
}

pub fn proficiency_bonus(record: &GenericRecord) -> RecordResult<i64> {
    record.int_at("profbonus")
}

/// Modifier plus proficiency when the save is marked proficient, plus any
/// exported save modifier
pub fn saving_throw(record: &GenericRecord, ability: Ability) -> RecordResult<i64> {
    let base = format!("abilities.{}", ability.key());
    let proficient = record
        .bool_at(&format!("{}.saveprof", base))
        .optional()?
        .unwrap_or(false);
    let misc = record
        .int_at(&format!("{}.savemodifier", base))
        .optional()?
        .unwrap_or(0);

    let mut total = ability_modifier(record, ability)? + misc;
    if proficient {
        total += proficiency_bonus(record)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordError, TreeRecordBuilder};

    fn character() -> GenericRecord {
        let xml = r#"<character>
            <abilities>
                <strength><bonus>1</bonus><score>12</score><saveprof>1</saveprof></strength>
                <dexterity><score>17</score><savemodifier>1</savemodifier></dexterity>
                <wisdom><score>7</score></wisdom>
            </abilities>
            <profbonus>2</profbonus>
        </character>"#;
        TreeRecordBuilder::new().build_from_str(xml).unwrap()
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(3), "+3");
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(-2), "-2");
    }

    #[test]
    fn test_score_modifier_rounds_down() {
        assert_eq!(score_modifier(10), 0);
        assert_eq!(score_modifier(11), 0);
        assert_eq!(score_modifier(17), 3);
        assert_eq!(score_modifier(7), -2);
        assert_eq!(score_modifier(1), -5);
    }

    #[test]
    fn test_modifier_prefers_exported_bonus() {
        let record = character();
        assert_eq!(ability_modifier(&record, Ability::Strength), Ok(1));
        assert_eq!(ability_modifier(&record, Ability::Dexterity), Ok(3));
        assert_eq!(ability_modifier(&record, Ability::Wisdom), Ok(-2));
    }

    #[test]
    fn test_missing_ability_is_an_error() {
        let record = character();
        assert!(matches!(
            ability_modifier(&record, Ability::Charisma),
            Err(RecordError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_saving_throws() {
        let record = character();
        assert_eq!(saving_throw(&record, Ability::Strength), Ok(3));
        assert_eq!(saving_throw(&record, Ability::Dexterity), Ok(4));
        assert_eq!(saving_throw(&record, Ability::Wisdom), Ok(-2));
    }

    #[test]
    fn test_from_word() {
        assert_eq!(Ability::from_word("Wisdom"), Some(Ability::Wisdom));
        assert_eq!(Ability::from_word(" DEX "), Some(Ability::Dexterity));
        assert_eq!(Ability::from_word("Харизма"), Some(Ability::Charisma));
        assert_eq!(Ability::from_word("base"), None);
    }
}
