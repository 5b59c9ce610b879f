//! Spellcasting ability detection and spell math

use super::abilities::{ability_modifier, proficiency_bonus, Ability};
use crate::record::{GenericRecord, OptionalField, RecordResult};
use once_cell::sync::Lazy;
use regex::Regex;

static SPELLCASTING_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\p{L}+)\s+is\s+your\s+spellcasting\s+ability")
        .expect("spellcasting pattern is valid")
});

/// Spell attack and save values for the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellcastingLine {
    pub ability: Ability,
    pub modifier: i64,
    /// 8 + proficiency + modifier
    pub save_dc: i64,
    /// proficiency + modifier
    pub attack_bonus: i64,
}

/// First ability named in a "`<word>` is your spellcasting ability" sentence
fn ability_in_text(text: &str) -> Option<Ability> {
    for caps in SPELLCASTING_SENTENCE.captures_iter(text) {
        match Ability::from_word(&caps[1]) {
            Some(ability) => return Some(ability),
            None => log::warn!("'{}' is not an ability, ignoring spellcasting sentence", &caps[1]),
        }
    }
    None
}

/// Scan feature descriptions for the spellcasting ability.
///
/// Features are read in export order and the first match wins; `default` is
/// used when no feature names one.
pub fn detect_spellcasting_ability(
    record: &GenericRecord,
    default: Ability,
) -> RecordResult<Ability> {
    let Some(features) = record.get("featurelist").optional()? else {
        return Ok(default);
    };

    for feature in features.members() {
        let Ok(description) = feature.text_at("text") else {
            continue;
        };
        if let Some(ability) = ability_in_text(description) {
            log::debug!("Spellcasting ability detected: {}", ability.display_name());
            return Ok(ability);
        }
    }

    Ok(default)
}

pub fn spellcasting(record: &GenericRecord, default: Ability) -> RecordResult<SpellcastingLine> {
    let ability = detect_spellcasting_ability(record, default)?;
    let modifier = ability_modifier(record, ability)?;
    let proficiency = proficiency_bonus(record)?;

    Ok(SpellcastingLine {
        ability,
        modifier,
        save_dc: 8 + proficiency + modifier,
        attack_bonus: proficiency + modifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TreeRecordBuilder;

    fn character(features: &str) -> GenericRecord {
        let xml = format!(
            r#"<character>
                <abilities>
                    <intelligence><score>10</score></intelligence>
                    <wisdom><score>16</score></wisdom>
                    <charisma><score>14</score></charisma>
                </abilities>
                <profbonus>2</profbonus>
                {}
            </character>"#,
            features
        );
        TreeRecordBuilder::new().build_from_str(&xml).unwrap()
    }

    #[test]
    fn test_wisdom_feature_drives_spell_math() {
        let record = character(
            r#"<featurelist>
                <id-00001><name>Fighting Style</name><text><p>You adopt a style.</p></text></id-00001>
                <id-00002><name>Spellcasting</name><text>
                    <p>You can cast cleric spells.</p>
                    <p>Wisdom is your spellcasting ability for your cleric spells.</p>
                </text></id-00002>
            </featurelist>"#,
        );
        let line = spellcasting(&record, Ability::Intelligence).unwrap();
        assert_eq!(line.ability, Ability::Wisdom);
        assert_eq!(line.modifier, 3);
        assert_eq!(line.save_dc, 13);
        assert_eq!(line.attack_bonus, 5);
    }

    #[test]
    fn test_defaults_to_intelligence() {
        let record = character(
            r#"<featurelist><id-00001><name>Rage</name><text><p>You rage.</p></text></id-00001></featurelist>"#,
        );
        let line = spellcasting(&record, Ability::Intelligence).unwrap();
        assert_eq!(line.ability, Ability::Intelligence);
        assert_eq!(line.save_dc, 10);
        assert_eq!(line.attack_bonus, 2);

        let no_features = character("");
        assert_eq!(
            detect_spellcasting_ability(&no_features, Ability::Intelligence),
            Ok(Ability::Intelligence)
        );
    }

    #[test]
    fn test_first_matching_feature_wins() {
        let record = character(
            r#"<featurelist>
                <id-00001><name>Pact Magic</name><text><p>Charisma is your spellcasting ability.</p></text></id-00001>
                <id-00002><name>Spellcasting</name><text><p>Wisdom is your spellcasting ability.</p></text></id-00002>
            </featurelist>"#,
        );
        assert_eq!(
            detect_spellcasting_ability(&record, Ability::Intelligence),
            Ok(Ability::Charisma)
        );
    }

    #[test]
    fn test_non_ability_word_is_skipped() {
        assert_eq!(ability_in_text("Which is your spellcasting ability?"), None);
        assert_eq!(
            ability_in_text("Magic is your spellcasting ability... no, CHARISMA is your spellcasting ability"),
            Some(Ability::Charisma)
        );
    }
}
