//! Skill bonuses and passive perception

use super::abilities::{ability_modifier, proficiency_bonus, Ability};
use crate::record::{slugify, GenericRecord, OptionalField, RecordResult};

/// Skill keys printed on the sheet, with their default ability
pub const STANDARD_SKILLS: [(&str, Ability); 18] = [
    ("acrobatics", Ability::Dexterity),
    ("animal_handling", Ability::Wisdom),
    ("arcana", Ability::Intelligence),
    ("athletics", Ability::Strength),
    ("deception", Ability::Charisma),
    ("history", Ability::Intelligence),
    ("insight", Ability::Wisdom),
    ("intimidation", Ability::Charisma),
    ("investigation", Ability::Intelligence),
    ("medicine", Ability::Wisdom),
    ("nature", Ability::Intelligence),
    ("perception", Ability::Wisdom),
    ("performance", Ability::Charisma),
    ("persuasion", Ability::Charisma),
    ("religion", Ability::Intelligence),
    ("sleight_of_hand", Ability::Dexterity),
    ("stealth", Ability::Dexterity),
    ("survival", Ability::Wisdom),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillBonus {
    pub key: String,
    pub ability: Ability,
    pub bonus: i64,
}

fn default_ability(key: &str) -> Option<Ability> {
    STANDARD_SKILLS
        .iter()
        .find(|(skill, _)| *skill == key)
        .map(|(_, ability)| *ability)
}

/// Proficiency contribution by exported level: 1 proficient, 2 expertise,
/// 3 half (rounded down)
fn proficiency_part(level: i64, proficiency: i64) -> i64 {
    match level {
        1 => proficiency,
        2 => proficiency * 2,
        3 => proficiency.div_euclid(2),
        _ => 0,
    }
}

/// Bonuses for every skill in `skilllist`.
///
/// A character without a skill list has no entries. Skills whose ability can
/// be determined neither from their `stat` nor from the standard table are
/// skipped.
pub fn skill_bonuses(record: &GenericRecord) -> RecordResult<Vec<SkillBonus>> {
    let Some(list) = record.get("skilllist").optional()? else {
        return Ok(Vec::new());
    };
    let proficiency = proficiency_bonus(record)?;

    let mut out = Vec::new();
    for (entry_key, skill) in list.entries() {
        let key = match entry_key {
            "" => slugify(skill.text_at("name").optional()?.unwrap_or_default()),
            key => key.to_string(),
        };

        let stat = skill.text_at("stat").optional()?.and_then(Ability::from_word);
        let Some(ability) = stat.or_else(|| default_ability(&key)) else {
            log::warn!("Skill '{}' has no recognisable ability, skipping", key);
            continue;
        };

        let level = skill.int_at("prof").optional()?.unwrap_or(0);
        let misc = skill.int_at("misc").optional()?.unwrap_or(0);
        let bonus = ability_modifier(record, ability)? + proficiency_part(level, proficiency) + misc;

        out.push(SkillBonus { key, ability, bonus });
    }
    Ok(out)
}

/// 10 + perception bonus; falls back to the wisdom modifier when the
/// character has no perception entry
pub fn passive_perception(record: &GenericRecord, skills: &[SkillBonus]) -> RecordResult<i64> {
    let perception = match skills.iter().find(|skill| skill.key == "perception") {
        Some(skill) => skill.bonus,
        None => ability_modifier(record, Ability::Wisdom)?,
    };
    Ok(10 + perception)
}
