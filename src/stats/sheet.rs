//! Derive every printable value of a character
//!
//! Produces one [`RenderRequest`] per sheet field. Optional inputs (alignment,
//! background, experience, ...) that the export lacks are skipped; required
//! ones (name, ability scores, proficiency bonus) fail the pass.

use super::abilities::{ability_modifier, ability_score, proficiency_bonus, saving_throw, Ability};
use super::armor::armor_class;
use super::skills::{passive_perception, skill_bonuses, STANDARD_SKILLS};
use super::spellcasting::spellcasting;
use super::weapons::weapon_lines;
use crate::config::RenderConfig;
use crate::record::{GenericRecord, OptionalField, RecordResult};
use crate::renderers::RenderRequest;

/// Ordered list of requests, ignoring blank values
#[derive(Debug, Default)]
struct Requests(Vec<RenderRequest>);

impl Requests {
    fn push(&mut self, field: impl Into<String>, value: impl ToString) {
        let field = field.into();
        let value = value.to_string();
        if value.trim().is_empty() {
            log::debug!("Skipping blank value for '{}'", field);
            return;
        }
        self.0.push(RenderRequest::new(field, value));
    }

    fn push_optional(&mut self, field: &str, value: Option<&str>) {
        match value {
            Some(value) => self.push(field, value),
            None => log::info!("'{}' not in export, leaving blank", field),
        }
    }
}

/// `Wizard 3 / Rogue 1`
fn class_summary(record: &GenericRecord) -> RecordResult<Option<String>> {
    let Some(classes) = record.get("classes").optional()? else {
        return Ok(None);
    };

    let mut parts = Vec::new();
    for class in classes.members() {
        let name = class.text_at("name").optional()?.unwrap_or_default();
        let level = class.text_at("level").optional()?.unwrap_or_default();
        let part = format!("{} {}", name, level).trim().to_string();
        if !part.is_empty() {
            parts.push(part);
        }
    }
    Ok(Some(parts.join(" / ")))
}

fn speed(record: &GenericRecord) -> RecordResult<Option<String>> {
    if let Some(total) = record.text_at("speed.total").optional()? {
        return Ok(Some(total.to_string()));
    }
    Ok(record.text_at("speed.base").optional()?.map(str::to_string))
}

/// All render requests for one character record
pub fn collect_requests(
    character: &GenericRecord,
    config: &RenderConfig,
) -> RecordResult<Vec<RenderRequest>> {
    let mut requests = Requests::default();

    requests.push("character_name", character.text_at("name")?);
    requests.push_optional("class_level", class_summary(character)?.as_deref());
    requests.push_optional("race", character.text_at("race").optional()?);
    requests.push_optional("background", character.text_at("background").optional()?);
    requests.push_optional("alignment", character.text_at("alignment").optional()?);
    requests.push_optional("experience", character.text_at("exp").optional()?);

    let proficiency = proficiency_bonus(character)?;
    requests.push("proficiency_bonus", proficiency);

    for ability in Ability::ALL {
        requests.push(ability.key(), ability_score(character, ability)?);
        requests.push(format!("{}_mod", ability.key()), ability_modifier(character, ability)?);
        requests.push(format!("{}_save", ability.key()), saving_throw(character, ability)?);
    }

    let skills = skill_bonuses(character)?;
    for skill in &skills {
        if STANDARD_SKILLS.iter().any(|(key, _)| *key == skill.key) {
            requests.push(format!("skill_{}", skill.key), skill.bonus);
        } else {
            log::info!("Skill '{}' has no place on the sheet", skill.key);
        }
    }
    requests.push("passive_perception", passive_perception(character, &skills)?);

    let ac = armor_class(character)?;
    requests.push("armor_class", ac.total);
    requests.push("armor_class_explanation", ac.explanation);

    let initiative_misc = character.int_at("initiative.misc").optional()?.unwrap_or(0);
    requests.push(
        "initiative",
        ability_modifier(character, Ability::Dexterity)? + initiative_misc,
    );
    requests.push_optional("speed", speed(character)?.as_deref());
    requests.push_optional("hp_max", character.text_at("hp.total").optional()?);

    for (index, weapon) in weapon_lines(character, config.max_weapons)?.iter().enumerate() {
        let row = index + 1;
        requests.push(format!("weapon{}_name", row), &weapon.name);
        requests.push(format!("weapon{}_attack", row), weapon.attack_text());
        requests.push(format!("weapon{}_damage", row), weapon.damage_text());
    }

    let spells = spellcasting(character, config.default_spellcasting_ability)?;
    requests.push("spellcasting_ability", spells.ability.display_name());
    requests.push("spell_save_dc", spells.save_dc);
    requests.push("spell_attack_bonus", spells.attack_bonus);

    Ok(requests.0)
}
