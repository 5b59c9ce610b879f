//! Weapon attack and damage lines
//!
//! The governing ability of a weapon is chosen by priority:
//! explicit `attackstat` > finesse (better of strength and dexterity) >
//! ranged (dexterity) > strength.

use super::abilities::{ability_modifier, format_signed, proficiency_bonus, Ability};
use crate::record::{GenericRecord, OptionalField, RecordResult};

/// Exported weapon `type` value for ranged weapons
const RANGED_TYPE: i64 = 1;

/// Derived display values for one weapon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponLine {
    pub name: String,
    pub ability: Ability,
    pub attack_bonus: i64,
    pub damage_bonus: i64,
    /// Compact dice summary, e.g. `2xd6 + 1xd4`
    pub dice: String,
}

impl WeaponLine {
    pub fn attack_text(&self) -> String {
        format_signed(self.attack_bonus)
    }

    /// Dice followed by the signed bonus; a zero bonus is omitted when there
    /// are dice to show
    pub fn damage_text(&self) -> String {
        match (self.dice.is_empty(), self.damage_bonus) {
            (true, bonus) => format_signed(bonus),
            (false, 0) => self.dice.clone(),
            (false, bonus) => format!("{} {}", self.dice, format_signed(bonus)),
        }
    }
}

fn has_property(weapon: &GenericRecord, property: &str) -> RecordResult<bool> {
    Ok(weapon
        .text_at("properties")
        .optional()?
        .map(|props| props.to_lowercase().contains(property))
        .unwrap_or(false))
}

/// Ability that drives a weapon's attack and damage
pub fn governing_ability(weapon: &GenericRecord, record: &GenericRecord) -> RecordResult<Ability> {
    if let Some(stat) = weapon.text_at("attackstat").optional()? {
        if let Some(ability) = Ability::from_word(stat) {
            return Ok(ability);
        }
    }

    if has_property(weapon, "finesse")? {
        let strength = ability_modifier(record, Ability::Strength)?;
        let dexterity = ability_modifier(record, Ability::Dexterity)?;
        return Ok(if dexterity > strength {
            Ability::Dexterity
        } else {
            Ability::Strength
        });
    }

    let ranged_type = weapon.int_at("type_").optional()? == Some(RANGED_TYPE);
    if ranged_type || has_property(weapon, "ranged")? || has_property(weapon, "ammunition")? {
        return Ok(Ability::Dexterity);
    }

    Ok(Ability::Strength)
}

/// Collapse a dice list into `NxdX` terms, in first-seen order.
///
/// Entries may be bare (`d6`) or counted (`2d6`); unparseable counts read as one.
pub fn summarize_dice<'a>(dice: impl IntoIterator<Item = &'a str>) -> String {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for entry in dice {
        let entry = entry.trim().to_lowercase();
        let Some(split) = entry.find('d') else {
            continue;
        };
        let (count, die) = entry.split_at(split);
        if die.len() < 2 {
            continue;
        }
        let count = count.trim().parse::<u32>().unwrap_or(1);

        match counts.iter_mut().find(|(existing, _)| existing == die) {
            Some((_, total)) => *total = total.saturating_add(count),
            None => counts.push((die.to_string(), count)),
        }
    }

    counts
        .iter()
        .map(|(die, count)| format!("{}x{}", count, die))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Derive the display line for one weapon
pub fn weapon_line(weapon: &GenericRecord, record: &GenericRecord) -> RecordResult<WeaponLine> {
    let name = weapon.text_at("name").optional()?.unwrap_or_default().to_string();
    let ability = governing_ability(weapon, record)?;
    let modifier = ability_modifier(record, ability)?;

    let proficient = weapon.bool_at("prof").optional()?.unwrap_or(false);
    let fixed_attack = weapon.int_at("attackbonus").optional()?.unwrap_or(0);
    let mut attack_bonus = modifier + fixed_attack;
    if proficient {
        attack_bonus += proficiency_bonus(record)?;
    }

    let mut dice: Vec<String> = Vec::new();
    let mut damage_bonus = modifier;
    if let Some(damage_list) = weapon.get("damagelist").optional()? {
        for entry in damage_list.members() {
            if let Some(list) = entry.text_at("dice").optional()? {
                dice.extend(list.split(',').map(str::to_string));
            }
            damage_bonus += entry.int_at("bonus").optional()?.unwrap_or(0);
        }
    }

    Ok(WeaponLine {
        name,
        ability,
        attack_bonus,
        damage_bonus,
        dice: summarize_dice(dice.iter().map(String::as_str)),
    })
}

/// Lines for the first `limit` weapons in `weaponlist`
pub fn weapon_lines(record: &GenericRecord, limit: usize) -> RecordResult<Vec<WeaponLine>> {
    let Some(list) = record.get("weaponlist").optional()? else {
        return Ok(Vec::new());
    };

    let weapons = list.members();
    if weapons.len() > limit {
        log::info!("{} weapons exported, showing the first {}", weapons.len(), limit);
    }

    weapons
        .into_iter()
        .take(limit)
        .map(|weapon| weapon_line(weapon, record))
        .collect()
}
