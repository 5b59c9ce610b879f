//! Armor class total and its printed breakdown

use super::abilities::{ability_modifier, Ability};
use crate::record::{GenericRecord, OptionalField, RecordResult};

const BASE_ARMOR_CLASS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorClass {
    pub total: i64,
    /// e.g. `10 + 2 (armor) + 3 (dex) + 2 (shield)`
    pub explanation: String,
}

/// How much of the dexterity modifier counts toward armor class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DexContribution {
    Full,
    Capped(i64),
    Excluded,
}

impl DexContribution {
    /// Reads the exported `dexbonus` override: `no` excludes dexterity,
    /// `max2`/`max3` cap it, anything else counts it in full
    fn from_override(value: Option<&str>) -> Self {
        let Some(value) = value.map(|v| v.trim().to_lowercase()) else {
            return DexContribution::Full;
        };
        if value == "no" {
            return DexContribution::Excluded;
        }
        match value.strip_prefix("max").map(str::parse::<i64>) {
            Some(Ok(cap)) => DexContribution::Capped(cap),
            _ => DexContribution::Full,
        }
    }

    fn apply(self, modifier: i64) -> Option<i64> {
        match self {
            DexContribution::Full => Some(modifier),
            DexContribution::Capped(cap) => Some(modifier.min(cap)),
            DexContribution::Excluded => None,
        }
    }
}

fn term(value: i64, label: &str) -> String {
    if value < 0 {
        format!(" - {} ({})", -value, label)
    } else {
        format!(" + {} ({})", value, label)
    }
}

/// Compose armor class from `defenses.ac`.
///
/// Order is fixed: base, armor, dexterity (unless excluded), shield, then misc
/// when non-zero.
pub fn armor_class(record: &GenericRecord) -> RecordResult<ArmorClass> {
    let ac = record
        .path("defenses.ac")
        .optional()?
        .filter(|ac| !ac.is_leaf());
    let read = |field: &str| -> RecordResult<i64> {
        match ac {
            Some(ac) => Ok(ac.int_at(field).optional()?.unwrap_or(0)),
            None => Ok(0),
        }
    };

    let armor = read("armor")?;
    let shield = read("shield")?;
    let misc = read("misc")?;
    let dex_override = match ac {
        Some(ac) => ac.text_at("dexbonus").optional()?,
        None => None,
    };
    let dex = DexContribution::from_override(dex_override)
        .apply(ability_modifier(record, Ability::Dexterity)?);

    let mut total = BASE_ARMOR_CLASS + armor + shield + misc;
    let mut explanation = BASE_ARMOR_CLASS.to_string();
    explanation.push_str(&term(armor, "armor"));
    if let Some(dex) = dex {
        total += dex;
        explanation.push_str(&term(dex, "dex"));
    }
    explanation.push_str(&term(shield, "shield"));
    if misc != 0 {
        explanation.push_str(&term(misc, "misc"));
    }

    Ok(ArmorClass { total, explanation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TreeRecordBuilder;

    fn character(dex_score: i64, ac: &str) -> GenericRecord {
        let xml = format!(
            r#"<character>
                <abilities><dexterity><score>{}</score></dexterity></abilities>
                <defenses><ac>{}</ac></defenses>
            </character>"#,
            dex_score, ac
        );
        TreeRecordBuilder::new().build_from_str(&xml).unwrap()
    }

    #[test]
    fn test_full_breakdown() {
        let record = character(16, "<armor>1</armor><shield>2</shield><misc>1</misc>");
        let ac = armor_class(&record).unwrap();
        assert_eq!(ac.total, 17);
        assert_eq!(ac.explanation, "10 + 1 (armor) + 3 (dex) + 2 (shield) + 1 (misc)");
    }

    #[test]
    fn test_dexterity_excluded_by_override() {
        let record = character(16, "<armor>8</armor><dexbonus>no</dexbonus><shield>0</shield><misc>0</misc>");
        let ac = armor_class(&record).unwrap();
        assert_eq!(ac.total, 18);
        assert_eq!(ac.explanation, "10 + 8 (armor) + 0 (shield)");
    }

    #[test]
    fn test_dexterity_cap_and_negative_terms() {
        let record = character(18, "<armor>4</armor><dexbonus>max2</dexbonus><misc>-1</misc>");
        let ac = armor_class(&record).unwrap();
        assert_eq!(ac.total, 15);
        assert_eq!(ac.explanation, "10 + 4 (armor) + 2 (dex) + 0 (shield) - 1 (misc)");

        let clumsy = character(8, "");
        let ac = armor_class(&clumsy).unwrap();
        assert_eq!(ac.total, 9);
        assert_eq!(ac.explanation, "10 + 0 (armor) - 1 (dex) + 0 (shield)");
    }
}
