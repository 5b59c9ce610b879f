//! Derived character values
//!
//! Pure functions from a built [`GenericRecord`](crate::record::GenericRecord)
//! to display strings: signed modifiers, saves and skills, armor class,
//! weapon lines and spellcasting math. Lookups of genuinely optional fields go
//! through [`OptionalField`](crate::record::OptionalField); a missing required
//! field propagates as `FieldNotFound`.

pub mod abilities;
pub mod armor;
pub mod sheet;
pub mod skills;
pub mod spellcasting;
pub mod weapons;

pub use abilities::{
    ability_modifier, ability_score, format_signed, proficiency_bonus, saving_throw,
    score_modifier, Ability,
};
pub use armor::{armor_class, ArmorClass};
pub use sheet::collect_requests;
pub use skills::{passive_perception, skill_bonuses, SkillBonus, STANDARD_SKILLS};
pub use spellcasting::{detect_spellcasting_ability, spellcasting, SpellcastingLine};
pub use weapons::{governing_ability, summarize_dice, weapon_line, weapon_lines, WeaponLine};
