//! Render configuration
//!
//! Everything here has a default matching the bundled character sheet
//! template; a JSON document may override any subset of it.

use crate::errors::{SheetError, SheetResult};
use crate::record::BuilderOptions;
use crate::stats::Ability;
use serde::{Deserialize, Serialize};

/// Configuration for one render pass
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Smallest font size auto-fit may shrink to
    pub min_font_size: f32,

    /// Page size in points, origin at the bottom-left corner
    pub page_width: f32,
    pub page_height: f32,

    pub font_family: String,

    /// Weapon rows available on the template
    pub max_weapons: usize,

    /// Used when no feature names a spellcasting ability
    pub default_spellcasting_ability: Ability,

    /// Tags whose children are joined into one text leaf
    pub aggregate_text_tags: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_font_size: 5.0,
            page_width: 612.0,
            page_height: 792.0,
            font_family: "FreeSans".to_string(),
            max_weapons: 3,
            default_spellcasting_ability: Ability::Intelligence,
            aggregate_text_tags: BuilderOptions::default().aggregate_text_tags,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> SheetResult<Self> {
        let config: RenderConfig =
            serde_json::from_str(json).map_err(|e| SheetError::Config(e.to_string()))?;
        if config.min_font_size <= 0.0 {
            return Err(SheetError::Config(format!(
                "min_font_size must be positive, got {}",
                config.min_font_size
            )));
        }
        Ok(config)
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            aggregate_text_tags: self.aggregate_text_tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(
            r#"{"max_weapons": 5, "default_spellcasting_ability": "wisdom"}"#,
        )
        .unwrap();
        assert_eq!(config.max_weapons, 5);
        assert_eq!(config.default_spellcasting_ability, Ability::Wisdom);
        assert_eq!(config.min_font_size, 5.0);
        assert_eq!(config.aggregate_text_tags, vec!["text".to_string()]);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(RenderConfig::from_json("{"), Err(SheetError::Config(_))));
        assert!(matches!(
            RenderConfig::from_json(r#"{"min_font_size": 0}"#),
            Err(SheetError::Config(_))
        ));
        assert!(matches!(
            RenderConfig::from_json(r#"{"default_spellcasting_ability": "luck"}"#),
            Err(SheetError::Config(_))
        ));
    }
}
