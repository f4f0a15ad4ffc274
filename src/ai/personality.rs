//! AI personality configuration loaded from TOML
//!
//! Personalities define how often an AI knows the answer, which
//! categories it is strong or weak in, how erratic it is, and how
//! eagerly it spends power-ups.

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TriviaError};
use crate::core::types::Category;

/// Complete AI personality configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiPersonality {
    /// Name of this personality (set from filename)
    #[serde(default)]
    pub id: String,
    /// Baseline chance of knowing an answer (0.0 to 1.0)
    #[serde(default = "default_base_success_rate")]
    pub base_success_rate: f64,
    /// Signed per-category skill offsets, typically within ±0.25
    #[serde(default)]
    pub category_modifiers: AHashMap<Category, f64>,
    /// 1.0 = perfectly predictable, 0.0 = maximum random variance
    #[serde(default = "default_consistency")]
    pub consistency: f64,
    /// Chance of spending I-KNOW when in a strong category
    #[serde(default = "default_boost_usage_rate")]
    pub boost_usage_rate: f64,
}

fn default_base_success_rate() -> f64 {
    0.5
}

fn default_consistency() -> f64 {
    0.7
}

fn default_boost_usage_rate() -> f64 {
    0.5
}

impl Default for AiPersonality {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            base_success_rate: default_base_success_rate(),
            category_modifiers: AHashMap::new(),
            consistency: default_consistency(),
            boost_usage_rate: default_boost_usage_rate(),
        }
    }
}

impl AiPersonality {
    /// Modifier for one category, 0.0 when unknown
    pub fn modifier(&self, category: &str) -> f64 {
        self.category_modifiers.get(category).copied().unwrap_or(0.0)
    }

    pub fn with_modifier(mut self, category: impl Into<Category>, modifier: f64) -> Self {
        self.category_modifiers.insert(category.into(), modifier);
        self
    }

    /// Parse a personality from TOML text
    pub fn from_toml_str(name: &str, contents: &str) -> Result<Self> {
        let mut personality: AiPersonality = toml::from_str(contents)?;
        personality.id = name.to_string();
        personality.validate()?;
        Ok(personality)
    }

    fn validate(&self) -> Result<()> {
        let rates = [
            ("base_success_rate", self.base_success_rate),
            ("consistency", self.consistency),
            ("boost_usage_rate", self.boost_usage_rate),
        ];
        for (field, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(TriviaError::InvalidConfig(format!(
                    "personality {}: {} must be in [0, 1], got {}",
                    self.id, field, value
                )));
            }
        }
        Ok(())
    }
}

/// Load personality from TOML file
///
/// Loads from `data/ai_personalities/{name}.toml`
pub fn load_personality(name: &str) -> Result<AiPersonality> {
    load_personality_from(&personality_path(name), name)
}

/// Load a personality file from an explicit path
pub fn load_personality_from(path: &Path, name: &str) -> Result<AiPersonality> {
    let contents = fs::read_to_string(path)?;
    AiPersonality::from_toml_str(name, &contents)
}

/// Get path to personality file
fn personality_path(name: &str) -> PathBuf {
    PathBuf::from("data/ai_personalities").join(format!("{}.toml", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_personality() {
        let personality = load_personality("default").expect("Should load default personality");
        assert_eq!(personality.id, "default");
        assert!(personality.base_success_rate >= 0.0);
        assert!(personality.base_success_rate <= 1.0);
    }

    #[test]
    fn test_load_scholar_personality() {
        let personality = load_personality("scholar").expect("Should load scholar personality");
        assert!(personality.base_success_rate > 0.5, "Scholar should know more than average");
        assert!(personality.modifier("science") > 0.1);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let personality = AiPersonality::from_toml_str("partial", "boost_usage_rate = 0.9")
            .expect("Should parse");
        assert_eq!(personality.base_success_rate, 0.5);
        assert_eq!(personality.boost_usage_rate, 0.9);
        assert_eq!(personality.modifier("art"), 0.0);
    }

    #[test]
    fn test_modifiers_table_parses() {
        let personality = AiPersonality::from_toml_str(
            "jock",
            r#"
            base_success_rate = 0.4

            [category_modifiers]
            sports = 0.25
            art = -0.2
            "#,
        )
        .expect("Should parse");
        assert_eq!(personality.modifier("sports"), 0.25);
        assert_eq!(personality.modifier("art"), -0.2);
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let result = AiPersonality::from_toml_str("broken", "consistency = 1.5");
        assert!(matches!(result, Err(TriviaError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_personality("does_not_exist"),
            Err(TriviaError::IoError(_))
        ));
    }
}
