//! Engine configuration tables.
//!
//! The colour palette, the specialization names and the other naming
//! conventions the engine relies on are plain data passed to every
//! component, so callers can tune them per deployment.

use serde::{Deserialize, Serialize};

use crate::models::EventColor;

/// Duration assumed when a course type carries no "<h>h<mm>" hint
const DEFAULT_DURATION_MINUTES: i64 = 90;

/// Cohorts starting with this prefix are listed first
const DEFAULT_PRIORITY_COHORT_PREFIX: &str = "BUT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: EventColor,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorKeyword {
    pub keyword: String,
    pub color: EventColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Iteration order decides ties in nearest-colour matching
    pub palette: Vec<PaletteEntry>,
    pub specializations: Vec<String>,
    pub priority_cohort_prefix: String,
    pub default_duration_minutes: i64,
    /// Used by the ICS importer, first match wins
    pub color_keywords: Vec<ColorKeyword>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let palette = [
            (EventColor::Blue, "#3b82f6"),
            (EventColor::Orange, "#f97316"),
            (EventColor::Violet, "#8b5cf6"),
            (EventColor::Rose, "#f43f5e"),
            (EventColor::Emerald, "#10b981"),
        ];
        let keywords = [
            ("exam", EventColor::Rose),
            ("ds", EventColor::Rose),
            ("cm", EventColor::Violet),
            ("amphi", EventColor::Violet),
            ("td", EventColor::Orange),
            ("tp", EventColor::Emerald),
            ("projet", EventColor::Emerald),
        ];

        Self {
            palette: palette
                .into_iter()
                .map(|(color, hex)| PaletteEntry { color, hex: hex.to_string() })
                .collect(),
            specializations: ["DV", "RE", "BD"].into_iter().map(String::from).collect(),
            priority_cohort_prefix: DEFAULT_PRIORITY_COHORT_PREFIX.to_string(),
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            color_keywords: keywords
                .into_iter()
                .map(|(keyword, color)| ColorKeyword { keyword: keyword.to_string(), color })
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn is_specialization(&self, name: &str) -> bool {
        self.specializations.iter().any(|s| s == name)
    }

    /// Colour used when nothing better can be determined
    pub fn fallback_color(&self) -> EventColor {
        self.palette.first().map(|p| p.color).unwrap_or(EventColor::Blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let config = EngineConfig::default();
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.fallback_color(), EventColor::Blue);
        assert!(config.is_specialization("DV"));
        assert!(!config.is_specialization("DV1"));
        assert_eq!(config.default_duration_minutes, 90);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{"specializations": ["IA"], "default_duration_minutes": 60}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_specialization("IA"));
        assert!(!config.is_specialization("DV"));
        assert_eq!(config.default_duration_minutes, 60);
        assert_eq!(config.priority_cohort_prefix, "BUT");
        assert_eq!(config.palette, EngineConfig::default().palette);
    }

    #[test]
    fn test_empty_palette_falls_back_to_blue() {
        let config = EngineConfig { palette: vec![], ..EngineConfig::default() };
        assert_eq!(config.fallback_color(), EventColor::Blue);
    }
}
