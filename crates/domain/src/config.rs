//! Configuration structures
//!
//! Loaded from a TOML or JSON file by the infra layer; see
//! `caltally-infra`'s config loader for the probing strategy.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub categories: CategoryMap,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Calendar account settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    pub calendar_id: String,
}

fn default_provider() -> String {
    "google".to_string()
}

/// One category with the exact event titles that belong to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    #[serde(default)]
    pub titles: Vec<String>,
}

/// Ordered category rules; declaration order is the matching precedence.
///
/// A title listed under several rules resolves to the earliest one
/// (first-match-wins). The order is therefore part of the configuration
/// contract, which is why this is a list and not a map keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(Vec<CategoryRule>);

impl CategoryMap {
    /// Build a map from rules, keeping their order.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self(rules)
    }

    /// Rules in matching precedence order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<CategoryRule>> for CategoryMap {
    fn from(rules: Vec<CategoryRule>) -> Self {
        Self::new(rules)
    }
}

/// Output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_matrix_file")]
    pub matrix_file: String,
    #[serde(default = "default_uncategorized_file")]
    pub uncategorized_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            matrix_file: default_matrix_file(),
            uncategorized_file: default_uncategorized_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_matrix_file() -> String {
    "daily_summary.csv".to_string()
}

fn default_uncategorized_file() -> String {
    "uncategorized.csv".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_map_preserves_rule_order() {
        let map = CategoryMap::new(vec![
            CategoryRule { name: "work".to_string(), titles: vec!["Standup".to_string()] },
            CategoryRule { name: "health".to_string(), titles: vec!["Gym".to_string()] },
        ]);

        let names: Vec<&str> = map.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["work", "health"]);
    }

    #[test]
    fn test_config_defaults_applied() {
        let toml_content = r#"
[calendar]
calendar_id = "primary"

[[categories]]
name = "work"
titles = ["Standup", "Planning"]
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.calendar.provider, "google");
        assert_eq!(config.calendar.calendar_id, "primary");
        assert_eq!(config.categories.rules().len(), 1);
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.output.matrix_file, "daily_summary.csv");
        assert_eq!(config.output.uncategorized_file, "uncategorized.csv");
    }
}
