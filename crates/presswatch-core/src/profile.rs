use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_subsidiary_query_limit() -> usize {
    4
}

fn default_country() -> String {
    "Argentina".to_string()
}

/// A brand whose mention count is charted in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedBrand {
    /// Name as it appears in the `* Menciones <label>:` line.
    pub label: String,
    /// Bar color, `#RRGGBB`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTheme {
    pub primary: String,
    pub secondary: String,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            primary: "#2E7D32".to_string(),
            secondary: "#FFC107".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default = "default_country")]
    pub country: String,
    /// Free terms appended to the company name for the international query.
    #[serde(default)]
    pub international_keywords: String,
    /// Legal entity and brand names used for the subsidiaries query.
    pub subsidiaries: Vec<String>,
    /// How many leading `subsidiaries` are folded into the subsidiaries query.
    #[serde(default = "default_subsidiary_query_limit")]
    pub subsidiary_query_limit: usize,
    pub sector_terms: Vec<String>,
    pub tracked_brands: Vec<TrackedBrand>,
    #[serde(default)]
    pub theme: ReportTheme,
}

impl CompanyProfile {
    /// Generate a filename-safe slug from the company name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Labels of the tracked brands in declared order.
    #[must_use]
    pub fn brand_labels(&self) -> Vec<String> {
        self.tracked_brands.iter().map(|b| b.label.clone()).collect()
    }

    /// Replace the company name, e.g. from `TARGET_COMPANY`.
    #[must_use]
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.name = name.to_string();
        }
        self
    }
}

/// Load and validate the company profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<CompanyProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_profile(&content)
}

/// Parse and validate a company profile from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_profile(yaml: &str) -> Result<CompanyProfile, ConfigError> {
    let profile: CompanyProfile = serde_yaml::from_str(yaml)?;
    validate_profile(&profile)?;
    Ok(profile)
}

fn validate_profile(profile: &CompanyProfile) -> Result<(), ConfigError> {
    if profile.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "company name must be non-empty".to_string(),
        ));
    }

    if profile.slug().is_empty() {
        return Err(ConfigError::Validation(format!(
            "company name '{}' produces an empty slug",
            profile.name
        )));
    }

    if profile.subsidiaries.iter().all(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "at least one subsidiary is required".to_string(),
        ));
    }

    if profile.subsidiary_query_limit == 0 {
        return Err(ConfigError::Validation(
            "subsidiary_query_limit must be at least 1".to_string(),
        ));
    }

    if profile.sector_terms.iter().all(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "at least one sector term is required".to_string(),
        ));
    }

    if profile.tracked_brands.is_empty() {
        return Err(ConfigError::Validation(
            "at least one tracked brand is required".to_string(),
        ));
    }

    let mut seen_labels = HashSet::new();
    for brand in &profile.tracked_brands {
        if brand.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tracked brand label must be non-empty".to_string(),
            ));
        }
        if !seen_labels.insert(brand.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate tracked brand label '{}'",
                brand.label
            )));
        }
        validate_color(&brand.color, &format!("tracked brand '{}'", brand.label))?;
    }

    validate_color(&profile.theme.primary, "theme.primary")?;
    validate_color(&profile.theme.secondary, "theme.secondary")?;

    Ok(())
}

fn validate_color(color: &str, field: &str) -> Result<(), ConfigError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} has invalid color '{color}'; expected #RRGGBB"
        )))
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
