use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a credential is missing or a value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a credential is missing or a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Both credentials are checked before anything else so a run never starts
/// network activity without them.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let serper_api_key = require("SERPER_API_KEY")?;
    let openai_api_key = require("OPENAI_API_KEY")?;

    let profile_path = PathBuf::from(or_default(
        "PRESSWATCH_PROFILE_PATH",
        "./config/company.yaml",
    ));
    let target_company = lookup("TARGET_COMPANY")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let search_window_days = parse_u32("PRESSWATCH_SEARCH_WINDOW_DAYS", "2")?;
    if search_window_days == 0 {
        return Err(invalid(
            "PRESSWATCH_SEARCH_WINDOW_DAYS",
            "must be at least 1".to_string(),
        ));
    }
    let max_results_per_query = parse_usize("PRESSWATCH_MAX_RESULTS_PER_QUERY", "30")?;
    let search_num = parse_u32("PRESSWATCH_SEARCH_NUM", "20")?;
    let search_gl = or_default("PRESSWATCH_SEARCH_GL", "ar");
    let search_hl = or_default("PRESSWATCH_SEARCH_HL", "es");
    let serper_base_url = or_default("PRESSWATCH_SERPER_URL", "https://google.serper.dev");
    let openai_base_url = or_default("PRESSWATCH_OPENAI_URL", "https://api.openai.com/v1");
    let llm_model = or_default("PRESSWATCH_LLM_MODEL", "gpt-4o-mini");

    let llm_temperature = or_default("PRESSWATCH_LLM_TEMPERATURE", "0.3")
        .parse::<f32>()
        .map_err(|e| invalid("PRESSWATCH_LLM_TEMPERATURE", e.to_string()))?;
    if !(0.0..=2.0).contains(&llm_temperature) {
        return Err(invalid(
            "PRESSWATCH_LLM_TEMPERATURE",
            format!("{llm_temperature} is outside 0.0..=2.0"),
        ));
    }

    let request_timeout_secs = parse_u64("PRESSWATCH_REQUEST_TIMEOUT_SECS", "60")?;
    let output_dir = PathBuf::from(or_default("PRESSWATCH_OUTPUT_DIR", "."));
    let open_browser = parse_bool(&or_default("PRESSWATCH_OPEN_BROWSER", "true"))
        .ok_or_else(|| invalid("PRESSWATCH_OPEN_BROWSER", "expected true or false".to_string()))?;

    Ok(AppConfig {
        serper_api_key,
        openai_api_key,
        profile_path,
        target_company,
        search_window_days,
        max_results_per_query,
        search_num,
        search_gl,
        search_hl,
        serper_base_url,
        openai_base_url,
        llm_model,
        llm_temperature,
        request_timeout_secs,
        output_dir,
        open_browser,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
