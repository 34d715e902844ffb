//! `presswatch check`: credential presence with masked prefixes.

use presswatch_core::AppConfig;

/// Credential variables and how many leading characters are shown.
const CREDENTIALS: [(&str, usize); 2] = [("SERPER_API_KEY", 10), ("OPENAI_API_KEY", 15)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CredentialStatus {
    pub var: &'static str,
    /// Masked value, or `None` when unset or blank.
    pub masked: Option<String>,
}

pub(crate) fn credential_statuses<F>(lookup: F) -> Vec<CredentialStatus>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    CREDENTIALS
        .iter()
        .map(|&(var, visible)| CredentialStatus {
            var,
            masked: lookup(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| AppConfig::masked(v.trim(), visible)),
        })
        .collect()
}

/// Print one line per credential. Returns `true` when all are present.
pub(crate) fn run_check<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let statuses = credential_statuses(lookup);
    for status in &statuses {
        match &status.masked {
            Some(masked) => println!("ok       {}: {masked}", status.var),
            None => println!("missing  {}", status.var),
        }
    }

    let missing = statuses.iter().filter(|s| s.masked.is_none()).count();
    if missing > 0 {
        tracing::warn!(missing, "credentials missing; add them to .env");
    }
    missing == 0
}
