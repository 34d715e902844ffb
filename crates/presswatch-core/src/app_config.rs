use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub serper_api_key: String,
    pub openai_api_key: String,
    pub profile_path: PathBuf,
    /// Overrides `name` from the company profile when set.
    pub target_company: Option<String>,
    pub search_window_days: u32,
    pub max_results_per_query: usize,
    pub search_num: u32,
    pub search_gl: String,
    pub search_hl: String,
    pub serper_base_url: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub open_browser: bool,
}

impl AppConfig {
    /// First characters of a credential followed by an ellipsis, for display.
    #[must_use]
    pub fn masked(secret: &str, visible: usize) -> String {
        let prefix: String = secret.chars().take(visible).collect();
        format!("{prefix}...")
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("serper_api_key", &"[redacted]")
            .field("openai_api_key", &"[redacted]")
            .field("profile_path", &self.profile_path)
            .field("target_company", &self.target_company)
            .field("search_window_days", &self.search_window_days)
            .field("max_results_per_query", &self.max_results_per_query)
            .field("search_num", &self.search_num)
            .field("search_gl", &self.search_gl)
            .field("search_hl", &self.search_hl)
            .field("serper_base_url", &self.serper_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_temperature", &self.llm_temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("open_browser", &self.open_browser)
            .finish()
    }
}
