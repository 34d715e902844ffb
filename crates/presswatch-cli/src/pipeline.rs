//! Command handlers: the full report run, query preview, and offline render.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDateTime;
use presswatch_core::{load_profile, CompanyProfile};
use presswatch_report::{
    build_prompt, extract_metrics, fallback_report, open_in_browser, render_report,
    report_filename, write_report, DateRange, OpenAiClient, PromptInput, RenderContext,
};
use presswatch_search::{investigate, NewsSlot, QueryPlan, SerperClient};

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone)]
pub(crate) struct RunOverrides {
    pub output_dir: Option<PathBuf>,
    pub window_days: Option<u32>,
    pub open_browser: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct RenderArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub profile: PathBuf,
    pub company: Option<String>,
    pub open: bool,
}

/// Run the whole pipeline once and return the written report path.
///
/// Configuration and profile problems abort before any request is sent.
/// Search and model failures are folded into the report text instead.
pub(crate) async fn run_report(overrides: RunOverrides) -> anyhow::Result<PathBuf> {
    let mut config =
        presswatch_core::load_app_config_from_env().context("failed to load configuration")?;
    if let Some(days) = overrides.window_days {
        anyhow::ensure!(days > 0, "--days must be at least 1");
        config.search_window_days = days;
    }
    if let Some(dir) = overrides.output_dir {
        config.output_dir = dir;
    }

    let profile = load_profile(&config.profile_path)
        .with_context(|| {
            format!(
                "failed to load company profile {}",
                config.profile_path.display()
            )
        })?
        .with_name(config.target_company.as_deref());

    let searcher = SerperClient::from_config(&config).context("failed to build search client")?;
    let llm = OpenAiClient::from_config(&config).context("failed to build model client")?;

    let now = chrono::Local::now().naive_local();
    let range = DateRange::ending(now.date(), config.search_window_days);
    let plan = QueryPlan::from_profile(&profile);

    tracing::info!(company = %profile.name, range = %range, "starting investigation");
    let investigation = investigate(&searcher, &plan, config.search_window_days).await;
    tracing::info!(
        unique_sources = investigation.source_count(),
        "investigation complete"
    );

    let brand_labels = profile.brand_labels();
    let prompt = build_prompt(&PromptInput {
        company: &profile.name,
        range,
        investigation: &investigation,
        brand_labels: &brand_labels,
    });

    let markdown = match llm.complete(&prompt).await {
        Ok(markdown) => markdown,
        Err(e) => {
            tracing::error!(error = %e, "report drafting failed; rendering fallback report");
            fallback_report(&profile.name, &e)
        }
    };

    let html = render_page(&markdown, &profile, now);
    let path = write_report(
        &config.output_dir,
        &report_filename(&file_slug(&profile), now),
        &html,
    )
    .context("failed to write report")?;
    println!("report written: {}", path.display());

    if config.open_browser && overrides.open_browser {
        open_in_browser(&path);
    }
    Ok(path)
}

/// Print the five queries for the profile.
pub(crate) fn run_plan(profile_path: &Path, company: Option<&str>) -> anyhow::Result<()> {
    let profile = load_profile_for(profile_path, company)?;
    let plan = QueryPlan::from_profile(&profile);
    for slot in NewsSlot::ALL {
        println!("{slot:<22} {}", plan.news_query(slot));
    }
    println!("{:<22} {}", "social", plan.social);
    Ok(())
}

/// Render an existing markdown report without contacting any service.
pub(crate) fn run_render(args: &RenderArgs) -> anyhow::Result<PathBuf> {
    let profile = load_profile_for(&args.profile, args.company.as_deref())?;
    let markdown = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let now = chrono::Local::now().naive_local();
    let html = render_page(&markdown, &profile, now);

    let (dir, filename) = output_location(args.output.as_deref(), &file_slug(&profile), now);
    let path = write_report(&dir, &filename, &html).context("failed to write report")?;
    println!("report written: {}", path.display());

    if args.open {
        open_in_browser(&path);
    }
    Ok(path)
}

fn load_profile_for(path: &Path, company: Option<&str>) -> anyhow::Result<CompanyProfile> {
    let profile = load_profile(path)
        .with_context(|| format!("failed to load company profile {}", path.display()))?;
    Ok(profile.with_name(company.filter(|c| !c.trim().is_empty())))
}

pub(crate) fn render_page(
    markdown: &str,
    profile: &CompanyProfile,
    generated_at: NaiveDateTime,
) -> String {
    let metrics = extract_metrics(markdown, &profile.brand_labels());
    tracing::info!(
        general = ?metrics.general_sentiment,
        brands = ?metrics.brand_volumes,
        social = ?metrics.social_volumes,
        "metrics extracted"
    );
    render_report(
        markdown,
        &metrics,
        &RenderContext::from_profile(profile, generated_at),
    )
}

/// Profile slug, or `empresa` when the name has no filename-safe characters.
fn file_slug(profile: &CompanyProfile) -> String {
    let slug = profile.slug();
    if slug.is_empty() {
        "empresa".to_string()
    } else {
        slug
    }
}

fn output_location(
    output: Option<&Path>,
    slug: &str,
    generated_at: NaiveDateTime,
) -> (PathBuf, String) {
    let default_name = || report_filename(slug, generated_at);
    match output {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name = path
                .file_name()
                .map_or_else(default_name, |n| n.to_string_lossy().into_owned());
            (dir, name)
        }
        None => (PathBuf::from("."), default_name()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use presswatch_core::parse_profile;

    use super::*;

    const PROFILE: &str = r##"
name: Adecoagro
subsidiaries: ["Pilagá S.A."]
sector_terms: ["Sancor crisis"]
tracked_brands:
  - label: Adecoagro
    color: "#1976D2"
  - label: Pilagá
    color: "#00796B"
"##;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn render_page_charts_profile_brands() {
        let profile = parse_profile(PROFILE).unwrap();
        let md = "## 📊 Reporte de Sentimiento\n\n* Positivo: 2\n* Menciones Pilagá: 3\n";
        let html = render_page(md, &profile, at());
        assert!(html.contains(r#"const brandLabels = ["Pilagá"];"#));
        assert!(html.contains("const genSent = [2,0,0];"));
        assert!(html.contains("Reporte Ejecutivo: Adecoagro"));
    }

    #[test]
    fn fallback_report_renders_empty_charts() {
        let profile = parse_profile(PROFILE).unwrap();
        let md = fallback_report("Adecoagro", &presswatch_report::ReportError::EmptyCompletion);
        let html = render_page(&md, &profile, at());
        assert!(html.contains("Error generando el reporte"));
        assert!(html.contains("const genSent = [0,0,0];"));
    }

    #[test]
    fn output_defaults_to_timestamped_name_in_cwd() {
        let (dir, name) = output_location(None, "adecoagro", at());
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "reporte_adecoagro_20240301_100000.html");
    }

    #[test]
    fn explicit_output_is_split_into_dir_and_name() {
        let (dir, name) = output_location(Some(Path::new("out/r.html")), "x", at());
        assert_eq!(dir, PathBuf::from("out"));
        assert_eq!(name, "r.html");

        let (dir, name) = output_location(Some(Path::new("r.html")), "x", at());
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "r.html");
    }

    #[test]
    fn unsluggable_override_falls_back() {
        let profile = parse_profile(PROFILE).unwrap().with_name(Some("¡¿!"));
        assert_eq!(file_slug(&profile), "empresa");
    }
}
