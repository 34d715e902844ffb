//! Markdown report to a self-contained HTML page with charts.

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use presswatch_core::{CompanyProfile, ReportTheme, TrackedBrand};
use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;
use serde::Serialize;

use crate::metrics::ReportMetrics;
use crate::vocabulary::{
    Section, DIGITAL_SUMMARY, FLAG_GLYPH, FLAG_IMG, SECTIONS, SENTIMENT_LABELS, SENTIMENT_REPORT,
    SOCIAL_NETWORKS,
};

const SENTIMENT_COLORS: [&str; 3] = ["#2E7D32", "#FBC02D", "#D32F2F"];
const SOCIAL_SENTIMENT_BARS: [&str; 3] = ["Pos", "Neu", "Neg"];
const NETWORK_COLORS: [&str; 5] = ["#1877F2", "#C13584", "#000000", "#00F2EA", "#FF0000"];

const NO_SERIES_DATA: &str = "Sin datos para esta serie";
const NO_BRAND_MENTIONS: &str = "Sin menciones de marca";
const NO_SOCIAL_ACTIVITY: &str = "Sin actividad en redes";

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";
const DATALABELS_JS: &str = "https://cdn.jsdelivr.net/npm/chartjs-plugin-datalabels@2.2.0";
const TREEMAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/chartjs-chart-treemap@2.3.0/dist/chartjs-chart-treemap.min.js";

static EXTERNAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="(https?://[^"]*)"(?: target="_blank")?"#)
        .expect("valid external link regex")
});

/// Page-level inputs that do not come from the markdown.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub company: String,
    pub generated_at: NaiveDateTime,
    /// Tracked brands in the same order as `ReportMetrics::brand_volumes`.
    pub brands: Vec<TrackedBrand>,
    pub theme: ReportTheme,
}

impl RenderContext {
    #[must_use]
    pub fn from_profile(profile: &CompanyProfile, generated_at: NaiveDateTime) -> Self {
        Self {
            company: profile.name.clone(),
            generated_at,
            brands: profile.tracked_brands.clone(),
            theme: profile.theme.clone(),
        }
    }
}

/// Render the report page. Never fails; missing sections and empty series
/// degrade to plain content and placeholder messages.
#[must_use]
pub fn render_report(markdown: &str, metrics: &ReportMetrics, ctx: &RenderContext) -> String {
    let mut body = markdown_to_html(markdown);
    body = body.replace(FLAG_GLYPH, FLAG_IMG);
    body = open_links_in_new_tab(&body);
    body = anchor_headings(&body);
    body = inject_after_heading(&body, SENTIMENT_REPORT.slug, &sentiment_fragment(metrics, ctx));
    body = inject_after_heading(&body, DIGITAL_SUMMARY.slug, &social_fragment(metrics));

    let script = chart_script(metrics, ctx);
    page(&body, &script, ctx)
}

/// Markdown to HTML with tables and soft breaks rendered as `<br />`.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Add `target="_blank"` to every absolute http(s) link. Idempotent.
#[must_use]
pub fn open_links_in_new_tab(html: &str) -> String {
    EXTERNAL_LINK_RE
        .replace_all(html, r#"<a href="$1" target="_blank""#)
        .into_owned()
}

/// Give the first occurrence of each known `<h2>` its anchor id.
#[must_use]
pub fn anchor_headings(html: &str) -> String {
    let mut out = html.to_string();
    for section in SECTIONS {
        let text = rendered_heading(section);
        let plain = format!("<h2>{text}</h2>");
        let anchored = format!(r#"<h2 id="{}">{text}</h2>"#, section.slug);
        out = out.replacen(&plain, &anchored, 1);
    }
    out
}

fn rendered_heading(section: Section) -> String {
    section.heading.replace(FLAG_GLYPH, FLAG_IMG)
}

/// Insert `fragment` right after the closing tag of the heading anchored
/// `slug`. No-op if that heading is absent.
#[must_use]
pub fn inject_after_heading(html: &str, slug: &str, fragment: &str) -> String {
    let open = format!(r#"<h2 id="{slug}">"#);
    let Some(start) = html.find(&open) else {
        tracing::debug!(slug, "section heading not found; skipping chart fragment");
        return html.to_string();
    };
    let Some(close) = html[start..].find("</h2>") else {
        return html.to_string();
    };
    let at = start + close + "</h2>".len();

    let mut out = String::with_capacity(html.len() + fragment.len());
    out.push_str(&html[..at]);
    out.push_str(fragment);
    out.push_str(&html[at..]);
    out
}

fn chart_card(title: &str, canvas_id: &str, placeholder: Option<&str>) -> String {
    let inner = match placeholder {
        Some(message) => format!(r#"<p class="chart-empty">{message}</p>"#),
        None => format!(r#"<canvas id="{canvas_id}"></canvas>"#),
    };
    format!(
        r#"
        <div class="chart-card">
            <h4>{title}</h4>
            <div class="chart-container">{inner}</div>
        </div>"#
    )
}

fn dashboard_row(cards: &[String]) -> String {
    format!("\n    <div class=\"dashboard-row\">{}\n    </div>\n", cards.concat())
}

fn sentiment_fragment(metrics: &ReportMetrics, ctx: &RenderContext) -> String {
    let donut_empty = metrics.general_sentiment.iter().all(|&v| v == 0);
    let brands_empty = brand_series(metrics, ctx).is_empty();
    dashboard_row(&[
        chart_card(
            "Distribución de Sentimiento",
            "chartGenSent",
            donut_empty.then_some(NO_SERIES_DATA),
        ),
        chart_card(
            "Volumen por Marca",
            "chartBrandVol",
            brands_empty.then_some(NO_BRAND_MENTIONS),
        ),
    ])
}

fn social_fragment(metrics: &ReportMetrics) -> String {
    let tree_empty = network_series(metrics).is_empty();
    dashboard_row(&[
        chart_card(
            "Volumen por Red (Treemap)",
            "chartSocTree",
            tree_empty.then_some(NO_SOCIAL_ACTIVITY),
        ),
        chart_card("Sentimiento Social", "chartSocSent", None),
    ])
}

/// A nonzero bar of the brand chart.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BrandBar<'a> {
    label: &'a str,
    color: &'a str,
    value: u64,
}

fn brand_series<'a>(metrics: &ReportMetrics, ctx: &'a RenderContext) -> Vec<BrandBar<'a>> {
    ctx.brands
        .iter()
        .zip(&metrics.brand_volumes)
        .filter(|(_, value)| **value > 0)
        .map(|(brand, &value)| BrandBar {
            label: &brand.label,
            color: &brand.color,
            value,
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct TreeNode {
    category: &'static str,
    value: u64,
}

fn network_series(metrics: &ReportMetrics) -> Vec<TreeNode> {
    SOCIAL_NETWORKS
        .iter()
        .zip(metrics.social_volumes)
        .filter(|(_, value)| *value > 0)
        .map(|(&category, value)| TreeNode { category, value })
        .collect()
}

/// Serialize `value` for embedding inside a `<script>` element.
fn js_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn chart_script(metrics: &ReportMetrics, ctx: &RenderContext) -> String {
    let bars = brand_series(metrics, ctx);
    let brand_labels: Vec<&str> = bars.iter().map(|b| b.label).collect();
    let brand_colors: Vec<&str> = bars.iter().map(|b| b.color).collect();
    let brand_values: Vec<u64> = bars.iter().map(|b| b.value).collect();
    let network_colors: serde_json::Map<String, serde_json::Value> = SOCIAL_NETWORKS
        .iter()
        .zip(NETWORK_COLORS)
        .map(|(name, color)| ((*name).to_string(), color.into()))
        .collect();

    let mut s = String::new();
    let _ = write!(
        s,
        r"
        Chart.register(ChartDataLabels);
        Chart.defaults.font.family = 'Roboto';
        const labelConfig = {{ color: '#fff', font: {{ weight: 'bold' }}, formatter: (v) => v > 0 ? v : '' }};
        const colors = {colors};

        const genSent = {gen_sent};
        const brandLabels = {brand_labels};
        const brandColors = {brand_colors};
        const brandData = {brand_values};
        const socTree = {soc_tree};
        const socColors = {soc_colors};
        const socSent = {soc_sent};

        const genCtx = document.getElementById('chartGenSent');
        if (genCtx) {{
            new Chart(genCtx, {{
                type: 'doughnut',
                data: {{ labels: {sent_labels}, datasets: [{{ data: genSent, backgroundColor: colors, borderWidth: 0 }}] }},
                options: {{ maintainAspectRatio: false, cutout: '60%', plugins: {{ legend: {{ position: 'right' }}, datalabels: labelConfig }} }}
            }});
        }}

        const brandCtx = document.getElementById('chartBrandVol');
        if (brandCtx) {{
            new Chart(brandCtx, {{
                type: 'bar',
                data: {{ labels: brandLabels, datasets: [{{ data: brandData, backgroundColor: brandColors, barPercentage: 0.6 }}] }},
                options: {{ maintainAspectRatio: false, indexAxis: 'y', plugins: {{ legend: {{ display: false }}, datalabels: {{ anchor: 'end', align: 'end', color: '#555' }} }}, scales: {{ x: {{ display: false, grace: '15%' }}, y: {{ grid: {{ display: false }} }} }} }}
            }});
        }}

        const treeCtx = document.getElementById('chartSocTree');
        if (treeCtx) {{
            new Chart(treeCtx, {{
                type: 'treemap',
                data: {{
                    datasets: [{{
                        tree: socTree,
                        key: 'value',
                        groups: ['category'],
                        backgroundColor: (ctx) => {{
                            if (ctx.type !== 'data') return 'transparent';
                            return socColors[ctx.raw._data.category] || '#999';
                        }},
                        labels: {{ display: true, color: 'white', font: {{ weight: 'bold', size: 12 }} }}
                    }}]
                }},
                options: {{ maintainAspectRatio: false, plugins: {{ legend: {{ display: false }}, datalabels: {{ display: false }} }} }}
            }});
        }}

        const socSentCtx = document.getElementById('chartSocSent');
        if (socSentCtx) {{
            new Chart(socSentCtx, {{
                type: 'bar',
                data: {{ labels: {soc_sent_labels}, datasets: [{{ data: socSent, backgroundColor: colors }}] }},
                options: {{ maintainAspectRatio: false, plugins: {{ legend: {{ display: false }}, datalabels: {{ anchor: 'end', align: 'end', color: '#555' }} }}, scales: {{ y: {{ display: false, grace: '15%' }}, x: {{ grid: {{ display: false }} }} }} }}
            }});
        }}
",
        colors = js_literal(&SENTIMENT_COLORS),
        gen_sent = js_literal(&metrics.general_sentiment),
        brand_labels = js_literal(&brand_labels),
        brand_colors = js_literal(&brand_colors),
        brand_values = js_literal(&brand_values),
        soc_tree = js_literal(&network_series(metrics)),
        soc_colors = js_literal(&network_colors),
        soc_sent = js_literal(&metrics.social_sentiment),
        sent_labels = js_literal(&SENTIMENT_LABELS),
        soc_sent_labels = js_literal(&SOCIAL_SENTIMENT_BARS),
    );
    s
}

fn stylesheet(theme: &ReportTheme) -> String {
    let primary = &theme.primary;
    let secondary = &theme.secondary;
    format!(
        r"
        @import url('https://fonts.googleapis.com/css2?family=Roboto:wght@400;500;700&display=swap');
        body {{ font-family: 'Roboto', sans-serif; background: #f0f2f5; color: #333; margin: 0; padding: 20px; }}
        .container {{ max-width: 950px; margin: 0 auto; background: white; border-radius: 12px; box-shadow: 0 4px 15px rgba(0,0,0,0.05); padding: 40px; }}
        .header {{ text-align: center; margin-bottom: 25px; }}
        h1 {{ color: {primary}; margin: 0; font-size: 2.2em; }}
        .periodo {{ color: #777; font-size: 0.9em; }}
        .nav-bar {{ display: flex; flex-wrap: wrap; justify-content: center; gap: 8px; margin-bottom: 40px; background: #fafafa; padding: 15px; border-radius: 8px; }}
        .nav-btn {{ background: white; color: {primary}; border: 1px solid #ddd; padding: 8px 16px; border-radius: 20px; text-decoration: none; font-size: 0.85em; font-weight: 600; transition: all 0.2s; }}
        .nav-btn:hover {{ background: {primary}; color: white; border-color: {primary}; }}
        h2 {{ color: {primary}; border-bottom: 2px solid {secondary}; padding-bottom: 10px; margin-top: 50px; font-size: 1.5em; }}
        .dashboard-row {{ display: grid; grid-template-columns: 1fr 1fr; gap: 20px; margin: 25px 0; }}
        .chart-card {{ background: #fff; border: 1px solid #eee; border-radius: 10px; padding: 15px; text-align: center; }}
        .chart-card h4 {{ margin: 0 0 10px 0; color: #555; font-size: 0.85em; text-transform: uppercase; }}
        .chart-container {{ position: relative; height: 200px; width: 100%; }}
        .chart-empty {{ padding-top: 80px; color: #999; text-align: center; }}
        a {{ color: {primary}; text-decoration: none; font-weight: 500; }}
        a:hover {{ text-decoration: underline; }}
        li {{ margin-bottom: 15px; line-height: 1.5; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #eee; padding: 6px 10px; text-align: left; }}
        blockquote {{ background: transparent; border: none; margin: 5px 0 0 0; padding: 0 0 0 10px; color: #666; font-style: italic; font-size: 0.95em; }}
"
    )
}

fn nav_bar() -> String {
    let mut nav = String::from("<div class=\"nav-bar\">");
    for section in SECTIONS {
        let _ = write!(
            nav,
            "\n                <a href=\"#{}\" class=\"nav-btn\">{}</a>",
            section.slug,
            section.nav_label.replace(FLAG_GLYPH, FLAG_IMG)
        );
    }
    nav.push_str("\n            </div>");
    nav
}

fn page(body: &str, script: &str, ctx: &RenderContext) -> String {
    let company = escape_html(&ctx.company);
    let generated = ctx.generated_at.format("%d/%m/%Y %H:%M");
    let css = stylesheet(&ctx.theme);
    let nav = nav_bar();
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Reporte {company}</title>
    <script src="{CHART_JS}"></script>
    <script src="{DATALABELS_JS}"></script>
    <script src="{TREEMAP_JS}"></script>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Reporte Ejecutivo: {company}</h1>
            <div class="periodo">Generado el {generated}</div>
        </div>
        {nav}
        {body}
    </div>
    <script>{script}</script>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // writing into a String cannot fail
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
