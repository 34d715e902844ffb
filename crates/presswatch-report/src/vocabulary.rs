//! Heading and label vocabulary shared by the prompt and the parser side.
//!
//! The prompt asks the model to emit exactly these headings and `* Label: N`
//! lines; the metric extractor and the renderer look for the same strings.

/// Glyph the model uses to mark national content.
pub const FLAG_GLYPH: &str = "🇦🇷";

/// Inline image substituted for [`FLAG_GLYPH`] in the rendered page.
pub const FLAG_IMG: &str = r#"<img src="https://flagcdn.com/h24/ar.png" alt="AR" style="vertical-align:text-bottom; height:20px;">"#;

/// A top-level `##` section of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Heading text as written in markdown, without the `## ` prefix.
    pub heading: &'static str,
    /// Anchor id given to the rendered `<h2>`.
    pub slug: &'static str,
    /// Text of the navigation button.
    pub nav_label: &'static str,
}

pub const GENERAL_ANALYSIS: Section = Section {
    heading: "📈 Análisis General",
    slug: "analisis-general",
    nav_label: "📈 Análisis General",
};

pub const SENTIMENT_REPORT: Section = Section {
    heading: "📊 Reporte de Sentimiento",
    slug: "reporte-sentimiento",
    nav_label: "📊 Sentimiento",
};

pub const NATIONAL_OVERVIEW: Section = Section {
    heading: "🇦🇷 Panorama Nacional",
    slug: "panorama-nacional",
    nav_label: "🇦🇷 Nacional",
};

pub const INTERNATIONAL_OVERVIEW: Section = Section {
    heading: "🌍 Panorama Internacional",
    slug: "panorama-internacional",
    nav_label: "🌍 Internacional",
};

pub const DIGITAL_SUMMARY: Section = Section {
    heading: "💬 Resumen Conversación Digital",
    slug: "resumen-digital",
    nav_label: "💬 Redes Sociales",
};

pub const NEWS_DETAIL: Section = Section {
    heading: "📰 Detalle de Noticias",
    slug: "detalle-noticias",
    nav_label: "📰 Noticias",
};

/// Report sections in page order.
pub const SECTIONS: [Section; 6] = [
    GENERAL_ANALYSIS,
    SENTIMENT_REPORT,
    NATIONAL_OVERVIEW,
    INTERNATIONAL_OVERVIEW,
    DIGITAL_SUMMARY,
    NEWS_DETAIL,
];

pub const SENTIMENT_DATA_HEADING: &str = "Datos Sentimiento";
pub const BRAND_VOLUME_HEADING: &str = "Datos Volumen por Marca";
pub const SOCIAL_DATA_HEADING: &str = "Data Social";

pub const SECTOR_NEWS_HEADING: &str = "🚜 Novedades del Sector (Competencia y Contexto)";
pub const INTERNATIONAL_NEWS_HEADING: &str = "🌐 Internacional";

/// Positive, neutral and negative, in chart order.
pub const SENTIMENT_LABELS: [&str; 3] = ["Positivo", "Neutro", "Negativo"];

/// Networks charted in the social treemap, in chart order.
pub const SOCIAL_NETWORKS: [&str; 5] = [
    "Facebook",
    "Instagram",
    "X (Twitter)",
    "TikTok",
    "YouTube",
];

pub const SOCIAL_SENTIMENT_LABELS: [&str; 3] =
    ["Social Positivo", "Social Neutro", "Social Negativo"];

pub const TOTAL_MENTIONS_LABEL: &str = "Total Menciones";

/// Sentiment emoji the model may use, positive to negative.
pub const SENTIMENT_EMOJI: [&str; 3] = ["🙂", "😐", "😠"];

/// Metric label for a tracked brand, e.g. `Menciones Pilagá`.
#[must_use]
pub fn brand_mentions_label(brand: &str) -> String {
    format!("Menciones {brand}")
}

/// Detail subsection for news about the company itself.
#[must_use]
pub fn company_news_heading(company: &str) -> String {
    format!("{FLAG_GLYPH} {company} y Subsidiarias")
}

/// `* Label: [placeholder]` line as requested in the prompt skeleton.
#[must_use]
pub fn metric_line(label: &str, placeholder: &str) -> String {
    format!("* {label}: [{placeholder}]")
}
