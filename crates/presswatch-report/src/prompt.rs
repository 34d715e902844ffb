//! The analyst prompt sent to the language model.

use std::fmt::Write as _;

use chrono::{Days, NaiveDate};
use presswatch_search::Investigation;

use crate::vocabulary::{
    brand_mentions_label, company_news_heading, metric_line, Section, BRAND_VOLUME_HEADING,
    DIGITAL_SUMMARY, GENERAL_ANALYSIS, INTERNATIONAL_NEWS_HEADING, INTERNATIONAL_OVERVIEW,
    NATIONAL_OVERVIEW, NEWS_DETAIL, SECTOR_NEWS_HEADING, SENTIMENT_DATA_HEADING, SENTIMENT_EMOJI,
    SENTIMENT_LABELS, SENTIMENT_REPORT, SOCIAL_DATA_HEADING, SOCIAL_NETWORKS,
    SOCIAL_SENTIMENT_LABELS, TOTAL_MENTIONS_LABEL,
};

/// Inclusive reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `days`-day window ending on `end`.
    #[must_use]
    pub fn ending(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(end);
        Self { start, end }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Del {} al {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

/// Everything the prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub company: &'a str,
    pub range: DateRange,
    pub investigation: &'a Investigation,
    pub brand_labels: &'a [String],
}

/// Build the single report prompt.
///
/// The output skeleton is generated from the shared vocabulary so the headings
/// and `* Label:` lines the model is asked for are the ones the extractor and
/// renderer look for.
#[must_use]
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let company = input.company;
    let range = input.range;
    let count = input.investigation.source_count();
    let [positive, neutral, negative] = SENTIMENT_EMOJI;

    let mut p = String::new();
    let _ = writeln!(
        p,
        "Eres un analista de inteligencia corporativa experto. Genera el reporte para {company}."
    );
    let _ = writeln!(p);
    let _ = writeln!(p, "RANGO DE FECHAS VÁLIDO: {range}");
    let _ = writeln!(p);
    let _ = writeln!(p, "INPUT NOTICIAS:");
    let _ = writeln!(p, "{}", input.investigation.news_text);
    let _ = writeln!(p);
    let _ = writeln!(p, "INPUT SOCIAL:");
    let _ = writeln!(p, "{}", input.investigation.social_text);
    let _ = writeln!(p);
    let _ = writeln!(p, "INSTRUCCIONES OBLIGATORIAS:");
    let _ = writeln!(p, "1. **NO INVENTAR LINKS:** Usa solo los `URL_REAL` provistos.");
    let _ = writeln!(p, "2. **DEDUPLICACIÓN SEMÁNTICA (CRÍTICO):**");
    let _ = writeln!(
        p,
        "   - Si encuentras múltiples noticias cubriendo el **MISMO HECHO** (aunque sean de fuentes distintas), **AGRÚPALAS** en un solo ítem."
    );
    let _ = writeln!(p, "   - Usa el título más descriptivo.");
    let _ = writeln!(
        p,
        "   - Al final de la línea pon: [Leer más en Fuente 1](url1) | [Fuente 2](url2)."
    );
    let _ = writeln!(p, "   - NO generes dos ítems separados para la misma historia.");
    let _ = writeln!(p, "3. **CLASIFICACIÓN:**");
    let _ = writeln!(p, "   - Noticias de {company}/Subsidiarias van primero.");
    let _ = writeln!(
        p,
        "   - Noticias generales del sector van en su sección, salvo que mencionen explícitamente a {company}."
    );
    let _ = writeln!(
        p,
        "4. **SENTIMIENTO VISUAL:** Usa ÚNICAMENTE: {positive}, {neutral}, {negative}."
    );
    let _ = writeln!(p);
    let _ = writeln!(p, "ESTRUCTURA DE SALIDA (Markdown estricto):");
    let _ = writeln!(p);
    let _ = writeln!(p, "# Reporte de Sentimiento - {company}");
    let _ = writeln!(p, "**Período:** {range} | **Fuentes Únicas:** {count}");
    let _ = writeln!(p);

    section(&mut p, GENERAL_ANALYSIS);
    let _ = writeln!(
        p,
        "[Resumen ejecutivo de 1 párrafo sobre la situación de la empresa y el sector]"
    );
    let _ = writeln!(p);

    section(&mut p, SENTIMENT_REPORT);
    let _ = writeln!(p, "### {SENTIMENT_DATA_HEADING}");
    for label in SENTIMENT_LABELS {
        let _ = writeln!(p, "{}", metric_line(label, "Número"));
    }
    let _ = writeln!(p);
    let _ = writeln!(p, "### {BRAND_VOLUME_HEADING}");
    for brand in input.brand_labels {
        let _ = writeln!(p, "{}", metric_line(&brand_mentions_label(brand), "Número"));
    }
    let _ = writeln!(p);

    section(&mut p, NATIONAL_OVERVIEW);
    let _ = writeln!(p, "[Análisis coyuntura local]");
    let _ = writeln!(p);

    section(&mut p, INTERNATIONAL_OVERVIEW);
    let _ = writeln!(p, "[Análisis mercado global/acciones]");
    let _ = writeln!(p);

    section(&mut p, DIGITAL_SUMMARY);
    let _ = writeln!(p, "### {SOCIAL_DATA_HEADING}");
    let _ = writeln!(p, "{}", metric_line(TOTAL_MENTIONS_LABEL, "Suma"));
    let _ = writeln!(
        p,
        "[LISTA DINÁMICA: SOLO REDES CON MENCIONES > 0. NO PONGAS LAS QUE TIENEN 0]"
    );
    let _ = writeln!(
        p,
        "[Redes válidas, usa estos nombres exactos: {}]",
        SOCIAL_NETWORKS.join(", ")
    );
    let _ = writeln!(p, "* [Nombre Red]: [N]");
    let _ = writeln!(p, "* [Nombre Red]: [N]");
    let _ = writeln!(p, "...");
    for label in SOCIAL_SENTIMENT_LABELS {
        let _ = writeln!(p, "{}", metric_line(label, "N"));
    }
    let _ = writeln!(p);
    let _ = writeln!(p, "[Breve análisis redes]");
    let _ = writeln!(p);

    section(&mut p, NEWS_DETAIL);
    let _ = writeln!(p, "### {}", company_news_heading(company));
    let _ = writeln!(
        p,
        "[Lista noticias directas agrupadas por tema. Si no hay: \"Sin novedades directas\"."
    );
    let _ = writeln!(p, "Formato:");
    let _ = writeln!(p, "[EMOJI] **Título** - [Leer Fuente 1](URL1) | [Leer Fuente 2](URL2)");
    let _ = writeln!(p, "> *\"Extracto...\"*");
    let _ = writeln!(p, "]");
    let _ = writeln!(p);
    let _ = writeln!(p, "### {SECTOR_NEWS_HEADING}");
    let _ = writeln!(p, "[Lista noticias sectoriales. Agrupa si hay temas repetidos.");
    detail_format(&mut p);
    let _ = writeln!(p);
    let _ = writeln!(p, "### {INTERNATIONAL_NEWS_HEADING}");
    let _ = writeln!(p, "[Lista noticias internacionales.");
    detail_format(&mut p);

    p
}

fn section(p: &mut String, section: Section) {
    let _ = writeln!(p, "## {}", section.heading);
    let _ = writeln!(p);
}

fn detail_format(p: &mut String) {
    let _ = writeln!(p, "Formato:");
    let _ = writeln!(p, "[EMOJI] **Título** - [Leer más](URL_REAL)");
    let _ = writeln!(p, "> *\"Extracto...\"*");
    let _ = writeln!(p, "]");
}
