//! Labeled numeric fields read back out of the model's markdown.

use regex::Regex;
use serde::Serialize;

use crate::vocabulary::{
    brand_mentions_label, SENTIMENT_LABELS, SOCIAL_NETWORKS, SOCIAL_SENTIMENT_LABELS,
};

/// Chart inputs extracted from a report. Absent fields are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportMetrics {
    /// Positive, neutral, negative.
    pub general_sentiment: [u64; 3],
    /// One entry per tracked brand, in declared order.
    pub brand_volumes: Vec<u64>,
    /// Facebook, Instagram, X (Twitter), TikTok, YouTube.
    pub social_volumes: [u64; 5],
    pub social_sentiment: [u64; 3],
}

impl ReportMetrics {
    /// All-zero metrics for `brand_count` brands.
    #[must_use]
    pub fn empty(brand_count: usize) -> Self {
        Self {
            brand_volumes: vec![0; brand_count],
            ..Self::default()
        }
    }
}

/// Scan `markdown` for `* Label: <integer>` lines.
///
/// Matching is case-insensitive and anchored to the start of a line (leading
/// spaces and tabs allowed). The first occurrence of a label wins. Values that
/// do not fit in a `u64` read as zero.
#[must_use]
pub fn extract_metrics(markdown: &str, brand_labels: &[String]) -> ReportMetrics {
    ReportMetrics {
        general_sentiment: SENTIMENT_LABELS.map(|label| metric_value(markdown, label)),
        brand_volumes: brand_labels
            .iter()
            .map(|brand| metric_value(markdown, &brand_mentions_label(brand)))
            .collect(),
        social_volumes: SOCIAL_NETWORKS.map(|label| metric_value(markdown, label)),
        social_sentiment: SOCIAL_SENTIMENT_LABELS.map(|label| metric_value(markdown, label)),
    }
}

/// Value of the first `* {label}: N` line, or 0.
#[must_use]
pub fn metric_value(markdown: &str, label: &str) -> u64 {
    let pattern = format!(r"(?im)^[ \t]*\*[ \t]*{}:[ \t]*(\d+)", regex::escape(label));
    let Ok(re) = Regex::new(&pattern) else {
        tracing::warn!(label, "metric label produced an invalid pattern");
        return 0;
    };

    re.captures(markdown)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brands() -> Vec<String> {
        vec![
            "Adecoagro".to_string(),
            "Pilagá".to_string(),
            "Molinos Ala".to_string(),
            "La Lácteo".to_string(),
        ]
    }

    const FULL_REPORT: &str = "\
# Reporte de Sentimiento - Adecoagro

## 📊 Reporte de Sentimiento

### Datos Sentimiento
* Positivo: 12
* Neutro: 5
* Negativo: 2

### Datos Volumen por Marca
* Menciones Adecoagro: 9
* Menciones Pilagá: 3
* Menciones Molinos Ala: 0
* Menciones La Lácteo: 1

## 💬 Resumen Conversación Digital

### Data Social
* Total Menciones: 7
* Facebook: 2
* X (Twitter): 4
* YouTube: 1
* Social Positivo: 3
* Social Neutro: 3
* Social Negativo: 1
";

    #[test]
    fn reads_every_field_of_a_full_report() {
        let m = extract_metrics(FULL_REPORT, &brands());
        assert_eq!(m.general_sentiment, [12, 5, 2]);
        assert_eq!(m.brand_volumes, vec![9, 3, 0, 1]);
        assert_eq!(m.social_volumes, [2, 0, 4, 0, 1]);
        assert_eq!(m.social_sentiment, [3, 3, 1]);
    }

    #[test]
    fn lone_positive_line_defaults_the_rest_to_zero() {
        let m = extract_metrics("* Positivo: 7", &brands());
        assert_eq!(m.general_sentiment, [7, 0, 0]);
        assert_eq!(m.brand_volumes, vec![0, 0, 0, 0]);
        assert_eq!(m.social_volumes, [0; 5]);
        assert_eq!(m.social_sentiment, [0; 3]);
    }

    #[test]
    fn label_match_is_case_insensitive() {
        let m = extract_metrics("* positivo: 4\n*   NEUTRO:2", &brands());
        assert_eq!(m.general_sentiment, [4, 2, 0]);
    }

    #[test]
    fn accented_brand_names_are_not_folded() {
        let m = extract_metrics("* Menciones Pilaga: 5", &brands());
        assert_eq!(m.brand_volumes[1], 0);
    }

    #[test]
    fn social_sentiment_does_not_satisfy_general_sentiment() {
        let m = extract_metrics("* Social Positivo: 8", &brands());
        assert_eq!(m.general_sentiment, [0, 0, 0]);
        assert_eq!(m.social_sentiment, [8, 0, 0]);
    }

    #[test]
    fn match_must_start_the_line() {
        let m = extract_metrics("Resumen: * Positivo: 9\n\t* Negativo: 1", &brands());
        assert_eq!(m.general_sentiment, [0, 0, 1]);
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(metric_value("* Neutro: 3\n* Neutro: 10", "Neutro"), 3);
    }

    #[test]
    fn placeholder_and_overflow_read_as_zero() {
        assert_eq!(metric_value("* Positivo: [Número]", "Positivo"), 0);
        assert_eq!(
            metric_value("* Positivo: 99999999999999999999999", "Positivo"),
            0
        );
    }

    #[test]
    fn parenthesised_label_is_matched_literally() {
        assert_eq!(metric_value("* X (Twitter): 6", "X (Twitter)"), 6);
        assert_eq!(metric_value("* X Twitter: 6", "X (Twitter)"), 0);
    }

    #[test]
    fn no_brands_yields_empty_volumes() {
        let m = extract_metrics(FULL_REPORT, &[]);
        assert!(m.brand_volumes.is_empty());
        assert_eq!(
            m,
            ReportMetrics {
                brand_volumes: Vec::new(),
                ..extract_metrics(FULL_REPORT, &brands())
            }
        );
    }

    #[test]
    fn empty_matches_brand_count() {
        assert_eq!(ReportMetrics::empty(3).brand_volumes, vec![0, 0, 0]);
    }
}
