//! The fixed text record format shared by the search client, the
//! deduplicator, and the report prompt.
//!
//! A block is zero or more records, each shaped like:
//!
//! ```text
//! ITEM_1
//! FECHA_GOOGLE: hace 3 horas
//! FUENTE: Infobae
//! TITULO: Adecoagro amplía su planta de etanol
//! URL_REAL: https://www.infobae.com/economia/...
//! RESUMEN: La compañía anunció...
//! ----------------------------------------
//! ```

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::RawResult;

pub const RECORD_MARKER: &str = "ITEM_";
pub const DATE_LABEL: &str = "FECHA_GOOGLE:";
pub const SOURCE_LABEL: &str = "FUENTE:";
pub const TITLE_LABEL: &str = "TITULO:";
pub const URL_LABEL: &str = "URL_REAL:";
pub const SUMMARY_LABEL: &str = "RESUMEN:";

/// Date placeholder when the provider omits one.
pub const MISSING_DATE: &str = "Fecha no provista por API";
pub const DEFAULT_SOURCE: &str = "Web";
pub const MISSING_TITLE: &str = "Sin título";

const SEPARATOR_WIDTH: usize = 40;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"URL_REAL:[ \t]*([^\r\n]*)").expect("valid url regex"));

/// One discovered news or social item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// 1-based position within its block.
    pub index: usize,
    pub date: String,
    pub source: String,
    pub title: String,
    pub url: String,
    pub summary: String,
}

impl ResultItem {
    /// Parse one record, with or without its leading `ITEM_` marker.
    ///
    /// Returns `None` when no URL can be found; such records are still valid
    /// text and callers must pass them through untouched.
    #[must_use]
    pub fn parse(record: &str) -> Option<Self> {
        let url = extract_url(record)?.to_string();
        let body = record.strip_prefix(RECORD_MARKER).unwrap_or(record);
        let index = body
            .lines()
            .next()
            .and_then(|line| line.trim().parse::<usize>().ok())
            .unwrap_or(0);

        Some(Self {
            index,
            date: field(body, DATE_LABEL).unwrap_or(MISSING_DATE).to_string(),
            source: field(body, SOURCE_LABEL)
                .unwrap_or(DEFAULT_SOURCE)
                .to_string(),
            title: field(body, TITLE_LABEL).unwrap_or(MISSING_TITLE).to_string(),
            url,
            summary: field(body, SUMMARY_LABEL).unwrap_or_default().to_string(),
        })
    }
}

/// Extract the URL from a record's `URL_REAL:` line.
///
/// The URL is the remainder of the first such line, trimmed. An absent label
/// or an empty remainder yields `None`.
#[must_use]
pub fn extract_url(record: &str) -> Option<&str> {
    URL_RE
        .captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|url| !url.is_empty())
}

fn field<'a>(record: &'a str, label: &str) -> Option<&'a str> {
    record
        .lines()
        .find_map(|line| line.trim_start().strip_prefix(label))
        .map(str::trim)
}

/// Flatten provider results into a block of records.
///
/// Results without a link and links already written to this block are
/// skipped. At most `max_records` records are written. Returns an empty
/// string when nothing survives.
#[must_use]
pub fn format_block(results: &[RawResult], max_records: usize) -> String {
    let mut block = String::new();
    let mut links_seen: HashSet<&str> = HashSet::new();
    let mut written = 0usize;

    for result in results {
        if written >= max_records {
            break;
        }
        let Some(link) = result.link.as_deref().map(str::trim) else {
            continue;
        };
        if link.is_empty() || !links_seen.insert(link) {
            continue;
        }

        written += 1;
        let _ = writeln!(block, "{RECORD_MARKER}{written}");
        let _ = writeln!(
            block,
            "{DATE_LABEL} {}",
            single_line(result.date.as_deref().unwrap_or(MISSING_DATE))
        );
        let _ = writeln!(
            block,
            "{SOURCE_LABEL} {}",
            single_line(result.source.as_deref().unwrap_or(DEFAULT_SOURCE))
        );
        let _ = writeln!(
            block,
            "{TITLE_LABEL} {}",
            single_line(result.title.as_deref().unwrap_or(MISSING_TITLE))
        );
        let _ = writeln!(block, "{URL_LABEL} {link}");
        let _ = writeln!(
            block,
            "{SUMMARY_LABEL} {}",
            single_line(result.snippet.as_deref().unwrap_or_default())
        );
        let _ = writeln!(block, "{}", "-".repeat(SEPARATOR_WIDTH));
    }

    block
}

/// Collapse line breaks so a provider field cannot spill into the next label.
fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
