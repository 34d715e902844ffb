//! Query planning: the fixed partition of searches a run performs.

use presswatch_core::CompanyProfile;

/// Sites the social query is restricted to.
pub const SOCIAL_SITES: &[&str] = &[
    "twitter.com",
    "facebook.com",
    "instagram.com",
    "linkedin.com",
    "youtube.com",
];

/// The four news searches, in the order their blocks are deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSlot {
    International,
    NationalBrand,
    NationalSubsidiaries,
    Sector,
}

impl NewsSlot {
    pub const ALL: [NewsSlot; 4] = [
        NewsSlot::International,
        NewsSlot::NationalBrand,
        NewsSlot::NationalSubsidiaries,
        NewsSlot::Sector,
    ];

    /// Section banner written above the block in the prompt input.
    #[must_use]
    pub fn banner(self) -> &'static str {
        match self {
            NewsSlot::International => "=== BLOQUE INTERNACIONAL ===",
            NewsSlot::NationalBrand => "=== BLOQUE NACIONAL (MARCA) ===",
            NewsSlot::NationalSubsidiaries => "=== BLOQUE NACIONAL (SUBSIDIARIAS) ===",
            NewsSlot::Sector => "=== BLOQUE SECTOR/COMPETENCIA ===",
        }
    }
}

impl std::fmt::Display for NewsSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsSlot::International => f.pad("international"),
            NewsSlot::NationalBrand => f.pad("national_brand"),
            NewsSlot::NationalSubsidiaries => f.pad("national_subsidiaries"),
            NewsSlot::Sector => f.pad("sector"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub international: String,
    pub national_brand: String,
    pub national_subsidiaries: String,
    pub sector: String,
    pub social: String,
}

impl QueryPlan {
    /// Build the five queries for `profile`.
    ///
    /// Only the first `subsidiary_query_limit` subsidiaries are folded into
    /// the subsidiaries query to stay inside the provider's query length.
    #[must_use]
    pub fn from_profile(profile: &CompanyProfile) -> Self {
        let name = profile.name.trim();
        let country = profile.country.trim();

        let international = format!("{name} {}", profile.international_keywords.trim())
            .trim_end()
            .to_string();

        let national_brand = with_country(format!("\"{name}\""), country);

        let subsidiaries = any_of(
            profile
                .subsidiaries
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .take(profile.subsidiary_query_limit)
                .map(|s| format!("\"{s}\"")),
        );
        let national_subsidiaries = with_country(format!("({subsidiaries})"), country);

        let terms = any_of(
            profile
                .sector_terms
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        );
        let sector = with_country(format!("({terms})"), country);

        let sites = any_of(SOCIAL_SITES.iter().map(|site| format!("site:{site}")));
        let social = format!("\"{name}\" ({sites})");

        Self {
            international,
            national_brand,
            national_subsidiaries,
            sector,
            social,
        }
    }

    #[must_use]
    pub fn news_query(&self, slot: NewsSlot) -> &str {
        match slot {
            NewsSlot::International => &self.international,
            NewsSlot::NationalBrand => &self.national_brand,
            NewsSlot::NationalSubsidiaries => &self.national_subsidiaries,
            NewsSlot::Sector => &self.sector,
        }
    }
}

fn any_of(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(" OR ")
}

fn with_country(clause: String, country: &str) -> String {
    if country.is_empty() {
        clause
    } else {
        format!("{clause} {country}")
    }
}

#[cfg(test)]
mod tests {
    use presswatch_core::{ReportTheme, TrackedBrand};

    use super::*;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            name: "Adecoagro".to_string(),
            country: "Argentina".to_string(),
            international_keywords: "stock earnings agriculture finance".to_string(),
            subsidiaries: vec![
                "Adeco Agropecuaria S.A.".to_string(),
                "Pilagá S.A.".to_string(),
                "Molinos Libres S.A.".to_string(),
                "Cavok S.A.".to_string(),
                "Establecimientos El Orden S.A.".to_string(),
            ],
            subsidiary_query_limit: 4,
            sector_terms: vec![
                "Sancor crisis".to_string(),
                "La Serenísima lechería".to_string(),
            ],
            tracked_brands: vec![TrackedBrand {
                label: "Adecoagro".to_string(),
                color: "#1976D2".to_string(),
            }],
            theme: ReportTheme::default(),
        }
    }

    #[test]
    fn international_query_appends_keywords() {
        let plan = QueryPlan::from_profile(&profile());
        assert_eq!(
            plan.international,
            "Adecoagro stock earnings agriculture finance"
        );
    }

    #[test]
    fn international_query_without_keywords_is_just_the_name() {
        let mut p = profile();
        p.international_keywords = String::new();
        assert_eq!(QueryPlan::from_profile(&p).international, "Adecoagro");
    }

    #[test]
    fn national_brand_query_quotes_the_name() {
        let plan = QueryPlan::from_profile(&profile());
        assert_eq!(plan.national_brand, "\"Adecoagro\" Argentina");
    }

    #[test]
    fn subsidiaries_query_is_truncated_to_limit() {
        let plan = QueryPlan::from_profile(&profile());
        assert_eq!(
            plan.national_subsidiaries,
            "(\"Adeco Agropecuaria S.A.\" OR \"Pilagá S.A.\" OR \"Molinos Libres S.A.\" OR \"Cavok S.A.\") Argentina"
        );
        assert!(!plan.national_subsidiaries.contains("El Orden"));
    }

    #[test]
    fn subsidiaries_limit_is_configurable() {
        let mut p = profile();
        p.subsidiary_query_limit = 1;
        assert_eq!(
            QueryPlan::from_profile(&p).national_subsidiaries,
            "(\"Adeco Agropecuaria S.A.\") Argentina"
        );
    }

    #[test]
    fn sector_query_joins_terms_unquoted() {
        let plan = QueryPlan::from_profile(&profile());
        assert_eq!(
            plan.sector,
            "(Sancor crisis OR La Serenísima lechería) Argentina"
        );
    }

    #[test]
    fn social_query_restricts_to_fixed_sites() {
        let plan = QueryPlan::from_profile(&profile());
        assert_eq!(
            plan.social,
            "\"Adecoagro\" (site:twitter.com OR site:facebook.com OR site:instagram.com OR site:linkedin.com OR site:youtube.com)"
        );
    }

    #[test]
    fn news_query_maps_slots_in_order() {
        let plan = QueryPlan::from_profile(&profile());
        let queries: Vec<&str> = NewsSlot::ALL.iter().map(|s| plan.news_query(*s)).collect();
        assert_eq!(
            queries,
            vec![
                plan.international.as_str(),
                plan.national_brand.as_str(),
                plan.national_subsidiaries.as_str(),
                plan.sector.as_str(),
            ]
        );
    }

    #[test]
    fn banners_are_distinct() {
        let banners: std::collections::HashSet<&str> =
            NewsSlot::ALL.iter().map(|s| s.banner()).collect();
        assert_eq!(banners.len(), 4);
    }
}
