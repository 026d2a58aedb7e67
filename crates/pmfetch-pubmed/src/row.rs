//! Normalized output row

use serde::Serialize;

/// Placeholder for unknown dates and missing emails.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column headers in output order.
pub const COLUMNS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// One surviving record, flattened to six strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRow {
    #[serde(rename = "PubmedID")]
    pub pmid: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// `{year}-{month}-{day}` or `N/A`
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    /// Comma-joined, possibly empty
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    /// Comma-joined, same order as `non_academic_authors`
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl PaperRow {
    /// Whether any author was classified as company-affiliated.
    pub fn has_non_academic_authors(&self) -> bool {
        let authors = self.non_academic_authors.trim();
        !authors.is_empty() && authors != NOT_AVAILABLE
    }

    /// Cell values in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.pmid,
            &self.title,
            &self.publication_date,
            &self.non_academic_authors,
            &self.company_affiliations,
            &self.corresponding_email,
        ]
    }
}
