//! Per-record author walk: who is non-academic, where they work, and a contact email.
//!
//! Only the first `AffiliationInfo` entry of each author is inspected. The
//! email is taken from whichever author carries one last in list order; no
//! first/corresponding author role is distinguished.

use serde_json::Value;

use crate::classify::is_company_affiliation;
use crate::row::NOT_AVAILABLE;

/// Name used for an author with neither personal nor collective name.
pub const UNNAMED_AUTHOR: &str = "(unnamed)";

/// Authors of one record, reduced to what the report needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    /// Names of company-affiliated authors, in author-list order
    pub non_academic: Vec<String>,
    /// Affiliation strings, index-aligned with `non_academic`
    pub companies: Vec<String>,
    /// Last email seen, or `N/A`
    pub email: String,
}

impl Default for AuthorSummary {
    fn default() -> Self {
        Self {
            non_academic: Vec::new(),
            companies: Vec::new(),
            email: NOT_AVAILABLE.to_string(),
        }
    }
}

/// An author entry that was skipped because of its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIssue {
    /// Position in the author list
    pub index: usize,
    pub reason: &'static str,
}

impl std::fmt::Display for AuthorIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "author #{}: {}", self.index + 1, self.reason)
    }
}

/// Fields read from one well-formed author entry.
struct AuthorFields<'a> {
    name: String,
    affiliation: &'a str,
    email: Option<&'a str>,
}

/// Walk an author list.
///
/// Malformed entries are reported and skipped; the rest are still processed.
pub fn extract_authors(authors: &[Value]) -> (AuthorSummary, Vec<AuthorIssue>) {
    let mut summary = AuthorSummary::default();
    let mut issues = Vec::new();

    for (index, author) in authors.iter().enumerate() {
        let fields = match read_author(author) {
            Ok(fields) => fields,
            Err(reason) => {
                issues.push(AuthorIssue { index, reason });
                continue;
            }
        };

        if is_company_affiliation(fields.affiliation) {
            summary.non_academic.push(fields.name);
            summary.companies.push(fields.affiliation.to_string());
        }
        if let Some(email) = fields.email {
            summary.email = email.to_string();
        }
    }

    (summary, issues)
}

fn read_author(author: &Value) -> Result<AuthorFields<'_>, &'static str> {
    let author = author.as_object().ok_or("entry is not a mapping")?;

    let last = author.get("LastName").and_then(Value::as_str).unwrap_or("");
    let fore = author.get("ForeName").and_then(Value::as_str).unwrap_or("");
    let mut name = format!("{last} {fore}").trim().to_string();
    if name.is_empty() {
        // Group authors carry CollectiveName instead of personal names
        name = author
            .get("CollectiveName")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_AUTHOR)
            .to_string();
    }

    let first_info = match author.get("AffiliationInfo") {
        None => None,
        Some(info) => info
            .as_array()
            .ok_or("AffiliationInfo is not a sequence")?
            .first(),
    };
    let Some(info) = first_info else {
        return Ok(AuthorFields {
            name,
            affiliation: "",
            email: None,
        });
    };
    let info = info
        .as_object()
        .ok_or("AffiliationInfo entry is not a mapping")?;

    let affiliation = match info.get("Affiliation") {
        None => "",
        Some(v) => v.as_str().ok_or("Affiliation is not text")?,
    };
    let email = match info.get("Email") {
        None => None,
        Some(v) => Some(v.as_str().ok_or("Email is not text")?),
    };

    Ok(AuthorFields {
        name,
        affiliation,
        email,
    })
}
