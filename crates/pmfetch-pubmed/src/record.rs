//! Raw records → normalized rows
//!
//! A [`RawRecord`] mirrors one `<PubmedArticle>` as a nested mapping with no
//! schema guarantee. Every lookup here is optional; a record is dropped only
//! when its PMID or title is missing, and a bad author never costs the record.

use serde_json::Value;

use crate::authors::{AuthorIssue, extract_authors};
use crate::row::{NOT_AVAILABLE, PaperRow};

pub const PMID_PATH: &str = "/MedlineCitation/PMID";
pub const TITLE_PATH: &str = "/MedlineCitation/Article/ArticleTitle";
pub const PUB_DATE_PATH: &str = "/MedlineCitation/Article/Journal/JournalIssue/PubDate";
pub const AUTHOR_LIST_PATH: &str = "/MedlineCitation/Article/AuthorList";

/// One bibliographic entry as retrieved, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord(pub Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// String at a JSON-pointer path, if present and textual.
    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.0.pointer(path).and_then(Value::as_str)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Why part of a record was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// PMID or title absent: the whole record is dropped
    MissingField { path: &'static str },
    /// AuthorList present but not a sequence: the record keeps no authors
    MalformedAuthorList,
    /// One author skipped, the rest of the record is kept
    MalformedAuthor(AuthorIssue),
}

/// A skipped record or author, for the caller to surface as it sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the record in the input batch
    pub record_index: usize,
    pub pmid: Option<String>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Whether the record produced no row.
    pub fn drops_record(&self) -> bool {
        matches!(self.kind, DiagnosticKind::MissingField { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.pmid {
            Some(pmid) => write!(f, "record {} (PMID {pmid}): ", self.record_index)?,
            None => write!(f, "record {}: ", self.record_index)?,
        }
        match &self.kind {
            DiagnosticKind::MissingField { path } => {
                write!(f, "skipped, missing {}", path.trim_start_matches('/'))
            }
            DiagnosticKind::MalformedAuthorList => {
                write!(f, "AuthorList is not a sequence, authors ignored")
            }
            DiagnosticKind::MalformedAuthor(issue) => write!(f, "{issue}, skipped"),
        }
    }
}

/// Rows produced from a batch, plus everything that was skipped along the way.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub rows: Vec<PaperRow>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// Number of input records that produced no row.
    pub fn skipped_records(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.drops_record()).count()
    }
}

/// Normalize a batch of records, preserving input order.
pub fn parse_records(records: &[RawRecord]) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (record_index, record) in records.iter().enumerate() {
        match parse_record(record) {
            Ok((row, author_problems)) => {
                outcome
                    .diagnostics
                    .extend(author_problems.into_iter().map(|kind| Diagnostic {
                        record_index,
                        pmid: Some(row.pmid.clone()),
                        kind,
                    }));
                outcome.rows.push(row);
            }
            Err(path) => outcome.diagnostics.push(Diagnostic {
                record_index,
                pmid: record.text_at(PMID_PATH).map(str::to_string),
                kind: DiagnosticKind::MissingField { path },
            }),
        }
    }

    outcome
}

/// One record → row, or the mandatory path that was missing.
fn parse_record(record: &RawRecord) -> Result<(PaperRow, Vec<DiagnosticKind>), &'static str> {
    let pmid = record.text_at(PMID_PATH).ok_or(PMID_PATH)?;
    let title = record.text_at(TITLE_PATH).ok_or(TITLE_PATH)?;

    let mut problems = Vec::new();
    let authors: &[Value] = match record.value().pointer(AUTHOR_LIST_PATH) {
        None => &[],
        Some(list) => match list.as_array() {
            Some(list) => list.as_slice(),
            None => {
                problems.push(DiagnosticKind::MalformedAuthorList);
                &[]
            }
        },
    };
    let (summary, issues) = extract_authors(authors);
    problems.extend(issues.into_iter().map(DiagnosticKind::MalformedAuthor));

    let row = PaperRow {
        pmid: pmid.to_string(),
        title: title.to_string(),
        publication_date: publication_date(record),
        non_academic_authors: summary.non_academic.join(", "),
        company_affiliations: summary.companies.join(", "),
        corresponding_email: summary.email,
    };
    Ok((row, problems))
}

/// `{year}-{month}-{day}` with per-part defaults, or `N/A` without a PubDate.
fn publication_date(record: &RawRecord) -> String {
    let Some(date) = record
        .value()
        .pointer(PUB_DATE_PATH)
        .and_then(Value::as_object)
    else {
        return NOT_AVAILABLE.to_string();
    };
    let part = |key: &str, default: &'static str| -> String {
        date.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };
    format!(
        "{}-{}-{}",
        part("Year", NOT_AVAILABLE),
        part("Month", "01"),
        part("Day", "01")
    )
}
