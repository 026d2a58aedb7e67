//! Keep papers with at least one non-academic author

use crate::row::PaperRow;

/// Stable-order subset of `rows` with a non-empty non-academic author field.
pub fn filter_non_academic(rows: &[PaperRow]) -> Vec<PaperRow> {
    rows.iter()
        .filter(|row| row.has_non_academic_authors())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pmid: &str, non_academic: &str) -> PaperRow {
        PaperRow {
            pmid: pmid.to_string(),
            title: format!("Paper {pmid}"),
            publication_date: "N/A".to_string(),
            non_academic_authors: non_academic.to_string(),
            company_affiliations: String::new(),
            corresponding_email: "N/A".to_string(),
        }
    }

    fn sample() -> Vec<PaperRow> {
        vec![
            row("1", "Smith John"),
            row("2", ""),
            row("3", "N/A"),
            row("4", "Doe Jane, Roe Rick"),
            row("5", "  "),
        ]
    }

    #[test]
    fn keeps_only_non_academic_in_order() {
        let kept = filter_non_academic(&sample());
        let pmids: Vec<&str> = kept.iter().map(|r| r.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["1", "4"]);
    }

    #[test]
    fn idempotent() {
        let once = filter_non_academic(&sample());
        let twice = filter_non_academic(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_untouched() {
        let rows = sample();
        let before = rows.clone();
        let _ = filter_non_academic(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn empty_input() {
        assert!(filter_non_academic(&[]).is_empty());
    }
}
