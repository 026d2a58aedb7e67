//! Company vs. academic affiliation heuristic

/// Substrings that mark an affiliation as commercial.
pub const COMPANY_KEYWORDS: [&str; 5] = ["pharma", "biotech", "inc", "pfizer", "novartis"];

/// Substrings that mark an affiliation as academic. These always win.
pub const ACADEMIC_KEYWORDS: [&str; 3] = ["university", "institute", "college"];

/// Whether an affiliation string points at a company.
///
/// Case-insensitive substring match: at least one company keyword and no
/// academic keyword. Empty input is unknown, not a company.
pub fn is_company_affiliation(affiliation: &str) -> bool {
    if affiliation.is_empty() {
        return false;
    }
    let affiliation = affiliation.to_lowercase();
    let has_company = COMPANY_KEYWORDS.iter().any(|k| affiliation.contains(k));
    let has_academic = ACADEMIC_KEYWORDS.iter().any(|k| affiliation.contains(k));
    has_company && !has_academic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_keywords_match() {
        assert!(is_company_affiliation("Acme Biotech Inc"));
        assert!(is_company_affiliation("Pfizer, New York, NY, USA"));
        assert!(is_company_affiliation("Novartis AG, Basel"));
        assert!(is_company_affiliation("Takeda Pharmaceuticals"));
    }

    #[test]
    fn case_insensitive() {
        assert!(is_company_affiliation("ACME BIOTECH"));
        assert!(is_company_affiliation("pfizer"));
        assert!(!is_company_affiliation("PFIZER UNIVERSITY"));
    }

    #[test]
    fn academic_overrides_company() {
        assert!(!is_company_affiliation("Acme University"));
        assert!(!is_company_affiliation("Biotech Institute of Somewhere"));
        assert!(!is_company_affiliation("College of Pharmacy"));
    }

    #[test]
    fn neither_keyword_is_not_company() {
        assert!(!is_company_affiliation("Mayo Clinic, Rochester"));
        assert!(!is_company_affiliation("Department of Medicine"));
    }

    #[test]
    fn empty_is_not_company() {
        assert!(!is_company_affiliation(""));
    }

    #[test]
    fn inc_matches_as_substring() {
        // Plain substring match: "inc" inside a longer word counts
        assert!(is_company_affiliation("Lincoln Hospital"));
        assert!(!is_company_affiliation("Lincoln College"));
    }

    #[test]
    fn every_company_keyword_alone() {
        for keyword in COMPANY_KEYWORDS {
            assert!(is_company_affiliation(keyword), "{keyword}");
        }
    }

    #[test]
    fn every_academic_keyword_beats_every_company_keyword() {
        for company in COMPANY_KEYWORDS {
            for academic in ACADEMIC_KEYWORDS {
                let affiliation = format!("{company} {academic}");
                assert!(!is_company_affiliation(&affiliation), "{affiliation}");
            }
        }
    }
}
