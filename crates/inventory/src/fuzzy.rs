//! Fuzzy string matching for make/model resolution.

use strsim::jaro_winkler;

/// Best-matching candidate and its similarity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub candidate: String,
    /// Similarity score in [0, 100]
    pub score: u8,
}

/// Find the best match for `query` among `candidates`.
///
/// Jaro-Winkler similarity on lowercased inputs, scaled to [0, 100].
/// Exact and shared-prefix matches score high (>= 90); unrelated strings
/// score low. Ties break to the first candidate in iteration order: a later
/// candidate only wins with a strictly greater score, so resolution is
/// deterministic for a fixed candidate sequence.
///
/// Returns `None` only for an empty candidate set.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.to_lowercase();
    let mut best: Option<FuzzyMatch> = None;

    for candidate in candidates {
        let score = (jaro_winkler(&query, &candidate.to_lowercase()) * 100.0).round() as u8;
        let improves = best.as_ref().map(|b| score > b.score).unwrap_or(true);
        if improves {
            best = Some(FuzzyMatch {
                candidate: candidate.to_string(),
                score,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAKES: [&str; 4] = ["Chevrolet", "Toyota", "Ford", "Volkswagen"];

    #[test]
    fn test_exact_match_scores_100() {
        let m = best_match("Chevrolet", MAKES).unwrap();
        assert_eq!(m.candidate, "Chevrolet");
        assert_eq!(m.score, 100);
    }

    #[test]
    fn test_case_insensitive() {
        let m = best_match("chevrolet", MAKES).unwrap();
        assert_eq!(m.candidate, "Chevrolet");
        assert_eq!(m.score, 100);
    }

    #[test]
    fn test_prefix_scores_high() {
        let m = best_match("Chevro", MAKES).unwrap();
        assert_eq!(m.candidate, "Chevrolet");
        assert!(m.score >= 90, "got {}", m.score);
    }

    #[test]
    fn test_abbreviation_beats_threshold() {
        let m = best_match("Chevy", MAKES).unwrap();
        assert_eq!(m.candidate, "Chevrolet");
        assert!(m.score > 70, "got {}", m.score);
    }

    #[test]
    fn test_typo_beats_threshold() {
        let m = best_match("Chebys", MAKES).unwrap();
        assert_eq!(m.candidate, "Chevrolet");
        assert!(m.score > 70, "got {}", m.score);
    }

    #[test]
    fn test_unrelated_scores_low() {
        let m = best_match("Zzzzz", MAKES).unwrap();
        assert!(m.score <= 50, "got {} for {}", m.score, m.candidate);
    }

    #[test]
    fn test_tie_break_is_first_in_order() {
        // Identical candidates tie exactly; the first one must win.
        let m = best_match("onix", ["Onix", "ONIX"]).unwrap();
        assert_eq!(m.candidate, "Onix");
        assert_eq!(m.score, 100);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(best_match("anything", Vec::<&str>::new()).is_none());
    }
}
