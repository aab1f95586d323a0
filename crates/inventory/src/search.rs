//! Catalog search with fuzzy make/model correction.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{distinct, Catalog, Listing};
use crate::fuzzy::best_match;

/// Fuzzy scores at or below this are rejected as unrecognized names.
///
/// 70 separates abbreviations and typos ("Chevy", "Chebys") from unrelated
/// inputs. Policy of the search service, not the matcher.
pub const MATCH_THRESHOLD: u8 = 70;

/// Filters for one search call. All fields optional; filters compose as
/// logical AND.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Raw user text for the manufacturer, fuzzy-resolved before filtering
    pub make: Option<String>,
    /// Raw user text for the model, resolved against the post-make working set
    pub model: Option<String>,
    pub max_price: Option<f64>,
    pub max_km: Option<u64>,
}

/// Outcome of a catalog search.
///
/// Name-resolution failures are kept distinct from an empty filter result:
/// in the first case the name itself was not recognized, in the second the
/// names resolved fine but no rows satisfied every filter.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Listings that satisfy every supplied filter, with make/model equal
    /// to the resolved (not raw) values.
    Matches(Vec<Listing>),
    /// Names resolved, but no rows satisfied all filters.
    NoMatches,
    /// The make did not resolve; `suggestion` is the best-scoring candidate.
    UnknownMake {
        query: String,
        suggestion: Option<String>,
    },
    /// The model did not resolve within the working set.
    UnknownModel {
        query: String,
        suggestion: Option<String>,
    },
}

/// Typo-tolerant, filter-composed search over the catalog snapshot.
pub struct SearchService {
    catalog: Arc<Catalog>,
}

impl SearchService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Search the catalog.
    ///
    /// Fuzzy correction runs before the price/km filters so typos never
    /// mask exact-filter results. Model resolution is scoped to the rows
    /// remaining after the make step, so identical model names across
    /// makes do not cross-contaminate results.
    pub fn search(&self, filter: &SearchFilter) -> SearchOutcome {
        if self.catalog.is_empty() {
            info!("Search against empty catalog");
            return SearchOutcome::NoMatches;
        }

        let mut working: Vec<&Listing> = self.catalog.listings().iter().collect();

        if let Some(ref make) = filter.make {
            let candidates = self.catalog.distinct_makes();
            let Some(m) = best_match(make, candidates) else {
                return SearchOutcome::NoMatches;
            };
            debug!(
                "Fuzzy match for make '{}' -> '{}' (score={})",
                make, m.candidate, m.score
            );
            if m.score <= MATCH_THRESHOLD {
                warn!("Make fuzzy match score too low: {}", m.score);
                return SearchOutcome::UnknownMake {
                    query: make.clone(),
                    suggestion: Some(m.candidate),
                };
            }
            working.retain(|l| l.make == m.candidate);
        }

        if let Some(ref model) = filter.model {
            let candidates = if working.is_empty() {
                distinct(self.catalog.listings().iter(), |l| l.model.as_str())
            } else {
                distinct(working.iter().copied(), |l| l.model.as_str())
            };
            let Some(m) = best_match(model, candidates) else {
                return SearchOutcome::NoMatches;
            };
            debug!(
                "Fuzzy match for model '{}' -> '{}' (score={})",
                model, m.candidate, m.score
            );
            if m.score <= MATCH_THRESHOLD {
                warn!("Model fuzzy match score too low: {}", m.score);
                return SearchOutcome::UnknownModel {
                    query: model.clone(),
                    suggestion: Some(m.candidate),
                };
            }
            working.retain(|l| l.model == m.candidate);
        }

        if let Some(max_price) = filter.max_price {
            working.retain(|l| l.price <= max_price);
            debug!("Applied max_price filter: {}", max_price);
        }

        if let Some(max_km) = filter.max_km {
            working.retain(|l| l.km <= max_km);
            debug!("Applied max_km filter: {}", max_km);
        }

        if working.is_empty() {
            info!("No cars found matching the search criteria");
            return SearchOutcome::NoMatches;
        }

        SearchOutcome::Matches(working.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn listing(make: &str, model: &str, price: f64, km: u64) -> Listing {
        Listing {
            make: make.to_string(),
            model: model.to_string(),
            price,
            km,
            extra: BTreeMap::new(),
        }
    }

    fn service() -> SearchService {
        SearchService::new(Arc::new(Catalog::from_listings(vec![
            listing("Chevrolet", "Onix", 250000.0, 50000),
            listing("Chevrolet", "Aveo", 280000.0, 30000),
            listing("Toyota", "Corolla", 350000.0, 40000),
            listing("Ford", "Fiesta", 150000.0, 70000),
        ])))
    }

    #[test]
    fn test_make_fuzzy_match_success() {
        let outcome = service().search(&SearchFilter {
            make: Some("Chebys".to_string()),
            ..Default::default()
        });

        match outcome {
            SearchOutcome::Matches(rows) => {
                assert_eq!(rows.len(), 2);
                assert!(rows.iter().all(|l| l.make == "Chevrolet"));
            }
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[test]
    fn test_make_not_recognized_carries_suggestion() {
        let outcome = service().search(&SearchFilter {
            make: Some("Zzzzz".to_string()),
            max_price: Some(999999.0),
            ..Default::default()
        });

        match outcome {
            SearchOutcome::UnknownMake { query, suggestion } => {
                assert_eq!(query, "Zzzzz");
                assert!(suggestion.is_some());
            }
            other => panic!("expected unknown make, got {:?}", other),
        }
    }

    #[test]
    fn test_price_and_km_filters_compose() {
        let outcome = service().search(&SearchFilter {
            make: Some("Chebys".to_string()),
            max_price: Some(260000.0),
            max_km: Some(60000),
            ..Default::default()
        });

        match outcome {
            SearchOutcome::Matches(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].model, "Onix");
            }
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[test]
    fn test_model_scoped_to_make_working_set() {
        // "Onix" resolves within Chevrolet rows; asking for it under Toyota
        // must resolve against Toyota's models instead and miss.
        let outcome = service().search(&SearchFilter {
            make: Some("Toyota".to_string()),
            model: Some("Onix".to_string()),
            ..Default::default()
        });

        match outcome {
            SearchOutcome::UnknownModel { query, .. } => assert_eq!(query, "Onix"),
            other => panic!("expected unknown model, got {:?}", other),
        }
    }

    #[test]
    fn test_model_typo_resolves() {
        let outcome = service().search(&SearchFilter {
            make: Some("Toyota".to_string()),
            model: Some("Corola".to_string()),
            ..Default::default()
        });

        match outcome {
            SearchOutcome::Matches(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].model, "Corolla");
            }
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[test]
    fn test_filters_only_no_names() {
        let outcome = service().search(&SearchFilter {
            max_price: Some(200000.0),
            ..Default::default()
        });

        match outcome {
            SearchOutcome::Matches(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].model, "Fiesta");
            }
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[test]
    fn test_resolved_names_with_impossible_filters_is_no_matches() {
        let outcome = service().search(&SearchFilter {
            make: Some("Chevrolet".to_string()),
            max_price: Some(1000.0),
            ..Default::default()
        });

        assert!(matches!(outcome, SearchOutcome::NoMatches));
    }

    #[test]
    fn test_empty_catalog_is_no_matches() {
        let service = SearchService::new(Arc::new(Catalog::default()));
        let outcome = service.search(&SearchFilter {
            make: Some("Chevrolet".to_string()),
            ..Default::default()
        });

        assert!(matches!(outcome, SearchOutcome::NoMatches));
    }
}
