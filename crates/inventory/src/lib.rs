//! Vehicle inventory services for the car-sales assistant.
//!
//! This crate provides the deterministic business logic behind the agent's
//! tools:
//!
//! - [`Catalog`] / [`Listing`] - An immutable snapshot of vehicle listings,
//!   loaded once at startup from CSV
//! - [`best_match`] - Fuzzy string matching for typo-tolerant make/model
//!   resolution
//! - [`SearchService`] - Fuzzy-corrected, filter-composed catalog search
//! - [`FinancingCalculator`] - Fixed-rate amortized monthly payments

mod catalog;
mod error;
mod financing;
mod fuzzy;
mod search;

pub use catalog::{Catalog, Listing};
pub use error::CatalogError;
pub use financing::{FinancingCalculator, FinancingOutcome, FinancingQuote, ANNUAL_INTEREST_RATE};
pub use fuzzy::{best_match, FuzzyMatch};
pub use search::{SearchFilter, SearchOutcome, SearchService, MATCH_THRESHOLD};
