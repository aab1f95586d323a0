//! Fixed-rate financing quotes.

use serde::Serialize;
use tracing::{debug, info};

/// Fixed annual interest rate. Not a parameter of the quote.
pub const ANNUAL_INTEREST_RATE: f64 = 0.10;

const MIN_TERM_YEARS: i64 = 3;
const MAX_TERM_YEARS: i64 = 6;

/// A computed financing breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct FinancingQuote {
    pub car_price: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub term_years: i64,
    /// Rounded to 2 decimals
    pub monthly_payment: f64,
}

/// Outcome of a quote request.
#[derive(Debug, Clone)]
pub enum FinancingOutcome {
    Quote(FinancingQuote),
    /// Down payment covers the full price; not an error.
    NoFinancingNeeded,
    /// Inputs outside the accepted bounds.
    Rejected { reason: String },
}

/// Computes fixed-rate amortized monthly payments.
pub struct FinancingCalculator;

impl FinancingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Quote a monthly payment for `car_price` with `down_payment` up front
    /// over `term_years` years.
    ///
    /// Terms outside 3-6 years are rejected. A down payment at or above the
    /// price needs no financing. Otherwise the standard amortization formula
    /// `M = P * [i(1+i)^n] / [(1+i)^n - 1]` applies with i = 0.10/12 and
    /// n = term_years * 12.
    pub fn quote(&self, car_price: f64, down_payment: f64, term_years: i64) -> FinancingOutcome {
        if !(MIN_TERM_YEARS..=MAX_TERM_YEARS).contains(&term_years) {
            debug!("Invalid financing term: {}", term_years);
            return FinancingOutcome::Rejected {
                reason: "Financing term must be between 3 and 6 years.".to_string(),
            };
        }

        if down_payment >= car_price {
            info!("Down payment covers full price; no financing needed");
            return FinancingOutcome::NoFinancingNeeded;
        }

        let principal = car_price - down_payment;
        // Unreachable after the branch above, still checked.
        if principal <= 0.0 {
            return FinancingOutcome::Rejected {
                reason: "Invalid principal amount.".to_string(),
            };
        }

        let monthly_rate = ANNUAL_INTEREST_RATE / 12.0;
        let num_months = (term_years * 12) as f64;

        let growth = (1.0 + monthly_rate).powf(num_months);
        let monthly_payment = round2(principal * (monthly_rate * growth) / (growth - 1.0));

        info!("Monthly payment calculated: {}", monthly_payment);

        FinancingOutcome::Quote(FinancingQuote {
            car_price,
            down_payment,
            loan_amount: principal,
            term_years,
            monthly_payment,
        })
    }
}

impl Default for FinancingCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 2 decimals, half away from zero.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
