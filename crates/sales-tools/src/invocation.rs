//! Typed tool invocations.
//!
//! Tool names and argument payloads arrive stringly-typed from the
//! completion service; this module converts them into a tagged variant with
//! a typed argument struct per tool, so everything past the dispatch
//! boundary works with real types.

use serde::Deserialize;

use inventory::SearchFilter;

use crate::error::ToolError;

/// Name of the catalog search tool.
pub const SEARCH_CARS: &str = "search_cars";
/// Name of the financing tool.
pub const CALCULATE_FINANCING: &str = "calculate_financing";

/// Arguments for `search_cars`. All optional; fields the model invents
/// beyond these are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchArgs {
    pub make: Option<String>,
    pub model: Option<String>,
    pub max_price: Option<f64>,
    pub max_km: Option<u64>,
}

impl SearchArgs {
    pub fn into_filter(self) -> SearchFilter {
        SearchFilter {
            make: self.make,
            model: self.model,
            max_price: self.max_price,
            max_km: self.max_km,
        }
    }
}

/// Arguments for `calculate_financing`. All required; range validation is
/// the calculator's job.
#[derive(Debug, Clone, Deserialize)]
pub struct FinancingArgs {
    pub car_price: f64,
    pub down_payment: f64,
    pub term_years: i64,
}

/// A parsed, typed tool invocation.
#[derive(Debug, Clone)]
pub enum ToolInvocation {
    SearchCars(SearchArgs),
    CalculateFinancing(FinancingArgs),
}

impl ToolInvocation {
    /// Parse a tool call's name and JSON argument payload.
    pub fn parse(name: &str, arguments_json: &str) -> Result<Self, ToolError> {
        match name {
            SEARCH_CARS => {
                let args = serde_json::from_str(arguments_json).map_err(|source| {
                    ToolError::InvalidArguments {
                        tool: name.to_string(),
                        source,
                    }
                })?;
                Ok(Self::SearchCars(args))
            }
            CALCULATE_FINANCING => {
                let args = serde_json::from_str(arguments_json).map_err(|source| {
                    ToolError::InvalidArguments {
                        tool: name.to_string(),
                        source,
                    }
                })?;
                Ok(Self::CalculateFinancing(args))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
