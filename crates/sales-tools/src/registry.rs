//! The tool registry and dispatch boundary.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use agent_core::{ToolCall, ToolDefinition};
use inventory::{
    Catalog, FinancingCalculator, FinancingOutcome, Listing, SearchOutcome, SearchService,
};

use crate::invocation::{ToolInvocation, CALCULATE_FINANCING, SEARCH_CARS};

/// Static registry of the two sales tools.
///
/// Owns the services it dispatches to; the schema descriptions it exposes
/// carry advisory hints for the model (normalize misspellings, assume a 20%
/// down payment), but the services enforce their own contracts regardless
/// of what the model claims.
pub struct SalesToolRegistry {
    search: SearchService,
    financing: FinancingCalculator,
}

impl SalesToolRegistry {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        info!("Registering tools: {}, {}", SEARCH_CARS, CALCULATE_FINANCING);
        Self {
            search: SearchService::new(catalog),
            financing: FinancingCalculator::new(),
        }
    }

    /// The machine-readable tool schemas handed to the completion service.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::function(
                SEARCH_CARS,
                "Searches the dealership inventory. Use when user expresses intent to buy/browse.",
                json!({
                    "type": "object",
                    "properties": {
                        "make": {
                            "type": "string",
                            "description": "Car manufacturer (e.g. 'Volkswagen'). Normalize misspellings."
                        },
                        "model": {"type": "string", "description": "Model name."},
                        "max_price": {"type": "number"},
                        "max_km": {"type": "integer"}
                    }
                }),
            ),
            ToolDefinition::function(
                CALCULATE_FINANCING,
                "Calculates monthly payment. Do not do math in chat.",
                json!({
                    "type": "object",
                    "properties": {
                        "car_price": {"type": "number"},
                        "down_payment": {
                            "type": "number",
                            "description": "If unspecified, calculate 20% of price."
                        },
                        "term_years": {"type": "integer", "enum": [3, 4, 5, 6]}
                    },
                    "required": ["car_price", "down_payment", "term_years"]
                }),
            ),
        ]
    }

    /// Execute one tool call and serialize its outcome to text.
    ///
    /// Infallible by construction: unknown tools, malformed arguments, and
    /// rejected inputs all come back as structured error JSON the model can
    /// explain conversationally.
    pub fn dispatch(&self, call: &ToolCall) -> String {
        let name = &call.function.name;
        info!("Executing tool: {} with args: {}", name, call.function.arguments);

        match ToolInvocation::parse(name, &call.function.arguments) {
            Ok(ToolInvocation::SearchCars(args)) => {
                serialize_search(self.search.search(&args.into_filter()))
            }
            Ok(ToolInvocation::CalculateFinancing(args)) => serialize_financing(
                self.financing
                    .quote(args.car_price, args.down_payment, args.term_years),
            ),
            Err(e) => {
                warn!("Tool call rejected: {}", e);
                json!({"error": e.to_string()}).to_string()
            }
        }
    }
}

fn serialize_search(outcome: SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Matches(rows) => serialize_listings(&rows),
        SearchOutcome::NoMatches => {
            json!({"message": "No cars found matching those preferences."}).to_string()
        }
        SearchOutcome::UnknownMake { query, suggestion } => {
            let text = match suggestion {
                Some(s) => format!("Make '{}' not found. Did you mean {}?", query, s),
                None => format!("Make '{}' not found.", query),
            };
            json!({"error": text}).to_string()
        }
        SearchOutcome::UnknownModel { query, .. } => json!({
            "error": format!("Model '{}' not found in our current inventory.", query)
        })
        .to_string(),
    }
}

fn serialize_listings(rows: &[Listing]) -> String {
    match serde_json::to_string(rows) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to serialize listings: {}", e);
            json!({"error": "Failed to serialize search results."}).to_string()
        }
    }
}

fn serialize_financing(outcome: FinancingOutcome) -> String {
    match outcome {
        FinancingOutcome::Quote(q) => {
            debug!("Financing quote: {:?}", q);
            json!({
                "car_price": q.car_price,
                "down_payment": q.down_payment,
                "loan_amount": q.loan_amount,
                "term_years": q.term_years,
                "monthly_payment": q.monthly_payment,
                "interest_rate": "10%"
            })
            .to_string()
        }
        FinancingOutcome::NoFinancingNeeded => {
            json!({"message": "Down payment covers the full price. No financing needed!"})
                .to_string()
        }
        FinancingOutcome::Rejected { reason } => json!({"error": reason}).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ToolCall;
    use inventory::Listing;
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn listing(make: &str, model: &str, price: f64, km: u64, id: &str) -> Listing {
        let mut extra = BTreeMap::new();
        extra.insert("id".to_string(), Value::from(id));
        Listing {
            make: make.to_string(),
            model: model.to_string(),
            price,
            km,
            extra,
        }
    }

    fn registry() -> SalesToolRegistry {
        SalesToolRegistry::new(Arc::new(Catalog::from_listings(vec![
            listing("Chevrolet", "Onix", 250000.0, 50000, "CAR-001"),
            listing("Chevrolet", "Aveo", 280000.0, 30000, "CAR-002"),
            listing("Toyota", "Corolla", 350000.0, 40000, "CAR-003"),
        ])))
    }

    #[test]
    fn test_definitions_expose_both_tools() {
        let defs = registry().definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.function.name.as_str()).collect();

        assert_eq!(names, vec![SEARCH_CARS, CALCULATE_FINANCING]);
        assert!(defs.iter().all(|d| d.kind == "function"));

        let financing = &defs[1].function.parameters;
        assert_eq!(
            financing["required"],
            serde_json::json!(["car_price", "down_payment", "term_years"])
        );
    }

    #[test]
    fn test_dispatch_search_returns_listings_with_extras() {
        let call = ToolCall::function(
            "call-1",
            SEARCH_CARS,
            r#"{"make": "Chebys", "max_price": 260000}"#,
        );
        let output = registry().dispatch(&call);
        let rows: Vec<Value> = serde_json::from_str(&output).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["make"], "Chevrolet");
        assert_eq!(rows[0]["model"], "Onix");
        assert_eq!(rows[0]["id"], "CAR-001");
    }

    #[test]
    fn test_dispatch_unknown_make_suggests() {
        let call = ToolCall::function("call-1", SEARCH_CARS, r#"{"make": "Zzzzz"}"#);
        let output = registry().dispatch(&call);
        let value: Value = serde_json::from_str(&output).unwrap();

        let error = value["error"].as_str().unwrap();
        assert!(error.contains("Zzzzz"));
        assert!(error.contains("Did you mean"));
    }

    #[test]
    fn test_dispatch_no_matches_message() {
        let call = ToolCall::function(
            "call-1",
            SEARCH_CARS,
            r#"{"make": "Toyota", "max_price": 1000}"#,
        );
        let output = registry().dispatch(&call);
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["message"], "No cars found matching those preferences.");
    }

    #[test]
    fn test_dispatch_financing_quote() {
        let call = ToolCall::function(
            "call-2",
            CALCULATE_FINANCING,
            r#"{"car_price": 100000, "down_payment": 20000, "term_years": 4}"#,
        );
        let output = registry().dispatch(&call);
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["loan_amount"], 80000.0);
        assert_eq!(value["interest_rate"], "10%");
        assert_eq!(value["monthly_payment"], 2029.01);
    }

    #[test]
    fn test_dispatch_financing_rejection() {
        let call = ToolCall::function(
            "call-2",
            CALCULATE_FINANCING,
            r#"{"car_price": 100000, "down_payment": 20000, "term_years": 2}"#,
        );
        let output = registry().dispatch(&call);
        let value: Value = serde_json::from_str(&output).unwrap();

        assert!(value["error"].as_str().unwrap().contains("between 3 and 6"));
    }

    #[test]
    fn test_dispatch_unknown_tool_is_error_result() {
        let call = ToolCall::function("call-3", "drive_car", "{}");
        let output = registry().dispatch(&call);
        let value: Value = serde_json::from_str(&output).unwrap();

        assert!(value["error"].as_str().unwrap().contains("drive_car"));
    }

    #[test]
    fn test_dispatch_malformed_arguments_is_error_result() {
        let call = ToolCall::function("call-4", CALCULATE_FINANCING, "{not json");
        let output = registry().dispatch(&call);
        let value: Value = serde_json::from_str(&output).unwrap();

        assert!(value.get("error").is_some());
    }
}
