//! The vehicle catalog snapshot.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::CatalogError;

/// One vehicle listing.
///
/// Only the columns the search service filters on are typed; every other
/// column (id, year, features, ...) is captured in `extra` and passed
/// through untouched when listings are serialized for the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub make: String,
    pub model: String,
    /// Price in currency units
    pub price: f64,
    /// Mileage in kilometers
    pub km: u64,
    /// Pass-through descriptive columns, untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Read-only catalog snapshot, loaded once at process start.
#[derive(Debug, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    /// Build a catalog from already-parsed listings (used by tests and
    /// synthetic catalogs).
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Load the catalog from a CSV file with at least the columns
    /// `make`, `model`, `price`, `km`.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut listings = Vec::new();
        for row in reader.deserialize() {
            let listing: Listing = row?;
            listings.push(listing);
        }
        info!("Car catalog loaded: {} listings", listings.len());
        Ok(Self { listings })
    }

    /// Load the catalog, degrading to an empty snapshot when the file is
    /// missing or unreadable. An empty catalog means every search returns
    /// no results; it is a startup warning, not a fatal error.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::from_csv_path(path.as_ref()) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(
                    "Catalog {} not loaded ({}); starting with an empty catalog",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// All listings in row order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Distinct makes in first-appearance row order.
    ///
    /// Order matters: fuzzy tie-breaks are first-in-iteration-order, so a
    /// stable candidate sequence keeps resolution deterministic.
    pub fn distinct_makes(&self) -> Vec<&str> {
        distinct(self.listings.iter(), |l| l.make.as_str())
    }
}

/// Distinct values of a listing field in first-appearance order.
pub(crate) fn distinct<'a>(
    rows: impl Iterator<Item = &'a Listing>,
    field: impl Fn(&'a Listing) -> &'a str,
) -> Vec<&'a str> {
    let mut values: Vec<&str> = Vec::new();
    for row in rows {
        let value = field(row);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(make: &str, model: &str, price: f64, km: u64) -> Listing {
        Listing {
            make: make.to_string(),
            model: model.to_string(),
            price,
            km,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_distinct_makes_preserves_row_order() {
        let catalog = Catalog::from_listings(vec![
            listing("Chevrolet", "Onix", 250000.0, 50000),
            listing("Toyota", "Corolla", 350000.0, 40000),
            listing("Chevrolet", "Aveo", 280000.0, 30000),
        ]);

        assert_eq!(catalog.distinct_makes(), vec!["Chevrolet", "Toyota"]);
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let catalog = Catalog::load_or_empty("does/not/exist.csv");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_listing_extra_columns_roundtrip() {
        let mut extra = BTreeMap::new();
        extra.insert("id".to_string(), Value::from("CAR-001"));
        extra.insert("year".to_string(), Value::from(2021));

        let listing = Listing {
            make: "Chevrolet".to_string(),
            model: "Onix".to_string(),
            price: 250000.0,
            km: 50000,
            extra,
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["make"], "Chevrolet");
        assert_eq!(json["id"], "CAR-001");
        assert_eq!(json["year"], 2021);
    }

    #[test]
    fn test_from_csv_reader_shape() {
        let data = "make,model,price,km,id,features\n\
                    Chevrolet,Onix,250000,50000,CAR-001,CarPlay\n\
                    Toyota,Corolla,350000,40000,CAR-002,Leather Seats\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let listings: Vec<Listing> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("csv rows should parse");

        let catalog = Catalog::from_listings(listings);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.listings()[0].make, "Chevrolet");
        assert_eq!(catalog.listings()[0].price, 250000.0);
        assert_eq!(catalog.listings()[0].extra["features"], "CarPlay");
        assert_eq!(catalog.listings()[1].extra["features"], "Leather Seats");
    }
}
