mod parser;

use super::domain::PropertyRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to read listing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid listing JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("listing {id} (row {row}) has a non-positive or non-numeric price")]
    InvalidPrice { row: usize, id: String },
}

/// Loads the listing snapshot handed to the filter engine and analyzer.
pub struct ListingImporter;

impl ListingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyRecord>, ListingImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_reader(file)
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ListingImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut records = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            if !valid_price(row.price()) {
                return Err(ListingImportError::InvalidPrice {
                    row: index + 1,
                    id: row.id().to_string(),
                });
            }
            records.push(row.into_record());
        }

        debug!(listings = records.len(), "imported listings from CSV");
        Ok(records)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ListingImportError> {
        let records: Vec<PropertyRecord> = serde_json::from_reader(reader)?;
        Self::validate(&records)?;

        debug!(listings = records.len(), "imported listings from JSON");
        Ok(records)
    }

    /// Rejects records that did not come through a loader, e.g. inline request bodies.
    pub fn validate(records: &[PropertyRecord]) -> Result<(), ListingImportError> {
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, record)| !valid_price(record.price))
        {
            warn!(id = %record.id, "rejecting listings with invalid price");
            return Err(ListingImportError::InvalidPrice {
                row: index + 1,
                id: record.id.clone(),
            });
        }
        Ok(())
    }
}

fn valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}
