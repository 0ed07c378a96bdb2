//! Fixture loading for the in-memory adapters.
//!
//! Files are CSV (comma) or TSV (tab) with a header row. Listing files carry
//! their own ids and creation times.

use crate::domain::model::{normalize_price, Book, Isbn, Listing, ListingId, User};
use crate::utils::error::{MarketError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct ListingRow {
    listing_id: ListingId,
    price: String,
    condition: String,
    isbn: Isbn,
    seller_token: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl ListingRow {
    fn into_listing(self) -> Result<Listing> {
        let price = Decimal::from_str(self.price.trim()).map_err(|e| {
            MarketError::InvalidConfigValueError {
                field: format!("listing {} price", self.listing_id),
                value: self.price.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Listing {
            listing_id: self.listing_id,
            price: normalize_price(price),
            condition: self.condition,
            isbn: self.isbn,
            seller_token: self.seller_token,
            status: self.status,
            created_at: self.created_at,
        })
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .trim(csv::Trim::All)
        .from_path(path)?;

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;
    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn read_all<T: DeserializeOwned>(paths: &[String]) -> Result<Vec<T>> {
    let mut rows = Vec::new();
    for path in paths {
        rows.extend(read_rows::<T>(Path::new(path))?);
    }
    Ok(rows)
}

pub fn load_books(paths: &[String]) -> Result<Vec<Book>> {
    read_all(paths)
}

pub fn load_users(paths: &[String]) -> Result<Vec<User>> {
    read_all(paths)
}

pub fn load_listings(paths: &[String]) -> Result<Vec<Listing>> {
    read_all::<ListingRow>(paths)?
        .into_iter()
        .map(ListingRow::into_listing)
        .collect()
}
