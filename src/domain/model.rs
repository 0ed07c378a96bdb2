use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ListingId = i64;
pub type Isbn = i64;

/// 一筆販售中的書籍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: ListingId,
    pub price: Decimal,
    pub condition: String,
    pub isbn: Isbn,
    pub seller_token: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Rounds a price to cents and pins it to two fractional digits, so it is
/// written as `"10.00"` rather than `"10"`.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price.round_dp(2);
    price.rescale(2);
    price
}

/// A listing before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub price: Decimal,
    pub condition: String,
    pub isbn: Isbn,
    pub seller_token: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl NewListing {
    pub fn into_listing(self, listing_id: ListingId) -> Listing {
        Listing {
            listing_id,
            price: self.price,
            condition: self.condition,
            isbn: self.isbn,
            seller_token: self.seller_token,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub seller_token: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Ordering applied to an id-filtered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// price ascending
    Price,
    /// condition descending, lexicographic
    Condition,
}

/// Parsed form of the search expression accepted by the listing search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchExpr {
    Home,
    ByIds {
        ids: Vec<ListingId>,
        sort: Option<SortKey>,
    },
}

/// Side sets computed over an ordered listing sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub distinct_isbns: Vec<Isbn>,
    pub distinct_seller_tokens: Vec<String>,
}

/// Resolved relations of one listing. `None` means the reference dangles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relations {
    pub book: Option<Book>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Listing),
    UserNotFound(String),
    BookNotFound(Isbn),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Listing),
    NotFound(ListingId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(ListingId),
    NotFound(ListingId),
}

impl CreateOutcome {
    pub fn message(&self) -> String {
        match self {
            CreateOutcome::Created(listing) => {
                format!("post was successful (listing {})", listing.listing_id)
            }
            CreateOutcome::UserNotFound(_) => {
                "invalid seller token, user does not exist in database".to_string()
            }
            CreateOutcome::BookNotFound(_) => {
                "invalid isbn, book does not exist in database".to_string()
            }
        }
    }
}

impl UpdateOutcome {
    pub fn message(&self) -> String {
        match self {
            UpdateOutcome::Updated(listing) => format!("listing {} updated", listing.listing_id),
            UpdateOutcome::NotFound(_) => "listing not found".to_string(),
        }
    }
}

impl DeleteOutcome {
    pub fn message(&self) -> String {
        match self {
            DeleteOutcome::Deleted(_) => "Item deleted".to_string(),
            DeleteOutcome::NotFound(id) => format!("Listing with ID {} does not exist", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_price_pads_and_rounds() {
        assert_eq!(normalize_price(Decimal::new(10, 0)).to_string(), "10.00");
        assert_eq!(normalize_price(Decimal::new(75, 1)).to_string(), "7.50");
        assert_eq!(normalize_price(Decimal::new(123456, 4)).to_string(), "12.35");
        assert_eq!(
            serde_json::to_value(normalize_price(Decimal::new(3, 0))).unwrap(),
            serde_json::json!("3.00")
        );
    }
}
