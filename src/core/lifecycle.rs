use crate::core::market::MarketService;
use crate::domain::model::{
    normalize_price, CreateOutcome, DeleteOutcome, Isbn, ListingId, NewListing, UpdateOutcome,
};
use crate::domain::ports::{BookRegistry, ListingStore, UserRegistry};
use crate::utils::error::{MarketError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Payload for posting a listing. The creation time is always taken from
/// the server clock; a `timestamp` sent by the caller is dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateListing {
    pub price: Decimal,
    pub condition: String,
    pub isbn: Isbn,
    pub seller_token: String,
    pub status: String,
}

impl<S: ListingStore, B: BookRegistry, U: UserRegistry> MarketService<S, B, U> {
    pub async fn create(&self, request: CreateListing) -> Result<CreateOutcome> {
        if !self.users.exists(&request.seller_token).await? {
            tracing::info!("Rejected listing: unknown seller {}", request.seller_token);
            return Ok(CreateOutcome::UserNotFound(request.seller_token));
        }
        if !self.books.exists(request.isbn).await? {
            tracing::info!("Rejected listing: unknown isbn {}", request.isbn);
            return Ok(CreateOutcome::BookNotFound(request.isbn));
        }

        let new_listing = NewListing {
            price: normalize_price(request.price),
            condition: request.condition,
            isbn: request.isbn,
            seller_token: request.seller_token,
            status: request.status,
            created_at: Utc::now(),
        };

        let listing = self.store.insert(new_listing).await.map_err(|e| match e {
            e @ MarketError::PersistenceError { .. } => e,
            other => MarketError::PersistenceError {
                message: other.to_string(),
            },
        })?;

        tracing::info!(
            "Created listing {} for isbn {} by {}",
            listing.listing_id,
            listing.isbn,
            listing.seller_token
        );
        Ok(CreateOutcome::Created(listing))
    }

    /// Changes the condition of an existing listing; nothing else is mutable here.
    pub async fn update(&self, listing_id: ListingId, condition: &str) -> Result<UpdateOutcome> {
        let Some(mut listing) = self.store.get(listing_id).await? else {
            return Ok(UpdateOutcome::NotFound(listing_id));
        };

        listing.condition = condition.to_string();
        // 讀取與寫入之間被刪除
        if !self.store.save(&listing).await? {
            return Ok(UpdateOutcome::NotFound(listing_id));
        }

        tracing::info!("Updated condition of listing {} to {}", listing_id, condition);
        Ok(UpdateOutcome::Updated(listing))
    }

    pub async fn delete(&self, listing_id: ListingId) -> Result<DeleteOutcome> {
        if self.store.delete(listing_id).await? {
            tracing::info!("Deleted listing {}", listing_id);
            Ok(DeleteOutcome::Deleted(listing_id))
        } else {
            tracing::info!("Delete of unknown listing {}", listing_id);
            Ok(DeleteOutcome::NotFound(listing_id))
        }
    }
}
