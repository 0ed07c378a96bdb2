use crate::domain::model::{Book, Isbn, Listing, ListingId, NewListing, User};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// Persistence for listings. Lookups return listings in the store's natural
/// order (ascending `listing_id`).
pub trait ListingStore: Send + Sync {
    /// Assigns a fresh id and persists the listing.
    fn insert(&self, listing: NewListing) -> impl Future<Output = Result<Listing>> + Send;

    fn get(&self, listing_id: ListingId) -> impl Future<Output = Result<Option<Listing>>> + Send;

    fn find_by_ids(
        &self,
        ids: &[ListingId],
    ) -> impl Future<Output = Result<Vec<Listing>>> + Send;

    fn find_by_isbn(&self, isbn: Isbn) -> impl Future<Output = Result<Vec<Listing>>> + Send;

    fn all(&self) -> impl Future<Output = Result<Vec<Listing>>> + Send;

    /// Overwrites an existing listing. Returns false if the id is unknown.
    fn save(&self, listing: &Listing) -> impl Future<Output = Result<bool>> + Send;

    /// Returns true if the listing existed.
    fn delete(&self, listing_id: ListingId) -> impl Future<Output = Result<bool>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize>> + Send;
}

/// `Ok(None)` means the book is absent; `Err` means the registry could not answer.
#[async_trait]
pub trait BookRegistry: Send + Sync {
    async fn fetch(&self, isbn: Isbn) -> Result<Option<Book>>;

    async fn exists(&self, isbn: Isbn) -> Result<bool> {
        Ok(self.fetch(isbn).await?.is_some())
    }
}

#[async_trait]
pub trait UserRegistry: Send + Sync {
    async fn fetch(&self, seller_token: &str) -> Result<Option<User>>;

    async fn exists(&self, seller_token: &str) -> Result<bool> {
        Ok(self.fetch(seller_token).await?.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Memory,
    Http,
}

pub trait ConfigProvider: Send + Sync {
    fn registry_kind(&self) -> RegistryKind;
    fn book_endpoint(&self) -> Option<&str>;
    fn user_endpoint(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn seed_books(&self) -> &[String];
    fn seed_users(&self) -> &[String];
    fn seed_listings(&self) -> &[String];
}
