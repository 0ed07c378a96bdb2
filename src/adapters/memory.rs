use crate::domain::model::{Book, Isbn, Listing, ListingId, NewListing, User};
use crate::domain::ports::{BookRegistry, ListingStore, UserRegistry};
use crate::utils::error::{MarketError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Debug)]
struct StoreState {
    listings: BTreeMap<ListingId, Listing>,
    /// `None` once the id space is used up
    next_id: Option<ListingId>,
}

/// Listing store kept in process memory. Ids only ever grow, so a deleted
/// id is never handed out again.
#[derive(Debug)]
pub struct InMemoryListingStore {
    state: RwLock<StoreState>,
}

impl Default for InMemoryListingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                listings: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }

    /// Seeds the store with listings that already carry ids.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let next_id = listings
            .iter()
            .map(|l| l.listing_id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        let listings = listings.into_iter().map(|l| (l.listing_id, l)).collect();
        Self {
            state: RwLock::new(StoreState { listings, next_id }),
        }
    }
}

impl ListingStore for InMemoryListingStore {
    async fn insert(&self, listing: NewListing) -> Result<Listing> {
        let mut state = self.state.write().await;
        let listing_id = state.next_id.ok_or_else(|| MarketError::PersistenceError {
            message: "listing id space exhausted".to_string(),
        })?;
        state.next_id = listing_id.checked_add(1);

        let listing = listing.into_listing(listing_id);
        state.listings.insert(listing_id, listing.clone());
        tracing::debug!("Stored listing {}", listing_id);
        Ok(listing)
    }

    async fn get(&self, listing_id: ListingId) -> Result<Option<Listing>> {
        Ok(self.state.read().await.listings.get(&listing_id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ListingId]) -> Result<Vec<Listing>> {
        let wanted: HashSet<ListingId> = ids.iter().copied().collect();
        let state = self.state.read().await;
        Ok(state
            .listings
            .values()
            .filter(|l| wanted.contains(&l.listing_id))
            .cloned()
            .collect())
    }

    async fn find_by_isbn(&self, isbn: Isbn) -> Result<Vec<Listing>> {
        let state = self.state.read().await;
        Ok(state
            .listings
            .values()
            .filter(|l| l.isbn == isbn)
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<Listing>> {
        Ok(self.state.read().await.listings.values().cloned().collect())
    }

    async fn save(&self, listing: &Listing) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.listings.get_mut(&listing.listing_id) {
            Some(existing) => {
                *existing = listing.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, listing_id: ListingId) -> Result<bool> {
        Ok(self
            .state
            .write()
            .await
            .listings
            .remove(&listing_id)
            .is_some())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.state.read().await.listings.len())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookRegistry {
    books: RwLock<HashMap<Isbn, Book>>,
}

impl InMemoryBookRegistry {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books.into_iter().map(|b| (b.isbn, b)).collect()),
        }
    }

    pub async fn insert(&self, book: Book) {
        self.books.write().await.insert(book.isbn, book);
    }

    pub async fn remove(&self, isbn: Isbn) -> Option<Book> {
        self.books.write().await.remove(&isbn)
    }
}

#[async_trait]
impl BookRegistry for InMemoryBookRegistry {
    async fn fetch(&self, isbn: Isbn) -> Result<Option<Book>> {
        Ok(self.books.read().await.get(&isbn).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRegistry {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRegistry {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(
                users
                    .into_iter()
                    .map(|u| (u.seller_token.clone(), u))
                    .collect(),
            ),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.seller_token.clone(), user);
    }

    pub async fn remove(&self, seller_token: &str) -> Option<User> {
        self.users.write().await.remove(seller_token)
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn fetch(&self, seller_token: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(seller_token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn new_listing(isbn: Isbn) -> NewListing {
        NewListing {
            price: Decimal::new(500, 2),
            condition: "good".to_string(),
            isbn,
            seller_token: "tok".to_string(),
            status: "available".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryListingStore::new();
        let first = store.insert(new_listing(1)).await.unwrap();
        assert!(store.delete(first.listing_id).await.unwrap());

        let second = store.insert(new_listing(1)).await.unwrap();
        assert!(second.listing_id > first.listing_id);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_ids_uses_store_order() {
        let store = InMemoryListingStore::new();
        for isbn in [10, 20, 30] {
            store.insert(new_listing(isbn)).await.unwrap();
        }

        let found = store.find_by_ids(&[3, 1, 99, 1]).await.unwrap();
        let ids: Vec<ListingId> = found.iter().map(|l| l.listing_id).collect();
        assert_eq!(ids, vec![1, 3]);

        let by_isbn = store.find_by_isbn(20).await.unwrap();
        assert_eq!(by_isbn.len(), 1);
        assert_eq!(by_isbn[0].listing_id, 2);
    }

    #[tokio::test]
    async fn test_seeded_store_continues_after_max_id() {
        let seeded = new_listing(1).into_listing(41);
        let store = InMemoryListingStore::with_listings(vec![seeded]);
        let next = store.insert(new_listing(2)).await.unwrap();
        assert_eq!(next.listing_id, 42);
    }

    #[tokio::test]
    async fn test_insert_after_max_id_fails_without_reuse() {
        let seeded = new_listing(1).into_listing(ListingId::MAX);
        let store = InMemoryListingStore::with_listings(vec![seeded.clone()]);

        let result = store.insert(new_listing(2)).await;
        assert!(matches!(result, Err(MarketError::PersistenceError { .. })));
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.get(ListingId::MAX).await.unwrap(), Some(seeded));
    }

    #[tokio::test]
    async fn test_last_id_is_handed_out_once() {
        let seeded = new_listing(1).into_listing(ListingId::MAX - 1);
        let store = InMemoryListingStore::with_listings(vec![seeded]);

        let last = store.insert(new_listing(2)).await.unwrap();
        assert_eq!(last.listing_id, ListingId::MAX);
        assert!(store.insert(new_listing(3)).await.is_err());
    }

    #[tokio::test]
    async fn test_save_unknown_listing() {
        let store = InMemoryListingStore::new();
        let ghost = new_listing(1).into_listing(7);
        assert!(!store.save(&ghost).await.unwrap());
    }
}
