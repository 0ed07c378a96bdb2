use crate::domain::model::{Listing, ListingId, SearchExpr, SortKey};
use crate::domain::ports::ListingStore;
use crate::utils::error::Result;
use std::cmp::Reverse;

/// Selects and orders listings from a store.
pub struct QueryEngine<'a, S: ListingStore> {
    store: &'a S,
}

impl<'a, S: ListingStore> QueryEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn run(&self, expr: &SearchExpr) -> Result<Vec<Listing>> {
        match expr {
            SearchExpr::Home => self.query_home().await,
            SearchExpr::ByIds { ids, sort } => self.query_by_ids(ids, *sort).await,
        }
    }

    /// Every listing, most recent first.
    pub async fn query_home(&self) -> Result<Vec<Listing>> {
        let mut listings = self.store.all().await?;
        // stable sort: 同一時間的保留插入順序
        listings.sort_by_key(|l| Reverse(l.created_at));
        tracing::debug!("Home query returned {} listings", listings.len());
        Ok(listings)
    }

    /// Listings whose id is in `ids`. Unknown ids are skipped; an empty
    /// result is not an error.
    pub async fn query_by_ids(
        &self,
        ids: &[ListingId],
        sort: Option<SortKey>,
    ) -> Result<Vec<Listing>> {
        let mut listings = self.store.find_by_ids(ids).await?;
        apply_sort(&mut listings, sort);
        tracing::debug!(
            "Id query for {} ids matched {} listings (sort {:?})",
            ids.len(),
            listings.len(),
            sort
        );
        Ok(listings)
    }
}

pub fn apply_sort(listings: &mut [Listing], sort: Option<SortKey>) {
    match sort {
        Some(SortKey::Price) => listings.sort_by(|a, b| a.price.cmp(&b.price)),
        Some(SortKey::Condition) => listings.sort_by(|a, b| b.condition.cmp(&a.condition)),
        None => {}
    }
}
