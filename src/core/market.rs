use crate::core::aggregate::{aggregate, distinct_isbns, distinct_seller_tokens};
use crate::core::projection::{project, ListingView, Projection, Shape};
use crate::core::query::QueryEngine;
use crate::core::resolver::RelationResolver;
use crate::domain::model::{Isbn, Listing, ListingId, SearchExpr};
use crate::domain::ports::{BookRegistry, ListingStore, UserRegistry};
use crate::utils::error::{MarketError, Result};
use serde::Serialize;

/// Response of the plain lookup by listing ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingsResponse {
    pub listings: Vec<ListingView>,
    pub isbns: Vec<Isbn>,
}

/// Response of a search. `isbns` is only filled for the home feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    pub listings: Vec<ListingView>,
    pub seller_tokens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbns: Option<Vec<Isbn>>,
}

/// Sellers offering one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookListingsResponse {
    pub isbn: Isbn,
    pub listings: Vec<ListingView>,
    pub seller_tokens: Vec<String>,
}

/// Entry point tying the store and both registries together.
pub struct MarketService<S: ListingStore, B: BookRegistry, U: UserRegistry> {
    pub(crate) store: S,
    pub(crate) books: B,
    pub(crate) users: U,
}

impl<S: ListingStore, B: BookRegistry, U: UserRegistry> MarketService<S, B, U> {
    pub fn new(store: S, books: B, users: U) -> Self {
        Self {
            store,
            books,
            users,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn books(&self) -> &B {
        &self.books
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    fn engine(&self) -> QueryEngine<'_, S> {
        QueryEngine::new(&self.store)
    }

    fn resolver(&self) -> RelationResolver<'_, B, U> {
        RelationResolver::new(&self.books, &self.users)
    }

    pub async fn query(&self, expr: &SearchExpr) -> Result<Vec<Listing>> {
        self.engine().run(expr).await
    }

    /// Resolves what `shape` needs and renders the listing.
    pub async fn project(&self, listing: &Listing, shape: Shape) -> Result<Projection> {
        let caps = shape.capabilities();
        let relations = self
            .resolver()
            .resolve(listing, caps.needs_book(), caps.needs_user())
            .await?;
        project(listing, &relations, shape)
    }

    /// Renders a page of listings with a bare shape. A listing whose book is
    /// gone is left out of the page; any other failure aborts it.
    async fn render_page(&self, listings: &[Listing], shape: Shape) -> Result<Vec<ListingView>> {
        let mut views = Vec::with_capacity(listings.len());
        for listing in listings {
            match self.project(listing, shape).await {
                Ok(Projection::Listing(view)) => views.push(view),
                Ok(Projection::Missing(marker)) => {
                    tracing::warn!(
                        "Skipping listing {}: {}",
                        listing.listing_id,
                        marker.message
                    );
                }
                Err(e @ MarketError::DanglingReference { .. }) => {
                    tracing::warn!("Skipping listing {}: {}", listing.listing_id, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(views)
    }

    /// Listings for the given ids in store order, plus their distinct ISBNs.
    pub async fn listings_by_ids(&self, ids: &[ListingId]) -> Result<ListingsResponse> {
        let listings = self.engine().query_by_ids(ids, None).await?;
        let isbns = distinct_isbns(&listings);
        let listings = self.render_page(&listings, Shape::Bare).await?;
        Ok(ListingsResponse { listings, isbns })
    }

    pub async fn search(&self, expr: &SearchExpr) -> Result<SearchResponse> {
        let listings = self.engine().run(expr).await?;
        let summary = aggregate(&listings);

        let response = match expr {
            SearchExpr::Home => SearchResponse {
                listings: self.render_page(&listings, Shape::Bare).await?,
                seller_tokens: summary.distinct_seller_tokens,
                isbns: Some(summary.distinct_isbns),
            },
            SearchExpr::ByIds { .. } => SearchResponse {
                listings: self.render_page(&listings, Shape::BareSeller).await?,
                seller_tokens: summary.distinct_seller_tokens,
                isbns: None,
            },
        };

        tracing::info!(
            "Search returned {} of {} listings from {} sellers",
            response.listings.len(),
            listings.len(),
            response.seller_tokens.len()
        );
        Ok(response)
    }

    pub async fn listings_for_book(&self, isbn: Isbn) -> Result<BookListingsResponse> {
        let listings = self.store.find_by_isbn(isbn).await?;
        let seller_tokens = distinct_seller_tokens(&listings);
        let listings = self.render_page(&listings, Shape::BareSeller).await?;
        Ok(BookListingsResponse {
            isbn,
            listings,
            seller_tokens,
        })
    }

    /// One listing rendered with a caller-chosen shape.
    pub async fn detail(&self, listing_id: ListingId, shape: Shape) -> Result<Projection> {
        let listing = self
            .store
            .get(listing_id)
            .await?
            .ok_or_else(|| MarketError::NotFound {
                entity: "Listing",
                key: listing_id.to_string(),
            })?;
        self.project(&listing, shape).await
    }
}
