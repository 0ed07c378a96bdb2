use crate::domain::model::{Book, Listing, Relations, User};
use crate::domain::ports::{BookRegistry, UserRegistry};
use crate::utils::error::Result;

/// Looks up the book and seller a listing points at.
///
/// A dangling reference resolves to `None`. Registry failures are returned
/// as errors so they are never mistaken for a missing entity.
pub struct RelationResolver<'a, B: BookRegistry, U: UserRegistry> {
    books: &'a B,
    users: &'a U,
}

impl<'a, B: BookRegistry, U: UserRegistry> RelationResolver<'a, B, U> {
    pub fn new(books: &'a B, users: &'a U) -> Self {
        Self { books, users }
    }

    pub async fn book(&self, listing: &Listing) -> Result<Option<Book>> {
        let book = self.books.fetch(listing.isbn).await?;
        if book.is_none() {
            tracing::warn!(
                "Listing {} references missing book {}",
                listing.listing_id,
                listing.isbn
            );
        }
        Ok(book)
    }

    pub async fn user(&self, listing: &Listing) -> Result<Option<User>> {
        let user = self.users.fetch(&listing.seller_token).await?;
        if user.is_none() {
            tracing::warn!(
                "Listing {} references missing seller {}",
                listing.listing_id,
                listing.seller_token
            );
        }
        Ok(user)
    }

    /// Fetches only the relations that are asked for.
    pub async fn resolve(
        &self,
        listing: &Listing,
        want_book: bool,
        want_user: bool,
    ) -> Result<Relations> {
        let book = if want_book { self.book(listing).await? } else { None };
        let user = if want_user { self.user(listing).await? } else { None };
        Ok(Relations { book, user })
    }
}
