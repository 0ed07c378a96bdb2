pub mod aggregate;
pub mod lifecycle;
pub mod market;
pub mod projection;
pub mod query;
pub mod resolver;
pub mod search;

pub use crate::domain::model::{
    Aggregate, Book, CreateOutcome, DeleteOutcome, Isbn, Listing, ListingId, NewListing,
    Relations, SearchExpr, SortKey, UpdateOutcome, User,
};
pub use crate::domain::ports::{
    BookRegistry, ConfigProvider, ListingStore, RegistryKind, UserRegistry,
};
pub use crate::utils::error::Result;
