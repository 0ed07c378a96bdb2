//! Response shapes for a single listing.
//!
//! All five shapes go through [`project`], driven by the [`Capabilities`] of
//! the chosen [`Shape`]. Bare shapes fail the render when the book is gone;
//! the richer shapes collapse into a [`MissingEntityMarker`] instead.

use crate::domain::model::{Book, Listing, ListingId, Relations, User};
use crate::utils::error::{MarketError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Bare,
    BareSeller,
    WithUser,
    WithBook,
    WithBoth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    HardFail,
    Marker(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub include_book_title: bool,
    pub include_seller_token: bool,
    pub include_user: bool,
    pub include_book: bool,
    pub on_missing: OnMissing,
}

impl Capabilities {
    pub fn needs_book(&self) -> bool {
        self.include_book_title || self.include_book
    }

    pub fn needs_user(&self) -> bool {
        self.include_user
    }
}

impl Shape {
    pub fn capabilities(self) -> Capabilities {
        let base = Capabilities {
            include_book_title: false,
            include_seller_token: false,
            include_user: false,
            include_book: false,
            on_missing: OnMissing::HardFail,
        };
        match self {
            Shape::Bare => Capabilities {
                include_book_title: true,
                ..base
            },
            Shape::BareSeller => Capabilities {
                include_book_title: true,
                include_seller_token: true,
                ..base
            },
            Shape::WithUser => Capabilities {
                include_user: true,
                on_missing: OnMissing::Marker("User does not exist"),
                ..base
            },
            Shape::WithBook => Capabilities {
                include_book: true,
                on_missing: OnMissing::Marker("Book does not exist"),
                ..base
            },
            Shape::WithBoth => Capabilities {
                include_user: true,
                include_book: true,
                on_missing: OnMissing::Marker("Object does not exist"),
                ..base
            },
        }
    }
}

impl FromStr for Shape {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bare" => Ok(Shape::Bare),
            "bare_seller" => Ok(Shape::BareSeller),
            "with_user" => Ok(Shape::WithUser),
            "with_book" => Ok(Shape::WithBook),
            "with_both" => Ok(Shape::WithBoth),
            other => Err(MarketError::UnknownShape {
                shape: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingView {
    pub listing_id: ListingId,
    pub price: Decimal,
    pub condition: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Book>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingEntityMarker {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Projection {
    Listing(ListingView),
    Missing(MissingEntityMarker),
}

impl Projection {
    pub fn as_listing(&self) -> Option<&ListingView> {
        match self {
            Projection::Listing(view) => Some(view),
            Projection::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Projection::Missing(_))
    }
}

/// Renders `listing` with the relations already resolved for `shape`.
pub fn project(listing: &Listing, relations: &Relations, shape: Shape) -> Result<Projection> {
    let caps = shape.capabilities();

    let book_missing = caps.needs_book() && relations.book.is_none();
    let user_missing = caps.needs_user() && relations.user.is_none();

    if book_missing || user_missing {
        return match caps.on_missing {
            OnMissing::Marker(message) => Ok(Projection::Missing(MissingEntityMarker {
                message: message.to_string(),
            })),
            OnMissing::HardFail if book_missing => Err(MarketError::DanglingReference {
                listing_id: listing.listing_id,
                entity: "book",
                key: listing.isbn.to_string(),
            }),
            OnMissing::HardFail => Err(MarketError::DanglingReference {
                listing_id: listing.listing_id,
                entity: "user",
                key: listing.seller_token.clone(),
            }),
        };
    }

    let book_title = caps
        .include_book_title
        .then(|| relations.book.as_ref().map(|b| b.title.clone()))
        .flatten();

    Ok(Projection::Listing(ListingView {
        listing_id: listing.listing_id,
        price: listing.price,
        condition: listing.condition.clone(),
        status: listing.status.clone(),
        timestamp: listing.created_at,
        book_title,
        seller_token: caps
            .include_seller_token
            .then(|| listing.seller_token.clone()),
        book: if caps.include_book { relations.book.clone() } else { None },
        user: if caps.include_user { relations.user.clone() } else { None },
    }))
}
