//! Boundary parsers for the textual listing queries.
//!
//! The query engine only ever sees [`SearchExpr`] and plain id lists; all
//! string splitting happens here.

use crate::domain::model::{ListingId, SearchExpr, SortKey};
use crate::utils::error::{MarketError, Result};

const HOME: &str = "home";

/// Parses `"1,2,3"` into listing ids, keeping the caller's order.
pub fn parse_listing_ids(raw: &str) -> Result<Vec<ListingId>> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<ListingId>()
                .map_err(|e| MarketError::ParseError {
                    token: token.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

impl SortKey {
    /// Unrecognized keys mean "no explicit ordering".
    pub fn from_segment(segment: &str) -> Option<SortKey> {
        match segment.trim() {
            "price" => Some(SortKey::Price),
            "condition" => Some(SortKey::Condition),
            _ => None,
        }
    }
}

impl SearchExpr {
    /// Accepts `home`, `ids+`, `ids+price`, `ids+condition`. A bare id list
    /// without any `+` segment is a format error.
    pub fn parse(raw: &str) -> Result<SearchExpr> {
        let raw = raw.trim();
        if raw == HOME {
            return Ok(SearchExpr::Home);
        }

        let mut segments = raw.split('+');
        let ids_segment = segments.next().unwrap_or_default();
        let Some(sort_segment) = segments.next() else {
            return Err(MarketError::FormatError {
                expression: raw.to_string(),
            });
        };

        let ids = parse_listing_ids(ids_segment)?;
        let sort = SortKey::from_segment(sort_segment);
        tracing::debug!("Parsed search '{}' into {} ids, sort {:?}", raw, ids.len(), sort);

        Ok(SearchExpr::ByIds { ids, sort })
    }
}

impl std::str::FromStr for SearchExpr {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        SearchExpr::parse(s)
    }
}
