use crate::domain::model::{Aggregate, Isbn, Listing};
use std::collections::HashSet;
use std::hash::Hash;

/// Values of `key` in first-seen order, each once.
fn distinct_by<'a, T, F>(listings: &'a [Listing], key: F) -> Vec<T>
where
    T: Eq + Hash + Clone + 'a,
    F: Fn(&'a Listing) -> &'a T,
{
    let mut seen = HashSet::with_capacity(listings.len());
    listings
        .iter()
        .map(key)
        .filter(|value| seen.insert(*value))
        .cloned()
        .collect()
}

pub fn distinct_isbns(listings: &[Listing]) -> Vec<Isbn> {
    distinct_by(listings, |l| &l.isbn)
}

pub fn distinct_seller_tokens(listings: &[Listing]) -> Vec<String> {
    distinct_by(listings, |l| &l.seller_token)
}

pub fn aggregate(listings: &[Listing]) -> Aggregate {
    Aggregate {
        distinct_isbns: distinct_isbns(listings),
        distinct_seller_tokens: distinct_seller_tokens(listings),
    }
}
