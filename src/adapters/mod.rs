// Adapters layer: concrete implementations of the domain ports
// (in-memory store and registries, HTTP registries, seed files).

pub mod http;
pub mod memory;
pub mod seed;

pub use http::{HttpBookRegistry, HttpUserRegistry};
pub use memory::{InMemoryBookRegistry, InMemoryListingStore, InMemoryUserRegistry};
