pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    HttpBookRegistry, HttpUserRegistry, InMemoryBookRegistry, InMemoryListingStore,
    InMemoryUserRegistry,
};
pub use config::toml_config::MarketConfig;
pub use core::lifecycle::CreateListing;
pub use core::market::MarketService;
pub use core::projection::Shape;
pub use utils::error::{MarketError, Result};
