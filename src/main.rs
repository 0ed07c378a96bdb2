use bookmarket::adapters::seed;
use bookmarket::config::cli::Command;
use bookmarket::core::search::parse_listing_ids;
use bookmarket::core::{BookRegistry, ConfigProvider, RegistryKind, SearchExpr, UserRegistry};
use bookmarket::domain::model::{CreateOutcome, UpdateOutcome};
use bookmarket::utils::error::ErrorSeverity;
use bookmarket::utils::{logger, validation::Validate};
use bookmarket::{
    CliConfig, CreateListing, HttpBookRegistry, HttpUserRegistry, InMemoryBookRegistry,
    InMemoryListingStore, InMemoryUserRegistry, MarketConfig, MarketError, MarketService, Result,
    Shape,
};
use clap::Parser;
use serde_json::{json, Value};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 只有預設路徑可以不存在
    let config = match MarketConfig::load_for_cli(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    let loaded = config.is_some();
    let config = config.unwrap_or_default();

    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting {}", config.market.name);
    if loaded {
        tracing::info!("📁 Loaded configuration from: {}", cli.config);
    } else {
        tracing::info!("No config at {}, using defaults", cli.config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&config, cli.command).await {
        Ok(output) => {
            let rendered = serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string());
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run(config: &MarketConfig, command: Command) -> Result<Value> {
    let store = InMemoryListingStore::with_listings(seed::load_listings(config.seed_listings())?);

    match config.registry_kind() {
        RegistryKind::Memory => {
            let books = InMemoryBookRegistry::with_books(seed::load_books(config.seed_books())?);
            let users = InMemoryUserRegistry::with_users(seed::load_users(config.seed_users())?);
            execute(&MarketService::new(store, books, users), command).await
        }
        RegistryKind::Http => {
            if !config.seed_books().is_empty() || !config.seed_users().is_empty() {
                tracing::warn!("Seed books/users are ignored with http registries");
            }
            let timeout = Duration::from_secs(config.timeout_seconds());
            let book_endpoint = config.book_endpoint().ok_or_else(|| MarketError::MissingConfigError {
                field: "registries.book_endpoint".to_string(),
            })?;
            let user_endpoint = config.user_endpoint().ok_or_else(|| MarketError::MissingConfigError {
                field: "registries.user_endpoint".to_string(),
            })?;
            let books = HttpBookRegistry::new(book_endpoint, timeout)?;
            let users = HttpUserRegistry::new(user_endpoint, timeout)?;
            execute(&MarketService::new(store, books, users), command).await
        }
    }
}

async fn execute<B: BookRegistry, U: UserRegistry>(
    service: &MarketService<InMemoryListingStore, B, U>,
    command: Command,
) -> Result<Value> {
    let output = match command {
        Command::Search { expression } => {
            let expr = SearchExpr::parse(&expression)?;
            serde_json::to_value(service.search(&expr).await?)?
        }
        Command::Get { ids } => {
            let ids = parse_listing_ids(&ids)?;
            serde_json::to_value(service.listings_by_ids(&ids).await?)?
        }
        Command::Show { listing_id, shape } => {
            let shape: Shape = shape.parse()?;
            serde_json::to_value(service.detail(listing_id, shape).await?)?
        }
        Command::Book { isbn } => serde_json::to_value(service.listings_for_book(isbn).await?)?,
        Command::Create {
            price,
            condition,
            isbn,
            seller_token,
            status,
        } => {
            let outcome = service
                .create(CreateListing {
                    price,
                    condition,
                    isbn,
                    seller_token,
                    status,
                })
                .await?;
            match &outcome {
                CreateOutcome::Created(listing) => {
                    json!({"message": outcome.message(), "listing_id": listing.listing_id})
                }
                _ => json!({"message": outcome.message()}),
            }
        }
        Command::Update {
            listing_id,
            condition,
        } => match service.update(listing_id, &condition).await? {
            UpdateOutcome::Updated(listing) => {
                serde_json::to_value(service.project(&listing, Shape::WithBook).await?)?
            }
            outcome @ UpdateOutcome::NotFound(_) => json!({"message": outcome.message()}),
        },
        Command::Delete { listing_id } => {
            json!({"message": service.delete(listing_id).await?.message()})
        }
    };
    Ok(output)
}
