use anyhow::Result;
use bookmarket::adapters::seed;
use bookmarket::core::{ConfigProvider, RegistryKind, SearchExpr};
use bookmarket::utils::validation::Validate;
use bookmarket::{
    InMemoryBookRegistry, InMemoryListingStore, InMemoryUserRegistry, MarketConfig, MarketService,
};
use tempfile::TempDir;

/// Writes a config plus seed files and runs a search over them.
#[tokio::test]
async fn test_seeded_market_from_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path().to_str().unwrap().replace('\\', "/");

    tokio::fs::write(
        format!("{}/books.csv", dir),
        "isbn,title,author\n100,Dune,Frank Herbert\n200,Emma,Jane Austen\n",
    )
    .await?;
    tokio::fs::write(
        format!("{}/users.tsv", dir),
        "seller_token\tname\temail\namy\tAmy\tamy@example.edu\nbob\tBob\t\n",
    )
    .await?;
    tokio::fs::write(
        format!("{}/listings.csv", dir),
        "listing_id,price,condition,isbn,seller_token,status,created_at\n\
         10,8.00,good,100,amy,available,2024-05-01T09:00:00Z\n\
         11,6.50,fair,200,bob,available,2024-05-02T09:00:00Z\n\
         12,9.25,new,100,bob,sold,2024-04-30T09:00:00Z\n",
    )
    .await?;

    std::env::set_var("SEED_TEST_DIR", &dir);
    let config_path = format!("{}/market.toml", dir);
    tokio::fs::write(
        &config_path,
        r#"
[market]
name = "seeded"

[seed]
books = ["${SEED_TEST_DIR}/books.csv"]
users = ["${SEED_TEST_DIR}/users.tsv"]
listings = ["${SEED_TEST_DIR}/listings.csv"]
"#,
    )
    .await?;

    let config = MarketConfig::from_file(&config_path)?;
    std::env::remove_var("SEED_TEST_DIR");
    config.validate()?;
    assert_eq!(config.registry_kind(), RegistryKind::Memory);

    let market = MarketService::new(
        InMemoryListingStore::with_listings(seed::load_listings(config.seed_listings())?),
        InMemoryBookRegistry::with_books(seed::load_books(config.seed_books())?),
        InMemoryUserRegistry::with_users(seed::load_users(config.seed_users())?),
    );

    let home = market.search(&SearchExpr::Home).await?;
    let ids: Vec<i64> = home.listings.iter().map(|v| v.listing_id).collect();
    assert_eq!(ids, vec![11, 10, 12]);
    assert_eq!(home.isbns, Some(vec![200, 100]));
    assert_eq!(home.seller_tokens, vec!["bob", "amy"]);

    let by_price = market.search(&SearchExpr::parse("10,11,12+price")?).await?;
    let ids: Vec<i64> = by_price.listings.iter().map(|v| v.listing_id).collect();
    assert_eq!(ids, vec![11, 10, 12]);

    // seeded ids are not handed out again
    let created = market
        .create(bookmarket::CreateListing {
            price: "3.00".parse()?,
            condition: "poor".to_string(),
            isbn: 200,
            seller_token: "amy".to_string(),
            status: "available".to_string(),
        })
        .await?;
    match created {
        bookmarket::core::CreateOutcome::Created(listing) => assert_eq!(listing.listing_id, 13),
        other => panic!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[test]
fn test_missing_seed_file_fails() {
    let result = seed::load_books(&["/definitely/not/here/books.csv".to_string()]);
    assert!(result.is_err());
}
