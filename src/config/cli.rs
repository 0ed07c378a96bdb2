use clap::Subcommand;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search listings: 'home' or 'id1,id2+price|condition|'
    Search { expression: String },

    /// Look up listings by comma-separated ids
    Get { ids: String },

    /// Show one listing in a given shape
    Show {
        listing_id: i64,
        /// bare, bare_seller, with_user, with_book or with_both
        #[arg(long, default_value = "with_both")]
        shape: String,
    },

    /// List the sellers offering a book
    Book { isbn: i64 },

    /// Post a new listing
    Create {
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        condition: String,
        #[arg(long)]
        isbn: i64,
        #[arg(long = "seller")]
        seller_token: String,
        #[arg(long, default_value = "available")]
        status: String,
    },

    /// Change the condition of a listing
    Update {
        listing_id: i64,
        #[arg(long)]
        condition: String,
    },

    /// Remove a listing
    Delete { listing_id: i64 },
}
