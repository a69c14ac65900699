//! Gift Redeem CLI - Inspect gift cards and resolve codes from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the gift card snapshot the proxy would match against
//! gr-cli gift-cards list
//! gr-cli gift-cards list --limit 10
//!
//! # Resolve a code exactly like POST /api would
//! gr-cli resolve GIFT-AB12 --cart-total 5000
//! gr-cli resolve GIFT-AB12 --cart-total 5000 --customer 1234567890
//! ```
//!
//! # Commands
//!
//! - `gift-cards list` - List recent enabled gift cards
//! - `resolve` - Run a full code resolution (may create a discount code)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gr-cli")]
#[command(author, version, about = "Gift Redeem CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect gift cards
    GiftCards {
        #[command(subcommand)]
        action: GiftCardAction,
    },
    /// Resolve a code against the configured store
    Resolve {
        /// Code as a shopper would enter it
        code: String,

        /// Cart total in minor currency units (cents)
        #[arg(long, default_value_t = 0)]
        cart_total: i64,

        /// Logged-in customer ID (numeric part of the customer GID)
        #[arg(long)]
        customer: Option<String>,
    },
}

#[derive(Subcommand)]
enum GiftCardAction {
    /// List the most recent enabled gift cards
    List {
        /// Number of gift cards to fetch (defaults to GIFT_CARD_SNAPSHOT_SIZE)
        #[arg(short, long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gift_redeem_cli=info,gift_redeem_proxy=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::GiftCards { action } => match action {
            GiftCardAction::List { limit } => commands::gift_cards::list(limit).await?,
        },
        Commands::Resolve {
            code,
            cart_total,
            customer,
        } => commands::resolve::resolve(&code, cart_total, customer.as_deref()).await?,
    }
    Ok(())
}
