//! Gift card inspection commands.
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Shopify store domain
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token
//! - `GIFT_CARD_SNAPSHOT_SIZE` - Default `--limit`

use gift_redeem_core::GiftInstrument;
use gift_redeem_proxy::config::{RedemptionConfig, ShopifyAdminConfig};
use gift_redeem_proxy::shopify::AdminClient;

use super::CommandError;

/// List the gift cards the proxy would match a code against.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the API call fails.
pub async fn list(limit: Option<i64>) -> Result<(), CommandError> {
    let shopify = ShopifyAdminConfig::from_env()?;
    let limit = match limit {
        Some(limit) if (1..=250).contains(&limit) => limit,
        Some(limit) => return Err(CommandError::InvalidLimit(limit)),
        None => RedemptionConfig::from_env()?.snapshot_size,
    };

    let client = AdminClient::new(&shopify)?;
    let cards = client.get_gift_cards(limit).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", format_header());
        for card in &cards {
            println!("{}", format_row(card));
        }
        println!("{} gift card(s) from {}", cards.len(), client.store());
    }

    Ok(())
}

fn format_header() -> String {
    format!("{:<8} {:>14} {:<8} {:<14} {}", "TAG", "BALANCE", "ENABLED", "CUSTOMER", "ID")
}

fn format_row(card: &GiftInstrument) -> String {
    format!(
        "{:<8} {:>14} {:<8} {:<14} {}",
        card.display_tag().unwrap_or_else(|| "-".to_string()),
        card.balance.display(),
        if card.enabled { "yes" } else { "no" },
        card.bound_customer().unwrap_or("-"),
        card.id,
    )
}
