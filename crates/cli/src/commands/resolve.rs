//! Run a code resolution from the terminal.
//!
//! Goes through the same resolver as `POST /api`, so a matched gift card
//! provisions a real discount code in the store.

use std::sync::Arc;

use gift_redeem_core::CustomerId;
use gift_redeem_proxy::config::{RedemptionConfig, ShopifyAdminConfig};
use gift_redeem_proxy::services::{ResolutionRequest, Resolver};
use gift_redeem_proxy::shopify::AdminClient;

use super::CommandError;

/// Resolve `code` against the configured store and print the envelope.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the code is blank, or the
/// standard lookup fails.
pub async fn resolve(
    code: &str,
    cart_total: i64,
    customer: Option<&str>,
) -> Result<(), CommandError> {
    let shopify = ShopifyAdminConfig::from_env()?;
    let redemption = RedemptionConfig::from_env()?;
    let client = AdminClient::new(&shopify)?;
    let resolver = Resolver::new(Arc::new(client), &redemption);

    let output = render(&resolver, code, cart_total, customer).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }

    Ok(())
}

async fn render(
    resolver: &Resolver,
    code: &str,
    cart_total: i64,
    customer: Option<&str>,
) -> Result<String, CommandError> {
    let request = ResolutionRequest {
        code: Some(code.to_string()),
        cart_total,
        customer: CustomerId::from_proxy_param(customer),
    };

    let resolution = resolver.resolve(&request).await?;
    let json = serde_json::to_string_pretty(&resolution.result)?;
    Ok(format!("{json}\noutcome: {}", resolution.outcome))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gift_redeem_core::{GiftInstrument, Money};
    use gift_redeem_proxy::services::redemption::InMemoryBackend;
    use rust_decimal::Decimal;

    use super::*;

    #[tokio::test]
    async fn test_render_gift_resolution() {
        let backend = Arc::new(InMemoryBackend::new().with_gift_card(GiftInstrument {
            id: "gid://shopify/GiftCard/1".to_string(),
            last_characters: "AB12".to_string(),
            balance: Money::new(Decimal::new(3000, 2), "USD"),
            enabled: true,
            customer_id: None,
        }));
        let resolver = Resolver::new(backend, &RedemptionConfig::default());

        let output = render(&resolver, "gift-ab12", 5000, None).await.unwrap();

        assert!(output.contains("\"discountCode\": \"GIFT-AB12\""));
        assert!(output.ends_with("outcome: created"));
    }

    #[tokio::test]
    async fn test_render_blank_code_fails() {
        let resolver = Resolver::new(Arc::new(InMemoryBackend::new()), &RedemptionConfig::default());
        let err = render(&resolver, "   ", 0, None).await.unwrap_err();
        assert!(matches!(err, CommandError::Resolve(_)));
    }
}
