//! Gift card reads for the Admin API.

use gift_redeem_core::{GiftInstrument, Money};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    queries::{GetGiftCards, get_gift_cards},
};

/// Search query limiting the snapshot to spendable cards.
const ENABLED_QUERY: &str = "status:enabled";

impl AdminClient {
    /// Get the most recently created enabled gift cards.
    ///
    /// # Arguments
    ///
    /// * `first` - Number of gift cards to return (Shopify allows at most 250)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_gift_cards(
        &self,
        first: i64,
    ) -> Result<Vec<GiftInstrument>, AdminShopifyError> {
        let variables = get_gift_cards::Variables {
            first,
            query: Some(ENABLED_QUERY.to_string()),
        };

        let response = self.execute::<GetGiftCards>(variables).await?;

        let cards: Vec<GiftInstrument> = response
            .gift_cards
            .edges
            .into_iter()
            .map(|edge| convert_gift_card(edge.node))
            .collect();

        tracing::debug!(count = cards.len(), "Fetched gift card snapshot");
        Ok(cards)
    }
}

fn convert_gift_card(node: get_gift_cards::GiftCardNode) -> GiftInstrument {
    GiftInstrument {
        id: node.id,
        last_characters: node.last_characters,
        balance: Money::new(node.balance.amount, node.balance.currency_code),
        enabled: node.enabled,
        customer_id: node.customer.map(|c| c.id),
    }
}
