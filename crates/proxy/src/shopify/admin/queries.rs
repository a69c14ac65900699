//! GraphQL operations used against the Shopify Admin API.
//!
//! Each operation is a `graphql_client::GraphQLQuery` with a sibling module
//! holding its query text, variables and response shape, laid out the way
//! `#[derive(GraphQLQuery)]` lays out generated code.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Gift cards
// =============================================================================

/// Most recent gift cards matching a search query.
pub struct GetGiftCards;

pub mod get_gift_cards {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetGiftCards";
    pub const QUERY: &str = r"query GetGiftCards($first: Int!, $query: String) {
  giftCards(first: $first, query: $query, sortKey: CREATED_AT, reverse: true) {
    edges {
      node {
        id
        lastCharacters
        enabled
        balance {
          amount
          currencyCode
        }
        customer {
          id
        }
      }
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub query: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "giftCards")]
        pub gift_cards: GiftCardConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GiftCardConnection {
        pub edges: Vec<GiftCardEdge>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GiftCardEdge {
        pub node: GiftCardNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GiftCardNode {
        pub id: String,
        pub last_characters: String,
        pub enabled: bool,
        pub balance: MoneyV2,
        pub customer: Option<CustomerRef>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyV2 {
        #[serde(with = "rust_decimal::serde::str")]
        pub amount: Decimal,
        pub currency_code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CustomerRef {
        pub id: String,
    }
}

impl GraphQLQuery for GetGiftCards {
    type Variables = get_gift_cards::Variables;
    type ResponseData = get_gift_cards::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_gift_cards::QUERY,
            operation_name: get_gift_cards::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Code discounts
// =============================================================================

/// Code discount node by its redeemable code, whatever the discount type.
pub struct CodeDiscountByCode;

pub mod code_discount_by_code {
    use gift_redeem_core::DiscountStatus;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "CodeDiscountByCode";
    pub const QUERY: &str = r"query CodeDiscountByCode($code: String!) {
  codeDiscountNodeByCode(code: $code) {
    id
    codeDiscount {
      __typename
      ... on DiscountCodeBasic {
        title
        status
        customerGets {
          value {
            __typename
            ... on DiscountAmount {
              amount {
                amount
                currencyCode
              }
            }
          }
        }
      }
      ... on DiscountCodeFreeShipping {
        title
        status
      }
      ... on DiscountCodeBxgy {
        title
        status
      }
      ... on DiscountCodeApp {
        title
        status
      }
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "codeDiscountNodeByCode")]
        pub code_discount_node_by_code: Option<CodeDiscountNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CodeDiscountNode {
        pub id: String,
        pub code_discount: CodeDiscount,
    }

    /// Union of the code discount types, flattened to the shared fields.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CodeDiscount {
        #[serde(rename = "__typename")]
        pub typename: String,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub status: Option<DiscountStatus>,
        #[serde(default)]
        pub customer_gets: Option<CustomerGets>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CustomerGets {
        pub value: CustomerGetsValue,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CustomerGetsValue {
        #[serde(rename = "__typename")]
        pub typename: String,
        #[serde(default)]
        pub amount: Option<MoneyV2>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyV2 {
        #[serde(with = "rust_decimal::serde::str")]
        pub amount: Decimal,
        pub currency_code: String,
    }
}

impl GraphQLQuery for CodeDiscountByCode {
    type Variables = code_discount_by_code::Variables;
    type ResponseData = code_discount_by_code::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: code_discount_by_code::QUERY,
            operation_name: code_discount_by_code::OPERATION_NAME,
        }
    }
}

/// Create a fixed-amount basic code discount.
pub struct DiscountCodeBasicCreate;

pub mod discount_code_basic_create {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "DiscountCodeBasicCreate";
    pub const QUERY: &str = r"mutation DiscountCodeBasicCreate($basicCodeDiscount: DiscountCodeBasicInput!) {
  discountCodeBasicCreate(basicCodeDiscount: $basicCodeDiscount) {
    codeDiscountNode {
      id
    }
    userErrors {
      field
      message
      code
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub basic_code_discount: DiscountCodeBasicInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountCodeBasicInput {
        pub title: String,
        pub code: String,
        pub starts_at: String,
        pub ends_at: String,
        pub context: DiscountContextInput,
        pub customer_gets: DiscountCustomerGetsInput,
        pub applies_once_per_customer: bool,
    }

    /// Buyer eligibility. Replaces the deprecated `customerSelection`.
    #[derive(Debug, Clone, Serialize)]
    pub struct DiscountContextInput {
        pub all: DiscountBuyerSelection,
    }

    #[derive(Debug, Clone, Copy, Serialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum DiscountBuyerSelection {
        All,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct DiscountCustomerGetsInput {
        pub value: DiscountCustomerGetsValueInput,
        pub items: DiscountItemsInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountCustomerGetsValueInput {
        pub discount_amount: DiscountAmountInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountAmountInput {
        /// Decimal amount as a string, two decimal places.
        pub amount: String,
        pub applies_on_each_item: bool,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct DiscountItemsInput {
        pub all: bool,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "discountCodeBasicCreate")]
        pub discount_code_basic_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub code_discount_node: Option<CreatedNode>,
        pub user_errors: Vec<UserErrors>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CreatedNode {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct UserErrors {
        pub field: Option<Vec<String>>,
        pub message: String,
        pub code: Option<String>,
    }
}

impl GraphQLQuery for DiscountCodeBasicCreate {
    type Variables = discount_code_basic_create::Variables;
    type ResponseData = discount_code_basic_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: discount_code_basic_create::QUERY,
            operation_name: discount_code_basic_create::OPERATION_NAME,
        }
    }
}
