use serde::{Deserialize, Serialize};

pub mod date;

/// Response envelope shared by every endpoint.
///
/// Exactly one of `data` and `errors` is present in the serialized JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl<T> Response<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![message.into()],
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based page number.
    pub number: u64,
    pub size: u64,
}

pub mod wallet {
    use rust_decimal::Decimal;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletNew {
        pub name: String,
        pub value: Decimal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Wallet {
        pub id: i64,
        pub name: String,
        pub value: Decimal,
    }
}

pub mod wallet_item {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    /// Kind of a wallet item as exchanged over HTTP.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ItemType {
        #[serde(rename = "ENTRADA")]
        Income,
        #[serde(rename = "SAIDA")]
        Expense,
    }

    /// Request and response body for a single wallet item.
    ///
    /// `id` is ignored on create and required on update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletItem {
        #[serde(default)]
        pub id: Option<i64>,
        /// Id of the owning wallet.
        pub wallet: i64,
        #[serde(with = "crate::date")]
        pub date: NaiveDate,
        #[serde(rename = "type")]
        pub item_type: ItemType,
        pub description: String,
        pub value: Decimal,
    }

    /// Query string of the date-range listing.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DateRange {
        #[serde(rename = "startDate", with = "crate::date")]
        pub start_date: NaiveDate,
        #[serde(rename = "endDate", with = "crate::date")]
        pub end_date: NaiveDate,
        #[serde(default)]
        pub page: u64,
    }

    /// Query string of the type listing.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TypeFilter {
        #[serde(rename = "type")]
        pub item_type: ItemType,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Totals {
        pub total_income: Decimal,
        pub total_expense: Decimal,
        pub net: Decimal,
    }
}
