//! The records returned by the ledger API.
//!
//! The ledger API serialises decimal fields as strings (e.g. `"46322.21"`),
//! so numeric fields accept either a JSON number or a decimal string.

use serde::{Deserialize, Deserializer, de};

/// An account balance shown in the balance modal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BalanceRecord {
    /// The display name of the account.
    pub account: String,
    /// The ISO currency code of the account.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// The current (ending) balance.
    #[serde(alias = "ending", deserialize_with = "amount")]
    pub amount: f64,
    /// The balance at the start of the period, if the API provides it.
    #[serde(
        default,
        alias = "beginning",
        deserialize_with = "optional_amount"
    )]
    pub prior: Option<f64>,
}

fn default_currency() -> String {
    "USD".to_owned()
}

/// The response to a successful create request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedResource {
    pub id: serde_json::Value,
}

/// The response to creating a balance sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedSheet {
    /// The page to send the user to.
    pub href: String,
}

/// The health check response of the ledger API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusInfo {
    pub status: String,
    pub version: String,
    pub revision: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl StatusInfo {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// A balance sheet as listed by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetSummary {
    pub url: String,
    /// The sheet date as "YYYY-MM-DD", which is also its key.
    pub date: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// A balance sheet with its balances and transactions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetDetail {
    pub date: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub balances: Vec<SheetBalance>,
    #[serde(default)]
    pub transactions: Vec<SheetTransaction>,
}

/// An account balance on a balance sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetBalance {
    pub id: i64,
    pub account: String,
    #[serde(default, deserialize_with = "optional_amount")]
    pub beginning: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub ending: Option<f64>,
}

/// A transaction recorded on a balance sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetTransaction {
    pub id: i64,
    pub date: String,
    pub credit: String,
    pub debit: String,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub memo: Option<String>,
}

/// An account that can be credited or debited by a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountChoice {
    pub url: String,
    pub name: String,
}

/// A recurring payment that can be turned into a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentChoice {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One month of the cash flow series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CashFlowPoint {
    /// The month as "YYYY-MM-DD".
    pub date: String,
    #[serde(deserialize_with = "amount")]
    pub cash_ending: f64,
    #[serde(deserialize_with = "amount")]
    pub debt_ending: f64,
    #[serde(deserialize_with = "amount")]
    pub net_ending: f64,
}

/// One point of the investments series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvestmentPoint {
    pub date: String,
    #[serde(deserialize_with = "amount")]
    pub investment: f64,
}

/// One year of tax returns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxReturnPoint {
    pub year: i32,
    #[serde(deserialize_with = "amount")]
    pub income: f64,
    #[serde(deserialize_with = "amount")]
    pub agi: f64,
}

/// One credit score report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreditScorePoint {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub score: f64,
}

/// One point of the savings series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavingsPoint {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub savings: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::String(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid decimal amount \"{text}\""))),
    }
}

fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(number)) => Ok(Some(number)),
        Some(NumberOrString::String(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid decimal amount \"{text}\""))),
    }
}
