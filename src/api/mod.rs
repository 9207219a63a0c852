//! Access to the ledger REST API, the source of truth for every record shown by this app.

mod client;
mod models;

pub use client::{ApiError, FormBody, HttpLedgerApi, LedgerApi, fetch, submit};
pub use models::{
    AccountChoice, BalanceRecord, CashFlowPoint, CreatedResource, CreatedSheet, CreditScorePoint,
    InvestmentPoint, PaymentChoice, SavingsPoint, SheetBalance, SheetDetail, SheetSummary,
    StatusInfo, TaxReturnPoint,
};

/// The ledger API endpoints used by this app.
pub mod paths {
    pub const STATUS: &str = "/api/status/";
    pub const CASH_FLOW: &str = "/api/cashflow/";
    pub const INVESTMENTS: &str = "/api/investments/";
    pub const TAX_RETURNS: &str = "/api/returns/";
    pub const CREDIT_SCORE: &str = "/api/creditscore/";
    pub const SAVINGS: &str = "/api/savings/";
    pub const SHEETS: &str = "/api/sheets/";
    pub const ACCOUNTS: &str = "/api/accounts/";
    pub const PAYMENTS: &str = "/api/payments/";

    /// The detail endpoint of the sheet for `date`.
    pub fn sheet(date: &str) -> String {
        format!("{SHEETS}{date}/")
    }

    /// The endpoint of one balance on the sheet for `date`.
    pub fn sheet_balance(date: &str, balance_id: i64) -> String {
        format!("{SHEETS}{date}/balances/{balance_id}/")
    }

    /// The endpoint for creating balances on the sheet for `date`.
    pub fn sheet_balances(date: &str) -> String {
        format!("{SHEETS}{date}/balances/")
    }

    /// The endpoint for creating transactions on the sheet for `date`.
    pub fn sheet_transactions(date: &str) -> String {
        format!("{SHEETS}{date}/transactions/")
    }

    /// The endpoint that refreshes a resource, e.g. a balance.
    pub fn refresh(endpoint: &str) -> String {
        format!("{endpoint}refresh/")
    }

    /// The transaction linked to a payment, where `payment` is the payment URL.
    pub fn payment_transaction(payment: &str) -> String {
        format!("{payment}transaction/")
    }
}
