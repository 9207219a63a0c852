//! The forms on the balance sheet edit page.

mod fields;
mod populate;
mod submission;

pub use fields::{
    BALANCE_FORM, FieldKind, FormFields, FormSchema, PAYMENT_FORM, SelectOption,
    TRANSACTION_FORM, field_input,
};
pub use populate::populate_transaction_endpoint;
pub use submission::{create_balance_endpoint, create_transaction_endpoint};
