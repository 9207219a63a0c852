//! The balance modal on the balance sheet page.

mod modal;
mod templates;

pub use modal::{ModalControl, get_balance_modal, refresh_balance};
pub use templates::{balance_modal, balance_row, table_cell};
