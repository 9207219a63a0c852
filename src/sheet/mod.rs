//! Balance sheets: listing, viewing, creating and editing them.

mod create_endpoint;
mod date;
mod edit_page;
mod sheet_page;
mod sheets_page;

pub use create_endpoint::{create_sheet_endpoint, create_sheet_form};
pub use date::SheetDate;
pub use edit_page::get_edit_sheet_page;
pub use sheet_page::get_sheet_page;
pub use sheets_page::get_sheets_page;
