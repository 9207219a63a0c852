//! The date that identifies a balance sheet in URLs.

use std::fmt;

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const SHEET_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A validated balance sheet date, e.g. "2019-01-31".
///
/// Dates are checked before they are spliced into ledger API paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetDate(Date);

impl SheetDate {
    /// Parse a date in the "YYYY-MM-DD" format.
    ///
    /// # Errors
    /// Returns [Error::InvalidSheetDate] if `text` is not a valid date.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Date::parse(text, SHEET_DATE_FORMAT)
            .map(SheetDate)
            .map_err(|_| Error::InvalidSheetDate(text.to_owned()))
    }
}

impl fmt::Display for SheetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.format(SHEET_DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
