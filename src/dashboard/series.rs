//! Ordering and labelling of the time series returned by the ledger API.
//!
//! The ledger API returns every series newest first, charts want them oldest first.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const API_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const MONTH_LABEL_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [year]");

/// Reorder a newest-first series into chronological order.
pub fn chronological<T>(mut newest_first: Vec<T>) -> Vec<T> {
    newest_first.reverse();
    newest_first
}

/// Keep the `count` most recent points of a newest-first series, in chronological order.
pub fn most_recent<T>(mut newest_first: Vec<T>, count: usize) -> Vec<T> {
    newest_first.truncate(count);
    chronological(newest_first)
}

/// Format an API date as a month label, e.g. "2019-01-31" becomes "Jan 2019".
///
/// Dates that cannot be parsed are returned unchanged.
pub fn month_label(date: &str) -> String {
    Date::parse(date, API_DATE_FORMAT)
        .ok()
        .and_then(|date| date.format(MONTH_LABEL_FORMAT).ok())
        .unwrap_or_else(|| date.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{chronological, month_label, most_recent};

    #[test]
    fn reverses_newest_first_series() {
        assert_eq!(chronological(vec![3, 2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn keeps_most_recent_points() {
        let newest_first: Vec<i32> = (1..=20).rev().collect();

        let points = most_recent(newest_first, 12);

        assert_eq!(points, (9..=20).collect::<Vec<_>>());
    }

    #[test]
    fn short_series_is_kept_whole() {
        assert_eq!(most_recent(vec![2, 1], 12), vec![1, 2]);
    }

    #[test]
    fn formats_month_labels() {
        assert_eq!(month_label("2019-01-31"), "Jan 2019");
        assert_eq!(month_label("2020-12-01"), "Dec 2020");
    }

    #[test]
    fn unparseable_date_is_kept() {
        assert_eq!(month_label("last month"), "last month");
    }
}
