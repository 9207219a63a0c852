//! Accounting style formatting of monetary amounts.
//!
//! Amounts are shown with exactly two decimal places and thousands
//! separators. Negative amounts are wrapped in parentheses and zero is
//! shown as an em dash, which is how balance sheets are usually printed.

use maud::{Markup, html};

/// The placeholder shown in place of a zero amount.
pub const ZERO_PLACEHOLDER: &str = "—";

/// Format `value` as an accounting amount, e.g. "1,234.50", "(1,234.50)" or "—".
///
/// Non-finite values cannot be shown as an amount and render as the zero placeholder.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return ZERO_PLACEHOLDER.to_owned();
    }

    let magnitude = format_magnitude(value.abs());

    if value < 0.0 {
        format!("({magnitude})")
    } else {
        magnitude
    }
}

/// Format a number's magnitude with thousands separators and exactly two decimal places.
///
/// The number is rounded to the nearest cent, halves away from zero, the
/// same as the chart labels formatted in the browser.
pub fn format_magnitude(number: f64) -> String {
    let cents = (number.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    // Past 2^53 cents the subtraction can land outside 0..100.
    let fraction = (cents - whole * 100.0).clamp(0.0, 99.0);

    format!(
        "{}.{:02.0}",
        group_thousands(&format!("{whole:.0}")),
        fraction
    )
}

/// Insert a comma between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// The display symbol for an ISO currency code, falling back to the code itself.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" | "MXN" => "$",
        "GBP" => "£",
        "EUR" => "€",
        "CNY" => "角",
        "JPY" => "¥",
        other => other,
    }
}

/// Renders an amount as a left-aligned currency label and a right-aligned magnitude.
pub fn accounting_amount(value: f64, currency: &str) -> Markup {
    html!(
        span class="pull-left float-left" { (currency_symbol(currency)) }
        span class="pull-right float-right tabular-nums" { (format_amount(value)) }
        div class="clearfix clear-both" {}
    )
}
