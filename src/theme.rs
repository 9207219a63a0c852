//! The theme colour palette shared by the dashboard charts.

/// Theme colours as hex strings, e.g. "#008cba".
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: String,
    pub success: String,
    pub warning: String,
    pub danger: String,
    /// Used for lines drawn over coloured bars.
    pub key: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#008cba".to_owned(),
            success: "#43ac6a".to_owned(),
            warning: "#E99002".to_owned(),
            danger: "#F04124".to_owned(),
            key: "#333333".to_owned(),
        }
    }
}

/// Convert a `#rrggbb` (or `#rgb`) colour to an `rgba(...)` string with the given alpha.
///
/// Colours that cannot be parsed are returned unchanged.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
    match parse_hex(hex) {
        Some((red, green, blue)) => format!("rgba({red}, {green}, {blue}, {alpha})"),
        None => hex.to_owned(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').filter(|digits| digits.is_ascii())?;

    match digits.len() {
        6 => Some((
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        )),
        3 => {
            let channel = |i: usize| {
                u8::from_str_radix(&digits[i..i + 1], 16)
                    .ok()
                    .map(|value| value * 17)
            };
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}
