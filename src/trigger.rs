//! Client-side events sent with the `HX-Trigger` response header.

use axum::http::HeaderName;
use axum_htmx::HX_TRIGGER;
use serde_json::Value;

/// The `HX-Trigger` header for `events`, a JSON object of event names to event details.
///
/// Non-ASCII characters are escaped since browsers do not decode header values as UTF-8.
pub fn hx_trigger(events: &Value) -> [(HeaderName, String); 1] {
    [(HX_TRIGGER, ascii_json(events))]
}

fn ascii_json(value: &Value) -> String {
    let mut escaped = String::new();
    let mut buffer = [0u16; 2];

    for character in value.to_string().chars() {
        if character.is_ascii() {
            escaped.push(character);
        } else {
            for unit in character.encode_utf16(&mut buffer) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }

    escaped
}
