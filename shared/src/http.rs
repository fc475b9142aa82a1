//! Helpers for talking to the REST backend

use serde_json::Value;

/// Generic message when the backend gives nothing usable
pub const DEFAULT_ERROR_MESSAGE: &str = "Bir hata oluştu.";

/// URL for a product image path as stored by the backend.
///
/// Absolute URLs and paths already under `base_url` are used as-is; anything
/// else is reduced to its file name under the product files endpoint.
pub fn build_image_url(base_url: &str, image_path: &str) -> Option<String> {
    let path = image_path.trim();
    if path.is_empty() {
        return None;
    }
    let base = base_url.trim().trim_end_matches('/');
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(path.to_string());
    }
    if !base.is_empty() && path.starts_with(&format!("{}/", base)) {
        return Some(path.to_string());
    }
    let filename = path.rsplit('/').next().unwrap_or("");
    if filename.is_empty() {
        return None;
    }
    Some(format!("{}/files/products/{}", base, encode_uri_component(filename)))
}

/// Percent-encode everything outside the URI component unreserved set
pub fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Human-readable message from an error payload
pub fn format_error_message(payload: &Value, fallback: &str) -> String {
    match payload {
        Value::Null => fallback.to_string(),
        Value::String(s) if s.is_empty() => fallback.to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => payload.to_string(),
        },
        other => other.to_string(),
    }
}

/// Message from a raw response body, which may or may not be JSON
pub fn format_error_body(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => format_error_message(&payload, fallback),
        Err(_) if body.trim().is_empty() => fallback.to_string(),
        Err(_) => body.to_string(),
    }
}
