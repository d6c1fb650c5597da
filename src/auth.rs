use base64::{engine::general_purpose, Engine};

/// Encodes `username:token` with standard (padded) base64.
pub fn encode_bearer_token(username: &str, token: &str) -> String {
    let raw = format!("{username}:{token}");
    general_purpose::STANDARD.encode(raw)
}

pub fn make_basic_auth_header(username: &str, token: &str) -> String {
    let encoded = encode_bearer_token(username, token);
    format!("Basic {encoded}")
}
