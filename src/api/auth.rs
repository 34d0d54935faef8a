//! Credential handling for the page platform.
//!
//! The platform stores its tokens in a URL-encoded cookie blob. The bearer
//! token used for REST calls is read back out of that blob rather than taken
//! from the raw input, so the same extraction works for a blob copied from a
//! browser.

use regex::Regex;

use crate::error::{Error, Result};

/// Name of the page platform's session cookie.
pub const SESSION_COOKIE_NAME: &str = "_domestika_session";

/// Encode an access/refresh token pair the way the platform's cookie does.
pub fn encode_credentials(access_token: &str, refresh_token: &str) -> String {
    format!(
        "{{%22accessToken%22:%22{}%22%2C%22refreshToken%22:%22{}%22%2C%22isEmpty%22:false}}",
        access_token, refresh_token
    )
}

/// Pull the access token back out of an encoded credential blob.
pub fn extract_access_token(blob: &str) -> Result<String> {
    let decoded = urlencoding::decode(blob)
        .map_err(|e| Error::Authentication(format!("Credential blob is not valid UTF-8: {}", e)))?;

    let pattern = Regex::new(r#"accessToken":"(.*?)""#)
        .map_err(|e| Error::Authentication(format!("Invalid token pattern: {}", e)))?;

    pattern
        .captures(&decoded)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Authentication("No access token found in credentials".into()))
}

/// Credentials for the page platform.
#[derive(Debug, Clone)]
pub struct PageCredentials {
    pub session_cookie: String,
    pub access_token: String,
}

impl PageCredentials {
    /// Build credentials from the session cookie and the token pair.
    pub fn new(session_cookie: &str, access_token: &str, refresh_token: &str) -> Result<Self> {
        let blob = encode_credentials(access_token, refresh_token);
        let access_token = extract_access_token(&blob)?;

        Ok(Self {
            session_cookie: session_cookie.to_string(),
            access_token,
        })
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE_NAME, self.session_cookie)
    }
}
