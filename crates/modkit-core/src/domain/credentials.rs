//! Registry credentials in `user:password` format.

use thiserror::Error;

/// Malformed credentials string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("credentials must be in the format <user:password>")]
pub struct CredentialsError;

/// Credentials for the component registry.
///
/// The raw flag value must contain exactly one `:` separator; anything else
/// (no colon, more than one colon) is rejected before any registry call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No credentials supplied; the registry is accessed anonymously.
    Anonymous,
    /// HTTP basic auth.
    Basic { username: String, password: String },
}

impl Credentials {
    /// Parse a raw `user:password` string.
    pub fn parse(raw: &str) -> Result<Self, CredentialsError> {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() != 2 {
            return Err(CredentialsError);
        }
        Ok(Self::Basic {
            username: parts[0].to_owned(),
            password: parts[1].to_owned(),
        })
    }

    /// Parse an optional raw string; `None` means anonymous access.
    pub fn from_option(raw: Option<&str>) -> Result<Self, CredentialsError> {
        raw.map_or(Ok(Self::Anonymous), Self::parse)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}
