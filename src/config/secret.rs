//! Credential handling
//!
//! Data-source passwords are held in a [`Password`] so they are zeroed on drop
//! and redacted from `Debug` output. Connection URLs that embed credentials
//! are passed through [`redact_url`] before they are logged or reported.

use secrecy::{CloneableSecret, DebugSecret, Secret};
use url::Url;
use zeroize::Zeroize;

/// Plain-text password, only reachable through `expose_secret()`
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct PasswordText(String);

impl CloneableSecret for PasswordText {}
impl DebugSecret for PasswordText {}

impl AsRef<str> for PasswordText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PasswordText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

pub type Password = Secret<PasswordText>;

#[inline]
pub fn password(value: impl Into<String>) -> Password {
    Secret::new(PasswordText(value.into()))
}

const JDBC_PREFIX: &str = "jdbc:";
const MASK: &str = "****";

/// Masks the password of a connection URL
///
/// Accepts URLs with or without a `jdbc:` prefix. Values that do not parse as
/// URLs are returned unchanged.
pub fn redact_url(raw: &str) -> String {
    let (prefix, rest) = match raw.strip_prefix(JDBC_PREFIX) {
        Some(rest) => (JDBC_PREFIX, rest),
        None => ("", raw),
    };
    let Ok(mut url) = Url::parse(rest) else {
        return raw.to_string();
    };
    if url.password().is_none() || url.set_password(Some(MASK)).is_err() {
        return raw.to_string();
    }
    format!("{prefix}{url}")
}
