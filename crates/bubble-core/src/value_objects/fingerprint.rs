//! Fingerprint - a low-assurance derived client identity
//!
//! Derived by hashing best-effort request metadata (address, user agent,
//! locale, optional client token). It is a soft deterrent against trivial
//! self-voting and duplicate voting, NOT an authentication mechanism: a
//! client that controls its headers controls its fingerprint. Anything
//! needing real identity must replace this behind the same type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved identity for importer-created bubbles
const BOT_SENTINEL: &str = "bot";

/// A derived, spoofable client identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The reserved identity attributed to bot-imported content
    pub fn bot() -> Self {
        Self(BOT_SENTINEL.to_string())
    }

    /// Wrap an already-derived fingerprint string (e.g. read back from the store)
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Derive a fingerprint from request metadata
    ///
    /// Always succeeds: missing fields are passed as empty strings. The hash
    /// is a 32-bit polynomial rolling hash over the joined fields, rendered
    /// in base 36, so equal metadata always maps to the same identity.
    pub fn derive(ip: &str, user_agent: &str, accept_language: &str, client_token: &str) -> Self {
        let data = format!("{ip}-{user_agent}-{accept_language}-{client_token}");
        let mut hash: i32 = 0;
        for unit in data.encode_utf16() {
            hash = hash
                .wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit));
        }
        Self(to_base36(u64::from(hash.unsigned_abs())))
    }

    /// Check whether this is the reserved bot identity
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.0 == BOT_SENTINEL
    }

    /// Get the fingerprint as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a number in base 36 (0-9, a-z)
fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
