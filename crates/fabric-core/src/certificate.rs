//! TLS certificate bundles and their storage encoding.
//!
//! A [`Certificate`] is persisted as a single opaque blob holding its JSON
//! encoding. [`Certificate::to_storage_blob`] and
//! [`Certificate::from_storage_blob`] are the only way in and out of that
//! representation; the type itself knows nothing about storage.

use crate::nullable;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A certificate bundle for one logical site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    /// What was requested.
    pub site: Site,
    /// What was issued.
    pub pems: Pems,
}

/// The names a certificate was requested for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Site {
    /// Primary domain name.
    pub subject: String,
    /// Additional names, in order.
    #[serde(deserialize_with = "nullable::or_default")]
    pub altnames: Vec<String>,
    /// Unix time after which renewal should be triggered.
    pub renew_at: i64,
}

/// The issued PEM blocks and their actual coverage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pems {
    /// Leaf certificate, PEM.
    pub cert: String,
    /// Intermediate chain, PEM.
    pub chain: String,
    /// Private key, PEM.
    pub privkey: String,
    /// Primary name the issued certificate covers.
    pub subject: String,
    /// Additional names the issued certificate covers.
    #[serde(deserialize_with = "nullable::or_default")]
    pub altnames: Vec<String>,
    /// Unix seconds.
    pub issued_at: i64,
    /// Unix seconds.
    pub expires_at: i64,
}

impl Certificate {
    /// Serialize into the single blob stored for this certificate.
    pub fn to_storage_blob(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Rebuild a certificate from a stored value.
    ///
    /// Only blob and text values are accepted; anything else is
    /// [`Error::UnsupportedStorage`], never a zero value.
    pub fn from_storage_blob(value: StoredValue<'_>) -> Result<Self> {
        match value {
            StoredValue::Blob(bytes) | StoredValue::Text(bytes) => {
                Ok(serde_json::from_slice(bytes)?)
            }
            other => {
                tracing::warn!(found = other.kind(), "rejected stored certificate");
                Err(Error::UnsupportedStorage { found: other.kind() })
            }
        }
    }

    /// The primary name the bundle is keyed by.
    pub fn subject(&self) -> &str {
        &self.site.subject
    }

    /// Every name the issued certificate covers, subject first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.pems.subject.as_str())
            .chain(self.pems.altnames.iter().map(String::as_str))
    }

    pub fn needs_renewal(&self, now: i64) -> bool {
        now >= self.site.renew_at
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.pems.expires_at
    }

    /// `issuedAt` strictly precedes `expiresAt`.
    pub fn has_valid_lifetime(&self) -> bool {
        self.pems.issued_at < self.pems.expires_at
    }

    /// The issued subject is one of the requested names.
    pub fn covers_site(&self) -> bool {
        self.pems.subject == self.site.subject
            || self.site.altnames.iter().any(|name| *name == self.pems.subject)
    }
}

/// A value as read back from a tabular store, by storage class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoredValue<'a> {
    /// SQL `NULL`.
    Null,
    /// A stored integer.
    Integer(i64),
    /// A stored float.
    Real(f64),
    /// Text bytes, accepted as a blob.
    Text(&'a [u8]),
    /// Opaque bytes.
    Blob(&'a [u8]),
}

impl StoredValue<'_> {
    /// Storage class name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoredValue::Null => "null",
            StoredValue::Integer(_) => "integer",
            StoredValue::Real(_) => "real",
            StoredValue::Text(_) => "text",
            StoredValue::Blob(_) => "blob",
        }
    }
}
