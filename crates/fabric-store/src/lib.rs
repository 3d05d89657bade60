//! SQLite persistence for certificate bundles.
//!
//! Each certificate is kept as one opaque blob column holding its storage
//! encoding, keyed by site subject. Renewal replaces the row; rows are never
//! patched in place.

use fabric_core::{Certificate, StoredValue};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, ToSql, params};
use std::path::Path;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the certificate store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Codec(#[from] fabric_core::Error),
    #[error("certificate has an empty subject")]
    EmptySubject,
}

/// Certificates keyed by site subject.
pub struct CertificateStore {
    conn: Connection,
}

impl CertificateStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Use an existing connection, creating the table if needed.
    pub fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS certificates (
                subject TEXT PRIMARY KEY,
                renew_at INTEGER NOT NULL,
                bundle BLOB NOT NULL
            );
            CREATE INDEX IF NOT EXISTS certificates_renew_at ON certificates (renew_at);",
        )?;
        Ok(Self { conn })
    }

    /// Store a certificate, replacing any earlier one for the same subject.
    pub fn put(&self, cert: &Certificate) -> Result<()> {
        if cert.subject().is_empty() {
            return Err(StoreError::EmptySubject);
        }
        let bundle = cert.to_storage_blob()?;
        self.conn.execute(
            "INSERT INTO certificates (subject, renew_at, bundle) VALUES (?1, ?2, ?3)
             ON CONFLICT(subject) DO UPDATE SET
                renew_at = excluded.renew_at,
                bundle = excluded.bundle",
            params![cert.subject(), cert.site.renew_at, bundle],
        )?;
        tracing::debug!(
            subject = cert.subject(),
            renew_at = cert.site.renew_at,
            "stored certificate"
        );
        Ok(())
    }

    pub fn get(&self, subject: &str) -> Result<Option<Certificate>> {
        let decoded = self
            .conn
            .query_row(
                "SELECT bundle FROM certificates WHERE subject = ?1",
                params![subject],
                |row| Ok(decode_bundle(row.get_ref(0)?)),
            )
            .optional()?;
        Ok(decoded.transpose()?)
    }

    /// Returns whether a row was deleted.
    pub fn remove(&self, subject: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM certificates WHERE subject = ?1", params![subject])?;
        tracing::debug!(subject, deleted, "removed certificate");
        Ok(deleted > 0)
    }

    /// All stored subjects, sorted.
    pub fn subjects(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT subject FROM certificates ORDER BY subject")?;
        let subjects = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(subjects)
    }

    /// Certificates whose renewal time has been reached, soonest first.
    pub fn due_for_renewal(&self, now: i64) -> Result<Vec<Certificate>> {
        let mut stmt = self.conn.prepare(
            "SELECT subject, bundle FROM certificates WHERE renew_at <= ?1
             ORDER BY renew_at, subject",
        )?;
        let mut rows = stmt.query(params![now])?;
        let mut due = Vec::new();
        while let Some(row) = rows.next()? {
            let subject: String = row.get(0)?;
            let cert = decode_bundle(row.get_ref(1)?).inspect_err(|err| {
                tracing::warn!(%subject, error = %err, "unreadable certificate row");
            })?;
            due.push(cert);
        }
        Ok(due)
    }
}

fn stored_value(value: ValueRef<'_>) -> StoredValue<'_> {
    match value {
        ValueRef::Null => StoredValue::Null,
        ValueRef::Integer(i) => StoredValue::Integer(i),
        ValueRef::Real(f) => StoredValue::Real(f),
        ValueRef::Text(text) => StoredValue::Text(text),
        ValueRef::Blob(blob) => StoredValue::Blob(blob),
    }
}

fn decode_bundle(value: ValueRef<'_>) -> fabric_core::Result<Certificate> {
    Certificate::from_storage_blob(stored_value(value))
}

/// Column adapter for keeping a certificate in any table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBlob(pub Certificate);

impl ToSql for CertificateBlob {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let bundle = self
            .0
            .to_storage_blob()
            .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
        Ok(ToSqlOutput::from(bundle))
    }
}

impl FromSql for CertificateBlob {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match decode_bundle(value) {
            Ok(cert) => Ok(CertificateBlob(cert)),
            Err(err) if err.is_storage_type() => Err(FromSqlError::InvalidType),
            Err(err) => Err(FromSqlError::Other(Box::new(err))),
        }
    }
}

impl From<Certificate> for CertificateBlob {
    fn from(cert: Certificate) -> Self {
        Self(cert)
    }
}
