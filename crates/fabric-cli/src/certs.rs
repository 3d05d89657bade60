use anyhow::{Context, Result, bail};
use clap::Subcommand;
use fabric_core::Certificate;
use fabric_store::CertificateStore;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Store certificate bundles from JSON files, replacing older ones.
    Import { files: Vec<PathBuf> },
    /// List stored subjects.
    List,
    /// Print one bundle.
    Show { subject: String },
    /// List bundles whose renewal time has passed.
    Due {
        /// Unix time to compare against; defaults to now.
        #[arg(long)]
        now: Option<i64>,
    },
    /// Delete a bundle.
    Remove { subject: String },
}

pub fn run(db: &Path, action: Action) -> Result<()> {
    let store =
        CertificateStore::open(db).with_context(|| format!("opening {}", db.display()))?;

    match action {
        Action::Import { files } => {
            if files.is_empty() {
                bail!("no certificate files given");
            }
            for path in files {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let cert: Certificate = serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?;
                if !cert.has_valid_lifetime() {
                    tracing::warn!(subject = cert.subject(), "issuedAt is not before expiresAt");
                }
                if !cert.covers_site() {
                    tracing::warn!(
                        subject = cert.subject(),
                        issued = %cert.pems.subject,
                        "issued subject is not one of the requested names"
                    );
                }
                store.put(&cert)?;
                tracing::info!("Imported {}", cert.subject());
            }
        }
        Action::List => {
            for subject in store.subjects()? {
                println!("{subject}");
            }
        }
        Action::Show { subject } => match store.get(&subject)? {
            Some(cert) => println!("{}", serde_json::to_string_pretty(&cert)?),
            None => bail!("no certificate for {subject}"),
        },
        Action::Due { now } => {
            let now = match now {
                Some(now) => now,
                None => unix_now()?,
            };
            for cert in store.due_for_renewal(now)? {
                let state = if cert.is_expired(now) { "expired" } else { "renew" };
                println!("{}\t{}\t{}", cert.subject(), cert.site.renew_at, state);
            }
        }
        Action::Remove { subject } => {
            if !store.remove(&subject)? {
                bail!("no certificate for {subject}");
            }
        }
    }
    Ok(())
}

fn unix_now() -> Result<i64> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before 1970")?
        .as_secs();
    Ok(i64::try_from(secs)?)
}
