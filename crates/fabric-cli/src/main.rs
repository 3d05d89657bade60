//! Operator CLI for the fabric control plane.
//!
//!   fabric decode --direction request frame.json
//!   fabric certs --db certs.sqlite import site.json
//!   fabric certs due

mod certs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fabric_core::{Direction, Proto};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fabric", about = "Inspect fabric frames and certificate stores", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a frame and print its payload.
    Decode {
        /// Direction of the frame being read.
        #[arg(long, value_enum, default_value_t = Side::Request)]
        direction: Side,
        /// Frame file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Manage stored certificate bundles.
    Certs {
        #[arg(long, env = "FABRIC_DB", default_value = "fabric-certs.sqlite")]
        db: PathBuf,
        #[command(subcommand)]
        action: certs::Action,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Request,
    Response,
}

impl From<Side> for Direction {
    fn from(side: Side) -> Self {
        match side {
            Side::Request => Direction::Request,
            Side::Response => Direction::Response,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fabric=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Decode { direction, file } => decode(direction.into(), file),
        Command::Certs { db, action } => certs::run(&db, action),
    }
}

fn decode(direction: Direction, file: Option<PathBuf>) -> Result<()> {
    let bytes = match &file {
        Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let frame = Proto::decode(&bytes, direction)
        .with_context(|| format!("decoding {direction} frame"))?;
    tracing::info!("{:?} {}", frame.service(), frame.direction());
    println!("{}", serde_json::to_string_pretty(frame.data())?);
    Ok(())
}
