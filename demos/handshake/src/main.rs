//! In-memory join and heartbeat exchange.
//!
//! A node and a coordinator trade encoded frames through plain byte
//! buffers, so every frame goes through the same codec a transport would.
//!
//!   cargo run -p fabric-demo-handshake -- --address 10.0.0.5 --subject node.example

mod coordinator;

use coordinator::Coordinator;
use fabric_core::{Direction, HeartBeatReq, Ip, JoinReq, Message, Payload, Proto, Stats};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fabric=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let address = parse_arg_string(&args, "--address").unwrap_or_else(|| "10.0.0.5".into());
    let subject = parse_arg_string(&args, "--subject").unwrap_or_else(|| "node.example".into());
    let ttl = parse_arg(&args, "--ttl").unwrap_or(300);

    let now = i64::try_from(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())?;
    let coordinator = Coordinator::new(&subject, now)?;

    let join = JoinReq {
        address: address.clone(),
        ipv4: Ip {
            address: address.clone(),
            swarm: true,
            gateway: false,
            signature: format!("v4:{address}"),
        },
        ipv6: Ip::default(),
        signature: address.as_bytes().to_vec(),
        expires: now + ttl,
    };
    let reply = coordinator.handle(&join.into_proto().encode()?, now)?;
    match Proto::decode(&reply, Direction::Response)?.into_data() {
        Payload::JoinResponse(res) if res.success => {
            tracing::info!(
                "Joined (configured: {}), {} certificate(s)",
                res.configured,
                res.certs.len()
            );
            for cert in res.certs.values() {
                tracing::info!("  {} renews at {}", cert.subject(), cert.site.renew_at);
            }
        }
        Payload::JoinResponse(res) => anyhow::bail!("join rejected: {}", res.message),
        other => anyhow::bail!("unexpected reply: {:?}", other.service()),
    }

    let heartbeat = HeartBeatReq {
        stats: Stats {
            storage: 512 * 1024 * 1024,
            bytes_in: 48_000,
            bytes_out: 12_000,
            ingress: 1600.0,
            egress: 400.0,
        },
    };
    let reply = coordinator.handle(&heartbeat.into_proto().encode()?, now)?;
    match Proto::decode(&reply, Direction::Response)?.into_data() {
        Payload::HeartBeatResponse(res) => tracing::info!("Heartbeat accepted: {}", res.success),
        other => anyhow::bail!("unexpected reply: {:?}", other.service()),
    }

    Ok(())
}

fn parse_arg(args: &[String], flag: &str) -> Option<i64> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn parse_arg_string(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
