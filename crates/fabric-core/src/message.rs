//! Request and response messages.
//!
//! Each message knows which service and direction it belongs to, so it can
//! be wrapped in a [`Proto`] without naming either.

use crate::nullable::{self, base64_bytes};
use crate::{Certificate, Direction, Ip, Payload, Proto, Result, Service, Stats, TestResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A message with a fixed place in the service table.
pub trait Message: Serialize + DeserializeOwned + Into<Payload> {
    const SERVICE: Service;
    const DIRECTION: Direction;

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_json_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Wrap in an envelope.
    fn into_proto(self) -> Proto {
        Proto::new(self.into())
    }
}

/// A node asking to join the mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinReq {
    /// Advertised rendezvous address.
    pub address: String,
    /// IPv4 address claim.
    pub ipv4: Ip,
    /// IPv6 address claim.
    pub ipv6: Ip,
    /// Signature over the whole request, as raw bytes.
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
    /// Unix time after which the request must be rejected as stale.
    pub expires: i64,
}

impl JoinReq {
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires
    }
}

/// The coordinator's answer to a join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinRes {
    pub success: bool,
    /// Diagnostic text; empty on success.
    pub message: String,
    /// Prior configuration was recognized rather than created fresh.
    pub configured: bool,
    /// Certificates keyed by site subject.
    #[serde(alias = "Certs", deserialize_with = "nullable::or_default")]
    pub certs: BTreeMap<String, Certificate>,
}

impl JoinRes {
    pub fn accepted(configured: bool, certs: impl IntoIterator<Item = Certificate>) -> Self {
        Self {
            success: true,
            message: String::new(),
            configured,
            certs: certs
                .into_iter()
                .map(|cert| (cert.site.subject.clone(), cert))
                .collect(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Periodic health report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartBeatReq {
    #[serde(alias = "Stats")]
    pub stats: Stats,
}

/// Whether a heartbeat was accepted. There is no partial success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartBeatRes {
    pub success: bool,
}

impl HeartBeatRes {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn rejected() -> Self {
        Self { success: false }
    }
}

impl Message for JoinReq {
    const SERVICE: Service = Service::Join;
    const DIRECTION: Direction = Direction::Request;
}

impl Message for JoinRes {
    const SERVICE: Service = Service::Join;
    const DIRECTION: Direction = Direction::Response;
}

impl Message for HeartBeatReq {
    const SERVICE: Service = Service::HeartBeat;
    const DIRECTION: Direction = Direction::Request;
}

impl Message for HeartBeatRes {
    const SERVICE: Service = Service::HeartBeat;
    const DIRECTION: Direction = Direction::Response;
}

impl Message for TestResult {
    const SERVICE: Service = Service::SpeedTest;
    const DIRECTION: Direction = Direction::Response;
}
