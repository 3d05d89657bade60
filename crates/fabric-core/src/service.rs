//! Service selector and exchange direction.
//!
//! Ordinals are part of the wire contract: new services append, existing
//! ones are never renumbered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The RPC a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Service {
    /// Join the mesh (ordinal 0).
    Join,
    /// Periodic health report (ordinal 1).
    HeartBeat,
    /// Reachability and throughput test (ordinal 2).
    SpeedTest,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Join, Service::HeartBeat, Service::SpeedTest];

    /// The stable integer used on the wire.
    pub fn ordinal(self) -> i64 {
        match self {
            Service::Join => 0,
            Service::HeartBeat => 1,
            Service::SpeedTest => 2,
        }
    }
}

impl TryFrom<i64> for Service {
    type Error = UnknownService;

    fn try_from(ordinal: i64) -> Result<Self, Self::Error> {
        Service::ALL
            .into_iter()
            .find(|s| s.ordinal() == ordinal)
            .ok_or(UnknownService(ordinal))
    }
}

impl From<Service> for i64 {
    fn from(service: Service) -> Self {
        service.ordinal()
    }
}

/// Error for an ordinal with no matching service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown service ordinal {0}")]
pub struct UnknownService(pub i64);

/// Which side of an exchange is speaking.
///
/// Frames do not carry this; the receiver knows it from its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Node to coordinator.
    Request,
    /// Coordinator to node.
    Response,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Request => f.write_str("request"),
            Direction::Response => f.write_str("response"),
        }
    }
}
