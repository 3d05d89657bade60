use serde::{Deserialize, Serialize};

/// Resource and traffic snapshot reported with each heartbeat.
///
/// `in` and `out` count bytes since the last accepted sync. A value smaller
/// than the previous report means the node restarted or the counter rolled
/// over; receivers treat it as a fresh baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Total disk usage in bytes.
    #[serde(alias = "Storage")]
    pub storage: i64,
    /// Bytes received since the last sync.
    #[serde(rename = "in", alias = "In")]
    pub bytes_in: i64,
    /// Bytes sent since the last sync.
    #[serde(rename = "out", alias = "Out")]
    pub bytes_out: i64,
    /// Bytes per second.
    #[serde(alias = "Ingress")]
    pub ingress: f64,
    /// Bytes per second.
    #[serde(alias = "Egress")]
    pub egress: f64,
}

impl Stats {
    /// Counters are non-negative and rates are finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        let rate_ok = |rate: f64| rate.is_finite() && rate >= 0.0;
        self.storage >= 0
            && self.bytes_in >= 0
            && self.bytes_out >= 0
            && rate_ok(self.ingress)
            && rate_ok(self.egress)
    }

    /// Bytes moved in both directions since the last sync.
    pub fn traffic_total(&self) -> i64 {
        self.bytes_in.saturating_add(self.bytes_out)
    }
}
