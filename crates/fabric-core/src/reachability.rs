//! Address claims and reachability test results.
//!
//! Address family is decided by the field an [`Ip`] or [`IpTest`] sits in
//! (`ipv4`/`ipv6`, `v4`/`v6`), never by parsing the literal.

use serde::{Deserialize, Serialize};

/// A node's claim on one address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ip {
    /// Textual IP literal.
    #[serde(rename = "ip")]
    pub address: String,
    /// Reachable over the overlay.
    #[serde(alias = "Swarm")]
    pub swarm: bool,
    /// Reachable directly from the public internet.
    #[serde(alias = "Gateway")]
    pub gateway: bool,
    /// Proof that the claimant controls the address. Checked by the receiver.
    #[serde(alias = "Signature")]
    pub signature: String,
}

impl Ip {
    /// Claims both swarm and gateway reachability.
    pub fn is_open(&self) -> bool {
        self.swarm && self.gateway
    }
}

/// Outcome of probing one address family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpTest {
    /// Textual IP literal that was probed.
    pub ip: String,
    /// Reached over the overlay.
    pub swarm: bool,
    /// Reached directly from the public internet.
    pub gateway: bool,
    /// Prober's signature over the result. Existing peers send `Signature`.
    #[serde(alias = "Signature")]
    pub signature: String,
}

impl IpTest {
    /// Reachable both through the swarm and as a gateway.
    ///
    /// Either one alone means the node sits behind NAT or a partial path.
    pub fn is_open(&self) -> bool {
        self.swarm && self.gateway
    }
}

/// Combined result of a speed and reachability test.
///
/// Throughput units are fixed by the producer and must match across peers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResult {
    /// IPv4 probe.
    #[serde(alias = "V4")]
    pub v4: IpTest,
    /// IPv6 probe.
    #[serde(alias = "V6")]
    pub v6: IpTest,
    /// Download throughput.
    #[serde(alias = "Download")]
    pub download: f64,
    /// Upload throughput.
    #[serde(alias = "Upload")]
    pub upload: f64,
}

impl TestResult {
    /// At least one family is fully open.
    pub fn is_open(&self) -> bool {
        self.v4.is_open() || self.v6.is_open()
    }

    /// The fully open families, v4 first.
    pub fn open_families(&self) -> Vec<&IpTest> {
        [&self.v4, &self.v6]
            .into_iter()
            .filter(|test| test.is_open())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(swarm: bool, gateway: bool) -> IpTest {
        IpTest {
            ip: "203.0.113.7".into(),
            swarm,
            gateway,
            signature: "sig".into(),
        }
    }

    #[test]
    fn is_open_truth_table() {
        assert!(probe(true, true).is_open());
        assert!(!probe(true, false).is_open());
        assert!(!probe(false, true).is_open());
        assert!(!probe(false, false).is_open());
    }

    #[test]
    fn ip_claim_is_open() {
        let mut ip = Ip {
            address: "10.0.0.5".into(),
            swarm: true,
            gateway: true,
            signature: String::new(),
        };
        assert!(ip.is_open());
        ip.gateway = false;
        assert!(!ip.is_open());
    }

    #[test]
    fn ip_test_accepts_capitalized_signature() {
        let test: IpTest =
            serde_json::from_str(r#"{"ip":"1.2.3.4","swarm":true,"gateway":true,"Signature":"abc"}"#)
                .unwrap();
        assert_eq!(test.signature, "abc");
        let json = serde_json::to_value(&test).unwrap();
        assert_eq!(json["signature"], "abc");
        assert!(json.get("Signature").is_none());
    }

    #[test]
    fn ip_test_uses_lowercase_signature() {
        let json = serde_json::to_value(probe(true, false)).unwrap();
        assert_eq!(json["signature"], "sig");
        assert_eq!(json["ip"], "203.0.113.7");
        assert!(json.get("Signature").is_none());
    }

    #[test]
    fn ip_encodes_address_as_ip() {
        let ip = Ip {
            address: "2001:db8::1".into(),
            swarm: true,
            gateway: true,
            signature: "s6".into(),
        };
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(
            json,
            r#"{"ip":"2001:db8::1","swarm":true,"gateway":true,"signature":"s6"}"#
        );
        assert_eq!(serde_json::from_str::<Ip>(&json).unwrap(), ip);
    }

    #[test]
    fn ip_accepts_capitalized_keys() {
        let ip: Ip =
            serde_json::from_str(r#"{"ip":"10.0.0.5","Swarm":true,"Gateway":false,"Signature":"x"}"#)
                .unwrap();
        assert!(ip.swarm);
        assert!(!ip.gateway);
        assert_eq!(ip.signature, "x");
    }

    #[test]
    fn test_result_roundtrip() {
        let result = TestResult {
            v4: probe(true, true),
            v6: probe(true, false),
            download: 94.25,
            upload: 11.5,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(serde_json::from_str::<TestResult>(&json).unwrap(), result);
        assert!(result.is_open());
        assert_eq!(result.open_families(), vec![&result.v4]);
    }

    #[test]
    fn closed_result() {
        let result = TestResult::default();
        assert!(!result.is_open());
        assert!(result.open_families().is_empty());
    }

    #[test]
    fn unknown_fields_ignored() {
        let test: IpTest =
            serde_json::from_str(r#"{"ip":"1.2.3.4","swarm":true,"gateway":true,"latency":12}"#)
                .unwrap();
        assert!(test.is_open());
        assert!(test.signature.is_empty());
    }
}
