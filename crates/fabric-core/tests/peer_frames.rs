//! Frames as emitted by already-deployed peers.

use fabric_core::{Certificate, Direction, Payload, Proto, Service, StoredValue, TestResult};

#[test]
fn join_request_with_capitalized_ip_fields() {
    let frame = br#"{
        "service": 0,
        "data": {
            "address": "10.0.0.5",
            "ipv4": {"ip": "10.0.0.5", "Swarm": true, "Gateway": false, "Signature": "sig1"},
            "ipv6": {"ip": "", "Swarm": false, "Gateway": false, "Signature": ""},
            "signature": "AQID",
            "expires": 1999999999
        }
    }"#;

    let proto = Proto::decode(frame, Direction::Request).unwrap();
    assert_eq!(proto.service(), Service::Join);
    let Payload::JoinRequest(req) = proto.into_data() else {
        panic!("expected a join request");
    };
    assert_eq!(req.address, "10.0.0.5");
    assert!(req.ipv4.swarm);
    assert!(!req.ipv4.gateway);
    assert_eq!(req.ipv4.signature, "sig1");
    assert_eq!(req.signature, [1, 2, 3]);
    assert!(!req.is_expired(1_999_999_999));
}

#[test]
fn join_response_with_null_slices() {
    let frame = br#"{
        "service": 0,
        "data": {
            "success": true,
            "message": "",
            "configured": true,
            "Certs": {
                "node.example": {
                    "site": {"subject": "node.example", "altnames": null, "renewAt": 1800000000},
                    "pems": {
                        "cert": "C", "chain": "CH", "privkey": "K",
                        "subject": "node.example", "altnames": null,
                        "issuedAt": 1790000000, "expiresAt": 1800100000
                    }
                }
            }
        }
    }"#;

    let Payload::JoinResponse(res) = Proto::decode(frame, Direction::Response)
        .unwrap()
        .into_data()
    else {
        panic!("expected a join response");
    };
    assert!(res.success && res.configured);
    let cert = &res.certs["node.example"];
    assert!(cert.site.altnames.is_empty());
    assert!(cert.covers_site());
    assert!(cert.has_valid_lifetime());
}

#[test]
fn heartbeat_with_capitalized_stats() {
    let frame = br#"{"service":1,"data":{"Stats":{"Storage":10,"In":1,"Out":2,"Ingress":0.5,"Egress":0.25}}}"#;
    let Payload::HeartBeatRequest(req) = Proto::decode(frame, Direction::Request)
        .unwrap()
        .into_data()
    else {
        panic!("expected a heartbeat request");
    };
    assert_eq!(req.stats.storage, 10);
    assert_eq!(req.stats.traffic_total(), 3);
    assert!(req.stats.is_well_formed());
}

#[test]
fn speed_test_result_with_capitalized_families() {
    let frame = br#"{"service":2,"data":{
        "V4":{"ip":"198.51.100.2","swarm":true,"gateway":true,"Signature":"a"},
        "V6":{"ip":"2001:db8::2","swarm":true,"gateway":false,"Signature":"b"},
        "Download":87.5,"Upload":9.75}}"#;
    let Payload::SpeedTestResult(result) = Proto::decode(frame, Direction::Response)
        .unwrap()
        .into_data()
    else {
        panic!("expected a speed test result");
    };
    assert!(result.v4.is_open());
    assert!(!result.v6.is_open());
    assert_eq!(result.v4.signature, "a");
    assert_eq!(result.v6.signature, "b");
    assert_eq!(result.open_families().len(), 1);
    assert_eq!(
        serde_json::to_value(&result).unwrap()["download"],
        serde_json::json!(87.5)
    );
    let reencoded: TestResult = serde_json::from_value(serde_json::to_value(&result).unwrap()).unwrap();
    assert_eq!(reencoded, result);
}

#[test]
fn stored_certificate_blob() {
    let blob = br#"{"site":{"subject":"a.example","altnames":["b.example"],"renewAt":5},"pems":{"cert":"","chain":"","privkey":"","subject":"b.example","altnames":["b.example"],"issuedAt":1,"expiresAt":9}}"#;
    let cert = Certificate::from_storage_blob(StoredValue::Blob(blob)).unwrap();
    assert_eq!(cert.subject(), "a.example");
    assert!(cert.covers_site());
    assert!(cert.needs_renewal(5));

    let again = Certificate::from_storage_blob(StoredValue::Blob(&cert.to_storage_blob().unwrap()))
        .unwrap();
    assert_eq!(again, cert);

    assert!(
        Certificate::from_storage_blob(StoredValue::Real(1.0))
            .unwrap_err()
            .is_storage_type()
    );
}
