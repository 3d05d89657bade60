//! The outer frame carried on the wire.
//!
//! A frame is `{"service": <int>, "data": <payload>}`. The payload does not
//! describe itself: the receiver picks its shape from the service and from
//! which side of the exchange it is on.

use crate::{
    Direction, Error, HeartBeatReq, HeartBeatRes, JoinReq, JoinRes, Result, Service, TestResult,
};
use serde::{Deserialize, Serialize};

/// Every payload shape a frame can carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    JoinRequest(JoinReq),
    JoinResponse(JoinRes),
    HeartBeatRequest(HeartBeatReq),
    HeartBeatResponse(HeartBeatRes),
    SpeedTestResult(TestResult),
}

impl Payload {
    pub fn service(&self) -> Service {
        match self {
            Payload::JoinRequest(_) | Payload::JoinResponse(_) => Service::Join,
            Payload::HeartBeatRequest(_) | Payload::HeartBeatResponse(_) => Service::HeartBeat,
            Payload::SpeedTestResult(_) => Service::SpeedTest,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Payload::JoinRequest(_) | Payload::HeartBeatRequest(_) => Direction::Request,
            Payload::JoinResponse(_)
            | Payload::HeartBeatResponse(_)
            | Payload::SpeedTestResult(_) => Direction::Response,
        }
    }

    /// Decode `data` as the shape selected by `service` and `direction`.
    fn decode(service: Service, direction: Direction, data: serde_json::Value) -> Result<Self> {
        let payload = match (service, direction) {
            (Service::Join, Direction::Request) => {
                Payload::JoinRequest(serde_json::from_value(data)?)
            }
            (Service::Join, Direction::Response) => {
                Payload::JoinResponse(serde_json::from_value(data)?)
            }
            (Service::HeartBeat, Direction::Request) => {
                Payload::HeartBeatRequest(serde_json::from_value(data)?)
            }
            (Service::HeartBeat, Direction::Response) => {
                Payload::HeartBeatResponse(serde_json::from_value(data)?)
            }
            (Service::SpeedTest, Direction::Response) => {
                Payload::SpeedTestResult(serde_json::from_value(data)?)
            }
            (Service::SpeedTest, Direction::Request) => {
                return Err(Error::UndefinedPayload { service, direction });
            }
        };
        Ok(payload)
    }
}

impl From<JoinReq> for Payload {
    fn from(req: JoinReq) -> Self {
        Payload::JoinRequest(req)
    }
}

impl From<JoinRes> for Payload {
    fn from(res: JoinRes) -> Self {
        Payload::JoinResponse(res)
    }
}

impl From<HeartBeatReq> for Payload {
    fn from(req: HeartBeatReq) -> Self {
        Payload::HeartBeatRequest(req)
    }
}

impl From<HeartBeatRes> for Payload {
    fn from(res: HeartBeatRes) -> Self {
        Payload::HeartBeatResponse(res)
    }
}

impl From<TestResult> for Payload {
    fn from(result: TestResult) -> Self {
        Payload::SpeedTestResult(result)
    }
}

/// A framed message. The service is always the one the payload belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Proto {
    data: Payload,
}

#[derive(Serialize)]
struct FrameOut<'a> {
    service: Service,
    data: &'a Payload,
}

#[derive(Deserialize)]
struct FrameIn {
    service: Service,
    /// Missing or `null` reads as an empty payload.
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    data: serde_json::Map<String, serde_json::Value>,
}

impl Proto {
    pub fn new(data: Payload) -> Self {
        Self { data }
    }

    pub fn service(&self) -> Service {
        self.data.service()
    }

    pub fn direction(&self) -> Direction {
        self.data.direction()
    }

    pub fn data(&self) -> &Payload {
        &self.data
    }

    pub fn into_data(self) -> Payload {
        self.data
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec(&FrameOut {
            service: self.service(),
            data: &self.data,
        })?;
        tracing::debug!(
            service = ?self.service(),
            direction = %self.direction(),
            len = bytes.len(),
            "encoded frame"
        );
        Ok(bytes)
    }

    /// Decode a frame received while playing the given side of an exchange.
    ///
    /// `direction` is the direction of the frame itself: a coordinator
    /// decodes requests, a node decodes responses.
    pub fn decode(bytes: &[u8], direction: Direction) -> Result<Self> {
        let frame: FrameIn = serde_json::from_slice(bytes)?;
        let data = serde_json::Value::Object(frame.data);
        let data = Payload::decode(frame.service, direction, data).inspect_err(|err| {
            tracing::debug!(service = ?frame.service, %direction, error = %err, "rejected frame");
        })?;
        tracing::debug!(service = ?frame.service, %direction, len = bytes.len(), "decoded frame");
        Ok(Self { data })
    }
}

impl From<Payload> for Proto {
    fn from(data: Payload) -> Self {
        Self::new(data)
    }
}
