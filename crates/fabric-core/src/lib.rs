//! Core types for the fabric control plane.
//!
//! This crate provides the messages exchanged between a mesh node and its
//! coordinator, the envelope that frames them on the wire, and the storage
//! encoding for certificate bundles. Transport, dispatch, issuance and
//! signature checks live elsewhere; they produce and consume these types.

mod certificate;
mod envelope;
mod error;
mod message;
mod nullable;
mod reachability;
mod service;
mod stats;

pub use certificate::{Certificate, Pems, Site, StoredValue};
pub use envelope::{Payload, Proto};
pub use error::{Error, Result};
pub use message::{HeartBeatReq, HeartBeatRes, JoinReq, JoinRes, Message};
pub use reachability::{Ip, IpTest, TestResult};
pub use service::{Direction, Service, UnknownService};
pub use stats::Stats;
