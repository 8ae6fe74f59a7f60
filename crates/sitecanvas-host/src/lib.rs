//! Host-page side of the SiteCanvas embed protocol.
//!
//! The host owns the frame registry: one record per embedded frame,
//! holding its identifier, element handle, last-known size, and the
//! trusted origin pinned at registration. Inbound messages pass an
//! origin gate against that record before dispatch — the one
//! security-relevant check in the protocol.

pub mod config;
pub mod error;
pub mod registry;
pub mod session;

pub use config::{HostConfig, SizePolicy};
pub use error::{HostError, Result};
pub use registry::{FrameRecord, FrameRegistry, ASSIGNED_ID_PREFIX};
pub use session::HostSession;
