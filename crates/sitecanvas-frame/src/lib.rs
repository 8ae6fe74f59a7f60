//! Embedded-frame side of the SiteCanvas protocol.
//!
//! A frame starts Uninitialized and stays mute until the host's `init`
//! call assigns it an identifier. From then on it may ask the host to
//! resize its embedding element, arm a close-confirmation prompt, or do
//! both continuously via the auto-grow timer. The frame has a single
//! implicit peer — its embedder — so inbound messages are accepted from
//! any origin by default; pin [`FrameConfig::accept_origin`] to tighten
//! that.

pub mod config;
pub mod handshake;
pub mod session;

pub use config::FrameConfig;
pub use handshake::Handshake;
pub use session::{FrameSession, SizeParams, DEFAULT_AUTO_GROW_INTERVAL_MS};
