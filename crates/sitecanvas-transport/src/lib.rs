//! Collaborator seams for the SiteCanvas embed protocol.
//!
//! The protocol core treats its environment as a set of external
//! collaborators: an origin-tagged messaging primitive, a frame element
//! with box measurements and a style-mutation surface, content and
//! viewport probes, an unload-confirmation hook, and a repeating-timer
//! scheduler. This crate defines those seams as traits.
//!
//! This is the lowest environment-facing layer. An embedder binds the
//! traits to its native surfaces; the [`loopback`] module binds them to
//! in-memory queues for tests and demos.

pub mod loopback;
pub mod traits;

pub use loopback::{
    FixedMetrics, FixedViewport, LoopbackContext, LoopbackFrameElement, LoopbackPort,
    ManualScheduler, RecordingUnloadGuard,
};
pub use traits::{
    ContentMetrics, FrameElement, MessageEvent, MessagePort, Scheduler, Size, TimerId,
    UnloadGuard, ViewportProbe,
};
