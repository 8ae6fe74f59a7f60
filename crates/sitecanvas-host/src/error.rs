/// Errors surfaced by host-session entry points.
///
/// Only embedder-facing operations return errors. Wire-level failures
/// (malformed messages, origin mismatches, unknown methods) are dropped
/// at the dispatch edge per protocol contract and never raised.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The identifier does not resolve to a registered frame.
    #[error("unknown frame '{0}'")]
    UnknownFrame(String),
}

pub type Result<T> = std::result::Result<T, HostError>;
