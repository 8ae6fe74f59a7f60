//! String wire format for the SiteCanvas embed protocol.
//!
//! Every message on the wire is a single string of the form:
//! - A fixed `SiteCanvas` namespace segment for peer recognition
//! - A method name segment
//! - A comma-separated argument list segment
//!
//! Segments are joined with the literal `::`. Arguments travel as plain
//! strings with no escaping; a comma inside an argument value is split
//! apart on decode. This is a protocol constraint, not a bug to fix —
//! receivers that must carry free text (close confirmations) rejoin the
//! tail arguments instead.

pub mod call;
pub mod codec;
pub mod error;
pub mod origin;

pub use call::{
    FrameCall, HostCall, METHOD_INIT, METHOD_SET_CLOSE_CONFIRM, METHOD_SET_SIZE,
    METHOD_SET_VIEWPORT_DIMENSIONS,
};
pub use codec::{decode, encode, RawMessage, ARG_SEPARATOR, DELIMITER, NAMESPACE};
pub use error::{Result, WireError};
pub use origin::{Origin, WILDCARD};
