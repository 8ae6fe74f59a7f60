//! Typed call variants for both protocol directions.
//!
//! Every supported operation is a variant of one of two enums, decoded
//! exhaustively: [`HostCall`] for messages addressed to the host page,
//! [`FrameCall`] for messages addressed to an embedded frame. An
//! unrecognized method name surfaces as [`WireError::UnknownMethod`]
//! instead of a missing dispatch-table entry.

use crate::codec::{encode, ARG_SEPARATOR};
use crate::error::{Result, WireError};

/// Wire method name: frame asks the host to resize its element.
pub const METHOD_SET_SIZE: &str = "setSize";
/// Wire method name: frame asks the host to set/clear a close confirmation.
pub const METHOD_SET_CLOSE_CONFIRM: &str = "setCloseConfirm";
/// Wire method name: host assigns a frame its identifier.
pub const METHOD_INIT: &str = "init";
/// Wire method name: host reports its viewport size to a frame.
pub const METHOD_SET_VIEWPORT_DIMENSIONS: &str = "setViewportDimensions";

/// A call addressed to the host, issued by an embedded frame.
///
/// On the wire the first argument is always the sending frame's
/// identifier; the host dispatcher pops it before typed parsing, and
/// [`HostCall::encode_with_identifier`] prepends it on send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// Resize the embedding element to the frame's measured content box.
    SetSize { width: u32, height: u32 },
    /// Set (non-empty) or clear (empty) the unload confirmation prompt.
    SetCloseConfirm { message: String },
}

impl HostCall {
    /// Parse a decoded method and its arguments (identifier already
    /// popped) into a typed call.
    pub fn parse(method: &str, args: &[String]) -> Result<Self> {
        match method {
            METHOD_SET_SIZE => {
                expect_arity(METHOD_SET_SIZE, args, 2)?;
                Ok(HostCall::SetSize {
                    width: parse_dimension(METHOD_SET_SIZE, &args[0])?,
                    height: parse_dimension(METHOD_SET_SIZE, &args[1])?,
                })
            }
            // The argument list was comma-split on decode; a confirmation
            // message containing commas arrives as several arguments.
            // Rejoin the whole tail to recover the original text.
            METHOD_SET_CLOSE_CONFIRM => Ok(HostCall::SetCloseConfirm {
                message: args.join(&ARG_SEPARATOR.to_string()),
            }),
            other => Err(WireError::UnknownMethod(other.to_string())),
        }
    }

    /// Wire method name for this call.
    pub fn method(&self) -> &'static str {
        match self {
            HostCall::SetSize { .. } => METHOD_SET_SIZE,
            HostCall::SetCloseConfirm { .. } => METHOD_SET_CLOSE_CONFIRM,
        }
    }

    /// Encode for sending, tagged with the issuing frame's identifier.
    pub fn encode_with_identifier(&self, frame_id: &str) -> String {
        match self {
            HostCall::SetSize { width, height } => encode(
                METHOD_SET_SIZE,
                [
                    frame_id.to_string(),
                    width.to_string(),
                    height.to_string(),
                ],
            ),
            HostCall::SetCloseConfirm { message } => {
                encode(METHOD_SET_CLOSE_CONFIRM, [frame_id, message.as_str()])
            }
        }
    }
}

/// A call addressed to an embedded frame, issued by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameCall {
    /// Handshake: assigns the frame its host-side identifier.
    Init { frame_id: String },
    /// Reports the host page's current viewport dimensions.
    SetViewportDimensions { width: u32, height: u32 },
}

impl FrameCall {
    /// Parse a decoded method and its arguments into a typed call.
    pub fn parse(method: &str, args: &[String]) -> Result<Self> {
        match method {
            METHOD_INIT => {
                expect_arity(METHOD_INIT, args, 1)?;
                if args[0].is_empty() {
                    return Err(WireError::BadArgument {
                        method: METHOD_INIT,
                        value: String::new(),
                        expected: "non-empty frame identifier",
                    });
                }
                Ok(FrameCall::Init {
                    frame_id: args[0].clone(),
                })
            }
            METHOD_SET_VIEWPORT_DIMENSIONS => {
                expect_arity(METHOD_SET_VIEWPORT_DIMENSIONS, args, 2)?;
                Ok(FrameCall::SetViewportDimensions {
                    width: parse_dimension(METHOD_SET_VIEWPORT_DIMENSIONS, &args[0])?,
                    height: parse_dimension(METHOD_SET_VIEWPORT_DIMENSIONS, &args[1])?,
                })
            }
            other => Err(WireError::UnknownMethod(other.to_string())),
        }
    }

    /// Wire method name for this call.
    pub fn method(&self) -> &'static str {
        match self {
            FrameCall::Init { .. } => METHOD_INIT,
            FrameCall::SetViewportDimensions { .. } => METHOD_SET_VIEWPORT_DIMENSIONS,
        }
    }

    /// Encode for sending to a frame.
    pub fn encode(&self) -> String {
        match self {
            FrameCall::Init { frame_id } => encode(METHOD_INIT, [frame_id.as_str()]),
            FrameCall::SetViewportDimensions { width, height } => encode(
                METHOD_SET_VIEWPORT_DIMENSIONS,
                [width.to_string(), height.to_string()],
            ),
        }
    }
}

fn expect_arity(method: &'static str, args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(WireError::BadArity {
            method,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn parse_dimension(method: &'static str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| WireError::BadArgument {
        method,
        value: value.to_string(),
        expected: "integer dimension",
    })
}
