/// Errors that can occur while decoding or parsing wire messages.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The message does not have exactly three `::`-delimited segments.
    #[error("expected 3 segments, found {found}")]
    SegmentCount { found: usize },

    /// The namespace segment is not the fixed `SiteCanvas` literal.
    #[error("unknown namespace '{found}'")]
    Namespace { found: String },

    /// The method name is not part of the receiving side's dispatch table.
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// The argument list does not match the method's arity.
    #[error("method '{method}' takes {expected} argument(s), got {found}")]
    BadArity {
        method: &'static str,
        expected: usize,
        found: usize,
    },

    /// An argument could not be coerced to the expected type.
    #[error("method '{method}' argument '{value}' is not a valid {expected}")]
    BadArgument {
        method: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A declared origin string could not be resolved.
    #[error("invalid origin '{0}'")]
    InvalidOrigin(String),
}

impl WireError {
    /// True for messages that are not SiteCanvas traffic at all.
    ///
    /// Malformed messages are dropped without a log line; every other
    /// decode failure is worth a warning because the sender was speaking
    /// the protocol and got it wrong.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            WireError::SegmentCount { .. } | WireError::Namespace { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WireError>;
