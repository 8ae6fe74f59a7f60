use crate::error::{Result, WireError};

/// Fixed namespace literal. Segment 0 of every message.
pub const NAMESPACE: &str = "SiteCanvas";

/// Segment delimiter between namespace, method, and argument list.
pub const DELIMITER: &str = "::";

/// Argument separator within the third segment.
pub const ARG_SEPARATOR: char = ',';

/// A decoded message before typed parsing: method name plus raw string
/// arguments. Ephemeral — built per send, parsed per receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// The method name segment.
    pub method: String,
    /// The comma-split argument list. Never empty: an empty argument
    /// segment decodes to a single empty string.
    pub args: Vec<String>,
}

/// Encode a method call into the wire format.
///
/// Wire format:
/// ```text
/// SiteCanvas::method::arg1,arg2,arg3
/// ```
///
/// Arguments are joined with `,` and no escaping. An argument containing
/// a comma will be split apart by [`decode`] on the receiving side.
pub fn encode<I, S>(method: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::with_capacity(NAMESPACE.len() + DELIMITER.len() * 2 + method.len());
    out.push_str(NAMESPACE);
    out.push_str(DELIMITER);
    out.push_str(method);
    out.push_str(DELIMITER);
    let mut first = true;
    for arg in args {
        if !first {
            out.push(ARG_SEPARATOR);
        }
        out.push_str(arg.as_ref());
        first = false;
    }
    out
}

/// Decode a raw payload string into a [`RawMessage`].
///
/// The payload must split on `::` into exactly three segments, and the
/// first segment must be the `SiteCanvas` namespace literal. Anything
/// else fails with a malformed-message error that dispatchers drop
/// without comment — non-SiteCanvas traffic is expected on a shared
/// message channel.
pub fn decode(raw: &str) -> Result<RawMessage> {
    let segments: Vec<&str> = raw.split(DELIMITER).collect();
    if segments.len() != 3 {
        return Err(WireError::SegmentCount {
            found: segments.len(),
        });
    }
    if segments[0] != NAMESPACE {
        return Err(WireError::Namespace {
            found: segments[0].to_string(),
        });
    }
    Ok(RawMessage {
        method: segments[1].to_string(),
        args: segments[2]
            .split(ARG_SEPARATOR)
            .map(str::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let wire = encode("setSize", ["frame-1", "500", "300"]);
        assert_eq!(wire, "SiteCanvas::setSize::frame-1,500,300");

        let msg = decode(&wire).unwrap();
        assert_eq!(msg.method, "setSize");
        assert_eq!(msg.args, vec!["frame-1", "500", "300"]);
    }

    #[test]
    fn empty_argument_list_decodes_to_one_empty_arg() {
        let wire = encode("init", Vec::<&str>::new());
        assert_eq!(wire, "SiteCanvas::init::");

        let msg = decode(&wire).unwrap();
        assert_eq!(msg.args, vec![""]);
    }

    #[test]
    fn wrong_segment_count_rejected() {
        for raw in ["", "SiteCanvas", "SiteCanvas::init", "SiteCanvas::a::b::c"] {
            let err = decode(raw).unwrap_err();
            assert!(matches!(err, WireError::SegmentCount { .. }), "{raw}");
            assert!(err.is_malformed());
        }
    }

    #[test]
    fn wrong_namespace_rejected() {
        let err = decode("OtherProto::init::frame-1").unwrap_err();
        assert!(matches!(err, WireError::Namespace { .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn comma_in_argument_is_split_apart() {
        // The documented protocol limitation: no escaping.
        let wire = encode("setCloseConfirm", ["frame-1", "Are you sure, really?"]);
        let msg = decode(&wire).unwrap();
        assert_eq!(msg.args, vec!["frame-1", "Are you sure", " really?"]);
    }

    #[test]
    fn delimiter_inside_argument_breaks_segmentation() {
        let wire = encode("setCloseConfirm", ["frame-1", "a::b"]);
        let err = decode(&wire).unwrap_err();
        assert!(matches!(err, WireError::SegmentCount { found: 4 }));
    }

    proptest! {
        // Round-trip law: holds for any method and any args free of the
        // separator characters.
        #[test]
        fn roundtrip_without_commas(
            method in "[a-zA-Z][a-zA-Z0-9]{0,20}",
            args in prop::collection::vec("[^,:]{0,12}", 1..5),
        ) {
            let wire = encode(&method, &args);
            let msg = decode(&wire).unwrap();
            prop_assert_eq!(msg.method, method);
            prop_assert_eq!(msg.args, args);
        }

        // And it is explicitly broken when an argument carries a comma.
        #[test]
        fn comma_bearing_args_never_roundtrip(
            prefix in "[^,:]{1,8}",
            suffix in "[^,:]{1,8}",
        ) {
            let arg = format!("{prefix},{suffix}");
            let wire = encode("m", ["id", arg.as_str()]);
            let msg = decode(&wire).unwrap();
            prop_assert_eq!(msg.args.len(), 3);
        }
    }
}
