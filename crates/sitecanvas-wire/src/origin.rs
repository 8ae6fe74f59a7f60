use std::fmt;

use url::Url;

use crate::error::{Result, WireError};

/// Wildcard origin sentinel, as used for destination targeting by a frame
/// that does not know its embedder's origin a priori.
pub const WILDCARD: &str = "*";

/// A message origin: either a pinned `scheme://host[:port]` tuple or the
/// wildcard sentinel.
///
/// A registry entry's trusted origin is fixed at registration time and
/// compared against the asserted origin of every inbound message event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Matches any asserted origin. As a destination, delivers anywhere.
    Any,
    /// An exact `scheme://host[:port]` serialization. Default ports are
    /// omitted, matching how message events serialize their origin.
    Exact(String),
}

impl Origin {
    /// Parse an origin from a URI string or the `*` sentinel.
    ///
    /// Fails for URIs without a scheme/host authority (relative paths,
    /// opaque schemes such as `data:`); callers decide the fallback.
    pub fn parse(value: &str) -> Result<Self> {
        if value == WILDCARD {
            return Ok(Origin::Any);
        }
        let url = Url::parse(value).map_err(|_| WireError::InvalidOrigin(value.to_string()))?;
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(WireError::InvalidOrigin(value.to_string()));
        }
        Ok(Origin::Exact(origin.ascii_serialization()))
    }

    /// Resolve a frame's trusted origin from its declared source URI.
    ///
    /// A missing, relative, or hostless source falls back to the host
    /// page's own origin — the same-origin-by-default policy.
    pub fn from_frame_src(src: Option<&str>, page_origin: &Origin) -> Origin {
        match src {
            Some(src) if !src.is_empty() => {
                Origin::parse(src).unwrap_or_else(|_| page_origin.clone())
            }
            _ => page_origin.clone(),
        }
    }

    /// Check an asserted sender origin against this one.
    pub fn matches(&self, asserted: &str) -> bool {
        match self {
            Origin::Any => true,
            Origin::Exact(origin) => origin == asserted,
        }
    }

    /// Serialized form, suitable as a destination-origin target.
    pub fn as_str(&self) -> &str {
        match self {
            Origin::Any => WILDCARD,
            Origin::Exact(origin) => origin,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_path_and_default_port() {
        let origin = Origin::parse("https://widgets.example.com/embed/player?id=7").unwrap();
        assert_eq!(origin, Origin::Exact("https://widgets.example.com".to_string()));

        let origin = Origin::parse("https://widgets.example.com:443/embed").unwrap();
        assert_eq!(origin, Origin::Exact("https://widgets.example.com".to_string()));
    }

    #[test]
    fn parse_keeps_non_default_port() {
        let origin = Origin::parse("http://localhost:8080/widget").unwrap();
        assert_eq!(origin, Origin::Exact("http://localhost:8080".to_string()));
    }

    #[test]
    fn parse_wildcard_sentinel() {
        assert_eq!(Origin::parse("*").unwrap(), Origin::Any);
    }

    #[test]
    fn parse_rejects_relative_and_opaque() {
        assert!(matches!(
            Origin::parse("/embed/widget.html"),
            Err(WireError::InvalidOrigin(_))
        ));
        assert!(matches!(
            Origin::parse("data:text/html,hi"),
            Err(WireError::InvalidOrigin(_))
        ));
    }

    #[test]
    fn frame_src_resolution_falls_back_to_page_origin() {
        let page = Origin::Exact("https://www.example.com".to_string());

        assert_eq!(Origin::from_frame_src(None, &page), page);
        assert_eq!(Origin::from_frame_src(Some(""), &page), page);
        assert_eq!(Origin::from_frame_src(Some("/relative/widget"), &page), page);
        assert_eq!(
            Origin::from_frame_src(Some("https://cdn.example.net/w.html"), &page),
            Origin::Exact("https://cdn.example.net".to_string())
        );
    }

    #[test]
    fn matching() {
        let exact = Origin::Exact("https://a.example".to_string());
        assert!(exact.matches("https://a.example"));
        assert!(!exact.matches("https://evil.example"));
        assert!(Origin::Any.matches("https://anything.example"));
    }

    #[test]
    fn display_matches_destination_target_form() {
        assert_eq!(Origin::Any.to_string(), "*");
        assert_eq!(
            Origin::Exact("https://a.example".to_string()).to_string(),
            "https://a.example"
        );
    }
}
