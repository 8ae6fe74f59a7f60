//! Cross-origin host/frame communication over an origin-tagged
//! messaging primitive.
//!
//! SiteCanvas lets an embedded frame ask its host page for size changes
//! and a close-confirmation prompt, and lets the host relay its viewport
//! dimensions, all over a small string-encoded call scheme with
//! origin-validated dispatch.
//!
//! # Crate Structure
//!
//! - [`wire`] — String wire format, typed call variants, origin type
//! - [`transport`] — Collaborator seams and the in-memory loopback
//!   environment
//! - [`host`] — Host-page side: frame registry, dispatch, relays
//! - [`frame`] — Embedded-frame side: handshake, size negotiation,
//!   auto-grow

/// Re-export wire types.
pub mod wire {
    pub use sitecanvas_wire::*;
}

/// Re-export transport seams and the loopback environment.
pub mod transport {
    pub use sitecanvas_transport::*;
}

/// Re-export host-side types.
pub mod host {
    pub use sitecanvas_host::*;
}

/// Re-export frame-side types.
pub mod frame {
    pub use sitecanvas_frame::*;
}
