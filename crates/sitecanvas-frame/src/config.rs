use sitecanvas_wire::Origin;

/// Frame-session configuration.
#[derive(Clone, Debug)]
pub struct FrameConfig {
    /// Origin accepted for inbound messages.
    ///
    /// Defaults to the wildcard — the frame's only expected peer is its
    /// embedder, whose origin it does not know a priori. Deployments
    /// that do know it should pin an exact origin here; the check is
    /// deliberately weaker than the host side's registry gate otherwise.
    pub accept_origin: Origin,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            accept_origin: Origin::Any,
        }
    }
}
