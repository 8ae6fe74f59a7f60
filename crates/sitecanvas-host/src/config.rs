use sitecanvas_wire::Origin;

/// Per-deployment policy for honoring frame resize requests, one flag
/// per axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SizePolicy {
    /// Honor requested width changes.
    pub allow_width: bool,
    /// Honor requested height changes.
    pub allow_height: bool,
}

impl Default for SizePolicy {
    /// Height grows with content, width stays under layout control.
    fn default() -> Self {
        Self {
            allow_width: false,
            allow_height: true,
        }
    }
}

/// Host-session configuration.
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// The host page's own origin. Frames whose declared source has no
    /// explicit host are trusted at this origin.
    pub page_origin: Origin,
    /// Axis policy applied to every `setSize` request.
    pub size_policy: SizePolicy,
}

impl HostConfig {
    /// Config for a page served from `page_origin`, with the default
    /// size policy.
    pub fn new(page_origin: Origin) -> Self {
        Self {
            page_origin,
            size_policy: SizePolicy::default(),
        }
    }

    /// Override the size policy.
    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = policy;
        self
    }
}
