use std::fmt;

/// Frame-side handshake state: Uninitialized until the host's `init`
/// call assigns an identifier, Initialized forever after.
///
/// There is no way back — a frame reload recreates the whole execution
/// context instead. An optional ready hook runs exactly once on entering
/// Initialized, even if the host re-sends `init` (it does, on every
/// native load completion).
pub struct Handshake {
    frame_id: Option<String>,
    ready_hook: Option<Box<dyn FnOnce()>>,
}

impl Handshake {
    /// Uninitialized, with no ready hook.
    pub fn new() -> Self {
        Self {
            frame_id: None,
            ready_hook: None,
        }
    }

    /// Uninitialized, running `hook` once upon initialization.
    pub fn with_ready_hook(hook: impl FnOnce() + 'static) -> Self {
        Self {
            frame_id: None,
            ready_hook: Some(Box::new(hook)),
        }
    }

    /// Handle an `init` call. Returns true if this call performed the
    /// transition; duplicate calls are ignored and keep the original
    /// identifier.
    pub(crate) fn on_init(&mut self, frame_id: String) -> bool {
        if self.frame_id.is_some() {
            return false;
        }
        self.frame_id = Some(frame_id);
        if let Some(hook) = self.ready_hook.take() {
            hook();
        }
        true
    }

    /// The host-assigned identifier, once initialized.
    pub fn frame_id(&self) -> Option<&str> {
        self.frame_id.as_deref()
    }

    /// True once the `init` handshake completed.
    pub fn is_initialized(&self) -> bool {
        self.frame_id.is_some()
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Handshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handshake")
            .field("frame_id", &self.frame_id)
            .field("ready_hook", &self.ready_hook.as_ref().map(|_| "<pending>"))
            .finish()
    }
}
