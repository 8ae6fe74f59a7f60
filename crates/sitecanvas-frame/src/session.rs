use sitecanvas_transport::{
    ContentMetrics, MessageEvent, MessagePort, Scheduler, Size, TimerId,
};
use sitecanvas_wire::{decode, FrameCall, HostCall, Origin};

use crate::config::FrameConfig;
use crate::handshake::Handshake;

/// Auto-grow period used when the caller does not pick one.
pub const DEFAULT_AUTO_GROW_INTERVAL_MS: u64 = 100;

/// Caller-supplied dimensions for a resize request. An absent (or zero)
/// axis falls back down the measurement chain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SizeParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One embedded frame's view of the protocol: the handshake state, the
/// dispatch edge for host messages, and the calls the frame issues to
/// its embedder (resize requests, close confirmation, auto-grow).
///
/// Outbound calls are tagged with the host-assigned identifier; until
/// the `init` handshake completes they are no-ops with a warning.
pub struct FrameSession<P, M, S> {
    config: FrameConfig,
    parent: P,
    metrics: M,
    scheduler: S,
    handshake: Handshake,
    auto_grow: Option<TimerId>,
    viewport: Option<Size>,
}

impl<P, M, S> FrameSession<P, M, S>
where
    P: MessagePort,
    M: ContentMetrics,
    S: Scheduler,
{
    /// Create a session with default configuration.
    pub fn new(parent: P, metrics: M, scheduler: S) -> Self {
        Self::with_config(FrameConfig::default(), parent, metrics, scheduler)
    }

    /// Create a session with explicit configuration.
    pub fn with_config(config: FrameConfig, parent: P, metrics: M, scheduler: S) -> Self {
        Self {
            config,
            parent,
            metrics,
            scheduler,
            handshake: Handshake::new(),
            auto_grow: None,
            viewport: None,
        }
    }

    /// Run `hook` exactly once when the `init` handshake completes.
    pub fn with_ready_hook(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.handshake = Handshake::with_ready_hook(hook);
        self
    }

    /// Dispatch an inbound message event from the embedder.
    ///
    /// Non-SiteCanvas traffic is dropped without comment; protocol
    /// violations are dropped with a warning.
    pub fn on_message(&mut self, event: &MessageEvent) {
        let Ok(msg) = decode(&event.data) else {
            return;
        };
        if !self.config.accept_origin.matches(&event.origin) {
            tracing::warn!(
                asserted = %event.origin,
                accepted = %self.config.accept_origin,
                "message origin rejected"
            );
            return;
        }

        match FrameCall::parse(&msg.method, &msg.args) {
            Ok(FrameCall::Init { frame_id }) => {
                if !self.handshake.on_init(frame_id) {
                    tracing::debug!("duplicate init ignored");
                }
            }
            Ok(FrameCall::SetViewportDimensions { width, height }) => {
                self.viewport = Some(Size::new(width, height));
            }
            Err(err) => {
                tracing::warn!(error = %err, "frame call dropped");
            }
        }
    }

    /// Ask the host to resize the embedding element.
    ///
    /// Missing or zero dimensions fall back per axis: explicit params,
    /// then the document's rendered box, then the window's inner size,
    /// then the client box, then zero.
    pub fn set_size(&mut self, params: SizeParams) {
        let size = self.measure(params);
        self.send(&HostCall::SetSize {
            width: size.width,
            height: size.height,
        });
    }

    /// Ask the host to show `message` on unload attempts, or clear the
    /// prompt when `message` is empty.
    pub fn set_close_confirm(&mut self, message: &str) {
        self.send(&HostCall::SetCloseConfirm {
            message: message.to_string(),
        });
    }

    /// Schedule periodic re-measurement and resize requests.
    ///
    /// A zero interval cancels; a new interval replaces the previous
    /// timer. At most one timer is ever active. The embedder's event
    /// loop must route each firing to [`FrameSession::auto_grow_tick`].
    pub fn set_auto_grow(&mut self, interval_ms: u64) {
        if let Some(timer) = self.auto_grow.take() {
            self.scheduler.cancel(timer);
        }
        if interval_ms != 0 {
            self.auto_grow = Some(self.scheduler.schedule_repeating(interval_ms));
        }
    }

    /// [`FrameSession::set_auto_grow`] with the default 100 ms period.
    pub fn set_auto_grow_default(&mut self) {
        self.set_auto_grow(DEFAULT_AUTO_GROW_INTERVAL_MS);
    }

    /// One firing of the auto-grow timer: re-measure and re-send.
    pub fn auto_grow_tick(&mut self) {
        if self.auto_grow.is_none() {
            return;
        }
        self.set_size(SizeParams::default());
    }

    /// True while an auto-grow timer is scheduled.
    pub fn auto_grow_active(&self) -> bool {
        self.auto_grow.is_some()
    }

    /// The host-assigned identifier, once the handshake completed.
    pub fn frame_id(&self) -> Option<&str> {
        self.handshake.frame_id()
    }

    /// True once the `init` handshake completed.
    pub fn is_initialized(&self) -> bool {
        self.handshake.is_initialized()
    }

    /// The last viewport size reported by the host, if any.
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    fn measure(&self, params: SizeParams) -> Size {
        let rendered = self.metrics.rendered_box();
        let inner = self.metrics.inner_size();
        let client = self.metrics.client_box();
        Size::new(
            first_nonzero([
                params.width,
                rendered.map(|s| s.width),
                inner.map(|s| s.width),
                client.map(|s| s.width),
            ]),
            first_nonzero([
                params.height,
                rendered.map(|s| s.height),
                inner.map(|s| s.height),
                client.map(|s| s.height),
            ]),
        )
    }

    fn send(&self, call: &HostCall) {
        let Some(frame_id) = self.handshake.frame_id() else {
            tracing::warn!(method = call.method(), "not yet initialized; call dropped");
            return;
        };
        // The frame does not know its embedder's origin a priori, so the
        // destination is the wildcard.
        self.parent
            .post(&call.encode_with_identifier(frame_id), &Origin::Any);
    }
}

fn first_nonzero(levels: [Option<u32>; 4]) -> u32 {
    levels
        .into_iter()
        .flatten()
        .find(|value| *value != 0)
        .unwrap_or(0)
}
