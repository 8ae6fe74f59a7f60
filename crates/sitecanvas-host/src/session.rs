use sitecanvas_transport::{FrameElement, MessageEvent, Size, UnloadGuard, ViewportProbe};
use sitecanvas_wire::{decode, FrameCall, HostCall, Origin};

use crate::config::HostConfig;
use crate::error::{HostError, Result};
use crate::registry::{FrameRecord, FrameRegistry};

/// One host page's view of the protocol: the frame registry, the
/// dispatch edge for inbound frame messages, and the relays the host
/// performs on a frame's behalf (resize, close confirmation, viewport
/// reports).
///
/// All methods run on the embedder's event loop; the session holds no
/// locks and is mutated only through `&mut self`.
pub struct HostSession<E, V, U> {
    config: HostConfig,
    registry: FrameRegistry<E>,
    viewport: V,
    unload: U,
    confirm_message: Option<String>,
}

impl<E, V, U> HostSession<E, V, U>
where
    E: FrameElement,
    V: ViewportProbe,
    U: UnloadGuard,
{
    /// Create a session for a page with the given collaborators.
    pub fn new(config: HostConfig, viewport: V, unload: U) -> Self {
        Self {
            config,
            registry: FrameRegistry::new(),
            viewport,
            unload,
            confirm_message: None,
        }
    }

    /// Register an embedded frame and return its identifier.
    ///
    /// Uses the element's declared identifier when present, otherwise
    /// assigns the next sequential `site-canvas-N`. The trusted origin is
    /// resolved from the declared source URI, falling back to the page's
    /// own origin, and an `init` handshake is sent immediately.
    ///
    /// Registering an identifier twice replaces the previous record;
    /// native listener cleanup stays with the embedder.
    pub fn register_frame(&mut self, element: E) -> String {
        let id = element
            .declared_id()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.registry.assign_id());
        let origin =
            Origin::from_frame_src(element.declared_src().as_deref(), &self.config.page_origin);
        let size = element.measured_size();

        let record = FrameRecord::new(id.clone(), element, size, origin);
        send_frame_call(
            &record,
            &FrameCall::Init {
                frame_id: id.clone(),
            },
        );
        if self.registry.insert(record).is_some() {
            tracing::warn!(frame_id = %id, "frame re-registered; previous record replaced");
        }
        id
    }

    /// Drop a frame's record, e.g. when its element leaves the page.
    pub fn unregister_frame(&mut self, frame_id: &str) -> Result<()> {
        self.registry
            .remove(frame_id)
            .map(|_| ())
            .ok_or_else(|| HostError::UnknownFrame(frame_id.to_string()))
    }

    /// Signal that a frame finished loading its content.
    ///
    /// The load rebuilt the frame's execution context, so the handshake
    /// is re-announced, followed by the current viewport dimensions.
    pub fn frame_loaded(&self, frame_id: &str) -> Result<()> {
        let record = self
            .registry
            .get(frame_id)
            .ok_or_else(|| HostError::UnknownFrame(frame_id.to_string()))?;

        send_frame_call(
            record,
            &FrameCall::Init {
                frame_id: frame_id.to_string(),
            },
        );
        send_frame_call(record, &viewport_call(self.viewport.viewport()));
        Ok(())
    }

    /// Report the current viewport to every registered frame. Wire this
    /// to the page's load and resize events.
    pub fn broadcast_viewport(&self) {
        let call = viewport_call(self.viewport.viewport());
        for record in self.registry.iter() {
            send_frame_call(record, &call);
        }
    }

    /// Dispatch an inbound message event.
    ///
    /// Non-SiteCanvas traffic is dropped without comment. Protocol
    /// violations — unknown frame, origin mismatch, unknown method, bad
    /// arguments — are dropped with a warning and never panic.
    pub fn on_message(&mut self, event: &MessageEvent) {
        let Ok(msg) = decode(&event.data) else {
            return;
        };

        // The first argument of every frame-to-host call is the sending
        // frame's identifier.
        let mut args = msg.args;
        let frame_id = args.remove(0);

        let Some(record) = self.registry.get(&frame_id) else {
            tracing::warn!(%frame_id, "message from unregistered frame dropped");
            return;
        };
        if !record.origin().matches(&event.origin) {
            tracing::warn!(
                %frame_id,
                asserted = %event.origin,
                trusted = %record.origin(),
                "message origin did not match frame origin"
            );
            return;
        }

        match HostCall::parse(&msg.method, &args) {
            Ok(HostCall::SetSize { width, height }) => {
                let policy = self.config.size_policy;
                if let Some(record) = self.registry.get_mut(&frame_id) {
                    record.apply_size(policy, Size::new(width, height));
                }
            }
            Ok(HostCall::SetCloseConfirm { message }) => self.apply_close_confirm(&message),
            Err(err) => {
                tracing::warn!(%frame_id, error = %err, "host call dropped");
            }
        }
    }

    /// The currently armed close-confirmation prompt, if any.
    pub fn close_confirm_message(&self) -> Option<&str> {
        self.confirm_message.as_deref()
    }

    /// Look up a registered frame's record.
    pub fn frame(&self, frame_id: &str) -> Option<&FrameRecord<E>> {
        self.registry.get(frame_id)
    }

    /// The frame registry.
    pub fn registry(&self) -> &FrameRegistry<E> {
        &self.registry
    }

    fn apply_close_confirm(&mut self, message: &str) {
        if message.is_empty() {
            if self.confirm_message.take().is_some() {
                self.unload.clear();
            }
        } else {
            self.unload.install(message);
            self.confirm_message = Some(message.to_string());
        }
    }
}

fn send_frame_call<E: FrameElement>(record: &FrameRecord<E>, call: &FrameCall) {
    record.element().post(&call.encode(), record.origin());
}

fn viewport_call(size: Size) -> FrameCall {
    FrameCall::SetViewportDimensions {
        width: size.width,
        height: size.height,
    }
}
