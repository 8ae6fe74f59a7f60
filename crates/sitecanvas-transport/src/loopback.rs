//! In-memory loopback environment.
//!
//! Binds every collaborator seam to plain in-process state so the whole
//! protocol can run end to end inside a test or demo: message contexts
//! with origin-faithful targeting (a post whose destination origin does
//! not match the receiving context is dropped, like the native messaging
//! primitive), a frame element that records style writes, fixed
//! measurement probes, a recording unload guard, and a manually driven
//! scheduler.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use sitecanvas_wire::Origin;

use crate::traits::{
    ContentMetrics, FrameElement, MessageEvent, MessagePort, Scheduler, Size, TimerId,
    UnloadGuard, ViewportProbe,
};

struct Inbox {
    origin: String,
    queue: Mutex<VecDeque<MessageEvent>>,
}

/// The receiving end of a loopback messaging context — one per simulated
/// browsing context (the host page, or one embedded frame).
pub struct LoopbackContext {
    inbox: Arc<Inbox>,
}

impl LoopbackContext {
    /// Create a context whose own origin is `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            inbox: Arc::new(Inbox {
                origin: origin.into(),
                queue: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// This context's own serialized origin.
    pub fn origin(&self) -> &str {
        &self.inbox.origin
    }

    /// Take all pending events, in send order.
    pub fn drain(&self) -> Vec<MessageEvent> {
        self.inbox.queue.lock().drain(..).collect()
    }

    /// Create a sending end that posts into this context, asserting
    /// `sender_origin` on every delivered event.
    ///
    /// The asserted origin is whatever the caller claims, which is
    /// exactly what makes spoofed-origin tests possible.
    pub fn port_from(&self, sender_origin: impl Into<String>) -> LoopbackPort {
        LoopbackPort {
            sender_origin: sender_origin.into(),
            target: Arc::downgrade(&self.inbox),
        }
    }
}

/// The sending end of a loopback messaging channel.
#[derive(Clone)]
pub struct LoopbackPort {
    sender_origin: String,
    target: Weak<Inbox>,
}

impl MessagePort for LoopbackPort {
    fn post(&self, payload: &str, target: &Origin) {
        let Some(inbox) = self.target.upgrade() else {
            // Receiving context torn down; fire-and-forget means silence.
            tracing::debug!("loopback post into dropped context");
            return;
        };
        if !target.matches(&inbox.origin) {
            tracing::debug!(
                target_origin = %target,
                context_origin = %inbox.origin,
                "loopback post dropped: destination origin mismatch"
            );
            return;
        }
        inbox.queue.lock().push_back(MessageEvent {
            data: payload.to_string(),
            origin: self.sender_origin.clone(),
        });
    }
}

struct ElementState {
    measured: Size,
    width_writes: Vec<u32>,
    height_writes: Vec<u32>,
}

/// A loopback frame element: declared attributes, a mutable layout box,
/// a log of style writes, and a message sink into the frame's context.
#[derive(Clone)]
pub struct LoopbackFrameElement {
    declared_id: Option<String>,
    declared_src: Option<String>,
    state: Arc<Mutex<ElementState>>,
    port: LoopbackPort,
}

impl LoopbackFrameElement {
    /// Create an element embedding `frame_context`, posting into it with
    /// the host's origin asserted as sender.
    pub fn new(
        frame_context: &LoopbackContext,
        host_origin: &str,
        declared_id: Option<&str>,
        declared_src: Option<&str>,
        initial: Size,
    ) -> Self {
        Self {
            declared_id: declared_id.map(str::to_string),
            declared_src: declared_src.map(str::to_string),
            state: Arc::new(Mutex::new(ElementState {
                measured: initial,
                width_writes: Vec::new(),
                height_writes: Vec::new(),
            })),
            port: frame_context.port_from(host_origin),
        }
    }

    /// Every style-width write applied so far, oldest first.
    pub fn width_writes(&self) -> Vec<u32> {
        self.state.lock().width_writes.clone()
    }

    /// Every style-height write applied so far, oldest first.
    pub fn height_writes(&self) -> Vec<u32> {
        self.state.lock().height_writes.clone()
    }
}

impl FrameElement for LoopbackFrameElement {
    fn declared_id(&self) -> Option<String> {
        self.declared_id.clone()
    }

    fn declared_src(&self) -> Option<String> {
        self.declared_src.clone()
    }

    fn measured_size(&self) -> Size {
        self.state.lock().measured
    }

    fn set_style_width(&self, width: u32) {
        let mut state = self.state.lock();
        state.width_writes.push(width);
        // Layout follows style immediately in this environment.
        state.measured.width = width;
    }

    fn set_style_height(&self, height: u32) {
        let mut state = self.state.lock();
        state.height_writes.push(height);
        state.measured.height = height;
    }

    fn post(&self, payload: &str, target: &Origin) {
        self.port.post(payload, target);
    }
}

#[derive(Default)]
struct MetricsState {
    rendered: Option<Size>,
    inner: Option<Size>,
    client: Option<Size>,
}

/// Content metrics with settable levels.
#[derive(Clone, Default)]
pub struct FixedMetrics {
    state: Arc<Mutex<MetricsState>>,
}

impl FixedMetrics {
    /// All levels absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendered (offset) box level.
    pub fn set_rendered_box(&self, size: Option<Size>) {
        self.state.lock().rendered = size;
    }

    /// Set the window inner-size level.
    pub fn set_inner_size(&self, size: Option<Size>) {
        self.state.lock().inner = size;
    }

    /// Set the client-box level.
    pub fn set_client_box(&self, size: Option<Size>) {
        self.state.lock().client = size;
    }
}

impl ContentMetrics for FixedMetrics {
    fn rendered_box(&self) -> Option<Size> {
        self.state.lock().rendered
    }

    fn inner_size(&self) -> Option<Size> {
        self.state.lock().inner
    }

    fn client_box(&self) -> Option<Size> {
        self.state.lock().client
    }
}

/// A viewport probe returning a settable fixed size.
#[derive(Clone)]
pub struct FixedViewport {
    size: Arc<Mutex<Size>>,
}

impl FixedViewport {
    /// Create a probe reporting `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size: Arc::new(Mutex::new(size)),
        }
    }

    /// Change the reported viewport.
    pub fn set(&self, size: Size) {
        *self.size.lock() = size;
    }
}

impl ViewportProbe for FixedViewport {
    fn viewport(&self) -> Size {
        *self.size.lock()
    }
}

/// An unload guard that records its armed prompt instead of hooking
/// anything.
#[derive(Clone, Default)]
pub struct RecordingUnloadGuard {
    message: Arc<Mutex<Option<String>>>,
}

impl RecordingUnloadGuard {
    /// Fresh, disarmed guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently armed prompt, if any.
    pub fn armed(&self) -> Option<String> {
        self.message.lock().clone()
    }
}

impl UnloadGuard for RecordingUnloadGuard {
    fn install(&self, message: &str) {
        *self.message.lock() = Some(message.to_string());
    }

    fn clear(&self) {
        *self.message.lock() = None;
    }
}

/// A scheduler that only tracks registrations; the test drives ticks
/// itself.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    next_id: Arc<AtomicU64>,
    active: Arc<Mutex<HashMap<TimerId, u64>>>,
}

impl ManualScheduler {
    /// Fresh scheduler with no active timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently active timers.
    pub fn active_count(&self) -> usize {
        self.active.lock().len()
    }

    /// Intervals of all active timers, unordered.
    pub fn active_intervals(&self) -> Vec<u64> {
        self.active.lock().values().copied().collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, interval_ms: u64) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.active.lock().insert(id, interval_ms);
        id
    }

    fn cancel(&self, timer: TimerId) {
        self.active.lock().remove(&timer);
    }
}
