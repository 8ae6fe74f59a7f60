use sitecanvas_wire::Origin;

/// A width/height pair in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An inbound cross-context message, tagged by the transport with the
/// sender's asserted origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    /// The opaque string payload.
    pub data: String,
    /// The serialized origin of the sending context, as asserted by the
    /// transport. This is what the host-side origin gate compares against
    /// a registry entry's trusted origin.
    pub origin: String,
}

/// Outbound half of an origin-targeted messaging channel.
///
/// Delivery is fire-and-forget: a payload whose destination origin does
/// not match the receiving context's origin is dropped by the transport,
/// and an undeliverable payload (peer context gone) is dropped too. The
/// protocol never learns about either.
pub trait MessagePort {
    /// Post a payload toward the peer context, restricted to `target`.
    fn post(&self, payload: &str, target: &Origin);
}

/// Host-side handle to an embedded frame element.
///
/// Bundles the box-model measurements, the style-mutation surface, and
/// the message sink into the frame's execution context — the three things
/// the host needs from the element it embeds.
pub trait FrameElement {
    /// The element's declared identifier attribute, if any.
    fn declared_id(&self) -> Option<String>;

    /// The element's declared source URI, if any.
    fn declared_src(&self) -> Option<String>;

    /// The element's current layout box.
    fn measured_size(&self) -> Size;

    /// Write the element's style width, in pixels.
    fn set_style_width(&self, width: u32);

    /// Write the element's style height, in pixels.
    fn set_style_height(&self, height: u32);

    /// Post a payload into the frame's execution context.
    fn post(&self, payload: &str, target: &Origin);
}

/// Frame-side content measurement probe.
///
/// Supplies the three measurement levels behind an explicit caller
/// dimension: the document's rendered box, the window's inner size, and
/// the document's client box. A level reports `None` when the surface
/// cannot provide it; a zero extent is treated as absent by the caller.
pub trait ContentMetrics {
    /// The document's rendered (offset) box.
    fn rendered_box(&self) -> Option<Size>;

    /// The window's inner size.
    fn inner_size(&self) -> Option<Size>;

    /// The document's client box.
    fn client_box(&self) -> Option<Size>;
}

/// Host-side viewport probe.
pub trait ViewportProbe {
    /// The host page's current viewport dimensions.
    fn viewport(&self) -> Size;
}

/// Unload-confirmation hook on the host page.
///
/// Install is an idempotent update: installing while already installed
/// replaces the prompt text.
pub trait UnloadGuard {
    /// Arm the unload prompt with the given text.
    fn install(&self, message: &str);

    /// Disarm the unload prompt.
    fn clear(&self);
}

/// Opaque handle to a scheduled repeating timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Repeating-timer scheduler seam.
///
/// The scheduler only manages registration; the embedder's event loop is
/// responsible for driving each firing back into the session that
/// scheduled it (single-threaded event-driven model — ticks are
/// serialized with message dispatch by construction).
pub trait Scheduler {
    /// Schedule a repeating timer with the given period.
    fn schedule_repeating(&self, interval_ms: u64) -> TimerId;

    /// Cancel a previously scheduled timer. Unknown handles are ignored.
    fn cancel(&self, timer: TimerId);
}
