//! End-to-end protocol exchanges between a host session and a frame
//! session wired through the loopback environment.

use std::cell::Cell;
use std::rc::Rc;

use sitecanvas::frame::{FrameSession, SizeParams};
use sitecanvas::host::{HostConfig, HostSession};
use sitecanvas::transport::{
    FixedMetrics, FixedViewport, LoopbackContext, LoopbackFrameElement, LoopbackPort,
    ManualScheduler, MessagePort, RecordingUnloadGuard, Size,
};
use sitecanvas::wire::Origin;

const HOST_ORIGIN: &str = "https://www.example.com";
const FRAME_ORIGIN: &str = "https://widgets.example.net";
const FRAME_SRC: &str = "https://widgets.example.net/embed/widget.html";

struct Embed {
    host_ctx: LoopbackContext,
    frame_ctx: LoopbackContext,
    element: LoopbackFrameElement,
    unload: RecordingUnloadGuard,
    viewport: FixedViewport,
    metrics: FixedMetrics,
    scheduler: ManualScheduler,
    ready_runs: Rc<Cell<u32>>,
    host: HostSession<LoopbackFrameElement, FixedViewport, RecordingUnloadGuard>,
    frame: FrameSession<LoopbackPort, FixedMetrics, ManualScheduler>,
}

fn embed() -> Embed {
    let host_ctx = LoopbackContext::new(HOST_ORIGIN);
    let frame_ctx = LoopbackContext::new(FRAME_ORIGIN);

    let viewport = FixedViewport::new(Size::new(1280, 720));
    let unload = RecordingUnloadGuard::new();
    let host = HostSession::new(
        HostConfig::new(Origin::Exact(HOST_ORIGIN.to_string())),
        viewport.clone(),
        unload.clone(),
    );
    let element = LoopbackFrameElement::new(
        &frame_ctx,
        HOST_ORIGIN,
        None,
        Some(FRAME_SRC),
        Size::new(640, 480),
    );

    let metrics = FixedMetrics::new();
    let scheduler = ManualScheduler::new();
    let ready_runs = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&ready_runs);
    let frame = FrameSession::new(
        host_ctx.port_from(FRAME_ORIGIN),
        metrics.clone(),
        scheduler.clone(),
    )
    .with_ready_hook(move || counter.set(counter.get() + 1));

    Embed {
        host_ctx,
        frame_ctx,
        element,
        unload,
        viewport,
        metrics,
        scheduler,
        ready_runs,
        host,
        frame,
    }
}

impl Embed {
    /// Deliver pending events in both directions until quiet.
    fn pump(&mut self) {
        loop {
            let mut delivered = false;
            for event in self.host_ctx.drain() {
                self.host.on_message(&event);
                delivered = true;
            }
            for event in self.frame_ctx.drain() {
                self.frame.on_message(&event);
                delivered = true;
            }
            if !delivered {
                break;
            }
        }
    }

    fn register(&mut self) -> String {
        let id = self.host.register_frame(self.element.clone());
        self.pump();
        id
    }
}

#[test]
fn handshake_assigns_identifier_and_runs_hook_once() {
    let mut embed = embed();
    assert!(!embed.frame.is_initialized());

    let id = embed.register();
    assert_eq!(id, "site-canvas-1");
    assert_eq!(embed.frame.frame_id(), Some("site-canvas-1"));
    assert_eq!(embed.ready_runs.get(), 1);

    // The load-completion re-init must not re-run the hook.
    embed.host.frame_loaded(&id).unwrap();
    embed.pump();
    assert_eq!(embed.ready_runs.get(), 1);
}

#[test]
fn resize_request_honors_host_policy() {
    let mut embed = embed();
    let id = embed.register();

    embed.frame.set_size(SizeParams {
        width: Some(500),
        height: Some(300),
    });
    embed.pump();

    assert!(embed.element.width_writes().is_empty());
    assert_eq!(embed.element.height_writes(), vec![300]);
    assert_eq!(
        embed.host.frame(&id).unwrap().size(),
        Size::new(640, 300)
    );
}

#[test]
fn spoofed_origin_changes_nothing() {
    let mut embed = embed();
    let id = embed.register();

    // An attacker context reuses the legitimate wire string but its
    // asserted origin gives it away.
    let attacker = embed.host_ctx.port_from("https://evil.example");
    attacker.post(
        &format!("SiteCanvas::setSize::{id},500,300"),
        &Origin::Any,
    );
    embed.pump();

    assert!(embed.element.height_writes().is_empty());
    assert_eq!(
        embed.host.frame(&id).unwrap().size(),
        Size::new(640, 480)
    );
}

#[test]
fn close_confirm_round_trips_with_commas() {
    let mut embed = embed();
    embed.register();

    let message = "Are you sure, really?";
    embed.frame.set_close_confirm(message);
    embed.pump();

    assert_eq!(embed.host.close_confirm_message(), Some(message));
    assert_eq!(embed.unload.armed().as_deref(), Some(message));

    embed.frame.set_close_confirm("");
    embed.pump();
    assert_eq!(embed.unload.armed(), None);
}

#[test]
fn auto_grow_lifecycle() {
    let mut embed = embed();
    embed.register();

    // Content grew taller than the embedding element.
    embed.metrics.set_rendered_box(Some(Size::new(640, 900)));

    embed.frame.set_auto_grow(50);
    embed.frame.auto_grow_tick();
    embed.pump();
    assert_eq!(embed.element.height_writes(), vec![900]);

    embed.frame.set_auto_grow(0);
    assert_eq!(embed.scheduler.active_count(), 0);
    embed.metrics.set_rendered_box(Some(Size::new(640, 1200)));
    embed.frame.auto_grow_tick();
    embed.pump();

    // No further reports after cancellation.
    assert_eq!(embed.element.height_writes(), vec![900]);
}

#[test]
fn viewport_relay_on_load_and_resize() {
    let mut embed = embed();
    let id = embed.register();
    assert_eq!(embed.frame.viewport(), None);

    embed.host.frame_loaded(&id).unwrap();
    embed.pump();
    assert_eq!(embed.frame.viewport(), Some(Size::new(1280, 720)));

    embed.viewport.set(Size::new(1024, 600));
    embed.host.broadcast_viewport();
    embed.pump();
    assert_eq!(embed.frame.viewport(), Some(Size::new(1024, 600)));
}

#[test]
fn unregistered_frame_is_ignored() {
    let mut embed = embed();
    let id = embed.register();

    embed.host.unregister_frame(&id).unwrap();
    embed.frame.set_size(SizeParams {
        width: Some(500),
        height: Some(300),
    });
    embed.pump();

    assert!(embed.element.height_writes().is_empty());
}
