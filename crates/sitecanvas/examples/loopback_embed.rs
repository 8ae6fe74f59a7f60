//! A complete host/frame exchange over the in-memory loopback
//! environment — registration, handshake, auto-grow resizing, and a
//! close-confirmation round trip.
//!
//! Run with:
//!   cargo run --example loopback_embed

use sitecanvas::frame::{FrameSession, SizeParams};
use sitecanvas::host::{HostConfig, HostSession};
use sitecanvas::transport::{
    FixedMetrics, FixedViewport, LoopbackContext, LoopbackFrameElement, LoopbackPort,
    ManualScheduler, RecordingUnloadGuard, Size,
};
use sitecanvas::wire::Origin;

const HOST_ORIGIN: &str = "https://www.example.com";
const FRAME_ORIGIN: &str = "https://widgets.example.net";

type Host = HostSession<LoopbackFrameElement, FixedViewport, RecordingUnloadGuard>;
type Frame = FrameSession<LoopbackPort, FixedMetrics, ManualScheduler>;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Two simulated browsing contexts.
    let host_ctx = LoopbackContext::new(HOST_ORIGIN);
    let frame_ctx = LoopbackContext::new(FRAME_ORIGIN);

    // Host side: session, viewport probe, unload guard, frame element.
    let viewport = FixedViewport::new(Size::new(1280, 720));
    let unload = RecordingUnloadGuard::new();
    let mut host: Host = HostSession::new(
        HostConfig::new(Origin::Exact(HOST_ORIGIN.to_string())),
        viewport,
        unload.clone(),
    );
    let element = LoopbackFrameElement::new(
        &frame_ctx,
        HOST_ORIGIN,
        None,
        Some("https://widgets.example.net/embed/widget.html"),
        Size::new(640, 480),
    );

    // Frame side: session with content metrics and a manual scheduler.
    let metrics = FixedMetrics::new();
    metrics.set_rendered_box(Some(Size::new(640, 480)));
    let scheduler = ManualScheduler::new();
    let mut frame: Frame = FrameSession::new(
        host_ctx.port_from(FRAME_ORIGIN),
        metrics.clone(),
        scheduler,
    )
    .with_ready_hook(|| eprintln!("frame ready"));

    // Register and complete the handshake.
    let id = host.register_frame(element.clone());
    eprintln!("registered frame as '{id}'");
    pump(&host_ctx, &frame_ctx, &mut host, &mut frame);
    eprintln!("frame initialized as {:?}", frame.frame_id());

    // The frame loads; the host re-announces and reports its viewport.
    host.frame_loaded(&id).expect("frame is registered");
    pump(&host_ctx, &frame_ctx, &mut host, &mut frame);
    eprintln!("frame sees viewport {:?}", frame.viewport());

    // Auto-grow: content gets taller, two ticks, host follows.
    frame.set_auto_grow(50);
    frame.auto_grow_tick();
    metrics.set_rendered_box(Some(Size::new(640, 900)));
    frame.auto_grow_tick();
    pump(&host_ctx, &frame_ctx, &mut host, &mut frame);
    eprintln!(
        "element height writes: {:?} (width untouched: {:?})",
        element.height_writes(),
        element.width_writes()
    );
    frame.set_auto_grow(0);

    // Close confirmation, commas and all.
    frame.set_close_confirm("Leave now, and your edits are gone?");
    pump(&host_ctx, &frame_ctx, &mut host, &mut frame);
    eprintln!("unload prompt armed: {:?}", unload.armed());

    // Explicit resize request with caller-supplied dimensions.
    frame.set_size(SizeParams {
        width: Some(800),
        height: Some(1200),
    });
    pump(&host_ctx, &frame_ctx, &mut host, &mut frame);
    eprintln!(
        "final element size: {:?}",
        host.frame(&id).map(|record| record.size())
    );
}

/// Deliver pending events in both directions until quiet.
fn pump(host_ctx: &LoopbackContext, frame_ctx: &LoopbackContext, host: &mut Host, frame: &mut Frame) {
    loop {
        let mut delivered = false;
        for event in host_ctx.drain() {
            host.on_message(&event);
            delivered = true;
        }
        for event in frame_ctx.drain() {
            frame.on_message(&event);
            delivered = true;
        }
        if !delivered {
            break;
        }
    }
}
