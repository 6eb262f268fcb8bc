//! `Stillscreen` - display dithering and uniformity control for macOS
//!
//! Applies the persisted preferences to every attached display at startup,
//! then keeps them applied as displays come and go. The presentation layer
//! (menu bar) attaches through the controller's subscription API and is not
//! part of this binary.

use anyhow::{Context, Result};
use tracing::info;

fn main() -> Result<()> {
    stillscreen::utils::init_logging().context("Failed to initialize logging system")?;

    info!("Stillscreen v{} starting...", env!("CARGO_PKG_VERSION"));

    run()
}

#[cfg(target_os = "macos")]
fn run() -> Result<()> {
    use core_foundation::runloop::CFRunLoop;
    use std::sync::Arc;
    use stillscreen::config::PreferenceStore;
    use stillscreen::controller::DisplayController;
    use stillscreen::display::{
        CapabilityBackend, CgDisplayEnumerator, DisplayEnumerator, IomfbBackend,
    };
    use stillscreen::monitor::reconfiguration;

    let store = Arc::new(PreferenceStore::open());
    let enumerator: Arc<dyn DisplayEnumerator> = Arc::new(CgDisplayEnumerator);
    let backend: Arc<dyn CapabilityBackend> = Arc::new(IomfbBackend::default());

    // Construction applies the persisted preferences before any topology
    // event can be observed.
    let controller = DisplayController::new(store, enumerator, backend);

    let sender = controller
        .notification_sender()
        .ok_or_else(|| anyhow::anyhow!("display change observer is not running"))?;
    reconfiguration::register(sender)
        .context("Failed to register for display reconfiguration notifications")?;

    // Reconfiguration callbacks are delivered through this thread's run loop.
    info!("Entering run loop");
    CFRunLoop::run_current();

    reconfiguration::unregister();
    controller.shutdown();
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn run() -> Result<()> {
    eprintln!("Stillscreen drives macOS display hardware and cannot run on this platform.");
    Ok(())
}
