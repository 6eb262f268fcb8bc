//! Debounced display-change observation
//!
//! The platform emits bursts of reconfiguration notifications for a single
//! physical event (plugging in one monitor can fire several in quick
//! succession). Reapplying on every raw notification would run redundant,
//! possibly overlapping application passes, so notifications are funneled
//! into a worker thread that coalesces each burst: the callback fires once
//! the feed has been quiet for a full quiescence window.
//!
//! The worker has two states. **Idle**: blocked on the channel waiting for
//! the first notification. **Pending**: a reapplication is scheduled;
//! every further notification restarts the window instead of queuing a
//! second callback, so at most one callback is in flight per window.
//! Teardown sends an explicit shutdown message and joins the worker, which
//! guarantees a pending callback never fires after the observer is gone.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Default quiescence window
///
/// Long enough to swallow the notification bursts the platform emits for one
/// physical event, short enough that a reconnected display is corrected
/// before the user notices.
pub const DEFAULT_QUIESCENCE_WINDOW: Duration = Duration::from_millis(300);

enum ObserverMessage {
    Notification,
    Shutdown,
}

/// Cloneable handle the platform feed uses to push raw notifications
#[derive(Clone)]
pub struct NotificationSender(mpsc::Sender<ObserverMessage>);

impl NotificationSender {
    /// Forward one raw platform notification into the debouncer
    ///
    /// Safe to call from any thread, including foreign callback contexts.
    /// Notifications arriving after the observer is torn down are dropped.
    pub fn notify(&self) {
        if self.0.send(ObserverMessage::Notification).is_err() {
            debug!("display change observer is gone, dropping notification");
        }
    }
}

/// Coalesces notification bursts into single callback invocations
pub struct DisplayChangeObserver {
    sender: mpsc::Sender<ObserverMessage>,
    worker: Option<JoinHandle<()>>,
}

impl DisplayChangeObserver {
    /// Start an observer with the default quiescence window
    pub fn new(on_quiescent: impl Fn() + Send + 'static) -> Self {
        Self::with_window(DEFAULT_QUIESCENCE_WINDOW, on_quiescent)
    }

    /// Start an observer with an explicit quiescence window
    pub fn with_window(window: Duration, on_quiescent: impl Fn() + Send + 'static) -> Self {
        let (sender, receiver) = mpsc::channel();
        let worker = std::thread::spawn(move || run_debounce_loop(&receiver, window, &on_quiescent));
        Self {
            sender,
            worker: Some(worker),
        }
    }

    /// Handle for the platform feed to push notifications through
    pub fn sender(&self) -> NotificationSender {
        NotificationSender(self.sender.clone())
    }

    /// Push one notification directly
    pub fn notify(&self) {
        self.sender().notify();
    }
}

impl Drop for DisplayChangeObserver {
    fn drop(&mut self) {
        // Explicit shutdown message, then join: a pending callback is
        // guaranteed not to fire after this returns.
        let _ = self.sender.send(ObserverMessage::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("display change observer worker panicked");
            }
        }
    }
}

fn run_debounce_loop(
    receiver: &mpsc::Receiver<ObserverMessage>,
    window: Duration,
    on_quiescent: &(impl Fn() + Send),
) {
    debug!(
        "display change observer started (quiescence window {}ms)",
        window.as_millis()
    );

    // Idle: block until the first notification of a burst
    loop {
        match receiver.recv() {
            Ok(ObserverMessage::Notification) => {}
            Ok(ObserverMessage::Shutdown) | Err(_) => break,
        }

        // Pending: each further notification restarts the window; the
        // callback fires once the feed has been quiet for the full window
        loop {
            match receiver.recv_timeout(window) {
                Ok(ObserverMessage::Notification) => {}
                Ok(ObserverMessage::Shutdown) => {
                    debug!("observer shut down while a reapplication was pending");
                    return;
                }
                Err(RecvTimeoutError::Timeout) => {
                    debug!("notification burst settled, invoking callback");
                    on_quiescent();
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }

    debug!("display change observer exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    const WINDOW: Duration = Duration::from_millis(100);

    fn counting_observer() -> (DisplayChangeObserver, Arc<AtomicUsize>) {
        let fires = Arc::new(AtomicUsize::new(0));
        let fires_clone = Arc::clone(&fires);
        let observer = DisplayChangeObserver::with_window(WINDOW, move || {
            fires_clone.fetch_add(1, Ordering::SeqCst);
        });
        (observer, fires)
    }

    #[test]
    fn test_burst_coalesces_to_a_single_fire() {
        let (observer, fires) = counting_observer();

        for _ in 0..5 {
            observer.notify();
            thread::sleep(Duration::from_millis(20));
        }
        thread::sleep(WINDOW + Duration::from_millis(100));

        assert_eq!(fires.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_window_restarts_from_the_last_notification() {
        let fired_at = Arc::new(parking_lot::Mutex::new(None));
        let fired_clone = Arc::clone(&fired_at);
        let observer = DisplayChangeObserver::with_window(WINDOW, move || {
            *fired_clone.lock() = Some(Instant::now());
        });

        observer.notify();
        thread::sleep(Duration::from_millis(60));
        let last = Instant::now();
        observer.notify();
        thread::sleep(WINDOW + Duration::from_millis(150));

        let fired = fired_at.lock().take().expect("callback should have fired");
        // Fired only after a full window measured from the *last* notification
        assert!(fired.duration_since(last) >= WINDOW);
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let (observer, fires) = counting_observer();

        observer.notify();
        thread::sleep(WINDOW + Duration::from_millis(100));
        observer.notify();
        thread::sleep(WINDOW + Duration::from_millis(100));

        assert_eq!(fires.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_shutdown_while_pending_never_fires() {
        let (observer, fires) = counting_observer();

        observer.notify();
        drop(observer); // tear down with the window still open
        thread::sleep(WINDOW + Duration::from_millis(100));

        assert_eq!(fires.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_notifications_after_teardown_are_dropped() {
        let (observer, fires) = counting_observer();
        let sender = observer.sender();
        drop(observer);

        sender.notify(); // must not panic
        thread::sleep(WINDOW + Duration::from_millis(50));
        assert_eq!(fires.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_callback_runs_off_the_notifying_thread() {
        let (sender_tx, sender_rx) = crossbeam_channel::bounded(1);
        let notifier = thread::current().id();
        let observer = DisplayChangeObserver::with_window(WINDOW, move || {
            let _ = sender_tx.send(thread::current().id());
        });

        observer.notify();
        let callback_thread = sender_rx
            .recv_timeout(WINDOW + Duration::from_millis(500))
            .expect("callback should have fired");
        assert_ne!(callback_thread, notifier);
    }
}
