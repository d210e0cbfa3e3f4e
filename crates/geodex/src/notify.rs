//! Process-wide notification signal
//!
//! Stores announce user-visible events (favorite toggled, login, fetch
//! failures) through a `NotificationSink`. The toast layer that renders them
//! is a frontend concern; this module only carries the signal and handles the
//! two timing rules around it: rapid-toggle coalescing and same-message
//! suppression.

use crate::config::notify::{DEBOUNCE_WINDOW_MS, DUPLICATE_WINDOW_MS};
use crossbeam_channel::{unbounded, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Severity/styling of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Success,
    Error,
    Info,
    Warning,
}

/// A user-visible notification message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn new(message: impl Into<String>, variant: NotificationVariant) -> Self {
        Self {
            message: message.into(),
            variant,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationVariant::Warning)
    }
}

/// Consumer of notifications
///
/// Stores hold an `Arc<dyn NotificationSink>`; frontends decide what a
/// dispatched notification actually does (channel send, print, nothing).
pub trait NotificationSink: Send + Sync {
    fn dispatch(&self, notification: Notification);
}

/// Sink that forwards notifications into a crossbeam channel
///
/// The receiving end is typically drained by the frontend's toast layer.
pub struct ChannelSink {
    tx: Sender<Notification>,
}

impl ChannelSink {
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx }
    }
}

impl NotificationSink for ChannelSink {
    fn dispatch(&self, notification: Notification) {
        // Receiver gone means the frontend shut down; nothing to announce to.
        let _ = self.tx.send(notification);
    }
}

/// Sink that drops everything (headless operation)
pub struct NullSink;

impl NotificationSink for NullSink {
    fn dispatch(&self, _notification: Notification) {}
}

// =============================================================================
// NotificationDebouncer - single-timer-slot coalescing
// =============================================================================

/// Coalesces a burst of notifications into the last one
///
/// Each `schedule` call resets the window; once the burst quiets for the
/// window duration, the most recent notification is dispatched exactly once.
/// A worker thread drains a channel with `recv_timeout`, keeping only the
/// latest pending message. Dropping the debouncer flushes any pending
/// notification before the thread exits.
pub struct NotificationDebouncer {
    tx: Option<Sender<Notification>>,
    handle: Option<JoinHandle<()>>,
}

impl NotificationDebouncer {
    /// Create a debouncer with the default window (~100 ms)
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_window(sink, Duration::from_millis(DEBOUNCE_WINDOW_MS))
    }

    /// Create a debouncer with a custom window (for testing)
    pub fn with_window(sink: Arc<dyn NotificationSink>, window: Duration) -> Self {
        let (tx, rx) = unbounded::<Notification>();

        let handle = std::thread::Builder::new()
            .name("notify-debounce".into())
            .spawn(move || {
                while let Ok(mut pending) = rx.recv() {
                    loop {
                        match rx.recv_timeout(window) {
                            // A newer notification arrived: replace the
                            // pending one and restart the window.
                            Ok(next) => pending = next,
                            Err(RecvTimeoutError::Timeout) => {
                                sink.dispatch(pending);
                                break;
                            }
                            Err(RecvTimeoutError::Disconnected) => {
                                // Shutting down: flush the settled state.
                                sink.dispatch(pending);
                                return;
                            }
                        }
                    }
                }
            })
            .expect("Failed to spawn notify-debounce thread");

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Schedule a notification, cancelling any pending one
    pub fn schedule(&self, notification: Notification) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(notification);
        }
    }
}

impl Drop for NotificationDebouncer {
    fn drop(&mut self) {
        // Disconnect the channel so the worker flushes and exits.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// =============================================================================
// NotificationCenter - same-message suppression
// =============================================================================

/// Dispatcher-level duplicate filter
///
/// Drops a notification whose message matches the previous one within the
/// suppression window (~500 ms). This guards the toast layer against
/// overlapping sources repeating the same announcement; it is independent of
/// the store-level toggle debounce, which coalesces rather than drops.
pub struct NotificationCenter {
    sink: Arc<dyn NotificationSink>,
    window: Duration,
    last: Mutex<Option<(String, Instant)>>,
}

impl NotificationCenter {
    /// Create a center with the default suppression window (~500 ms)
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_window(sink, Duration::from_millis(DUPLICATE_WINDOW_MS))
    }

    /// Create a center with a custom window (for testing)
    pub fn with_window(sink: Arc<dyn NotificationSink>, window: Duration) -> Self {
        Self {
            sink,
            window,
            last: Mutex::new(None),
        }
    }
}

impl NotificationSink for NotificationCenter {
    fn dispatch(&self, notification: Notification) {
        let now = Instant::now();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());

        if let Some((message, at)) = last.as_ref() {
            if *message == notification.message && now.duration_since(*at) < self.window {
                return;
            }
        }

        *last = Some((notification.message.clone(), now));
        drop(last);

        self.sink.dispatch(notification);
    }
}

// =============================================================================
// Test support
// =============================================================================
