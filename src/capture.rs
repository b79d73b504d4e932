pub(crate) mod dispatch;

use crate::error::OverlayError;
use crate::event::InputEvent;
use crate::OverlayResult;
use std::convert::TryFrom;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub use dispatch::InputEvents;
use dispatch::Dispatcher;

/// How long `start` waits for the OS hook to report a registration failure.
///
/// The hook call blocks for as long as it is installed, so silence means success.
const HOOK_STARTUP_GRACE: Duration = Duration::from_millis(250);

const CAPTURE_THREAD_NAME: &str = "input-capture";

/// What the hook thread reports back when `rdev::listen` fails. It crosses
/// threads, so it stays a plain `String` rather than an `OverlayError`.
type HookFailure = String;

/// The global keyboard and mouse hook, running on its own thread.
pub struct InputCapture {
    active: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputCapture {
    /// Install the global hooks and begin forwarding normalized events.
    ///
    /// This function returns an error if the OS refuses the hook (e.g. missing
    /// accessibility permissions or no X display).
    pub fn start() -> OverlayResult<(Self, InputEvents)> {
        let (dispatcher, events) = dispatch::channel();
        let active = Arc::new(AtomicBool::new(true));
        let (status_tx, status_rx) = mpsc::sync_channel::<HookFailure>(1);

        let forwarder = Forwarder {
            dispatcher,
            active: Arc::clone(&active),
        };

        let thread = thread::Builder::new()
            .name(CAPTURE_THREAD_NAME.into())
            .spawn(move || {
                tracing::debug!("installing global input hook");

                // Blocks until the process exits unless the hook fails.
                if let Err(e) = rdev::listen(move |ev| {
                    forwarder.forward(&ev);
                }) {
                    let reason: HookFailure = format!("{e:?}");
                    tracing::error!("input hook stopped: {reason}");
                    let _ = status_tx.send(reason);
                }
            })?;

        match status_rx.recv_timeout(HOOK_STARTUP_GRACE) {
            Ok(reason) => Err(OverlayError::HookRegistration(reason)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(OverlayError::CaptureThreadExited),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::info!("input capture running");

                Ok((
                    Self {
                        active,
                        thread: Some(thread),
                    },
                    events,
                ))
            }
        }
    }

    /// Stop forwarding events.
    ///
    /// The OS hook itself stays installed until the process exits; events it
    /// delivers after this call are discarded.
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            tracing::info!("input capture stopped");
        }
    }

    /// Check whether the hook thread is still alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }
}

impl Drop for InputCapture {
    fn drop(&mut self) {
        self.stop();
        // The hook loop cannot be interrupted, so the thread is detached rather than joined.
        let _ = self.thread.take();
    }
}

/// The hook callback: normalize, then hand off to the UI thread.
struct Forwarder {
    dispatcher: Dispatcher,
    active: Arc<AtomicBool>,
}

impl Forwarder {
    fn forward(&self, raw: &rdev::Event) -> bool {
        if !self.active.load(Ordering::Relaxed) {
            return false;
        }

        match InputEvent::try_from(raw) {
            Ok(ev) => {
                tracing::trace!(kind = %ev.kind, "captured");
                self.dispatcher.dispatch(ev)
            }
            Err(e) => {
                tracing::trace!("ignored: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{InputKind, KeyToken};
    use std::time::SystemTime;

    fn forwarder() -> (Forwarder, InputEvents, Arc<AtomicBool>) {
        let (dispatcher, events) = dispatch::channel();
        let active = Arc::new(AtomicBool::new(true));
        let forwarder = Forwarder {
            dispatcher,
            active: Arc::clone(&active),
        };
        (forwarder, events, active)
    }

    fn raw(event_type: rdev::EventType) -> rdev::Event {
        rdev::Event {
            time: SystemTime::now(),
            name: None,
            event_type,
        }
    }

    #[test]
    fn recognized_events_are_forwarded() {
        let (forwarder, mut events, _) = forwarder();

        assert!(forwarder.forward(&raw(rdev::EventType::KeyPress(rdev::Key::KeyS))));
        assert!(forwarder.forward(&raw(rdev::EventType::MouseMove { x: 4.0, y: 2.0 })));

        let kinds: Vec<_> = events.drain().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                InputKind::KeyPress(KeyToken::Letter('S')),
                InputKind::Move { x: 4, y: 2 }
            ]
        );
    }

    #[test]
    fn unrecognized_events_are_dropped() {
        let (forwarder, mut events, _) = forwarder();

        assert!(!forwarder.forward(&raw(rdev::EventType::KeyPress(rdev::Key::F1))));
        assert!(!forwarder.forward(&raw(rdev::EventType::ButtonPress(
            rdev::Button::Unknown(8)
        ))));
        assert!(events.try_next().is_none());
    }

    #[test]
    fn nothing_is_forwarded_once_stopped() {
        let (forwarder, mut events, active) = forwarder();
        active.store(false, Ordering::SeqCst);

        assert!(!forwarder.forward(&raw(rdev::EventType::KeyPress(rdev::Key::KeyA))));
        assert!(events.try_next().is_none());
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn hook_failure_crosses_threads() {
        assert_send::<HookFailure>();
        assert_send::<mpsc::SyncSender<HookFailure>>();
    }

    #[test]
    fn finished_hook_thread_is_not_running() {
        let capture = InputCapture {
            active: Arc::new(AtomicBool::new(true)),
            thread: Some(thread::spawn(|| {})),
        };

        for _ in 0..200 {
            if !capture.is_running() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("hook thread still reported as running");
    }

    #[test]
    fn detached_capture_is_not_running() {
        let capture = InputCapture {
            active: Arc::new(AtomicBool::new(true)),
            thread: None,
        };

        assert!(!capture.is_running());
    }
}
