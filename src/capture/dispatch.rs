use crate::event::InputEvent;
use futures::Stream;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Notify = Box<dyn Fn() + Send + Sync>;

/// Create a connected sender/receiver pair.
pub(crate) fn channel() -> (Dispatcher, InputEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    let notify = Arc::new(OnceLock::new());

    (
        Dispatcher {
            tx,
            notify: Arc::clone(&notify),
        },
        InputEvents { rx, notify },
    )
}

/// The capture-thread end of the channel. Sending never blocks.
pub(crate) struct Dispatcher {
    tx: UnboundedSender<InputEvent>,
    notify: Arc<OnceLock<Notify>>,
}

impl Dispatcher {
    /// Queue an event and wake the receiver.
    ///
    /// Returns `false` if the receiving end has been dropped.
    pub(crate) fn dispatch(&self, ev: InputEvent) -> bool {
        if self.tx.send(ev).is_err() {
            return false;
        }

        if let Some(notify) = self.notify.get() {
            notify();
        }

        true
    }
}

/// The UI end of the channel: normalized events in the order they were captured.
pub struct InputEvents {
    rx: UnboundedReceiver<InputEvent>,
    notify: Arc<OnceLock<Notify>>,
}

impl InputEvents {
    /// Register a callback that runs on the capture thread after every dispatched
    /// event, typically to ask the UI loop for a repaint.
    ///
    /// Only the first registration takes effect; returns `false` otherwise.
    pub fn set_notify(&self, notify: impl Fn() + Send + Sync + 'static) -> bool {
        self.notify.set(Box::new(notify)).is_ok()
    }

    /// Take the next pending event without waiting.
    pub fn try_next(&mut self) -> Option<InputEvent> {
        self.rx.try_recv().ok()
    }

    /// Take every event that is currently pending.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(ev) = self.try_next() {
            events.push(ev);
        }
        events
    }
}

impl Stream for InputEvents {
    type Item = InputEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
