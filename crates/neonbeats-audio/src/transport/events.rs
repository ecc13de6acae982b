//! Transport notifications and listener registry.

use std::fmt;
use std::sync::mpsc;

/// Notification emitted by a transport transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportEvent {
    /// Playback began or resumed.
    Started,
    /// Playback paused; position retained.
    Paused,
    /// Playback stopped by request; position reset.
    Stopped,
    /// Playback reached the end of the clip; position reset.
    Ended,
}

impl fmt::Display for TransportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportEvent::Started => write!(f, "started"),
            TransportEvent::Paused => write!(f, "paused"),
            TransportEvent::Stopped => write!(f, "stopped"),
            TransportEvent::Ended => write!(f, "ended"),
        }
    }
}

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(TransportEvent)>;

/// Registered observers of a transport.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    callbacks: Vec<(ListenerId, Callback)>,
    channels: Vec<mpsc::Sender<TransportEvent>>,
}

impl Listeners {
    /// Registers a callback invoked synchronously for every event.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(TransportEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(registered, _)| *registered != id);
        self.callbacks.len() != before
    }

    /// Returns a receiver that gets every subsequent event.
    ///
    /// Dropping the receiver unsubscribes it on the next emit.
    pub fn channel(&mut self) -> mpsc::Receiver<TransportEvent> {
        let (tx, rx) = mpsc::channel();
        self.channels.push(tx);
        rx
    }

    /// Number of live subscriptions (callbacks and channels).
    pub fn len(&self) -> usize {
        self.callbacks.len() + self.channels.len()
    }

    /// True when nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn emit(&mut self, event: TransportEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
        self.channels.retain(|tx| tx.send(event).is_ok());
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("callbacks", &self.callbacks.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}
