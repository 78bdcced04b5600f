// src/feed.rs

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Something the listing set did that consumers may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A feed refresh wrote this many listings.
    Refreshed { listings: usize },
}

/// Change notification for the listing set. Consumers subscribe and re-run
/// the relevance pipeline when an event arrives, instead of holding callbacks
/// into the storage layer.
pub struct ListingFeed {
    subscribers: Mutex<Vec<Sender<FeedEvent>>>,
}

impl ListingFeed {
    pub fn new() -> Self {
        ListingFeed {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> Receiver<FeedEvent> {
        let (tx, rx) = channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Delivers to every live subscriber; hung-up ones are dropped here.
    pub fn publish(&self, event: FeedEvent) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

impl Default for ListingFeed {
    fn default() -> Self {
        Self::new()
    }
}
