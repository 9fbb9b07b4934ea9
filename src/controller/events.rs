/*!
 * Step Events
 * Broadcast of step results to any number of renderers
 */

use crate::core::limits::SNAPSHOT_CHANNEL_CAPACITY;
use crate::scheduler::Step;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Step broadcaster
/// Uses tokio broadcast channel; slow subscribers lag rather than block the engine
#[derive(Clone)]
pub struct StepBroadcaster {
    sender: Arc<broadcast::Sender<Step>>,
}

impl StepBroadcaster {
    /// Create new broadcaster with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to all future steps
    pub fn subscribe(&self) -> broadcast::Receiver<Step> {
        self.sender.subscribe()
    }

    /// Publish a step to all subscribers
    pub fn emit(&self, step: Step) {
        // No subscribers is fine
        let _ = self.sender.send(step);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for StepBroadcaster {
    fn default() -> Self {
        Self::new(SNAPSHOT_CHANNEL_CAPACITY)
    }
}
