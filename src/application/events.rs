use crossbeam_channel::{Receiver, Sender, unbounded};

use super::RunState;

/// Notifications published by the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationEvent {
    /// A step completed
    GenerationAdvanced { generation: u64 },
    RunStateChanged { state: RunState },
    /// The grid was reallocated by a resize or an import
    GridReset { rows: usize, cols: usize },
}

/// Fan-out of events to any number of subscribers.
/// Subscribers whose receiver has been dropped are pruned on publish.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<SimulationEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<SimulationEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: SimulationEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_receives() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(SimulationEvent::GenerationAdvanced { generation: 4 });

        assert_eq!(a.try_recv().unwrap(), SimulationEvent::GenerationAdvanced { generation: 4 });
        assert_eq!(b.try_recv().unwrap(), SimulationEvent::GenerationAdvanced { generation: 4 });
    }

    #[test]
    fn test_dropped_subscriber_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(SimulationEvent::GridReset { rows: 2, cols: 3 });
        assert_eq!(bus.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
