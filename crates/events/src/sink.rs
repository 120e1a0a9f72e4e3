use crate::messages::SwapEvent;
use tokio::sync::mpsc;

/// The producer side of the lifecycle event channel.
///
/// Emission is best-effort: a caller that dropped its receiver must not abort
/// an in-flight swap, so a closed channel is logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: mpsc::UnboundedSender<SwapEvent>,
}

impl EventSink {
    /// Creates a sink and the receiver the caller consumes events from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SwapEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (EventSink { sender }, receiver)
    }

    pub fn emit(&self, event: SwapEvent) {
        if self.sender.send(event).is_err() {
            tracing::warn!("event receiver dropped; lifecycle event discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Leg;

    #[test]
    fn emitted_events_arrive_in_order() {
        let (sink, mut receiver) = EventSink::channel();
        sink.emit(SwapEvent::SwapSubmitting);
        sink.emit(SwapEvent::Failed {
            leg: Leg::Swap,
            reason: "rejected".to_string(),
        });

        assert_eq!(receiver.try_recv().unwrap(), SwapEvent::SwapSubmitting);
        assert!(matches!(
            receiver.try_recv().unwrap(),
            SwapEvent::Failed { leg: Leg::Swap, .. }
        ));
    }

    #[test]
    fn emit_survives_a_dropped_receiver() {
        let (sink, receiver) = EventSink::channel();
        drop(receiver);
        sink.emit(SwapEvent::SwapSubmitting);
    }
}
