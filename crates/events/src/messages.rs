use crate::error::EventsError;
use core_types::{ConfirmationReceipt, Leg, TxHash};
use serde::{Deserialize, Serialize};

/// The top-level lifecycle event enum.
///
/// One execution run produces these in pipeline order. For a bundle with an
/// approval leg the full success sequence is:
/// `ApprovalSubmitting → ApprovalSubmitted → ApprovalConfirmed →
/// SwapSubmitting → SwapSubmitted → SwapConfirmed`. Without an approval leg
/// the first three are absent. Any failure terminates the sequence with a
/// single `Failed` event; `SwapConfirmed` is never emitted on a failed run.
///
/// The `#[serde(tag = "type", content = "payload")]` attribute serializes the
/// enum into a clean JSON object that is easy for consumers to dispatch on.
/// A `SwapSubmitted` event looks like:
/// `{
///   "type": "SwapSubmitted",
///   "payload": { "hash": "0xabc..." }
/// }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SwapEvent {
    /// The approval leg is about to be handed to the broadcaster.
    ApprovalSubmitting,
    /// The broadcaster accepted the approval transaction.
    ApprovalSubmitted { hash: TxHash },
    /// The approval transaction reached its confirmation depth. This is an
    /// internal prerequisite, not the user-visible outcome.
    ApprovalConfirmed { hash: TxHash },
    /// The swap leg is about to be handed to the broadcaster.
    SwapSubmitting,
    /// The broadcaster accepted the swap transaction.
    SwapSubmitted { hash: TxHash },
    /// Terminal success. Emitted exactly once, always with the swap leg's
    /// receipt, never the approval leg's.
    SwapConfirmed { receipt: ConfirmationReceipt },
    /// Terminal failure of either leg. The run produced no success.
    Failed { leg: Leg, reason: String },
}

impl SwapEvent {
    /// Encodes the event for wire transport.
    pub fn to_json(&self) -> Result<String, EventsError> {
        serde_json::to_string(self).map_err(|e| EventsError::Serialization(e.to_string()))
    }

    /// Whether this event ends the run, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapEvent::SwapConfirmed { .. } | SwapEvent::Failed { .. })
    }
}

/// The classic UI flag pair, derived from the event stream.
///
/// `loading` is asserted from the first event of a run until a terminal event.
/// `pending_transaction` is asserted while a transaction is in flight: between
/// each `*Submitting` event and the matching `*Confirmed` one. Folding a full
/// approve-then-swap run therefore toggles `pending_transaction` true/false
/// twice and `loading` exactly once each way, matching the callback sequence
/// the pipeline replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    pub loading: bool,
    pub pending_transaction: bool,
}

impl StatusFlags {
    /// Applies one event to the flags, returning the updated pair.
    pub fn apply(self, event: &SwapEvent) -> Self {
        match event {
            SwapEvent::ApprovalSubmitting | SwapEvent::SwapSubmitting => StatusFlags {
                loading: true,
                pending_transaction: true,
            },
            SwapEvent::ApprovalSubmitted { .. } | SwapEvent::SwapSubmitted { .. } => self,
            SwapEvent::ApprovalConfirmed { .. } => StatusFlags {
                loading: true,
                pending_transaction: false,
            },
            SwapEvent::SwapConfirmed { .. } => StatusFlags::default(),
            // A failed run clears the in-flight flags but the caller can tell
            // it apart from success: no `SwapConfirmed` ever arrived.
            SwapEvent::Failed { .. } => StatusFlags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> ConfirmationReceipt {
        ConfirmationReceipt {
            transaction_hash: TxHash::from("0xswap"),
            block_number: 42,
            status: true,
            gas_used: Some(21_000),
        }
    }

    #[test]
    fn events_serialize_with_type_and_payload_tags() {
        let event = SwapEvent::SwapSubmitted {
            hash: TxHash::from("0xabc"),
        };
        let json = event.to_json().unwrap();
        assert_eq!(json, r#"{"type":"SwapSubmitted","payload":{"hash":"0xabc"}}"#);

        let back: SwapEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn flags_fold_for_a_run_with_approval() {
        let events = vec![
            SwapEvent::ApprovalSubmitting,
            SwapEvent::ApprovalSubmitted {
                hash: TxHash::from("0xapprove"),
            },
            SwapEvent::ApprovalConfirmed {
                hash: TxHash::from("0xapprove"),
            },
            SwapEvent::SwapSubmitting,
            SwapEvent::SwapSubmitted {
                hash: TxHash::from("0xswap"),
            },
            SwapEvent::SwapConfirmed { receipt: receipt() },
        ];

        let mut flags = StatusFlags::default();
        let mut pending_transitions = Vec::new();
        let mut loading_transitions = Vec::new();
        for event in &events {
            let next = flags.apply(event);
            if next.pending_transaction != flags.pending_transaction {
                pending_transitions.push(next.pending_transaction);
            }
            if next.loading != flags.loading {
                loading_transitions.push(next.loading);
            }
            flags = next;
        }

        // Pending toggles once per leg; loading wraps the whole run.
        assert_eq!(pending_transitions, vec![true, false, true, false]);
        assert_eq!(loading_transitions, vec![true, false]);
        assert_eq!(flags, StatusFlags::default());
    }

    #[test]
    fn flags_fold_for_a_direct_run() {
        let events = vec![
            SwapEvent::SwapSubmitting,
            SwapEvent::SwapSubmitted {
                hash: TxHash::from("0xswap"),
            },
            SwapEvent::SwapConfirmed { receipt: receipt() },
        ];

        let mut flags = StatusFlags::default();
        let mut pending_transitions = Vec::new();
        for event in &events {
            let next = flags.apply(event);
            if next.pending_transaction != flags.pending_transaction {
                pending_transitions.push(next.pending_transaction);
            }
            flags = next;
        }

        assert_eq!(pending_transitions, vec![true, false]);
    }

    #[test]
    fn terminal_events_are_flagged() {
        assert!(SwapEvent::SwapConfirmed { receipt: receipt() }.is_terminal());
        assert!(
            SwapEvent::Failed {
                leg: Leg::Swap,
                reason: "rejected".to_string(),
            }
            .is_terminal()
        );
        assert!(!SwapEvent::SwapSubmitting.is_terminal());
    }
}
