use crate::error::ExecutorError;
use crate::plan::ExecutionPlan;
use core_types::{ConfirmationReceipt, Leg, SubmitRequest, SwapBundle, TransactionDescriptor, WatchRequest};
use events::{EventSink, SwapEvent};
use rpc_client::{Broadcaster, ConfirmationWatcher};
use std::sync::Arc;

/// The confirmation depth requested for both legs. The pipeline treats one
/// mined block as final: the approval only needs to be mined for the swap's
/// allowance check to pass, and the swap receipt is the user-visible outcome.
const CONFIRMATION_DEPTH: u64 = 1;

/// The swap execution pipeline.
///
/// Drives one `SwapBundle` through submission and confirmation of each leg,
/// strictly in order: the approval leg, when present, fully completes
/// (submission *and* confirmation) before the swap leg is submitted. There is
/// no internal retry and no cancellation path; a failure at any step rejects
/// the run, and retrying is the caller's business with a fresh bundle.
pub struct SwapExecutor {
    broadcaster: Arc<dyn Broadcaster>,
    watcher: Arc<dyn ConfirmationWatcher>,
    /// The chain every accepted bundle must have been built for.
    chain_id: u64,
}

impl SwapExecutor {
    pub fn new(
        broadcaster: Arc<dyn Broadcaster>,
        watcher: Arc<dyn ConfirmationWatcher>,
        chain_id: u64,
    ) -> Self {
        Self {
            broadcaster,
            watcher,
            chain_id,
        }
    }

    /// Executes one bundle, reporting lifecycle progress to `events`.
    ///
    /// Resolves with the swap leg's confirmation receipt once the swap is
    /// confirmed (the same receipt carried by the terminal `SwapConfirmed`
    /// event), or rejects on the first failing step. `SwapConfirmed` is never
    /// emitted on a failed run, so consumers can treat it as the single
    /// success signal.
    pub async fn execute(
        &self,
        bundle: &SwapBundle,
        events: &EventSink,
    ) -> Result<ConfirmationReceipt, ExecutorError> {
        self.preflight(bundle)?;

        let plan = ExecutionPlan::from_bundle(bundle);
        tracing::debug!(legs = plan.legs().len(), "executing swap bundle");

        let result = self.drive(&plan, events).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "swap pipeline failed");
            if let Some(leg) = err.leg() {
                events.emit(SwapEvent::Failed {
                    leg,
                    reason: err.to_string(),
                });
            }
        }
        result
    }

    /// Checks the bundle against the configured chain before any event is
    /// emitted or any transaction is submitted. A bundle built for another
    /// chain is unrecoverable once broadcast, so it never reaches the wallet.
    fn preflight(&self, bundle: &SwapBundle) -> Result<(), ExecutorError> {
        bundle
            .validate()
            .map_err(|e| ExecutorError::Configuration(e.to_string()))?;

        for (leg, descriptor) in ExecutionPlan::from_bundle(bundle).legs() {
            if descriptor.chain_id != self.chain_id {
                return Err(ExecutorError::Configuration(format!(
                    "{leg} transaction targets chain {}, expected {}",
                    descriptor.chain_id, self.chain_id
                )));
            }
        }
        Ok(())
    }

    async fn drive(
        &self,
        plan: &ExecutionPlan<'_>,
        events: &EventSink,
    ) -> Result<ConfirmationReceipt, ExecutorError> {
        if let ExecutionPlan::WithApproval { approve, .. } = plan {
            // The approval is an internal prerequisite: it gets no terminal
            // success event, and the swap is not submitted until the grant
            // has been mined.
            self.run_leg(Leg::Approval, approve, events).await?;
        }

        let swap = match plan {
            ExecutionPlan::WithApproval { swap, .. } | ExecutionPlan::Direct { swap } => swap,
        };
        self.run_leg(Leg::Swap, swap, events).await
    }

    /// The generic submit-then-confirm routine, applied to each leg in order.
    async fn run_leg(
        &self,
        leg: Leg,
        descriptor: &TransactionDescriptor,
        events: &EventSink,
    ) -> Result<ConfirmationReceipt, ExecutorError> {
        events.emit(match leg {
            Leg::Approval => SwapEvent::ApprovalSubmitting,
            Leg::Swap => SwapEvent::SwapSubmitting,
        });

        // Normalization drops chain/gas and stringifies the value; the
        // connected wallet fills in the rest at signing time.
        let request = SubmitRequest::from(descriptor);
        tracing::debug!(%leg, to = %request.to, value = %request.value, "submitting");

        let hash = self
            .broadcaster
            .submit(&request)
            .await
            .map_err(|e| ExecutorError::Submission {
                leg,
                reason: e.to_string(),
            })?;

        events.emit(match leg {
            Leg::Approval => SwapEvent::ApprovalSubmitted { hash: hash.clone() },
            Leg::Swap => SwapEvent::SwapSubmitted { hash: hash.clone() },
        });

        let watch = WatchRequest {
            hash: hash.clone(),
            confirmations: CONFIRMATION_DEPTH,
        };
        let receipt = self
            .watcher
            .wait_for_confirmation(&watch)
            .await
            .map_err(|e| ExecutorError::Confirmation {
                leg,
                reason: e.to_string(),
            })?;

        tracing::info!(%leg, hash = %receipt.transaction_hash, block = receipt.block_number, "leg confirmed");
        events.emit(match leg {
            Leg::Approval => SwapEvent::ApprovalConfirmed { hash },
            Leg::Swap => SwapEvent::SwapConfirmed {
                receipt: receipt.clone(),
            },
        });
        Ok(receipt)
    }
}
