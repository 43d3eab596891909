//! Single-slot preemptive forwarding.
//!
//! The forwarder owns the only mutable state in the relay: a reference to the
//! in-flight chat call. Submitting a new prompt cancels whatever call is
//! currently in the slot, installs a fresh handle and forwards the prompt.
//!
//! # Slot lifecycle
//!
//! - **Claim**: cancel the previous handle (if any) and store a new one. Both
//!   steps run under one lock acquisition, so two concurrent submits cannot
//!   interleave between them.
//! - **Release**: when a submit finishes, or its future is dropped, the slot
//!   is cleared only if it still holds that submit's handle. A slow, stale
//!   completion never erases a newer handle.
//!
//! Keep-alive calls go through [`PreemptiveForwarder::warm`], which uses a
//! private token and never touches the slot.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arcrelay_core::{ChatPrompt, ForwardOutcome, InferenceError, InferencePort, InferenceRequest};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Prompt sent by the keep-alive path.
pub const PING_PROMPT: &str = "ping";

/// Record of one in-flight chat call.
#[derive(Debug)]
struct InFlightHandle {
    /// Identity used to detect stale completions.
    id: Uuid,
    /// Fires when a newer submit preempts this call.
    cancel: CancellationToken,
}

impl InFlightHandle {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            cancel: CancellationToken::new(),
        }
    }
}

type Slot = Mutex<Option<InFlightHandle>>;

fn lock(slot: &Slot) -> MutexGuard<'_, Option<InFlightHandle>> {
    // Every write replaces the whole value, so a poisoned slot is still coherent.
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the slot on drop if it still holds `id`.
struct SlotRelease<'a> {
    slot: &'a Slot,
    id: Uuid,
}

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        let mut slot = lock(self.slot);
        if slot.as_ref().is_some_and(|current| current.id == self.id) {
            *slot = None;
            debug!(handle = %self.id, "Released in-flight slot");
        } else {
            debug!(handle = %self.id, "Slot already owned by a newer request");
        }
    }
}

/// Forwards prompts upstream, keeping at most one chat call in flight.
///
/// Created once at startup and shared (as `Arc`) with the HTTP layer.
pub struct PreemptiveForwarder {
    /// Outbound inference client.
    port: Arc<dyn InferencePort>,
    /// Forwarded as `model_params.max_new_tokens`.
    max_new_tokens: u32,
    /// The current in-flight chat call, if any.
    slot: Slot,
}

impl fmt::Debug for PreemptiveForwarder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreemptiveForwarder")
            .field("port", &self.port)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("in_flight", &self.has_in_flight())
            .finish()
    }
}

impl PreemptiveForwarder {
    /// Create a forwarder with an empty slot.
    pub fn new(port: Arc<dyn InferencePort>, max_new_tokens: u32) -> Self {
        Self {
            port,
            max_new_tokens,
            slot: Mutex::new(None),
        }
    }

    /// Forward a chat prompt, preempting any earlier chat call.
    ///
    /// Returns [`ForwardOutcome::Cancelled`] if a newer submit arrives before
    /// this call's payload does.
    pub async fn submit(&self, prompt: ChatPrompt) -> ForwardOutcome {
        let (id, cancel) = self.claim();
        let _release = SlotRelease {
            slot: &self.slot,
            id,
        };

        debug!(handle = %id, prompt_len = prompt.as_str().len(), "Forwarding chat prompt");
        let request = InferenceRequest::new(prompt.into_inner(), self.max_new_tokens);
        let outcome = self.forward(request, cancel).await;

        match &outcome {
            ForwardOutcome::Success(_) => info!(handle = %id, "Chat request completed"),
            ForwardOutcome::Cancelled => {
                info!(handle = %id, "Chat request aborted by a newer request");
            }
            ForwardOutcome::Failed(message) => {
                error!(handle = %id, error = %message, "Chat request failed");
            }
        }

        outcome
    }

    /// Forward a keep-alive prompt on a private cancellation scope.
    ///
    /// Never cancels, and is never cancelled by, a chat submit.
    pub async fn warm(&self, prompt: &str) -> ForwardOutcome {
        let request = InferenceRequest::new(prompt, self.max_new_tokens);
        let outcome = self.forward(request, CancellationToken::new()).await;

        if let ForwardOutcome::Failed(message) = &outcome {
            warn!(error = %message, "Keep-alive call failed");
        } else {
            debug!("Keep-alive call completed");
        }

        outcome
    }

    /// Whether a chat call currently occupies the slot.
    pub fn has_in_flight(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Cancel the current handle (if any) and install a fresh one.
    fn claim(&self) -> (Uuid, CancellationToken) {
        let mut slot = lock(&self.slot);

        if let Some(previous) = slot.take() {
            if previous.cancel.is_cancelled() {
                debug!(handle = %previous.id, "Previous request was already cancelled");
            } else {
                previous.cancel.cancel();
                info!(handle = %previous.id, "Preempting in-flight request");
            }
        }

        let handle = InFlightHandle::new();
        let claimed = (handle.id, handle.cancel.clone());
        *slot = Some(handle);
        claimed
    }

    /// Run one call, resolving to `Cancelled` as soon as `cancel` fires.
    async fn forward(&self, request: InferenceRequest, cancel: CancellationToken) -> ForwardOutcome {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(InferenceError::Cancelled),
            result = self.port.run(request, cancel.clone()) => result,
        };

        // A payload that raced past the cancel still counts as superseded.
        if cancel.is_cancelled() {
            return ForwardOutcome::Cancelled;
        }

        ForwardOutcome::from(result)
    }
}
