//! Inference port doubles.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use arcrelay_core::{InferenceError, InferencePort, InferenceRequest};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::{Notify, Semaphore};
use tokio_util::sync::CancellationToken;

/// How a [`StaticPort`] answers every call.
#[derive(Debug, Clone)]
pub enum Reply {
    Payload(Value),
    Upstream { status: u16, body: String },
    Transport(String),
}

/// Port that answers every call the same way and records inputs.
#[derive(Debug)]
pub struct StaticPort {
    reply: Reply,
    inputs: Mutex<Vec<String>>,
}

impl StaticPort {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferencePort for StaticPort {
    async fn run(
        &self,
        request: InferenceRequest,
        _cancel: CancellationToken,
    ) -> Result<Value, InferenceError> {
        self.inputs.lock().unwrap().push(request.input);
        match &self.reply {
            Reply::Payload(value) => Ok(value.clone()),
            Reply::Upstream { status, body } => Err(InferenceError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            Reply::Transport(message) => Err(InferenceError::Transport(message.clone())),
        }
    }
}

/// Port whose calls block until the test releases permits.
///
/// Released calls echo their input as `{"output": <input>}`.
#[derive(Debug)]
pub struct GatedPort {
    gate: Semaphore,
    started: Notify,
    calls: AtomicUsize,
}

impl Default for GatedPort {
    fn default() -> Self {
        Self {
            gate: Semaphore::new(0),
            started: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl GatedPort {
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferencePort for GatedPort {
    async fn run(
        &self,
        request: InferenceRequest,
        cancel: CancellationToken,
    ) -> Result<Value, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();

        tokio::select! {
            () = cancel.cancelled() => Err(InferenceError::Cancelled),
            permit = self.gate.acquire() => {
                permit.map_err(|e| InferenceError::Transport(e.to_string()))?.forget();
                Ok(json!({ "output": request.input }))
            }
        }
    }
}
