//! Server lifecycle state machine
//!
//! `stopped -> starting -> running -> stopping -> stopped`. A failed start
//! goes straight from `starting` back to `stopped`. The state lives in a
//! `watch` channel so the status endpoint, the accept loop and the signal
//! handler all observe the same value.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl LifecycleState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
        }
    }

    const fn can_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Stopped, Self::Starting)
                | (Self::Starting, Self::Running | Self::Stopping | Self::Stopped)
                | (Self::Running, Self::Stopping)
                | (Self::Stopping, Self::Stopped)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move server from {from} to {to}")]
pub struct LifecycleError {
    pub from: LifecycleState,
    pub to: LifecycleState,
}

/// Shared handle to the server state
#[derive(Debug, Clone)]
pub struct ServerLifecycle {
    tx: Arc<watch::Sender<LifecycleState>>,
}

impl ServerLifecycle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LifecycleState::Stopped);
        Self { tx: Arc::new(tx) }
    }

    pub fn state(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.tx.subscribe()
    }

    /// Move to `to` if the current state allows it
    pub fn transition(&self, to: LifecycleState) -> Result<(), LifecycleError> {
        let mut result = Ok(());
        self.tx.send_if_modified(|state| {
            if state.can_become(to) {
                let from = std::mem::replace(state, to);
                crate::logger::log_state_change(from, to);
                true
            } else {
                result = Err(LifecycleError { from: *state, to });
                false
            }
        });
        result
    }

    /// Ask a starting or running server to stop
    ///
    /// Returns `false` when the server is already stopping or stopped.
    pub fn request_stop(&self) -> bool {
        self.transition(LifecycleState::Stopping).is_ok()
    }

    /// Resolves once a stop has been requested
    pub async fn stop_requested(&self) {
        let mut rx = self.subscribe();
        // Err only if the sender is gone, which cannot happen while `self` lives
        let _ = rx
            .wait_for(|state| matches!(state, LifecycleState::Stopping | LifecycleState::Stopped))
            .await;
    }
}

impl Default for ServerLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
