//! Door command sender.
//!
//! [`DoorCommandSender`] owns the per-instance request state (a `loading`
//! flag and a status line) and performs one endpoint call per invocation.
//! State is published over a [`watch`] channel so frontends can redraw as it
//! changes.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --send--> Sending --2xx--------> Success --send--> Sending ...
//!                   |
//!                   +--non-2xx/transport--> Failed --send--> Sending ...
//! ```
//!
//! `Sending` is the only state in which a send is rejected. Entering it is a
//! single check-and-set on the watch value, so two racing sends cannot both
//! reach the endpoint.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::api_client::{Command, DoorEndpoint};
use crate::error::SendError;
use crate::tracing::prelude::*;

/// Outcome shown on the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Empty,
    Sent(Command),
    Failed(SendError),
}

impl Status {
    pub fn is_empty(&self) -> bool {
        matches!(self, Status::Empty)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Empty => Ok(()),
            Status::Sent(command) => write!(f, "✓ Sent: {command}"),
            Status::Failed(err) => write!(f, "✗ Error: {err}"),
        }
    }
}

/// Observable state of a sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    /// True while a request is in flight.
    pub loading: bool,
    pub status: Status,
}

/// Position in the per-invocation lifecycle, derived from [`RequestState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
    Success,
    Failed,
}

impl RequestState {
    pub fn phase(&self) -> Phase {
        match (self.loading, &self.status) {
            (true, _) => Phase::Sending,
            (false, Status::Empty) => Phase::Idle,
            (false, Status::Sent(_)) => Phase::Success,
            (false, Status::Failed(_)) => Phase::Failed,
        }
    }

    /// Whether the Up/Down controls accept activation.
    pub fn controls_enabled(&self) -> bool {
        !self.loading
    }

    pub fn status_text(&self) -> String {
        self.status.to_string()
    }
}

/// What a call to [`DoorCommandSender::send`] ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Failed(SendError),
    /// Another send from this instance was still in flight; nothing was sent.
    Rejected,
}

/// Sends door commands and tracks the display state for one operator
/// surface.
///
/// Cloning yields another handle to the same state, which lets a frontend
/// move a handle into a spawned task while keeping one for rendering.
#[derive(Clone)]
pub struct DoorCommandSender {
    endpoint: Arc<dyn DoorEndpoint>,
    state: Arc<watch::Sender<RequestState>>,
}

impl DoorCommandSender {
    pub fn new(endpoint: Arc<dyn DoorEndpoint>) -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self {
            endpoint,
            state: Arc::new(state),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Send one command and record the result.
    ///
    /// Issues at most one request. If a send is already in flight this
    /// returns [`SendOutcome::Rejected`] without touching the state.
    pub async fn send(&self, command: Command) -> SendOutcome {
        let Some(mut finish) = self.begin() else {
            debug!(%command, "Send already in flight, ignoring");
            return SendOutcome::Rejected;
        };

        debug!(%command, "Sending door command");

        match self.endpoint.post_command(command).await {
            Ok(()) => {
                info!(%command, "Door command sent");
                finish.status = Status::Sent(command);
                SendOutcome::Sent
            }
            Err(err) => {
                warn!(%command, error = %err, "Door command failed");
                finish.status = Status::Failed(err.clone());
                SendOutcome::Failed(err)
            }
        }
    }

    // Enter `Sending` if idle: set loading and clear the old status in one
    // update.
    fn begin(&self) -> Option<FinishGuard<'_>> {
        let entered = self.state.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            state.loading = true;
            state.status = Status::Empty;
            true
        });

        entered.then(|| FinishGuard {
            state: &self.state,
            status: Status::Empty,
        })
    }
}

/// Leaves `Sending` when dropped, whichever way the send exits.
///
/// The final status and `loading = false` are published together. If the
/// send future is dropped mid-request the status stays empty.
struct FinishGuard<'a> {
    state: &'a watch::Sender<RequestState>,
    status: Status,
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        let status = std::mem::take(&mut self.status);
        self.state.send_modify(|state| {
            state.loading = false;
            state.status = status;
        });
    }
}
