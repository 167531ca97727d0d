//! Session lifecycle: the one-time `initialize` handshake.
//!
//! The state machine is `Uninitialized -> Initializing -> Ready`. The first
//! caller that finds the session uninitialized becomes the leader of an
//! attempt and sends the handshake; every caller arriving while it is in
//! flight waits for that attempt's outcome instead of sending its own.
//!
//! A failed attempt returns the session to `Uninitialized` so that a later
//! call can try again; callers that were waiting on the failed attempt all
//! receive its error. If the leader's future is dropped mid-handshake the
//! attempt is abandoned the same way and one of the waiters takes over.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::dispatcher::RequestDispatcher;
use crate::error::McpResult;
use crate::messages::{
    Implementation, InitializeRequest, InitializeResponse, ProtocolVersion, ServerCapabilities,
    ServerInfo,
};

/// Method name of the handshake request.
pub const INITIALIZE_METHOD: &str = "initialize";

type Outcome = McpResult<Arc<InitializeResponse>>;

#[derive(Debug)]
enum SessionState {
    Uninitialized,
    Initializing(watch::Receiver<Option<Outcome>>),
    Ready(Arc<InitializeResponse>),
}

enum Role {
    Ready(Arc<InitializeResponse>),
    Wait(watch::Receiver<Option<Outcome>>),
    Lead(watch::Sender<Option<Outcome>>),
}

/// Handshake state of one client.
#[derive(Debug)]
pub struct Session {
    state: Mutex<SessionState>,
    client_info: Implementation,
}

impl Session {
    /// Create an uninitialized session that identifies as `client_info`.
    pub fn new(client_info: Implementation) -> Self {
        Self {
            state: Mutex::new(SessionState::Uninitialized),
            client_info,
        }
    }

    /// Identity sent in the handshake.
    pub fn client_info(&self) -> &Implementation {
        &self.client_info
    }

    /// Make sure the handshake has completed, performing it if needed.
    ///
    /// Once the session is ready this returns the cached result without any
    /// network I/O.
    pub async fn initialize(&self, dispatcher: &RequestDispatcher) -> Outcome {
        loop {
            let role = {
                let mut state = self.lock();
                match &*state {
                    SessionState::Ready(result) => Role::Ready(result.clone()),
                    SessionState::Initializing(rx) => Role::Wait(rx.clone()),
                    SessionState::Uninitialized => {
                        let (tx, rx) = watch::channel(None);
                        *state = SessionState::Initializing(rx);
                        Role::Lead(tx)
                    }
                }
            };

            match role {
                Role::Ready(result) => return Ok(result),
                Role::Lead(tx) => return self.lead(dispatcher, tx).await,
                Role::Wait(mut rx) => {
                    debug!("Waiting for in-flight initialization");
                    let outcome = match rx.wait_for(Option::is_some).await {
                        Ok(outcome) => Option::clone(&outcome),
                        // The leader was dropped; race for leadership again.
                        Err(_) => None,
                    };
                    if let Some(outcome) = outcome {
                        return outcome;
                    }
                }
            }
        }
    }

    async fn lead(
        &self,
        dispatcher: &RequestDispatcher,
        tx: watch::Sender<Option<Outcome>>,
    ) -> Outcome {
        let attempt = Attempt {
            state: &self.state,
            tx,
            finished: false,
        };

        let request = InitializeRequest::new(ProtocolVersion::V2024_11_05, self.client_info.clone());
        debug!(
            "Initializing MCP session as {} {}",
            self.client_info.name, self.client_info.version
        );

        let outcome = match dispatcher.encode_params(&request) {
            Ok(params) => dispatcher
                .call::<InitializeResponse>(INITIALIZE_METHOD, Some(params))
                .await
                .map(Arc::new),
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(result) => {
                if !result.protocol_version.is_supported() {
                    warn!(
                        "Server negotiated unknown protocol version {}",
                        result.protocol_version
                    );
                }
                info!(
                    "MCP session established with {} {} (protocol {})",
                    result.server_info.name, result.server_info.version, result.protocol_version
                );
            }
            Err(err) => warn!("MCP initialization failed: {}", err),
        }

        attempt.finish(&outcome);
        outcome
    }

    /// Whether the handshake has completed successfully.
    pub fn is_ready(&self) -> bool {
        matches!(&*self.lock(), SessionState::Ready(_))
    }

    /// Cached handshake result, once ready.
    pub fn result(&self) -> Option<Arc<InitializeResponse>> {
        match &*self.lock() {
            SessionState::Ready(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Server identity, once ready.
    pub fn server_info(&self) -> Option<ServerInfo> {
        self.result().map(|result| result.server_info.clone())
    }

    /// Server capabilities, once ready.
    pub fn capabilities(&self) -> Option<ServerCapabilities> {
        self.result().map(|result| result.capabilities.clone())
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One in-flight handshake attempt owned by its leader.
///
/// Dropping it unfinished returns the session to `Uninitialized` before the
/// sender is dropped, so woken waiters never observe the abandoned attempt.
struct Attempt<'a> {
    state: &'a Mutex<SessionState>,
    tx: watch::Sender<Option<Outcome>>,
    finished: bool,
}

impl Attempt<'_> {
    fn finish(mut self, outcome: &Outcome) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = match outcome {
                Ok(result) => SessionState::Ready(result.clone()),
                Err(_) => SessionState::Uninitialized,
            };
        }
        self.tx.send_replace(Some(outcome.clone()));
        self.finished = true;
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("MCP initialization attempt abandoned");
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = SessionState::Uninitialized;
        }
    }
}
