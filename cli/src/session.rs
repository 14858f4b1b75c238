use crate::generator::ScriptGenerator;
use crate::types::ProductDetails;
use std::sync::Arc;
use tokio::sync::watch;

/// Observable state of the current generation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Succeeded { script: String },
    Failed { message: String },
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Drives one generation attempt at a time from the caller's perspective and
/// publishes every state transition to its subscribers.
pub struct SessionController {
    generator: Arc<ScriptGenerator>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionController {
    pub fn new(generator: ScriptGenerator) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Idle);
        Self { generator: Arc::new(generator), state_tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Starts a generation attempt: the session moves to `Loading` before this
    /// returns, then settles in `Succeeded` or `Failed` once the attempt
    /// completes. Calling again while a previous attempt is in flight is
    /// permitted; the earlier request is not cancelled and whichever attempt
    /// settles last determines the visible state.
    pub fn start_generation(&self, details: ProductDetails) {
        let _ = self.state_tx.send(SessionState::Loading);
        let generator = self.generator.clone();
        let state_tx = self.state_tx.clone();
        tokio::spawn(async move {
            let state = match generator.generate(&details).await {
                Ok(script) => SessionState::Succeeded { script },
                Err(err) => SessionState::Failed { message: err.user_message().to_string() },
            };
            let _ = state_tx.send(state);
        });
    }
}
