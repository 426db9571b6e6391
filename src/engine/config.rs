//! Machine configuration.

use serde::{Deserialize, Serialize};

/// How a taken transition's handler is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerDispatch {
    /// Run the handler to completion on the submitting thread, then advance.
    #[default]
    Inline,

    /// Schedule the handler on the work queue and advance immediately.
    ///
    /// `submit_event` does not wait for the handler, so the handler may
    /// observe a state that has already moved past its transition.
    Concurrent,
}

/// When registrations are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Registrations are legal at any time, including between events.
    #[default]
    Open,

    /// The table is frozen by the first submitted event.
    SetupOnly,
}

/// Tunables for a `StateMachine`.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```rust
/// use switchyard::engine::{HandlerDispatch, MachineConfig};
///
/// let config: MachineConfig = serde_json::from_str(r#"{"handler_dispatch": "concurrent"}"#).unwrap();
/// assert_eq!(config.handler_dispatch, HandlerDispatch::Concurrent);
/// assert!(!config.record_history);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub handler_dispatch: HandlerDispatch,
    pub registration: RegistrationPolicy,
    /// Keep an in-memory log of taken transitions.
    ///
    /// The log grows with every taken transition for the life of the
    /// machine unless `history_limit` caps it.
    pub record_history: bool,
    /// Most recent records kept when `record_history` is on.
    pub history_limit: Option<usize>,
    /// Worker count of the pool created when no work queue is supplied.
    pub worker_threads: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            handler_dispatch: HandlerDispatch::Inline,
            registration: RegistrationPolicy::Open,
            record_history: false,
            history_limit: None,
            worker_threads: 2,
        }
    }
}

impl MachineConfig {
    /// Inline dispatch with every other field defaulted.
    pub fn inline() -> Self {
        Self::default()
    }

    /// Concurrent dispatch with every other field defaulted.
    pub fn concurrent() -> Self {
        Self {
            handler_dispatch: HandlerDispatch::Concurrent,
            ..Self::default()
        }
    }

    pub fn with_registration(mut self, policy: RegistrationPolicy) -> Self {
        self.registration = policy;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Turn history on and keep at most `limit` records.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.record_history = true;
        self.history_limit = Some(limit);
        self
    }

    pub fn with_worker_threads(mut self, workers: usize) -> Self {
        self.worker_threads = workers;
        self
    }
}
