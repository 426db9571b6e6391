//! Registration errors.

use thiserror::Error;

/// Errors raised while populating a machine's registration table.
///
/// Both variants describe setup bugs. `StateMachine::add_transition`
/// turns them into panics; `try_add_transition` hands them back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{transition} on event {event} - this transition is already defined")]
    DuplicateTransition { transition: String, event: String },

    #[error("{transition} on event {event} - registration is closed once events are submitted")]
    RegistrationClosed { transition: String, event: String },
}
