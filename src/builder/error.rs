//! Build errors for the machine builder.

use crate::engine::RegistrationError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition group rejected: {0}")]
    Registration(#[from] RegistrationError),
}
