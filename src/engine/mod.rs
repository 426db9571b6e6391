//! The state machine engine.
//!
//! - `RegistrationTable`: event -> ordered candidate transitions, guards
//!   per `(event, transition)`, handlers per transition
//! - `StateMachine`: owns the current state and the table, looks up the
//!   first applicable transition and applies it
//! - `MachineConfig`: handler dispatch mode, registration policy, history
//!
//! # Lifecycle
//!
//! A machine starts in its initial state with no transition taken. Setup
//! registers transitions; running submits events. Under the default
//! `RegistrationPolicy::Open` the two may interleave, and a transition
//! registered late joins the end of its event's candidate list.
//! `RegistrationPolicy::SetupOnly` freezes the table on the first event.

mod config;
mod error;
mod machine;
mod table;

pub use config::{HandlerDispatch, MachineConfig, RegistrationPolicy};
pub use error::RegistrationError;
pub use machine::StateMachine;
pub use table::RegistrationTable;
