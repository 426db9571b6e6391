//! Core value types of the engine.
//!
//! This module holds the plain data the engine is built from:
//! - `State` and `Event` traits for the machine's alphabets
//! - `Transition` identities and `(event, transition)` registration keys
//! - `Condition` guards and `Handler` actions
//! - The opt-in transition history
//!
//! Nothing here owns behavior; the engine module does.

mod guard;
mod history;
mod state;
mod transition;

pub use guard::{Condition, Handler};
pub use history::{StateHistory, TransitionRecord};
pub use state::{Event, State};
pub use transition::{RegistrationKey, Transition};
