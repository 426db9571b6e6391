//! Switchyard: an embeddable event-driven state machine engine
//!
//! A machine holds one current state and a table of transitions keyed by
//! event. Submitting an event picks the first registered transition that
//! leaves the current state and whose guard passes, runs its handler and
//! moves to its destination. Nothing else happens: no I/O, no persistence,
//! no nested states.
//!
//! # Core Concepts
//!
//! - **State / Event**: caller-defined, hashable alphabets (`state_enum!`,
//!   `event_enum!` derive them for plain enums)
//! - **Transition**: a `(from, to)` edge; handlers are keyed by it
//! - **Condition**: a zero-argument guard evaluated at submission time
//! - **Handler**: a zero-argument side effect, run inline or dispatched
//!   onto a `WorkQueue`
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use switchyard::builder::{on, StateMachineBuilder};
//! use switchyard::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Turnstile { Locked, Unlocked }
//! }
//!
//! event_enum! {
//!     enum Input { Coin, Push }
//! }
//!
//! let paid = Arc::new(AtomicBool::new(false));
//! let check = Arc::clone(&paid);
//!
//! let machine = StateMachineBuilder::new()
//!     .initial(Turnstile::Locked)
//!     .transitions_from(
//!         Turnstile::Locked,
//!         [on(Input::Coin)
//!             .to(Turnstile::Unlocked)
//!             .when(move || check.load(Ordering::SeqCst))],
//!     )
//!     .transitions_from(Turnstile::Unlocked, [on(Input::Push).to(Turnstile::Locked)])
//!     .build()
//!     .unwrap();
//!
//! assert!(!machine.submit_event(Input::Coin));
//! paid.store(true, Ordering::SeqCst);
//! assert!(machine.submit_event(Input::Coin));
//! assert_eq!(machine.current_state(), Turnstile::Unlocked);
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;
pub mod engine;

// Re-export commonly used types
pub use builder::{on, BuildError, Route, StateMachineBuilder};
pub use core::{Condition, Event, Handler, State, Transition};
pub use dispatch::{ThreadPool, WorkQueue};
pub use engine::{HandlerDispatch, MachineConfig, RegistrationError, StateMachine};
