//! State and Event traits for machine alphabets.
//!
//! Both are opaque, caller-defined values. The engine only compares and
//! hashes them; it never inspects what they mean.

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are usually fieldless enums. Equality and hashing are the only
/// operations the engine relies on; no ordering is implied.
///
/// # Required Traits
///
/// - `Clone`: the current state is handed out by value
/// - `Eq` + `Hash`: states are part of table keys
/// - `Debug`: states appear in log fields and panic messages
/// - `Send` + `Sync`: machines are shared across threads
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum DoorState {
///     Open,
///     Closed,
///     Locked,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Locked => "Locked",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Locked.name(), "Locked");
/// assert!(!DoorState::Locked.is_final());
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Purely informational: the engine does not refuse events in a final
    /// state, it simply finds no registered transition out of it.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Trait for events fed into a state machine.
///
/// Events are compared and hashed to find the transitions registered for
/// them. An event may expose a payload for the consumer's convenience; the
/// engine passes it through untouched and never looks at it.
///
/// # Example
///
/// ```rust
/// use switchyard::core::Event;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum DoorEvent {
///     Push,
///     Turn,
/// }
///
/// impl Event for DoorEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Push => "Push",
///             Self::Turn => "Turn",
///         }
///     }
/// }
///
/// assert!(DoorEvent::Push.payload().is_none());
/// ```
pub trait Event: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;

    /// Opaque payload carried alongside the event.
    ///
    /// Default implementation returns `None`.
    fn payload(&self) -> Option<&(dyn Any + Send + Sync)> {
        None
    }
}
