//! Transition identity and registration keys.

use super::state::{Event, State};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge between two states.
///
/// A transition is identified by its `(from, to)` pair alone, never by the
/// event that triggers it. Two transitions are equal iff both endpoints are
/// equal. Fields are private so a transition cannot change after creation.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{State, Transition};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// let go = Transition::new(Light::Red, Light::Green);
/// assert_eq!(go, Transition::from((Light::Red, Light::Green)));
/// assert_eq!(go.to_string(), "Transition Red -> Green");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Transition<S> {
    from: S,
    to: S,
}

impl<S: State> Transition<S> {
    /// Create the edge `from -> to`.
    pub fn new(from: S, to: S) -> Self {
        Self { from, to }
    }

    /// Source state.
    pub fn from_state(&self) -> &S {
        &self.from
    }

    /// Destination state.
    pub fn to_state(&self) -> &S {
        &self.to
    }

    /// Whether this edge leaves `state`.
    pub fn starts_at(&self, state: &S) -> bool {
        self.from == *state
    }
}

impl<S: State> From<(S, S)> for Transition<S> {
    fn from((from, to): (S, S)) -> Self {
        Self::new(from, to)
    }
}

impl<S: State> fmt::Display for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transition {} -> {}", self.from.name(), self.to.name())
    }
}

/// Composite `(event, transition)` key.
///
/// Each key may be registered at most once per machine; it also addresses
/// the guard condition for that event/edge pair.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RegistrationKey<S, E> {
    pub event: E,
    pub transition: Transition<S>,
}

impl<S: State, E: Event> RegistrationKey<S, E> {
    pub fn new(event: E, transition: Transition<S>) -> Self {
        Self { event, transition }
    }
}

impl<S: State, E: Event> fmt::Display for RegistrationKey<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on event {}", self.transition, self.event.name())
    }
}
