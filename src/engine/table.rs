//! Registration table: which transitions each event may trigger.

use crate::core::{Condition, Event, Handler, RegistrationKey, State, Transition};
use crate::engine::error::RegistrationError;
use std::collections::HashMap;
use tracing::debug;

/// The set of `(event, transition, guard, handler)` associations of a machine.
///
/// Three maps with different keys:
/// - event -> transitions, in registration order (the lookup tie-break)
/// - `(event, transition)` -> guard condition
/// - transition -> handler, so a later registration of the same
///   `(from, to)` pair under another event replaces the earlier handler
pub struct RegistrationTable<S: State, E: Event> {
    transitions: HashMap<E, Vec<Transition<S>>>,
    conditions: HashMap<RegistrationKey<S, E>, Condition>,
    handlers: HashMap<Transition<S>, Handler>,
}

impl<S: State, E: Event> RegistrationTable<S, E> {
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            conditions: HashMap::new(),
            handlers: HashMap::new(),
        }
    }

    /// Register `transition` as a candidate for `event`.
    ///
    /// A missing condition is stored as always-true. Registering the same
    /// `(event, transition)` twice fails and leaves the table untouched.
    pub fn register(
        &mut self,
        transition: Transition<S>,
        event: E,
        condition: Option<Condition>,
        handler: Handler,
    ) -> Result<(), RegistrationError> {
        let key = RegistrationKey::new(event, transition.clone());
        if self.conditions.contains_key(&key) {
            return Err(RegistrationError::DuplicateTransition {
                transition: key.transition.to_string(),
                event: key.event.name().to_string(),
            });
        }

        debug!(
            from = transition.from_state().name(),
            to = transition.to_state().name(),
            event = key.event.name(),
            guarded = condition.is_some(),
            "registering transition"
        );

        self.transitions
            .entry(key.event.clone())
            .or_default()
            .push(transition.clone());
        self.conditions
            .insert(key, condition.unwrap_or_else(Condition::always));

        if self.handlers.insert(transition.clone(), handler).is_some() {
            debug!(%transition, "handler replaced by later registration");
        }

        Ok(())
    }

    /// Transitions registered for `event`, in registration order.
    pub fn transitions_for(&self, event: &E) -> &[Transition<S>] {
        self.transitions
            .get(event)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Transitions for `event` leaving `current`, paired with their guards,
    /// in registration order. Guards are not evaluated here.
    pub fn candidates(&self, event: &E, current: &S) -> Vec<(Transition<S>, Condition)> {
        self.transitions_for(event)
            .iter()
            .filter(|t| t.starts_at(current))
            .map(|t| {
                let key = RegistrationKey::new(event.clone(), t.clone());
                let condition = self.conditions.get(&key).cloned().unwrap_or_default();
                (t.clone(), condition)
            })
            .collect()
    }

    /// Handler stored for a transition identity.
    pub fn handler(&self, transition: &Transition<S>) -> Option<Handler> {
        self.handlers.get(transition).cloned()
    }

    pub fn contains(&self, key: &RegistrationKey<S, E>) -> bool {
        self.conditions.contains_key(key)
    }

    /// Number of `(event, transition)` registrations.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<S: State, E: Event> Default for RegistrationTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
