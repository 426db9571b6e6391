//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::route::Route;
use crate::core::{Event, State};
use crate::dispatch::WorkQueue;
use crate::engine::{MachineConfig, StateMachine};
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
///
/// Groups are registered in the order they were added, so the builder
/// yields exactly the table that the equivalent sequence of
/// `add_transitions` calls would.
pub struct StateMachineBuilder<S: State, E: Event> {
    initial: Option<S>,
    config: MachineConfig,
    queue: Option<Arc<dyn WorkQueue>>,
    groups: Vec<(S, Vec<Route<S, E>>)>,
}

impl<S: State, E: Event> StateMachineBuilder<S, E> {
    pub fn new() -> Self {
        Self {
            initial: None,
            config: MachineConfig::default(),
            queue: None,
            groups: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Queue used for concurrent handler dispatch.
    pub fn work_queue(mut self, queue: Arc<dyn WorkQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Add a group of routes leaving `from`.
    pub fn transitions_from(
        mut self,
        from: S,
        routes: impl IntoIterator<Item = Route<S, E>>,
    ) -> Self {
        self.groups.push((from, routes.into_iter().collect()));
        self
    }

    /// Add a single route leaving `from`.
    pub fn transition(self, from: S, route: Route<S, E>) -> Self {
        self.transitions_from(from, [route])
    }

    /// Build the state machine.
    /// Returns an error if the initial state is missing or a route collides
    /// with an earlier one.
    pub fn build(self) -> Result<StateMachine<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let machine = match self.queue {
            Some(queue) => StateMachine::with_work_queue(initial, self.config, queue),
            None => StateMachine::with_config(initial, self.config),
        };
        for (from, routes) in self.groups {
            machine.try_add_transitions(from, routes)?;
        }

        Ok(machine)
    }
}

impl<S: State, E: Event> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
