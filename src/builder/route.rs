//! Declarative "on event, go to state" routes.
//!
//! A route is one `(event, destination, guard, handler)` group. A list of
//! routes sharing a source state compiles into one registration per route,
//! in the order written:
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use switchyard::builder::on;
//! use switchyard::engine::StateMachine;
//! use switchyard::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Step { Draft, Review, Published }
//! }
//!
//! event_enum! {
//!     enum Action { Submit }
//! }
//!
//! let approved = Arc::new(AtomicBool::new(true));
//! let flag = Arc::clone(&approved);
//!
//! let machine = StateMachine::new(Step::Draft);
//! machine.add_transitions(
//!     Step::Draft,
//!     [
//!         on(Action::Submit)
//!             .to(Step::Published)
//!             .when(move || flag.load(Ordering::SeqCst)),
//!         on(Action::Submit).to(Step::Review),
//!     ],
//! );
//!
//! assert!(machine.submit_event(Action::Submit));
//! assert_eq!(machine.current_state(), Step::Published);
//! ```

use crate::core::{Condition, Event, Handler, State, Transition};
use crate::engine::{RegistrationError, StateMachine};

/// Start a route for `event`. Finish it with [`RouteStart::to`].
pub fn on<E: Event>(event: E) -> RouteStart<E> {
    RouteStart { event }
}

/// A route that still needs its destination.
#[derive(Debug, Clone)]
pub struct RouteStart<E> {
    event: E,
}

impl<E: Event> RouteStart<E> {
    pub fn to<S: State>(self, state: S) -> Route<S, E> {
        Route {
            event: self.event,
            to: state,
            condition: None,
            handler: Handler::noop(),
        }
    }
}

/// One `event -> destination [when guard] [run handler]` group.
///
/// Without `.run(..)` the route registers a no-op handler, which still
/// takes the handler slot of its transition identity.
#[derive(Debug, Clone)]
pub struct Route<S, E> {
    event: E,
    to: S,
    condition: Option<Condition>,
    handler: Handler,
}

impl<S: State, E: Event> Route<S, E> {
    /// Guard the route.
    pub fn when(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Run `handler` when the route is taken.
    pub fn run(mut self, handler: impl Into<Handler>) -> Self {
        self.handler = handler.into();
        self
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn destination(&self) -> &S {
        &self.to
    }

    pub fn is_guarded(&self) -> bool {
        self.condition.is_some()
    }
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Register every route as a transition out of `from`, in order.
    ///
    /// Stops at the first refused route; routes before it stay registered.
    pub fn try_add_transitions(
        &self,
        from: S,
        routes: impl IntoIterator<Item = Route<S, E>>,
    ) -> Result<(), RegistrationError> {
        for route in routes {
            self.try_add_transition(
                Transition::new(from.clone(), route.to),
                route.event,
                route.condition,
                route.handler,
            )?;
        }
        Ok(())
    }

    /// Register every route as a transition out of `from`, in order.
    ///
    /// # Panics
    ///
    /// On the first route that [`StateMachine::add_transition`] would
    /// refuse.
    pub fn add_transitions(&self, from: S, routes: impl IntoIterator<Item = Route<S, E>>) {
        if let Err(err) = self.try_add_transitions(from, routes) {
            panic!("{err}");
        }
    }
}
