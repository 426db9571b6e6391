//! Event-driven state machine.

use crate::core::{
    Condition, Event, Handler, RegistrationKey, State, StateHistory, Transition, TransitionRecord,
};
use crate::dispatch::{ThreadPool, WorkQueue};
use crate::engine::config::{HandlerDispatch, MachineConfig, RegistrationPolicy};
use crate::engine::error::RegistrationError;
use crate::engine::table::RegistrationTable;
use chrono::Utc;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// State machine driven by submitted events.
///
/// The machine owns its current state and registration table. All methods
/// take `&self`; wrap the machine in an `Arc` to let handlers or other
/// threads reach it.
///
/// # Concurrency
///
/// Every call runs under one re-entrant lock, so `submit_event` calls from
/// different threads are serialized: lookup, guard evaluation, inline
/// handler execution and the state write form one critical section.
/// Calls made from the same thread while that section is open (a guard
/// reading `current_state`, an inline handler submitting another event)
/// do not deadlock. A nested submission from an inline handler is matched
/// against the source state of the in-flight transition, and the outer
/// transition's destination is written after it returns.
///
/// # Example
///
/// ```rust
/// use switchyard::engine::StateMachine;
/// use switchyard::core::Handler;
/// use switchyard::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door { Closed, Open }
/// }
///
/// event_enum! {
///     enum Action { Push, Pull }
/// }
///
/// let machine = StateMachine::new(Door::Closed);
/// machine.add_transition((Door::Closed, Door::Open), Action::Push, None, Handler::noop());
///
/// assert!(!machine.submit_event(Action::Pull));
/// assert!(machine.submit_event(Action::Push));
/// assert_eq!(machine.current_state(), Door::Open);
/// ```
pub struct StateMachine<S: State, E: Event> {
    inner: ReentrantMutex<RefCell<Inner<S, E>>>,
    config: MachineConfig,
    queue: Option<Arc<dyn WorkQueue>>,
}

struct Inner<S: State, E: Event> {
    current: S,
    table: RegistrationTable<S, E>,
    /// Set by the first submitted event.
    running: bool,
    history: Option<StateHistory<S, E>>,
}

type InnerGuard<'a, S, E> = ReentrantMutexGuard<'a, RefCell<Inner<S, E>>>;

impl<S: State, E: Event> StateMachine<S, E> {
    /// Create a machine in `initial` with the default configuration
    /// (inline dispatch, open registration).
    pub fn new(initial: S) -> Self {
        Self::build(initial, MachineConfig::default(), None)
    }

    /// Create a machine with `config`.
    ///
    /// Concurrent dispatch gets a private `ThreadPool` of
    /// `config.worker_threads` workers.
    ///
    /// # Panics
    ///
    /// When concurrent dispatch is configured and the OS refuses to spawn
    /// a worker thread. Use [`ThreadPool::try_new`] with
    /// [`StateMachine::with_work_queue`] to handle that case.
    pub fn with_config(initial: S, config: MachineConfig) -> Self {
        let queue: Option<Arc<dyn WorkQueue>> = match config.handler_dispatch {
            HandlerDispatch::Concurrent => Some(Arc::new(ThreadPool::new(config.worker_threads))),
            HandlerDispatch::Inline => None,
        };
        Self::build(initial, config, queue)
    }

    /// Create a machine that dispatches handlers onto `queue` when
    /// `config.handler_dispatch` is concurrent.
    ///
    /// Under inline dispatch the queue is not kept and handlers run on the
    /// submitting thread.
    pub fn with_work_queue(initial: S, config: MachineConfig, queue: Arc<dyn WorkQueue>) -> Self {
        Self::build(initial, config, Some(queue))
    }

    fn build(initial: S, config: MachineConfig, queue: Option<Arc<dyn WorkQueue>>) -> Self {
        let history = config
            .record_history
            .then(|| match config.history_limit {
                Some(limit) => StateHistory::bounded(limit),
                None => StateHistory::new(),
            });
        let queue = match config.handler_dispatch {
            HandlerDispatch::Concurrent => queue,
            HandlerDispatch::Inline => None,
        };
        Self {
            inner: ReentrantMutex::new(RefCell::new(Inner {
                current: initial,
                table: RegistrationTable::new(),
                running: false,
                history,
            })),
            config,
            queue,
        }
    }

    /// Register `transition` for `event`, returning an error instead of
    /// panicking when the registration is refused.
    pub fn try_add_transition(
        &self,
        transition: impl Into<Transition<S>>,
        event: E,
        condition: Option<Condition>,
        handler: impl Into<Handler>,
    ) -> Result<(), RegistrationError> {
        let transition = transition.into();
        let guard = self.inner.lock();
        let mut inner = guard.borrow_mut();

        if inner.running && self.config.registration == RegistrationPolicy::SetupOnly {
            return Err(RegistrationError::RegistrationClosed {
                transition: transition.to_string(),
                event: event.name().to_string(),
            });
        }

        inner
            .table
            .register(transition, event, condition, handler.into())
    }

    /// Register `transition` for `event`.
    ///
    /// `condition` defaults to always-true. The handler is stored under the
    /// transition identity and replaces any handler an earlier registration
    /// of the same `(from, to)` pair left behind.
    ///
    /// # Panics
    ///
    /// Registering the same `(event, transition)` twice is a setup bug and
    /// panics, as does registering after the first event under
    /// `RegistrationPolicy::SetupOnly`.
    pub fn add_transition(
        &self,
        transition: impl Into<Transition<S>>,
        event: E,
        condition: Option<Condition>,
        handler: impl Into<Handler>,
    ) {
        if let Err(err) = self.try_add_transition(transition, event, condition, handler) {
            panic!("{err}");
        }
    }

    /// Register the edge `from -> to` for `event`.
    ///
    /// # Panics
    ///
    /// Same as [`StateMachine::add_transition`].
    pub fn add_transition_between(
        &self,
        from: S,
        to: S,
        event: E,
        condition: Option<Condition>,
        handler: impl Into<Handler>,
    ) {
        self.add_transition(Transition::new(from, to), event, condition, handler);
    }

    /// Register a prebuilt `(event, transition)` key.
    ///
    /// # Panics
    ///
    /// Same as [`StateMachine::add_transition`].
    pub fn add_transition_key(
        &self,
        key: RegistrationKey<S, E>,
        condition: Option<Condition>,
        handler: impl Into<Handler>,
    ) {
        self.add_transition(key.transition, key.event, condition, handler);
    }

    /// The first registered transition for `event` that leaves the current
    /// state and whose guard passes right now.
    ///
    /// Candidates are scanned in registration order and guards are
    /// evaluated lazily; the first passing one wins.
    pub fn find_applicable_transition(&self, event: &E) -> Option<Transition<S>> {
        let guard = self.inner.lock();
        Self::lookup(&guard, event)
    }

    fn lookup(guard: &InnerGuard<'_, S, E>, event: &E) -> Option<Transition<S>> {
        // Snapshot first so guards may call back into the machine.
        let candidates = {
            let inner = guard.borrow();
            inner.table.candidates(event, &inner.current)
        };
        candidates
            .into_iter()
            .find(|(_, condition)| condition.check())
            .map(|(transition, _)| transition)
    }

    /// Feed `event` to the machine.
    ///
    /// Returns `false`, with no state change and no handler call, when no
    /// registered transition applies. Otherwise runs (or schedules) the
    /// winning transition's handler, moves to its destination and returns
    /// `true`.
    pub fn submit_event(&self, event: E) -> bool {
        let guard = self.inner.lock();
        guard.borrow_mut().running = true;

        let Some(transition) = Self::lookup(&guard, &event) else {
            let inner = guard.borrow();
            trace!(
                state = inner.current.name(),
                event = event.name(),
                "no applicable transition"
            );
            return false;
        };

        let handler = guard.borrow().table.handler(&transition);
        if let Some(handler) = handler {
            self.run_handler(handler);
        }

        let mut inner = guard.borrow_mut();
        inner.current = transition.to_state().clone();
        debug!(
            from = transition.from_state().name(),
            to = transition.to_state().name(),
            event = event.name(),
            dispatch = ?self.config.handler_dispatch,
            "transition taken"
        );
        if let Some(history) = inner.history.as_mut() {
            history.record(TransitionRecord {
                transition,
                event,
                timestamp: Utc::now(),
            });
        }
        true
    }

    fn run_handler(&self, handler: Handler) {
        match (self.config.handler_dispatch, &self.queue) {
            (HandlerDispatch::Inline, _) => handler.invoke(),
            (HandlerDispatch::Concurrent, Some(queue)) => {
                queue.dispatch(Box::new(move || handler.invoke()));
            }
            // Every constructor pairs concurrent dispatch with a queue.
            (HandlerDispatch::Concurrent, None) => {
                warn!("concurrent dispatch without a work queue; running handler inline");
                handler.invoke();
            }
        }
    }

    /// Current state (a clone; pure read).
    pub fn current_state(&self) -> S {
        self.inner.lock().borrow().current.clone()
    }

    /// Check if the current state is final.
    pub fn is_final(&self) -> bool {
        self.inner.lock().borrow().current.is_final()
    }

    /// Whether at least one event has been submitted.
    pub fn is_running(&self) -> bool {
        self.inner.lock().borrow().running
    }

    /// Transitions registered for `event`, in registration order.
    pub fn transitions_for(&self, event: &E) -> Vec<Transition<S>> {
        self.inner.lock().borrow().table.transitions_for(event).to_vec()
    }

    pub fn is_registered(&self, event: &E, transition: &Transition<S>) -> bool {
        let key = RegistrationKey::new(event.clone(), transition.clone());
        self.inner.lock().borrow().table.contains(&key)
    }

    /// Number of `(event, transition)` registrations.
    pub fn registration_count(&self) -> usize {
        self.inner.lock().borrow().table.len()
    }

    /// Snapshot of taken transitions, when history recording is enabled.
    pub fn history(&self) -> Option<StateHistory<S, E>> {
        self.inner.lock().borrow().history.clone()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Weak;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        S0,
        S1,
        S2,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::S0 => "S0",
                Self::S1 => "S1",
                Self::S2 => "S2",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::S2)
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestEvent {
        E1,
        E2,
        E3,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::E1 => "E1",
                Self::E2 => "E2",
                Self::E3 => "E3",
            }
        }
    }

    fn counting_handler(counter: &Arc<AtomicUsize>) -> Handler {
        let counter = Arc::clone(counter);
        Handler::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn initial_state_is_current() {
        let machine: StateMachine<TestState, TestEvent> = StateMachine::new(TestState::S1);

        assert_eq!(machine.current_state(), TestState::S1);
        assert!(!machine.is_running());
        assert!(!machine.is_final());
    }

    #[test]
    fn matching_event_advances_state() {
        let calls = Arc::new(AtomicUsize::new(0));
        let machine = StateMachine::new(TestState::S0);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            counting_handler(&calls),
        );

        assert!(machine.submit_event(TestEvent::E1));
        assert_eq!(machine.current_state(), TestState::S1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unmatched_event_is_a_no_op() {
        let calls = Arc::new(AtomicUsize::new(0));
        let machine = StateMachine::new(TestState::S0);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            counting_handler(&calls),
        );

        assert!(!machine.submit_event(TestEvent::E3));
        assert_eq!(machine.current_state(), TestState::S0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn lookup_skips_transitions_from_other_states() {
        let machine = StateMachine::new(TestState::S1);
        machine.add_transition_between(
            TestState::S0,
            TestState::S2,
            TestEvent::E1,
            None,
            Handler::noop(),
        );
        machine.add_transition_between(
            TestState::S1,
            TestState::S0,
            TestEvent::E1,
            None,
            Handler::noop(),
        );

        assert_eq!(
            machine.find_applicable_transition(&TestEvent::E1),
            Some(Transition::new(TestState::S1, TestState::S0))
        );
    }

    #[test]
    fn find_applicable_transition_has_no_side_effects() {
        let calls = Arc::new(AtomicUsize::new(0));
        let machine = StateMachine::new(TestState::S0);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            counting_handler(&calls),
        );

        assert!(machine.find_applicable_transition(&TestEvent::E1).is_some());
        assert_eq!(machine.current_state(), TestState::S0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!machine.is_running());
    }

    #[test]
    fn guards_are_short_circuited_in_registration_order() {
        let second_checked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&second_checked);

        let machine = StateMachine::new(TestState::S0);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            Some(Condition::always()),
            Handler::noop(),
        );
        machine.add_transition(
            (TestState::S0, TestState::S2),
            TestEvent::E1,
            Some(Condition::new(move || {
                flag.store(true, Ordering::SeqCst);
                true
            })),
            Handler::noop(),
        );

        assert!(machine.submit_event(TestEvent::E1));
        assert_eq!(machine.current_state(), TestState::S1);
        assert!(!second_checked.load(Ordering::SeqCst));
    }

    #[test]
    #[should_panic(expected = "this transition is already defined")]
    fn duplicate_registration_panics() {
        let machine: StateMachine<TestState, TestEvent> = StateMachine::new(TestState::S0);
        machine.add_transition((TestState::S0, TestState::S1), TestEvent::E1, None, Handler::noop());
        machine.add_transition((TestState::S0, TestState::S1), TestEvent::E1, None, Handler::noop());
    }

    #[test]
    fn duplicate_key_registration_is_reported() {
        let machine: StateMachine<TestState, TestEvent> = StateMachine::new(TestState::S0);
        let key = RegistrationKey::new(TestEvent::E1, Transition::new(TestState::S0, TestState::S1));
        machine.add_transition_key(key.clone(), None, Handler::noop());

        let result = machine.try_add_transition(key.transition, key.event, None, Handler::noop());
        assert!(matches!(
            result,
            Err(RegistrationError::DuplicateTransition { .. })
        ));
        assert_eq!(machine.registration_count(), 1);
    }

    #[test]
    fn open_policy_allows_registration_between_events() {
        let machine = StateMachine::new(TestState::S0);
        machine.add_transition((TestState::S0, TestState::S1), TestEvent::E1, None, Handler::noop());
        assert!(machine.submit_event(TestEvent::E1));

        machine.add_transition((TestState::S1, TestState::S2), TestEvent::E2, None, Handler::noop());
        assert!(machine.submit_event(TestEvent::E2));
        assert!(machine.is_final());
    }

    #[test]
    fn setup_only_policy_closes_registration() {
        let config = MachineConfig::default().with_registration(RegistrationPolicy::SetupOnly);
        let machine = StateMachine::with_config(TestState::S0, config);
        machine.add_transition((TestState::S0, TestState::S1), TestEvent::E1, None, Handler::noop());

        // A rejected event still ends the setup phase.
        assert!(!machine.submit_event(TestEvent::E2));

        let result = machine.try_add_transition(
            (TestState::S1, TestState::S2),
            TestEvent::E2,
            None,
            Handler::noop(),
        );
        assert_eq!(
            result,
            Err(RegistrationError::RegistrationClosed {
                transition: "Transition S1 -> S2".to_string(),
                event: "E2".to_string(),
            })
        );
    }

    #[test]
    fn inline_handler_runs_before_state_advances() {
        let machine = Arc::new(StateMachine::new(TestState::S0));
        let observed = Arc::new(parking_lot::Mutex::new(None));

        let weak: Weak<StateMachine<TestState, TestEvent>> = Arc::downgrade(&machine);
        let seen = Arc::clone(&observed);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            Handler::new(move || {
                if let Some(machine) = weak.upgrade() {
                    *seen.lock() = Some(machine.current_state());
                }
            }),
        );

        assert!(machine.submit_event(TestEvent::E1));
        assert_eq!(*observed.lock(), Some(TestState::S0));
        assert_eq!(machine.current_state(), TestState::S1);
    }

    #[test]
    fn reentrant_inline_submission_sees_source_state() {
        let machine = Arc::new(StateMachine::new(TestState::S0));
        let nested = Arc::new(parking_lot::Mutex::new(None));

        let weak = Arc::downgrade(&machine);
        let result = Arc::clone(&nested);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            Handler::new(move || {
                if let Some(machine) = weak.upgrade() {
                    *result.lock() = Some(machine.submit_event(TestEvent::E2));
                }
            }),
        );
        machine.add_transition((TestState::S0, TestState::S2), TestEvent::E2, None, Handler::noop());

        assert!(machine.submit_event(TestEvent::E1));
        assert_eq!(*nested.lock(), Some(true));
        // The outer transition's destination is written last.
        assert_eq!(machine.current_state(), TestState::S1);
    }

    #[test]
    fn guard_may_read_current_state() {
        let machine = Arc::new(StateMachine::new(TestState::S0));
        let weak = Arc::downgrade(&machine);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            Some(Condition::new(move || {
                weak.upgrade()
                    .map(|m| m.current_state() == TestState::S0)
                    .unwrap_or(false)
            })),
            Handler::noop(),
        );

        assert!(machine.submit_event(TestEvent::E1));
    }

    #[test]
    fn concurrent_dispatch_advances_without_waiting() {
        let pool = Arc::new(ThreadPool::new(1));
        let machine = StateMachine::with_work_queue(
            TestState::S0,
            MachineConfig::concurrent(),
            Arc::clone(&pool) as Arc<dyn WorkQueue>,
        );
        let (release_tx, release_rx) = crossbeam::channel::bounded::<()>(0);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            Handler::new(move || {
                let _ = release_rx.recv();
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(machine.submit_event(TestEvent::E1));
        // Handler is still parked, state has already moved.
        assert_eq!(machine.current_state(), TestState::S1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        release_tx.send(()).unwrap();
        pool.wait_idle();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_handler_observes_advanced_state() {
        let pool = Arc::new(ThreadPool::new(1));
        let machine = Arc::new(StateMachine::with_work_queue(
            TestState::S0,
            MachineConfig::concurrent(),
            Arc::clone(&pool) as Arc<dyn WorkQueue>,
        ));
        let observed = Arc::new(parking_lot::Mutex::new(None));

        let weak = Arc::downgrade(&machine);
        let seen = Arc::clone(&observed);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            Handler::new(move || {
                if let Some(machine) = weak.upgrade() {
                    *seen.lock() = Some(machine.current_state());
                }
            }),
        );

        assert!(machine.submit_event(TestEvent::E1));
        pool.wait_idle();
        assert_eq!(*observed.lock(), Some(TestState::S1));
    }

    #[test]
    fn with_config_creates_default_pool_for_concurrent_dispatch() {
        let machine: StateMachine<TestState, TestEvent> =
            StateMachine::with_config(TestState::S0, MachineConfig::concurrent());
        assert!(machine.queue.is_some());

        let inline: StateMachine<TestState, TestEvent> =
            StateMachine::with_config(TestState::S0, MachineConfig::inline());
        assert!(inline.queue.is_none());
    }

    struct CountingQueue {
        dispatched: AtomicUsize,
    }

    impl WorkQueue for CountingQueue {
        fn dispatch(&self, job: crate::dispatch::Job) {
            self.dispatched.fetch_add(1, Ordering::SeqCst);
            job();
        }
    }

    #[test]
    fn inline_config_ignores_supplied_queue() {
        let queue = Arc::new(CountingQueue {
            dispatched: AtomicUsize::new(0),
        });
        let machine = StateMachine::with_work_queue(
            TestState::S0,
            MachineConfig::inline(),
            Arc::clone(&queue) as Arc<dyn WorkQueue>,
        );
        let caller = std::thread::current().id();
        let ran_on = Arc::new(parking_lot::Mutex::new(None));
        let seen = Arc::clone(&ran_on);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            Handler::new(move || {
                *seen.lock() = Some(std::thread::current().id());
            }),
        );

        assert!(machine.queue.is_none());
        assert!(machine.submit_event(TestEvent::E1));
        assert_eq!(*ran_on.lock(), Some(caller));
        assert_eq!(queue.dispatched.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn concurrent_config_routes_handlers_through_supplied_queue() {
        let queue = Arc::new(CountingQueue {
            dispatched: AtomicUsize::new(0),
        });
        let machine = StateMachine::with_work_queue(
            TestState::S0,
            MachineConfig::concurrent(),
            Arc::clone(&queue) as Arc<dyn WorkQueue>,
        );
        let calls = Arc::new(AtomicUsize::new(0));
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            counting_handler(&calls),
        );

        assert!(machine.submit_event(TestEvent::E1));
        assert_eq!(queue.dispatched.load(Ordering::SeqCst), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn history_records_taken_transitions_when_enabled() {
        let config = MachineConfig::default().with_history(true);
        let machine = StateMachine::with_config(TestState::S0, config);
        machine.add_transition((TestState::S0, TestState::S1), TestEvent::E1, None, Handler::noop());
        machine.add_transition((TestState::S1, TestState::S2), TestEvent::E2, None, Handler::noop());

        machine.submit_event(TestEvent::E1);
        machine.submit_event(TestEvent::E3);
        machine.submit_event(TestEvent::E2);

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![&TestState::S0, &TestState::S1, &TestState::S2]
        );
        assert_eq!(history.records()[1].event, TestEvent::E2);
    }

    #[test]
    fn history_limit_caps_recorded_transitions() {
        let config = MachineConfig::default().with_history_limit(3);
        let machine = StateMachine::with_config(TestState::S0, config);
        machine.add_transition((TestState::S0, TestState::S1), TestEvent::E1, None, Handler::noop());
        machine.add_transition((TestState::S1, TestState::S0), TestEvent::E1, None, Handler::noop());

        for _ in 0..10 {
            assert!(machine.submit_event(TestEvent::E1));
        }

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.get_path(),
            vec![&TestState::S1, &TestState::S0, &TestState::S1, &TestState::S0]
        );
    }

    #[test]
    fn history_is_absent_by_default() {
        let machine: StateMachine<TestState, TestEvent> = StateMachine::new(TestState::S0);
        assert!(machine.history().is_none());
    }

    #[test]
    fn inline_handler_panic_leaves_state_unchanged() {
        let machine = StateMachine::new(TestState::S0);
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            Handler::new(|| panic!("handler failure")),
        );

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            machine.submit_event(TestEvent::E1)
        }));

        assert!(result.is_err());
        assert_eq!(machine.current_state(), TestState::S0);
    }

    #[test]
    fn concurrent_submissions_are_serialized() {
        let machine = Arc::new(StateMachine::new(TestState::S0));
        let taken = Arc::new(AtomicUsize::new(0));
        machine.add_transition(
            (TestState::S0, TestState::S1),
            TestEvent::E1,
            None,
            counting_handler(&taken),
        );

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let machine = Arc::clone(&machine);
                std::thread::spawn(move || machine.submit_event(TestEvent::E1))
            })
            .collect();
        let wins = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(taken.load(Ordering::SeqCst), 1);
        assert_eq!(machine.current_state(), TestState::S1);
    }
}
