//! Guard conditions and transition handlers.
//!
//! Both are zero-argument callables. Guards read whatever context the
//! consumer captured and answer yes/no; handlers perform the side effects
//! of a taken transition. Neither receives anything from the engine.

use std::fmt;
use std::sync::Arc;

/// Zero-argument predicate that gates a registered transition.
///
/// Conditions are evaluated on every lookup that reaches their transition,
/// so they must be cheap, non-blocking and safe to call repeatedly. They
/// are not required to be pure: reading shared consumer state is the
/// common case.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use switchyard::core::Condition;
///
/// let ready = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&ready);
/// let condition = Condition::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!condition.check());
/// ready.store(true, Ordering::SeqCst);
/// assert!(condition.check());
/// ```
#[derive(Clone)]
pub struct Condition {
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Condition {
    /// Create a condition from a predicate closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Condition {
            predicate: Arc::new(predicate),
        }
    }

    /// The condition used when a registration supplies none.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}

/// Side-effecting procedure run when a transition is taken.
///
/// Handlers may run on the submitting thread or on a work queue depending
/// on the machine's dispatch mode, so they must be `Send + Sync`.
#[derive(Clone)]
pub struct Handler {
    action: Arc<dyn Fn() + Send + Sync>,
}

impl Handler {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Handler {
            action: Arc::new(action),
        }
    }

    /// A handler with no effect.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Run the handler on the current thread.
    pub fn invoke(&self) {
        (self.action)()
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

impl<F> From<F> for Condition
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn from(predicate: F) -> Self {
        Condition::new(predicate)
    }
}

impl<F> From<F> for Handler
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(action: F) -> Self {
        Handler::new(action)
    }
}
