//! In-memory log of taken transitions.
//!
//! Recording is opt-in (`MachineConfig::record_history`). The log lives only
//! as long as the machine; nothing is persisted. Without a limit it grows by
//! one record per taken transition.

use super::state::{Event, State};
use super::transition::Transition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single taken transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord<S, E> {
    /// The edge that was taken
    pub transition: Transition<S>,
    /// The event that selected it
    pub event: E,
    /// When the state advanced
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of taken transitions.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use switchyard::core::{StateHistory, Transition, TransitionRecord};
/// use switchyard::{event_enum, state_enum};
///
/// state_enum! {
///     enum Phase { One, Two, Three }
/// }
///
/// event_enum! {
///     enum Tick { Next }
/// }
///
/// let mut history = StateHistory::new();
/// history.record(TransitionRecord {
///     transition: Transition::new(Phase::One, Phase::Two),
///     event: Tick::Next,
///     timestamp: Utc::now(),
/// });
/// history.record(TransitionRecord {
///     transition: Transition::new(Phase::Two, Phase::Three),
///     event: Tick::Next,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S, E> {
    records: Vec<TransitionRecord<S, E>>,
    /// Oldest records are dropped beyond this many.
    #[serde(default)]
    limit: Option<usize>,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            limit: None,
        }
    }

    /// History that keeps only the `limit` most recent records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: Vec::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Append a record, evicting the oldest ones past the limit.
    pub fn record(&mut self, record: TransitionRecord<S, E>) {
        self.records.push(record);
        if let Some(limit) = self.limit {
            if self.records.len() > limit {
                let excess = self.records.len() - limit;
                self.records.drain(..excess);
            }
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Get the path of states traversed.
    ///
    /// Returns the source of the first retained record, then the
    /// destination of every record in order. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.transition.from_state());
        }
        for record in &self.records {
            path.push(record.transition.to_state());
        }
        path
    }

    /// Time between the first and last recorded transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> &[TransitionRecord<S, E>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
