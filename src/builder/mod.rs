//! Builder API for ergonomic machine construction.
//!
//! Routes describe `event -> destination [when guard] [run handler]`
//! groups for a source state; the builder and `add_transitions` compile
//! each route into one registration on the engine. The macros derive the
//! `State`/`Event` traits for plain enums.

pub mod error;
pub mod machine;
pub mod macros;
pub mod route;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use route::{on, Route, RouteStart};
