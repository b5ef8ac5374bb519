//! Fixture tooling for guardalloc's fatal paths.
//!
//! The aborting paths cannot run inside a test process, so each fatal
//! scenario is executed by the `fixture` binary in a child process and
//! judged from the outside: the exit status, the stderr diagnostic, and the
//! structured stdout records emitted around the fatal point.

pub mod record;
pub mod scenario;

pub use record::{FixtureRecord, Stage};
pub use scenario::Scenario;
