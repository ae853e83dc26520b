//! Dependency gating for test runs.
//!
//! A test-execution host embeds this crate to skip tests whose declared
//! prerequisite tests did not succeed. Tests declare dependencies through a
//! [`DependencyMark`] attached to their collected [`TestItem`], or through
//! the runtime [`DependencyTracker::depends`] call from inside a test body.
//!
//! Two pieces cooperate:
//!
//! - [`resolve`] runs once over the collected item list before execution,
//!   rewriting declared dependency names into canonical resolved names
//!   (reconciling parameterized-name variants) and dropping items whose
//!   `collect`-flagged chains cannot be resolved.
//! - [`DependencyTracker`] accumulates per-scope phase results during the
//!   run and answers "may this test run" with `Ok(())` or a [`Skip`].
//!
//! The host owns execution order, the skip transport, and option parsing;
//! this crate only reacts to the hook calls described on
//! [`DependencyTracker`].

pub mod config;
pub mod emit;
pub mod graph;
pub mod hooks;
pub mod model;
pub mod registry;
pub mod resolve;

pub use config::Settings;
pub use hooks::DependencyTracker;
pub use model::ident::{IdentError, Scope, ScopeParseError, TestId};
pub use model::item::{DependencyMark, TestItem};
pub use model::phase::{Outcome, Phase, PhaseReport};
pub use registry::manager::{DependencyManager, Skip};
pub use registry::scopes::ManagerRegistry;
pub use registry::status::DepStatus;
pub use resolve::pass::{Resolution, resolve};
