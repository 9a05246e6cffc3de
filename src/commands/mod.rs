//! CLI command implementations: thin wrappers that open a `Repository`,
//! call into it, and format the result for the terminal.

pub mod branch;
pub mod branching;
pub mod core;
pub mod diff;
pub mod log;
pub mod repo;

pub use branch::branch;
pub use branching::{checkout, merge, reset, stash};
pub use core::{add, commit, rm, status};
pub use diff::diff;
pub use log::log;
pub use repo::{clone, config, fetch, init, pull, push, remote};
