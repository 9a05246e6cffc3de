//! art - a local, file-based version control system.
//!
//! # Architecture
//!
//! Every tracked path is recorded as a sequence of changes against a root
//! snapshot: whole-file creation, deletion, or a list of byte-offset
//! insert/delete operations. Commits are chained per branch through a
//! manifest of hashes; working-tree state at any commit is produced by
//! replaying the chain rather than storing it directly.
//!
//! # Modules
//!
//! - [`core`]: change representation, delta/replay engines, commit hashing,
//!   the paginated on-disk store, and ignore-pattern matching
//! - [`store`]: the `.art/` directory layout and the `Repository` handle
//! - [`config`]: process-wide configuration (user identity, defaults)
//! - [`commands`]: CLI command implementations

pub mod commands;
pub mod config;
pub mod core;
pub mod store;

pub use core::{ArtError, ArtResult, Change, Op};
pub use store::{
    AddOutcome, CheckoutOutcome, DiffReport, MergeOutcome, Repository, StashEntryInfo,
    StatusReport,
};
