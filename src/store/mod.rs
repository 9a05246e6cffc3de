//! Repository store: the `.art/` metadata directory layout and the
//! `Repository` handle that every workflow, branching, and cache operation
//! goes through.

pub mod layout;
pub mod repository;

pub use repository::{
    AddOutcome, CheckoutOutcome, DiffReport, MergeOutcome, Repository, StashEntryInfo,
    StatusReport,
};
