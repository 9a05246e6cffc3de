//! Branching and history operations.

pub mod checkout;
pub mod merge;
pub mod reset;
pub mod stash;

pub use checkout::checkout;
pub use merge::merge;
pub use reset::reset;
pub use stash::stash;
