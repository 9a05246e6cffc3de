//! Core data structures and algorithms for the VCS: the change-entry union,
//! the delta/replay engines, commit identity, and the paginated store that
//! backs every persistent mapping.

pub mod branch_manifest;
pub mod change;
pub mod commit;
pub mod commit_hash;
pub mod delta;
pub mod error;
pub mod head;
pub mod ignore;
pub mod paginated;
pub mod reconstruct;

pub use branch_manifest::BranchManifest;
pub use change::{Change, Op};
pub use commit::Commit;
pub use commit_hash::compute_commit_hash;
pub use error::{ArtError, ArtResult};
pub use head::{Active, Head, DEFAULT_BRANCH};
pub use ignore::IgnoreMatcher;
pub use paginated::MAX_PART_SIZE;
