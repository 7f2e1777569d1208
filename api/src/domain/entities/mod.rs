//! Domain entities
//!
//! Pure domain models: organization names, per-platform statistics and the
//! merged report.

pub mod org;
pub mod report;
pub mod stats;

pub use org::OrgName;
pub use report::{merge, Listing, MergedReport, RepoTotals};
pub use stats::{ForkStatus, Language, OrgStats, ProfileAccumulator, RepoCounts};
