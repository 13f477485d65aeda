pub mod branch;
pub mod resolver;
pub mod version_set;

pub use branch::{BranchRule, BranchTable, VersionMatcher};
pub use resolver::{select_api_version, VersionResolver};
pub use version_set::{VersionSet, LATEST};
