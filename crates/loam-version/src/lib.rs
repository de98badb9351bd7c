//! Version and version-range predicate engine for the Loam mod loader
//!
//! This crate parses mod versions and dependency range expressions, tests
//! versions against ranges, and combines the resulting intervals so a
//! resolver can reason about overlapping requirements.

pub mod predicate;
mod interval;
mod predicates;
mod version;

pub use interval::VersionInterval;
pub use predicate::{ComparisonOperator, PredicateTerm, VersionPredicate, VersionRangeError};
pub use predicates::Predicates;
pub use version::{SemanticVersion, Version, VersionComponent, VersionError};
