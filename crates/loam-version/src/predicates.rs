//! One-shot facade over raw version and range strings

use crate::predicate::VersionPredicate;
use crate::version::Version;

/// Convenience entry points for callers that hold raw strings and do not
/// want to manage parsed values themselves.
pub struct Predicates;

impl Predicates {
    /// Check if a version satisfies a range expression. The version side is
    /// lenient; an unparseable range yields `false`.
    pub fn matches(version: &str, range: &str) -> bool {
        let predicate = match VersionPredicate::parse(range) {
            Ok(p) => p,
            Err(_) => return false,
        };
        predicate.test(&Version::parse(version))
    }

    /// Return the versions that satisfy the given range, in input order.
    pub fn filter_matching(versions: &[&str], range: &str) -> Vec<String> {
        let predicate = match VersionPredicate::parse(range) {
            Ok(p) => p,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter(|v| predicate.test(&Version::parse(v)))
            .map(|v| v.to_string())
            .collect()
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .map(|(i, v)| (Version::parse(v), i))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.cmp(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}
