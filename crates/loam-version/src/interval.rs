//! Version intervals and their algebra.
//!
//! An interval is the `[min, max]` form of a predicate's accepted range,
//! with an independent inclusivity flag per bound and explicit "no bound"
//! markers instead of sentinel versions. Intervals whose bounds are all
//! semantic (or absent) support the full algebra; an interval pinned to a
//! plain version only ever represents an equality point or a half line and
//! is intersected by bound equality.

use std::cmp::Ordering;
use std::fmt;

use crate::version::Version;

/// A contiguous, possibly unbounded range of versions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionInterval {
    min: Option<Version>,
    min_inclusive: bool,
    max: Option<Version>,
    max_inclusive: bool,
}

impl VersionInterval {
    /// Create an interval. An absent bound is never inclusive; the flags are
    /// normalized rather than trusted.
    pub fn new(
        min: Option<Version>,
        min_inclusive: bool,
        max: Option<Version>,
        max_inclusive: bool,
    ) -> Self {
        let min_inclusive = min.is_some() && min_inclusive;
        let max_inclusive = max.is_some() && max_inclusive;
        VersionInterval {
            min,
            min_inclusive,
            max,
            max_inclusive,
        }
    }

    /// The interval that contains every version.
    pub fn all() -> Self {
        VersionInterval {
            min: None,
            min_inclusive: false,
            max: None,
            max_inclusive: false,
        }
    }

    /// The interval containing exactly one version.
    pub fn point(version: Version) -> Self {
        VersionInterval {
            min: Some(version.clone()),
            min_inclusive: true,
            max: Some(version),
            max_inclusive: true,
        }
    }

    pub fn min(&self) -> Option<&Version> {
        self.min.as_ref()
    }

    pub fn min_inclusive(&self) -> bool {
        self.min_inclusive
    }

    pub fn max(&self) -> Option<&Version> {
        self.max.as_ref()
    }

    pub fn max_inclusive(&self) -> bool {
        self.max_inclusive
    }

    pub fn is_universal(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether both bounds are semantic or absent. Only semantic intervals
    /// may have their bound inclusivity recomputed by the algebra.
    pub fn is_semantic(&self) -> bool {
        self.min.iter().all(Version::is_semantic) && self.max.iter().all(Version::is_semantic)
    }

    /// Membership test, defined for every version via the total order.
    pub fn contains(&self, version: &Version) -> bool {
        if let Some(ref min) = self.min {
            match version.cmp(min) {
                Ordering::Less => return false,
                Ordering::Equal if !self.min_inclusive => return false,
                _ => {}
            }
        }
        if let Some(ref max) = self.max {
            match version.cmp(max) {
                Ordering::Greater => return false,
                Ordering::Equal if !self.max_inclusive => return false,
                _ => {}
            }
        }
        true
    }

    /// Intersect two intervals. `None` means no version satisfies both.
    pub fn and(&self, other: &VersionInterval) -> Option<VersionInterval> {
        if !self.is_semantic() || !other.is_semantic() {
            return Self::and_plain(self, other);
        }

        // newMin = max of the mins, newMax = min of the maxes; on equal bound
        // versions the exclusive flag wins.
        let (min, min_inclusive) = match (&self.min, &other.min) {
            (None, _) => (other.min.clone(), other.min_inclusive),
            (_, None) => (self.min.clone(), self.min_inclusive),
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Greater => (self.min.clone(), self.min_inclusive),
                Ordering::Less => (other.min.clone(), other.min_inclusive),
                Ordering::Equal => (
                    self.min.clone(),
                    self.min_inclusive && other.min_inclusive,
                ),
            },
        };
        let (max, max_inclusive) = match (&self.max, &other.max) {
            (None, _) => (other.max.clone(), other.max_inclusive),
            (_, None) => (self.max.clone(), self.max_inclusive),
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Less => (self.max.clone(), self.max_inclusive),
                Ordering::Greater => (other.max.clone(), other.max_inclusive),
                Ordering::Equal => (
                    self.max.clone(),
                    self.max_inclusive && other.max_inclusive,
                ),
            },
        };

        if let (Some(lo), Some(hi)) = (&min, &max) {
            match lo.cmp(hi) {
                Ordering::Greater => return None,
                Ordering::Equal if !(min_inclusive && max_inclusive) => return None,
                _ => {}
            }
        }

        Some(VersionInterval::new(min, min_inclusive, max, max_inclusive))
    }

    /// Intersection fallback when either side is pinned to a plain version.
    /// Plain bounds are equality pins: an unbounded side absorbs the other
    /// interval, and every bound present on both sides must agree exactly
    /// or the intersection is empty. No inclusivity is recomputed here.
    fn and_plain(a: &VersionInterval, b: &VersionInterval) -> Option<VersionInterval> {
        if a.is_universal() {
            return Some(b.clone());
        }
        if b.is_universal() {
            return Some(a.clone());
        }

        let (min, min_inclusive) = match (&a.min, &b.min) {
            (None, _) => (b.min.clone(), b.min_inclusive),
            (_, None) => (a.min.clone(), a.min_inclusive),
            (Some(x), Some(y)) if x == y => (a.min.clone(), a.min_inclusive && b.min_inclusive),
            _ => return None,
        };
        let (max, max_inclusive) = match (&a.max, &b.max) {
            (None, _) => (b.max.clone(), b.max_inclusive),
            (_, None) => (a.max.clone(), a.max_inclusive),
            (Some(x), Some(y)) if x == y => (a.max.clone(), a.max_inclusive && b.max_inclusive),
            _ => return None,
        };

        if let (Some(lo), Some(hi)) = (&min, &max) {
            match lo.cmp(hi) {
                Ordering::Greater => return None,
                Ordering::Equal if !(min_inclusive && max_inclusive) => return None,
                _ => {}
            }
        }

        Some(VersionInterval::new(min, min_inclusive, max, max_inclusive))
    }

    /// Merge `new` into a list kept sorted by lower bound, pairwise disjoint
    /// and non-touching. Every existing interval that overlaps or touches
    /// `new` is absorbed into it; the result is inserted at its sorted
    /// position. A union that spans everything collapses the list to the
    /// single unbounded interval.
    pub fn or_merge(
        intervals: Vec<VersionInterval>,
        new: VersionInterval,
    ) -> Vec<VersionInterval> {
        let mut merged = new;
        let mut kept = Vec::with_capacity(intervals.len() + 1);

        for interval in intervals {
            if merged.mergeable_with(&interval) {
                merged = merged.union_with(&interval);
            } else {
                kept.push(interval);
            }
        }

        if merged.is_universal() {
            return vec![merged];
        }

        let position = kept
            .iter()
            .position(|existing| compare_lower_bounds(&merged, existing) == Ordering::Less)
            .unwrap_or(kept.len());
        kept.insert(position, merged);
        kept
    }

    /// Whether the union of two intervals is still contiguous: they overlap,
    /// or they touch on an equal bound version with at least one inclusive
    /// side.
    fn mergeable_with(&self, other: &VersionInterval) -> bool {
        !Self::separated(self, other) && !Self::separated(other, self)
    }

    /// True when `a` ends strictly before `b` begins, with a gap between.
    fn separated(a: &VersionInterval, b: &VersionInterval) -> bool {
        let (hi, hi_inclusive) = match &a.max {
            Some(v) => (v, a.max_inclusive),
            None => return false,
        };
        let (lo, lo_inclusive) = match &b.min {
            Some(v) => (v, b.min_inclusive),
            None => return false,
        };
        match hi.cmp(lo) {
            Ordering::Less => true,
            Ordering::Equal => !hi_inclusive && !lo_inclusive,
            Ordering::Greater => false,
        }
    }

    /// Bounding union of two mergeable intervals; on equal bound versions
    /// the inclusive flag wins.
    fn union_with(&self, other: &VersionInterval) -> VersionInterval {
        let (min, min_inclusive) = match (&self.min, &other.min) {
            (None, _) | (_, None) => (None, false),
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Less => (self.min.clone(), self.min_inclusive),
                Ordering::Greater => (other.min.clone(), other.min_inclusive),
                Ordering::Equal => (
                    self.min.clone(),
                    self.min_inclusive || other.min_inclusive,
                ),
            },
        };
        let (max, max_inclusive) = match (&self.max, &other.max) {
            (None, _) | (_, None) => (None, false),
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Greater => (self.max.clone(), self.max_inclusive),
                Ordering::Less => (other.max.clone(), other.max_inclusive),
                Ordering::Equal => (
                    self.max.clone(),
                    self.max_inclusive || other.max_inclusive,
                ),
            },
        };
        VersionInterval::new(min, min_inclusive, max, max_inclusive)
    }
}

/// Order intervals by lower bound; no bound sorts first, and on equal bound
/// versions the inclusive side sorts first.
fn compare_lower_bounds(a: &VersionInterval, b: &VersionInterval) -> Ordering {
    match (&a.min, &b.min) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x
            .cmp(y)
            .then_with(|| b.min_inclusive.cmp(&a.min_inclusive)),
    }
}

impl fmt::Display for VersionInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.min, self.min_inclusive) {
            (Some(min), true) => write!(f, "[{},", min)?,
            (Some(min), false) => write!(f, "({},", min)?,
            (None, _) => write!(f, "(,")?,
        }
        match (&self.max, self.max_inclusive) {
            (Some(max), true) => write!(f, "{}]", max),
            (Some(max), false) => write!(f, "{})", max),
            (None, _) => write!(f, ")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::VersionPredicate;

    fn interval(range: &str) -> VersionInterval {
        VersionPredicate::parse(range)
            .unwrap()
            .to_interval()
            .unwrap()
    }

    fn version(text: &str) -> Version {
        Version::parse(text)
    }

    #[test]
    fn test_contains_bounds() {
        let iv = interval(">=1.0.0 <2.0.0");
        assert!(iv.contains(&version("1.0.0")));
        assert!(iv.contains(&version("1.9.9")));
        assert!(iv.contains(&version("2.0.0-beta")));
        assert!(!iv.contains(&version("2.0.0")));
        assert!(!iv.contains(&version("0.9.9")));

        let exclusive = interval(">1.0.0");
        assert!(!exclusive.contains(&version("1.0.0")));
        assert!(exclusive.contains(&version("1.0.1")));
    }

    #[test]
    fn test_universal() {
        let all = VersionInterval::all();
        assert!(all.is_universal());
        assert!(all.is_semantic());
        assert!(all.contains(&version("0.0.1")));
        assert!(all.contains(&version("not-a-version")));
    }

    #[test]
    fn test_and_overlap() {
        let result = interval(">=1.0.0").and(&interval("<2.0.0")).unwrap();
        assert_eq!(result, interval(">=1.0.0 <2.0.0"));

        let result = interval(">=1.0.0 <=3.0.0")
            .and(&interval(">=2.0.0 <=4.0.0"))
            .unwrap();
        assert_eq!(result, interval(">=2.0.0 <=3.0.0"));
    }

    #[test]
    fn test_and_single_point() {
        // <=1.5 ∧ >=1.5 leaves exactly 1.5.
        let result = interval("<=1.5").and(&interval(">=1.5")).unwrap();
        assert_eq!(result, VersionInterval::point(version("1.5")));
        assert!(result.contains(&version("1.5")));
        assert!(!result.contains(&version("1.5.1")));
    }

    #[test]
    fn test_and_exclusive_wins_on_equal_bounds() {
        let result = interval(">=1.0.0 <=2.0.0")
            .and(&interval(">=1.0.0 <2.0.0"))
            .unwrap();
        assert!(!result.max_inclusive());
        assert!(!result.contains(&version("2.0.0")));
    }

    #[test]
    fn test_and_empty() {
        assert!(interval("<1.0.0").and(&interval(">=2.0.0")).is_none());
        // Touching bounds with an exclusive side share no version.
        assert!(interval("<1.5").and(&interval(">=1.5")).is_none());
        assert!(interval("<=1.5").and(&interval(">1.5")).is_none());
    }

    #[test]
    fn test_and_plain_points() {
        let foo = VersionInterval::point(version("some-blob"));
        let bar = VersionInterval::point(version("other-blob"));

        assert_eq!(foo.and(&foo.clone()), Some(foo.clone()));
        assert!(foo.and(&bar).is_none());

        // The unbounded side absorbs the plain point.
        assert_eq!(foo.and(&VersionInterval::all()), Some(foo.clone()));
        assert_eq!(VersionInterval::all().and(&foo), Some(foo.clone()));

        // A plain point never intersects a semantic range.
        assert!(foo.and(&interval(">=1.0.0 <2.0.0")).is_none());
    }

    #[test]
    fn test_or_merge_disjoint() {
        let list = VersionInterval::or_merge(vec![interval("^1.0.0")], interval("^3.0.0"));
        assert_eq!(list, vec![interval("^1.0.0"), interval("^3.0.0")]);

        // Insertion keeps the list sorted by lower bound.
        let list = VersionInterval::or_merge(list, interval("^2.0.0"));
        assert_eq!(
            list,
            vec![interval("^1.0.0"), interval("^2.0.0"), interval("^3.0.0")]
        );
    }

    #[test]
    fn test_or_merge_overlap() {
        let list = VersionInterval::or_merge(
            vec![interval(">=1.0.0 <2.0.0")],
            interval(">=1.5.0 <3.0.0"),
        );
        assert_eq!(list, vec![interval(">=1.0.0 <3.0.0")]);
    }

    #[test]
    fn test_or_merge_touching() {
        // [1.0, 2.0) followed by [2.0, 3.0) is contiguous.
        let list = VersionInterval::or_merge(
            vec![interval(">=1.0.0 <2.0.0")],
            interval(">=2.0.0 <3.0.0"),
        );
        assert_eq!(list, vec![interval(">=1.0.0 <3.0.0")]);

        // (..., 2.0) and (2.0, ...) leave 2.0 uncovered and stay apart.
        let list = VersionInterval::or_merge(vec![interval("<2.0.0")], interval(">2.0.0"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_or_merge_collapses_to_universal() {
        let list = VersionInterval::or_merge(vec![interval("<1.0")], interval(">=1.0"));
        assert_eq!(list, vec![VersionInterval::all()]);
    }

    #[test]
    fn test_or_merge_absorbs_multiple() {
        let list = vec![
            interval(">=1.0.0 <2.0.0"),
            interval(">=3.0.0 <4.0.0"),
            interval(">=5.0.0 <6.0.0"),
        ];
        let list = VersionInterval::or_merge(list, interval(">=1.5.0 <5.5.0"));
        assert_eq!(list, vec![interval(">=1.0.0 <6.0.0")]);
    }

    #[test]
    fn test_or_merge_idempotent() {
        let base = vec![interval("^1.2.0"), interval("^3.0.0")];
        let once = VersionInterval::or_merge(base, interval("^1.2.0"));
        let twice = VersionInterval::or_merge(once.clone(), interval("^1.2.0"));
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_or_merge_plain_points() {
        let foo = VersionInterval::point(version("some-blob"));
        let bar = VersionInterval::point(version("other-blob"));

        let list = VersionInterval::or_merge(vec![foo.clone()], bar.clone());
        assert_eq!(list.len(), 2);

        let list = VersionInterval::or_merge(list, foo.clone());
        assert_eq!(list.len(), 2);

        // Plain points sort below semantic intervals.
        let list = VersionInterval::or_merge(vec![interval("^1.0.0")], foo.clone());
        assert_eq!(list[0], foo);
    }

    #[test]
    fn test_display() {
        assert_eq!(interval(">=1.0.0 <2.0.0").to_string(), "[1.0.0,2.0.0)");
        assert_eq!(interval(">1.0.0").to_string(), "(1.0.0,)");
        assert_eq!(interval("<=2.0.0").to_string(), "(,2.0.0]");
        assert_eq!(VersionInterval::all().to_string(), "(,)");
    }
}
