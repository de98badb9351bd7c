//! Version predicates: parsed range expressions

mod operator;
mod parser;

use std::fmt;

use crate::interval::VersionInterval;
use crate::version::Version;

pub use operator::ComparisonOperator;
pub use parser::VersionRangeError;

/// A single `operator reference-version` term of a predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateTerm {
    operator: ComparisonOperator,
    reference: Version,
}

impl PredicateTerm {
    pub(crate) fn new(operator: ComparisonOperator, reference: Version) -> Self {
        PredicateTerm {
            operator,
            reference,
        }
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    pub fn reference(&self) -> &Version {
        &self.reference
    }

    pub fn test(&self, candidate: &Version) -> bool {
        self.operator.test(candidate, &self.reference)
    }

    /// The interval of versions accepted by this term
    pub fn to_interval(&self) -> VersionInterval {
        VersionInterval::new(
            self.operator.min_version(&self.reference),
            self.operator.is_min_inclusive(),
            self.operator.max_version(&self.reference),
            self.operator.is_max_inclusive(),
        )
    }
}

impl fmt::Display for PredicateTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The default operator round-trips without its prefix.
        if self.operator == ComparisonOperator::Equal {
            write!(f, "{}", self.reference)
        } else {
            write!(f, "{}{}", self.operator, self.reference)
        }
    }
}

/// A parsed range expression: zero or more terms, AND-ed together. The
/// empty predicate (written `*`) accepts every version. Predicates are
/// immutable once parsed and freely shared across threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionPredicate {
    terms: Vec<PredicateTerm>,
}

impl VersionPredicate {
    pub(crate) fn from_terms(terms: Vec<PredicateTerm>) -> Self {
        VersionPredicate { terms }
    }

    /// The predicate that accepts every version.
    pub fn any() -> Self {
        VersionPredicate { terms: Vec::new() }
    }

    /// Parse a textual range expression.
    pub fn parse(text: &str) -> Result<Self, VersionRangeError> {
        parser::parse(text)
    }

    /// Parse several range expressions, failing on the first invalid one.
    /// Callers usually hold one range per dependency entry and want all of
    /// them validated up front.
    pub fn parse_all<'a, I>(ranges: I) -> Result<Vec<Self>, VersionRangeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ranges.into_iter().map(Self::parse).collect()
    }

    pub fn terms(&self) -> &[PredicateTerm] {
        &self.terms
    }

    /// Whether this is the universal predicate
    pub fn is_any(&self) -> bool {
        self.terms.is_empty()
    }

    /// Test a candidate version against every term.
    pub fn test(&self, candidate: &Version) -> bool {
        self.terms.iter().all(|term| term.test(candidate))
    }

    /// Intersect the term intervals. `None` means the terms contradict each
    /// other and no version can satisfy the predicate.
    pub fn to_interval(&self) -> Option<VersionInterval> {
        let mut interval = VersionInterval::all();
        for term in &self.terms {
            interval = interval.and(&term.to_interval())?;
        }
        Some(interval)
    }
}

impl fmt::Display for VersionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "*");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for VersionPredicate {
    type Err = VersionRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
