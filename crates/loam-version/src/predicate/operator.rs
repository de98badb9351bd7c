//! Comparison operators for version predicates

use std::fmt;

use crate::version::{SemanticVersion, Version};

/// Range operators understood by the predicate grammar. A term with no
/// operator prefix defaults to [`ComparisonOperator::Equal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// Equal (`=`)
    Equal,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Same release line up to the next breaking version (`^`)
    SameMajor,
    /// Same major.minor up to the next minor version (`~`)
    SameMajorMinor,
}

impl ComparisonOperator {
    /// All operators, longest prefix first so that `>=` matches before `>`.
    pub const ALL: [ComparisonOperator; 7] = [
        ComparisonOperator::GreaterEqual,
        ComparisonOperator::LessEqual,
        ComparisonOperator::Greater,
        ComparisonOperator::Less,
        ComparisonOperator::Equal,
        ComparisonOperator::SameMajor,
        ComparisonOperator::SameMajorMinor,
    ];

    /// The serialized prefix of the operator
    pub fn prefix(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::SameMajor => "^",
            ComparisonOperator::SameMajorMinor => "~",
        }
    }

    /// Whether this operator needs an exclusive bound or numeric components,
    /// which a plain reference version cannot supply.
    pub fn requires_semantic_reference(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::Greater
                | ComparisonOperator::Less
                | ComparisonOperator::SameMajor
                | ComparisonOperator::SameMajorMinor
        )
    }

    /// Test `candidate` against `reference`
    pub fn test(&self, candidate: &Version, reference: &Version) -> bool {
        match self {
            ComparisonOperator::Equal => candidate.cmp(reference).is_eq(),
            ComparisonOperator::Greater => candidate.cmp(reference).is_gt(),
            ComparisonOperator::GreaterEqual => candidate.cmp(reference).is_ge(),
            ComparisonOperator::Less => candidate.cmp(reference).is_lt(),
            ComparisonOperator::LessEqual => candidate.cmp(reference).is_le(),
            ComparisonOperator::SameMajor => match (candidate, reference) {
                (Version::Semantic(c), Version::Semantic(r)) => {
                    let pivot = r.first_nonzero().unwrap_or(r.component_count() - 1);
                    components_match(c, r, pivot) && c >= r
                }
                _ => false,
            },
            ComparisonOperator::SameMajorMinor => match (candidate, reference) {
                (Version::Semantic(c), Version::Semantic(r)) => {
                    let pivot = 1.min(r.component_count() - 1);
                    components_match(c, r, pivot) && c >= r
                }
                _ => false,
            },
        }
    }

    /// Lower bound implied by this operator against `reference`, absent for
    /// `<` and `<=`.
    pub fn min_version(&self, reference: &Version) -> Option<Version> {
        match self {
            ComparisonOperator::Less | ComparisonOperator::LessEqual => None,
            _ => Some(reference.clone()),
        }
    }

    /// Upper bound implied by this operator against `reference`, absent for
    /// `>` and `>=`.
    pub fn max_version(&self, reference: &Version) -> Option<Version> {
        match self {
            ComparisonOperator::Equal
            | ComparisonOperator::Less
            | ComparisonOperator::LessEqual => Some(reference.clone()),
            ComparisonOperator::Greater | ComparisonOperator::GreaterEqual => None,
            ComparisonOperator::SameMajor => match reference {
                Version::Semantic(r) => Some(Version::Semantic(r.next_breaking())),
                // Plain references never reach `^`; fall back to the pin.
                Version::Plain(_) => Some(reference.clone()),
            },
            ComparisonOperator::SameMajorMinor => match reference {
                Version::Semantic(r) => Some(Version::Semantic(r.next_minor())),
                Version::Plain(_) => Some(reference.clone()),
            },
        }
    }

    /// Whether the implied lower bound includes the reference itself
    pub fn is_min_inclusive(&self) -> bool {
        !matches!(
            self,
            ComparisonOperator::Greater
                | ComparisonOperator::Less
                | ComparisonOperator::LessEqual
        )
    }

    /// Whether the implied upper bound includes its bound version
    pub fn is_max_inclusive(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::Equal | ComparisonOperator::LessEqual
        )
    }
}

/// Component-wise equality of `candidate` and `reference` through `pivot`,
/// with missing components reading as zero and wildcards matching anything.
fn components_match(candidate: &SemanticVersion, reference: &SemanticVersion, pivot: usize) -> bool {
    (0..=pivot).all(|i| candidate.component(i) == reference.component(i))
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}
