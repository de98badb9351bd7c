//! Range expression parsing

use thiserror::Error;

use super::{ComparisonOperator, PredicateTerm, VersionPredicate};
use crate::version::{SemanticVersion, Version, VersionComponent, VersionError};

/// Error type for malformed range expressions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionRangeError {
    #[error("empty version range")]
    Empty,
    #[error("unknown operator \"{operator}\" in range term \"{term}\"")]
    UnknownOperator { operator: String, term: String },
    #[error("missing version in range term \"{0}\"")]
    MissingVersion(String),
    #[error("invalid version in range term \"{term}\"")]
    InvalidVersion {
        term: String,
        #[source]
        source: VersionError,
    },
    #[error("wildcard version \"{0}\" is only valid with the default operator")]
    WildcardOperator(String),
    #[error("plain version in range term \"{term}\" does not support the \"{operator}\" operator")]
    PlainVersionOperator { term: String, operator: &'static str },
}

/// Parse a whitespace-separated range expression into a predicate.
pub(crate) fn parse(text: &str) -> Result<VersionPredicate, VersionRangeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(VersionRangeError::Empty);
    }
    // The lone token `*` is the universal predicate; a `*` inside a larger
    // expression is a bare wildcard and rejected per term below.
    if text == "*" {
        return Ok(VersionPredicate::any());
    }

    let mut terms = Vec::new();
    for raw in text.split_whitespace() {
        terms.push(parse_term(raw)?);
    }
    Ok(VersionPredicate::from_terms(terms))
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '^' | '~' | '!')
}

fn parse_term(term: &str) -> Result<PredicateTerm, VersionRangeError> {
    let rest = term.trim_start_matches(is_operator_char);
    let token = &term[..term.len() - rest.len()];

    let operator = if token.is_empty() {
        ComparisonOperator::Equal
    } else {
        ComparisonOperator::ALL
            .into_iter()
            .find(|op| op.prefix() == token)
            .ok_or_else(|| VersionRangeError::UnknownOperator {
                operator: token.to_string(),
                term: term.to_string(),
            })?
    };

    if rest.is_empty() {
        return Err(VersionRangeError::MissingVersion(term.to_string()));
    }

    match SemanticVersion::parse_with_wildcard(rest, true) {
        Ok(version) if version.has_wildcard() => desugar_wildcard(operator, version, term),
        Ok(version) => Ok(PredicateTerm::new(operator, Version::Semantic(version))),
        Err(
            source @ (VersionError::BareWildcard(_)
            | VersionError::NonFinalWildcard(_)
            | VersionError::WildcardPrerelease(_)),
        ) => Err(VersionRangeError::InvalidVersion {
            term: term.to_string(),
            source,
        }),
        Err(_) => {
            // The opaque fallback: keep the raw token as a plain reference,
            // as long as the operator can live with inclusive, equality-like
            // comparisons only.
            if operator.requires_semantic_reference() {
                return Err(VersionRangeError::PlainVersionOperator {
                    term: term.to_string(),
                    operator: operator.prefix(),
                });
            }
            Ok(PredicateTerm::new(operator, Version::Plain(rest.to_string())))
        }
    }
}

/// Rewrite a trailing-wildcard reference into the range operator it stands
/// for: `MAJOR.x` becomes `^MAJOR` and `…MINOR.x` becomes `~…MINOR`.
fn desugar_wildcard(
    operator: ComparisonOperator,
    version: SemanticVersion,
    term: &str,
) -> Result<PredicateTerm, VersionRangeError> {
    if operator != ComparisonOperator::Equal {
        return Err(VersionRangeError::WildcardOperator(term.to_string()));
    }

    // The wildcard is the final component and the only one; everything
    // before it is numeric.
    let components = version.components();
    let numeric: Vec<u64> = components[..components.len() - 1]
        .iter()
        .map(|c| match c {
            VersionComponent::Numeric(n) => *n,
            VersionComponent::Wildcard => 0,
        })
        .collect();

    let operator = if numeric.len() == 1 {
        ComparisonOperator::SameMajor
    } else {
        ComparisonOperator::SameMajorMinor
    };
    let reference = SemanticVersion::from_numeric(numeric);

    Ok(PredicateTerm::new(operator, Version::Semantic(reference)))
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::version::property_tests::arb_semantic;
    use proptest::prelude::*;

    fn arb_operator() -> impl Strategy<Value = ComparisonOperator> {
        prop::sample::select(ComparisonOperator::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn single_term_test_agrees_with_interval(
            operator in arb_operator(),
            reference in arb_semantic(),
            candidate in arb_semantic(),
        ) {
            // Stated for release candidates: the ^/~ interval is a faithful
            // over-approximation only at prerelease upper-bound edges.
            prop_assume!(candidate.prerelease().is_none());

            let range = format!("{}{}", operator.prefix(), reference);
            let predicate = VersionPredicate::parse(&range).unwrap();
            let interval = predicate.to_interval().unwrap();
            let candidate = Version::Semantic(candidate);

            prop_assert_eq!(
                predicate.test(&candidate),
                interval.contains(&candidate),
                "range {} candidate {}",
                range,
                candidate
            );
        }
    }

    proptest! {
        #[test]
        fn parse_display_round_trip(
            operator in arb_operator(),
            reference in arb_semantic(),
        ) {
            let range = format!("{}{}", operator.prefix(), reference);
            if let Ok(predicate) = VersionPredicate::parse(&range) {
                let reparsed = VersionPredicate::parse(&predicate.to_string()).unwrap();
                prop_assert_eq!(reparsed, predicate);
            }
        }
    }
}
