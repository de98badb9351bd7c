//! Version values and their total order.
//!
//! A version is either [`Semantic`](Version::Semantic) (numeric components
//! plus optional prerelease/build tags) or [`Plain`](Version::Plain), the
//! fallback for version strings mods ship that do not follow any scheme.
//! The lenient entry point [`Version::parse`] never fails; strict parsing is
//! only performed when a caller explicitly needs comparability guarantees.

use std::cmp::Ordering;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    // Prerelease and build tags share the same dot-separated grammar; the
    // empty tag is legal ("1.0.0-" pins an empty prerelease).
    static ref DOT_SEPARATED_ID_RE: Regex =
        Regex::new(r"^([-0-9A-Za-z]+(\.[-0-9A-Za-z]+)*)?$").unwrap();
}

/// Error type for strict version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid version string \"{0}\"")]
    Invalid(String),
    #[error("invalid version string \"{version}\": {reason}")]
    InvalidComponent { version: String, reason: String },
    #[error("wildcard in \"{0}\" must be the final version component")]
    NonFinalWildcard(String),
    #[error("wildcard version \"{0}\" cannot carry a prerelease")]
    WildcardPrerelease(String),
    #[error("wildcard version \"{0}\" has no numeric component before the wildcard")]
    BareWildcard(String),
}

/// A single component of a semantic version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionComponent {
    Numeric(u64),
    /// Placeholder written as `x`, `X` or `*`. Only ever materialized while
    /// parsing a range expression; a stored version never contains one.
    Wildcard,
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionComponent::Numeric(n) => write!(f, "{}", n),
            VersionComponent::Wildcard => write!(f, "x"),
        }
    }
}

/// A structured version: numeric components, optional prerelease and build
/// tags. Equality is structural (build metadata included); the comparison
/// order ignores build metadata and pads missing components, so two versions
/// may compare equal without being equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    components: Vec<VersionComponent>,
    prerelease: Option<String>,
    build: Option<String>,
}

impl SemanticVersion {
    /// Create a version from numeric components.
    pub fn new(
        components: Vec<u64>,
        prerelease: Option<String>,
        build: Option<String>,
    ) -> Result<Self, VersionError> {
        if components.is_empty() {
            return Err(VersionError::Invalid(String::new()));
        }
        for tag in [&prerelease, &build].into_iter().flatten() {
            if !DOT_SEPARATED_ID_RE.is_match(tag) {
                return Err(VersionError::InvalidComponent {
                    version: tag.clone(),
                    reason: "malformed tag".to_string(),
                });
            }
        }

        Ok(SemanticVersion {
            components: components.into_iter().map(VersionComponent::Numeric).collect(),
            prerelease,
            build,
        })
    }

    /// Build a bare numeric version without tags. Callers guarantee a
    /// non-empty component list.
    pub(crate) fn from_numeric(components: Vec<u64>) -> Self {
        SemanticVersion {
            components: components.into_iter().map(VersionComponent::Numeric).collect(),
            prerelease: None,
            build: None,
        }
    }

    /// Strictly parse a semantic version. Wildcard components are rejected;
    /// they are only meaningful inside range expressions.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        Self::parse_with_wildcard(text, false)
    }

    /// Parse with wildcard components enabled, used by the range parser.
    pub(crate) fn parse_with_wildcard(
        text: &str,
        allow_wildcard: bool,
    ) -> Result<Self, VersionError> {
        if text.is_empty() {
            return Err(VersionError::Invalid(text.to_string()));
        }

        let (before_build, build) = match text.split_once('+') {
            Some((v, b)) => (v, Some(b.to_string())),
            None => (text, None),
        };
        let (numeric_part, prerelease) = match before_build.split_once('-') {
            Some((v, p)) => (v, Some(p.to_string())),
            None => (before_build, None),
        };

        for tag in [&prerelease, &build].into_iter().flatten() {
            if !DOT_SEPARATED_ID_RE.is_match(tag) {
                return Err(VersionError::InvalidComponent {
                    version: text.to_string(),
                    reason: format!("malformed tag \"{}\"", tag),
                });
            }
        }

        let mut components = Vec::new();
        for part in numeric_part.split('.') {
            match part {
                "" => return Err(VersionError::Invalid(text.to_string())),
                "x" | "X" | "*" => {
                    if !allow_wildcard {
                        return Err(VersionError::Invalid(text.to_string()));
                    }
                    components.push(VersionComponent::Wildcard);
                }
                _ => {
                    let value = part
                        .parse::<u64>()
                        .map_err(|_| VersionError::InvalidComponent {
                            version: text.to_string(),
                            reason: format!("component \"{}\" is not a number", part),
                        })?;
                    components.push(VersionComponent::Numeric(value));
                }
            }
        }

        let version = SemanticVersion {
            components,
            prerelease,
            build,
        };

        if version.has_wildcard() {
            if version.components[0] == VersionComponent::Wildcard {
                return Err(VersionError::BareWildcard(text.to_string()));
            }
            let wildcards = version
                .components
                .iter()
                .filter(|c| **c == VersionComponent::Wildcard)
                .count();
            if wildcards > 1
                || version.components.last() != Some(&VersionComponent::Wildcard)
            {
                return Err(VersionError::NonFinalWildcard(text.to_string()));
            }
            if version.prerelease.is_some() {
                return Err(VersionError::WildcardPrerelease(text.to_string()));
            }
        }

        Ok(version)
    }

    pub fn components(&self) -> &[VersionComponent] {
        &self.components
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Numeric value of the component at `index`; missing trailing
    /// components read as zero, wildcards as zero.
    pub fn component(&self, index: usize) -> u64 {
        match self.components.get(index) {
            Some(VersionComponent::Numeric(n)) => *n,
            _ => 0,
        }
    }

    pub fn major(&self) -> u64 {
        self.component(0)
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    pub fn has_wildcard(&self) -> bool {
        self.components.contains(&VersionComponent::Wildcard)
    }

    /// Component at `index` for comparison purposes: beyond the stored
    /// components a wildcard-bearing version keeps auto-matching, everything
    /// else pads with zero.
    fn padded_component(&self, index: usize) -> VersionComponent {
        match self.components.get(index) {
            Some(c) => *c,
            None if self.has_wildcard() => VersionComponent::Wildcard,
            None => VersionComponent::Numeric(0),
        }
    }

    /// Index of the first nonzero component, if any.
    pub(crate) fn first_nonzero(&self) -> Option<usize> {
        self.components
            .iter()
            .position(|c| !matches!(c, VersionComponent::Numeric(0)))
    }

    /// Copy of this version with the component at `index` incremented and
    /// everything after it zeroed; prerelease and build tags are dropped.
    /// Wildcards never reach this point.
    pub(crate) fn bumped(&self, index: usize) -> SemanticVersion {
        let mut components: Vec<u64> = (0..self.components.len().max(index + 1))
            .map(|i| self.component(i))
            .collect();
        for value in components.iter_mut().skip(index + 1) {
            *value = 0;
        }
        components[index] += 1;

        SemanticVersion {
            components: components.into_iter().map(VersionComponent::Numeric).collect(),
            prerelease: None,
            build: None,
        }
    }

    /// The exclusive upper bound of a `^` range: the first nonzero component
    /// incremented, the rest zeroed.
    pub(crate) fn next_breaking(&self) -> SemanticVersion {
        let index = self.first_nonzero().unwrap_or(self.components.len() - 1);
        self.bumped(index)
    }

    /// The exclusive upper bound of a `~` range: the minor component
    /// incremented, or the major when no minor is present.
    pub(crate) fn next_minor(&self) -> SemanticVersion {
        if self.components.len() >= 2 {
            self.bumped(1)
        } else {
            self.bumped(0)
        }
    }

    fn compare(&self, other: &SemanticVersion) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            match (self.padded_component(i), other.padded_component(i)) {
                (VersionComponent::Wildcard, _) | (_, VersionComponent::Wildcard) => continue,
                (VersionComponent::Numeric(a), VersionComponent::Numeric(b)) => {
                    match a.cmp(&b) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
            }
        }

        // A wildcard version matches any prerelease state.
        if self.has_wildcard() || other.has_wildcard() {
            return Ordering::Equal;
        }

        match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => compare_prerelease(a, b),
        }
    }
}

/// Compare prerelease tags segment by segment. Numeric segments sort below
/// non-numeric ones, and two numeric segments compare by digit count before
/// comparing lexically. This stays a pure string algorithm so that overlong
/// numbers cannot overflow.
fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match compare_prerelease_segment(l, r) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

fn compare_prerelease_segment(left: &str, right: &str) -> Ordering {
    let left_numeric = !left.is_empty() && left.bytes().all(|b| b.is_ascii_digit());
    let right_numeric = !right.is_empty() && right.bytes().all(|b| b.is_ascii_digit());

    match (left_numeric, right_numeric) {
        (true, true) => left.len().cmp(&right.len()).then_with(|| left.cmp(right)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => left.cmp(right),
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
        }
        if let Some(ref prerelease) = self.prerelease {
            write!(f, "-{}", prerelease)?;
        }
        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

/// A version value: semantic when the input follows the grammar, plain
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    Semantic(SemanticVersion),
    Plain(String),
}

impl Version {
    /// Parse leniently. A string that violates the semantic grammar becomes
    /// a [`Version::Plain`] value instead of an error; mod metadata in the
    /// wild carries version schemes this engine cannot dictate, and callers
    /// that only need ordering or display must not be blocked by them.
    pub fn parse(text: &str) -> Version {
        match SemanticVersion::parse(text) {
            Ok(version) => Version::Semantic(version),
            Err(_) => Version::Plain(text.to_string()),
        }
    }

    /// Strict entry point for callers that require comparability guarantees.
    pub fn parse_semantic(text: &str) -> Result<SemanticVersion, VersionError> {
        SemanticVersion::parse(text)
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self, Version::Semantic(_))
    }

    pub fn as_semantic(&self) -> Option<&SemanticVersion> {
        match self {
            Version::Semantic(version) => Some(version),
            Version::Plain(_) => None,
        }
    }
}

impl From<SemanticVersion> for Version {
    fn from(version: SemanticVersion) -> Self {
        Version::Semantic(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Semantic(version) => write!(f, "{}", version),
            Version::Plain(text) => write!(f, "{}", text),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Total order over all versions. Semantic pairs compare by the full
    /// component/prerelease rules; a plain version sorts below every
    /// semantic version, and plain pairs fall back to lexicographic string
    /// order. The cross-variant cases are a documented degraded relation,
    /// not a claim that plain versions are meaningfully ordered.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Version::Semantic(a), Version::Semantic(b)) => a.cmp(b),
            (Version::Plain(a), Version::Plain(b)) => a.cmp(b),
            (Version::Plain(_), Version::Semantic(_)) => Ordering::Less,
            (Version::Semantic(_), Version::Plain(_)) => Ordering::Greater,
        }
    }
}
