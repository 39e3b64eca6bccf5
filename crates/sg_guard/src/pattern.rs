//! Provide ignore patterns: path templates exempt from scanning.
//!
//! A pattern is a sequence of segments. A literal segment matches a key that
//! renders the same (`"2"` matches index `2`), the wildcard `*` matches any
//! single key. A path matches a pattern only if both have the same length;
//! there is no prefix matching. Because a scan never descends below an
//! ignored node, ignoring `a.b` still exempts everything under `a.b`.
//!
//! # Examples
//!
//! ```
//! use sg_guard::{IgnorePattern, IgnoreSet};
//! use sg_value::access::KeyPath;
//!
//! let set: IgnoreSet = ["meta.arg", "items.*.callback"]
//!     .into_iter()
//!     .map(|p| p.parse::<IgnorePattern>().unwrap())
//!     .collect();
//!
//! assert!(set.matches(&KeyPath::from_dotted("meta.arg")));
//! assert!(set.matches(&KeyPath::from_dotted("items.3.callback")));
//! assert!(!set.matches(&KeyPath::from_dotted("meta")));
//! assert!(!set.matches(&KeyPath::from_dotted("meta.arg.inner")));
//! ```

use alloc::rc::Rc;
use core::fmt;
use core::str::FromStr;

use serde::Deserialize;
use sg_value::access::{Key, KeyPath, ROOT_MARKER};
use thiserror::Error;

/// The segment text that matches any single key.
pub const WILDCARD: &str = "*";

// -----------------------------------------------------------------------------
// Error

/// An error returned when an ignore pattern string is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PatternError {
    #[error("Empty segment at offset {offset} in ignore pattern `{pattern}`")]
    EmptySegment { pattern: String, offset: usize },

    #[error("Wildcard `*` must fill a whole segment, found `{segment}` in ignore pattern `{pattern}`")]
    PartialWildcard { pattern: String, segment: String },
}

// -----------------------------------------------------------------------------
// PatternSegment

/// One step of an [`IgnorePattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSegment {
    /// Matches exactly one arbitrary key.
    Wildcard,
    /// Matches a key that renders as this text.
    Literal(Rc<str>),
}

impl PatternSegment {
    /// Returns `true` if `key` satisfies this segment.
    #[inline]
    pub fn matches(&self, key: &Key) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Literal(text) => key.spells(text),
        }
    }
}

impl From<&str> for PatternSegment {
    /// `"*"` becomes [`PatternSegment::Wildcard`], anything else a literal.
    #[inline]
    fn from(value: &str) -> Self {
        if value == WILDCARD {
            Self::Wildcard
        } else {
            Self::Literal(Rc::from(value))
        }
    }
}

impl fmt::Display for PatternSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str(WILDCARD),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

// -----------------------------------------------------------------------------
// IgnorePattern

/// A path template exempt from scanning.
///
/// Parsed from a dot-separated string, or built from segments when a key
/// itself contains a `.`. The empty string is the root pattern, matching
/// only the scanned value itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct IgnorePattern {
    segments: Box<[PatternSegment]>,
}

impl IgnorePattern {
    /// Builds a pattern from explicit segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_guard::{IgnorePattern, PatternSegment};
    /// use sg_value::access::KeyPath;
    ///
    /// let pattern = IgnorePattern::from_segments([
    ///     PatternSegment::Literal("a.b".into()),
    ///     PatternSegment::Wildcard,
    /// ]);
    ///
    /// assert!(pattern.matches(&KeyPath::root().child("a.b").child("c")));
    /// assert!(!pattern.matches(&KeyPath::from_dotted("a.b.c")));
    /// ```
    pub fn from_segments(segments: impl IntoIterator<Item = PatternSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns the root pattern.
    #[inline]
    pub fn root() -> Self {
        Self::from_segments([])
    }

    /// Parses a dot-separated pattern such as `"entities.*.meta"`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        let mut offset = 0;
        for segment in pattern.split('.') {
            if segment.is_empty() {
                return Err(PatternError::EmptySegment {
                    pattern: pattern.into(),
                    offset,
                });
            }
            if segment != WILDCARD && segment.contains(WILDCARD) {
                return Err(PatternError::PartialWildcard {
                    pattern: pattern.into(),
                    segment: segment.into(),
                });
            }
            segments.push(PatternSegment::from(segment));
            offset += segment.len() + 1;
        }
        Ok(Self::from_segments(segments))
    }

    /// Returns the segments.
    #[inline]
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Returns the number of segments, i.e. the depth this pattern matches at.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if `path` has this pattern's length and every key
    /// satisfies the segment at its position.
    pub fn matches(&self, path: &KeyPath) -> bool {
        self.segments.len() == path.len()
            && self
                .segments
                .iter()
                .zip(path.iter())
                .all(|(segment, key)| segment.matches(key))
    }
}

impl FromStr for IgnorePattern {
    type Err = PatternError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IgnorePattern {
    type Error = PatternError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.segments.iter();
        match segments.next() {
            None => f.write_str(ROOT_MARKER),
            Some(first) => {
                fmt::Display::fmt(first, f)?;
                segments.try_for_each(|segment| write!(f, ".{segment}"))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// IgnoreSet

/// An ordered collection of [`IgnorePattern`]s; a path is ignored if any matches.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<IgnorePattern>,
    longest: usize,
}

impl IgnoreSet {
    /// Creates an empty set, which ignores nothing.
    #[inline]
    pub const fn new() -> Self {
        Self {
            patterns: Vec::new(),
            longest: 0,
        }
    }

    /// Adds a pattern.
    pub fn insert(&mut self, pattern: IgnorePattern) {
        self.longest = self.longest.max(pattern.len());
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// Returns the number of patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the set holds no patterns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns an iterator over the patterns.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, IgnorePattern> {
        self.patterns.iter()
    }

    /// Returns `true` if any pattern matches `path`.
    #[inline]
    pub fn matches(&self, path: &KeyPath) -> bool {
        // Patterns never match a path longer than themselves.
        path.len() <= self.longest && self.patterns.iter().any(|p| p.matches(path))
    }
}

impl FromIterator<IgnorePattern> for IgnoreSet {
    fn from_iter<T: IntoIterator<Item = IgnorePattern>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<IgnorePattern> for IgnoreSet {
    fn extend<T: IntoIterator<Item = IgnorePattern>>(&mut self, iter: T) {
        for pattern in iter {
            self.insert(pattern);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{IgnorePattern, IgnoreSet, PatternError, PatternSegment};
    use sg_value::access::{Key, KeyPath};

    fn pattern(text: &str) -> IgnorePattern {
        text.parse().unwrap()
    }

    #[test]
    fn parse_segments() {
        assert_eq!(
            pattern("a.*.2").segments(),
            [
                PatternSegment::Literal("a".into()),
                PatternSegment::Wildcard,
                PatternSegment::Literal("2".into()),
            ]
        );
        assert_eq!(pattern("").len(), 0);
        assert_eq!(pattern("a.*.2").to_string(), "a.*.2");
        assert_eq!(IgnorePattern::root().to_string(), "<root>");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            IgnorePattern::parse("a..b"),
            Err(PatternError::EmptySegment {
                pattern: "a..b".into(),
                offset: 2,
            })
        );
        assert!(matches!(
            IgnorePattern::parse(".a"),
            Err(PatternError::EmptySegment { offset: 0, .. })
        ));
        assert!(matches!(
            IgnorePattern::parse("a.b*"),
            Err(PatternError::PartialWildcard { .. })
        ));
    }

    #[test]
    fn exact_length_matching() {
        let p = pattern("a.*");
        assert!(p.matches(&KeyPath::from_dotted("a.x")));
        assert!(!p.matches(&KeyPath::from_dotted("a")));
        assert!(!p.matches(&KeyPath::from_dotted("a.x.y")));
        assert!(!p.matches(&KeyPath::from_dotted("b.x")));
    }

    #[test]
    fn literal_matches_index() {
        let path: KeyPath = [Key::from("c"), Key::Index(2)].into_iter().collect();
        assert!(pattern("c.2").matches(&path));
        assert!(!pattern("c.02").matches(&path));
    }

    #[test]
    fn root_pattern_matches_only_root() {
        let set: IgnoreSet = [pattern("")].into_iter().collect();
        assert!(set.matches(&KeyPath::root()));
        assert!(!set.matches(&KeyPath::from_dotted("a")));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = IgnoreSet::new();
        assert!(!set.matches(&KeyPath::root()));
        assert!(!set.matches(&KeyPath::from_dotted("a")));
    }

    #[test]
    fn duplicates_collapse() {
        let set: IgnoreSet = [pattern("a"), pattern("a"), pattern("b.*")].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(!set.matches(&KeyPath::from_dotted("b.c.d")));
    }
}
