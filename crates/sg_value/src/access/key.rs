use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// Key

/// A **singular** step within a [`KeyPath`](crate::access::KeyPath).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// A named field of a record or an instance.
    Name(Rc<str>),
    /// A position in a list.
    Index(usize),
}

impl Key {
    /// Returns the field name of a `Name` key.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Returns the index this key denotes.
    ///
    /// A `Name` spelling a canonical decimal number (`"0"`, `"12"`, not
    /// `"012"`) denotes that index too, so `"2"` and `2` address the same
    /// list element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(name) => parse_index(name),
        }
    }

    /// Returns `true` if the key renders as `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_value::access::Key;
    ///
    /// assert!(Key::from("meta").spells("meta"));
    /// assert!(Key::from(3_usize).spells("3"));
    /// assert!(!Key::from(3_usize).spells("03"));
    /// ```
    pub fn spells(&self, text: &str) -> bool {
        match self {
            Self::Name(name) => name.as_ref() == text,
            Self::Index(index) => parse_index(text) == Some(*index),
        }
    }
}

/// Parses a canonical, non-negative decimal index.
pub(crate) fn parse_index(text: &str) -> Option<usize> {
    let canonical = match text.as_bytes() {
        [b'0'] => true,
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
        [] => false,
    };
    if canonical { text.parse().ok() } else { None }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Name(Rc::from(value))
    }
}

impl From<String> for Key {
    #[inline]
    fn from(value: String) -> Self {
        Self::Name(Rc::from(value))
    }
}

impl From<Rc<str>> for Key {
    #[inline]
    fn from(value: Rc<str>) -> Self {
        Self::Name(value)
    }
}

impl From<usize> for Key {
    #[inline]
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Key, parse_index};

    #[test]
    fn canonical_indices() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("17"), Some(17));
        assert_eq!(parse_index("007"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("1a"), None);
    }

    #[test]
    fn name_and_index() {
        assert_eq!(Key::from("2").as_index(), Some(2));
        assert_eq!(Key::from(2_usize).as_name(), None);
        assert_eq!(Key::from("x").as_index(), None);
    }
}
