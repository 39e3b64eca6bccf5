use alloc::vec::Vec;
use core::{fmt, slice};

use crate::access::Key;

/// The rendering of the empty path, i.e. the root value itself.
pub const ROOT_MARKER: &str = "<root>";

// -----------------------------------------------------------------------------
// KeyPath

/// An ordered sequence of [`Key`]s, from a root value to a nested one.
///
/// The empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    /// Returns the empty path.
    #[inline]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Splits a dot-separated path into name keys.
    ///
    /// The empty string is the root path. Keys containing `.` cannot be
    /// expressed this way; build such paths from [`Key`]s instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_value::access::KeyPath;
    ///
    /// assert_eq!(KeyPath::from_dotted("b.b1").len(), 2);
    /// assert!(KeyPath::from_dotted("").is_root());
    /// ```
    pub fn from_dotted(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        path.split('.').map(Key::from).collect()
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the root path.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keys as a slice.
    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Returns an iterator over the keys, root side first.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Key> {
        self.0.iter()
    }

    /// Returns the last key, `None` for the root path.
    #[inline]
    pub fn last(&self) -> Option<&Key> {
        self.0.last()
    }

    /// Appends a key.
    #[inline]
    pub fn push(&mut self, key: Key) {
        self.0.push(key);
    }

    /// Removes and returns the last key.
    #[inline]
    pub fn pop(&mut self) -> Option<Key> {
        self.0.pop()
    }

    /// Returns a new path extended by `key`.
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut keys = Vec::with_capacity(self.0.len() + 1);
        keys.extend_from_slice(&self.0);
        keys.push(key.into());
        Self(keys)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.0.iter();
        match keys.next() {
            None => f.write_str(ROOT_MARKER),
            Some(first) => {
                fmt::Display::fmt(first, f)?;
                keys.try_for_each(|key| write!(f, ".{key}"))
            }
        }
    }
}

impl From<Vec<Key>> for KeyPath {
    #[inline]
    fn from(value: Vec<Key>) -> Self {
        Self(value)
    }
}

impl FromIterator<Key> for KeyPath {
    #[inline]
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Key> for KeyPath {
    #[inline]
    fn extend<T: IntoIterator<Item = Key>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = slice::Iter<'a, Key>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::KeyPath;
    use crate::access::Key;

    #[test]
    fn render() {
        assert_eq!(KeyPath::root().to_string(), "<root>");
        assert_eq!(KeyPath::root().child("a").to_string(), "a");

        let mut path = KeyPath::from_dotted("c");
        path.push(Key::Index(2));
        path.push(Key::from("d"));
        assert_eq!(path.to_string(), "c.2.d");
        assert_eq!(path.pop(), Some(Key::from("d")));
        assert_eq!(path.last(), Some(&Key::Index(2)));
    }

    #[test]
    fn dotted_keys_stay_single_segments() {
        let path = KeyPath::root().child("a.b");
        assert_eq!(path.len(), 1);
        assert_eq!(path.to_string(), "a.b");
        assert_ne!(path, KeyPath::from_dotted("a.b"));
    }
}
