use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::fmt;

use sg_utils::hash::HashMap;

use crate::{Identity, Value};

// -----------------------------------------------------------------------------
// Record

/// An immutable plain record: string keys mapped to values, in insertion order.
///
/// A record has no class identity of its own. Values that carry one are
/// [`Instance`](crate::ops::Instance)s.
///
/// # Examples
///
/// ```
/// use sg_value::ops::Record;
/// use sg_value::Value;
///
/// let record = Record::new([("a", Value::from(1)), ("b", Value::from(2)), ("a", Value::from(3))]);
///
/// // A repeated key keeps its first position and takes the last value.
/// let keys: Vec<&str> = record.keys().collect();
/// assert_eq!(keys, ["a", "b"]);
/// assert!(record.get("a").unwrap().is(&Value::from(3)));
/// ```
#[derive(Clone)]
pub struct Record(Rc<[(Rc<str>, Value)]>);

impl Record {
    /// Creates a record from key-value pairs.
    ///
    /// A key given more than once keeps the position of its first occurrence
    /// and the value of its last.
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Rc<str>>,
        V: Into<Value>,
    {
        let entries = entries.into_iter();
        let (lower, _) = entries.size_hint();

        let mut fields: Vec<(Rc<str>, Value)> = Vec::with_capacity(lower);
        let mut positions: HashMap<Rc<str>, usize> = HashMap::default();

        for (key, value) in entries {
            let key: Rc<str> = key.into();
            let value: Value = value.into();
            match positions.get(&key) {
                Some(&index) => fields[index].1 = value,
                None => {
                    positions.insert(key.clone(), fields.len());
                    fields.push((key, value));
                }
            }
        }

        Self(fields.into())
    }

    /// Creates an empty record.
    #[inline]
    pub fn empty() -> Self {
        Self(Rc::from(Vec::new()))
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record holds no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(name, _)| name.as_ref() == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the record has a field named `key`.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over the fields in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_ref(), value))
    }

    /// Returns an iterator over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_ref())
    }

    /// Returns a new record with `key` set to `value`.
    ///
    /// An existing key keeps its position; a new key is appended.
    /// Every other field is shared with `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_value::ops::Record;
    /// use sg_value::Value;
    ///
    /// let nested = Value::record([("x", 1)]);
    /// let old = Record::new([("keep", nested.clone()), ("count", Value::from(0))]);
    /// let new = old.with("count", 1);
    ///
    /// assert!(old.get("count").unwrap().is(&Value::from(0)));
    /// assert!(new.get("keep").unwrap().is(&nested));
    /// assert_ne!(new.identity(), old.identity());
    /// ```
    pub fn with(&self, key: impl Into<Rc<str>>, value: impl Into<Value>) -> Self {
        let key: Rc<str> = key.into();
        let value: Value = value.into();

        let mut fields: Vec<(Rc<str>, Value)> = self.0.to_vec();
        match fields.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => fields.push((key, value)),
        }
        Self(fields.into())
    }

    /// Returns the identity of the underlying allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<[(Rc<str>, Value)]> {
        Rc::downgrade(&self.0)
    }
}

impl<K: Into<Rc<str>>, V: Into<Value>> FromIterator<(K, V)> for Record {
    #[inline]
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
