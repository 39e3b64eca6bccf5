use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::fmt;

use crate::{Identity, Value};

// -----------------------------------------------------------------------------
// ValueMap

/// An immutable map with arbitrary keys, in insertion order.
///
/// Keys are compared with [`Value::is`].
#[derive(Clone)]
pub struct ValueMap(Rc<[(Value, Value)]>);

impl ValueMap {
    /// Creates a map from key-value pairs.
    ///
    /// A key given more than once keeps its first position and its last value.
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        for (key, value) in pairs {
            let key: Value = key.into();
            let value: Value = value.into();
            match entries.iter_mut().find(|(k, _)| k.is(&key)) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self(entries.into())
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k.is(key)).map(|(_, v)| v)
    }

    /// Returns an iterator over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    /// Returns the identity of the underlying allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<[(Value, Value)]> {
        Rc::downgrade(&self.0)
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
