use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::{fmt, slice};

use crate::{Identity, Value};

// -----------------------------------------------------------------------------
// List

/// An immutable, ordered sequence of values.
///
/// Cloning a `List` clones the handle; both handles share one allocation
/// and the same [`Identity`].
///
/// # Examples
///
/// ```
/// use sg_value::ops::List;
/// use sg_value::Value;
///
/// let list = List::new([Value::from(1), Value::from("two")]);
/// assert_eq!(list.len(), 2);
/// assert!(list.get(1).unwrap().is(&Value::from("two")));
///
/// let longer = list.with_pushed(Value::Null);
/// assert_eq!(list.len(), 2);
/// assert_eq!(longer.len(), 3);
/// ```
#[derive(Clone)]
pub struct List(Rc<[Value]>);

impl List {
    /// Creates a list from the given items.
    pub fn new(items: impl IntoIterator<Item = Value>) -> Self {
        Self(items.into_iter().collect())
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Returns an iterator over the elements in index order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Returns a new list with `value` appended.
    pub fn with_pushed(&self, value: Value) -> Self {
        let mut items: Vec<Value> = self.0.to_vec();
        items.push(value);
        Self(items.into())
    }

    /// Returns a new list with the element at `index` replaced.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn with_replaced(&self, index: usize, value: Value) -> Option<Self> {
        if index >= self.len() {
            return None;
        }
        let mut items: Vec<Value> = self.0.to_vec();
        items[index] = value;
        Some(Self(items.into()))
    }

    /// Returns the identity of the underlying allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<[Value]> {
        Rc::downgrade(&self.0)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for List {
    #[inline]
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
