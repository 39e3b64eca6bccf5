use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::{fmt, slice};

use crate::{Identity, Value};

// -----------------------------------------------------------------------------
// ValueSet

/// An immutable set of values, in insertion order.
///
/// Members are compared with [`Value::is`].
#[derive(Clone)]
pub struct ValueSet(Rc<[Value]>);

impl ValueSet {
    /// Creates a set from the given members, dropping repeats.
    pub fn new(members: impl IntoIterator<Item = Value>) -> Self {
        let mut items: Vec<Value> = Vec::new();
        for member in members {
            if !items.iter().any(|item| item.is(&member)) {
                items.push(member);
            }
        }
        Self(items.into())
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `value` is a member.
    pub fn contains(&self, value: &Value) -> bool {
        self.0.iter().any(|item| item.is(value))
    }

    /// Returns an iterator over the members in insertion order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.0.iter()
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

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
