use alloc::rc::{Rc, Weak};
use core::fmt;

use crate::ops::Record;
use crate::{Identity, Value};

// -----------------------------------------------------------------------------
// Instance

pub(crate) struct InstanceData {
    class: Rc<str>,
    fields: Record,
}

/// A value tagged with a class name, plus its own fields.
///
/// The fields are visible to path access and to entry enumeration, but the
/// class tag sets an instance apart from a plain [`Record`].
///
/// # Examples
///
/// ```
/// use sg_value::ops::Instance;
/// use sg_value::Value;
///
/// let point = Instance::new("Point", [("x", 1), ("y", 2)]);
/// assert_eq!(point.class_name(), "Point");
/// assert!(point.get("y").unwrap().is(&Value::from(2)));
/// ```
#[derive(Clone)]
pub struct Instance(Rc<InstanceData>);

impl Instance {
    /// Creates an instance of `class` with the given own fields.
    pub fn new<K, V>(class: impl Into<Rc<str>>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Rc<str>>,
        V: Into<Value>,
    {
        Self(Rc::new(InstanceData {
            class: class.into(),
            fields: Record::new(fields),
        }))
    }

    /// Returns the class name.
    #[inline]
    pub fn class_name(&self) -> &str {
        &self.0.class
    }

    /// Returns the own fields as a record.
    #[inline]
    pub fn fields(&self) -> &Record {
        &self.0.fields
    }

    /// Returns the field named `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.fields.get(key)
    }

    /// Returns the identity of the underlying allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<InstanceData> {
        Rc::downgrade(&self.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class_name())
            .field("fields", self.fields())
            .finish()
    }
}
