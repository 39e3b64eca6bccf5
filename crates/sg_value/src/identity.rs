//! Reference identity and weak handles for [`Value`]s.

use alloc::rc::{Rc, Weak};
use core::fmt;

use crate::Value;
use crate::ops::{FunctionData, InstanceData, RegExpData, SymbolData};

// -----------------------------------------------------------------------------
// Identity

/// The address of a value's shared allocation.
///
/// Two values have the same identity exactly when they are handles to the
/// same allocation. An identity is only meaningful while some handle (strong
/// or [`WeakValue`]) keeps the allocation from being freed; afterwards the
/// address may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(usize);

impl Identity {
    #[inline]
    pub(crate) fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc).cast::<()>().addr())
    }

    #[inline]
    fn of_weak<T: ?Sized>(weak: &Weak<T>) -> Self {
        Self(weak.as_ptr().cast::<()>().addr())
    }

    /// Returns the raw address.
    #[inline]
    pub const fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

// -----------------------------------------------------------------------------
// WeakValue

#[derive(Clone)]
enum WeakKind {
    Symbol(Weak<SymbolData>),
    List(Weak<[Value]>),
    Record(Weak<[(Rc<str>, Value)]>),
    Map(Weak<[(Value, Value)]>),
    Set(Weak<[Value]>),
    RegExp(Weak<RegExpData>),
    Instance(Weak<InstanceData>),
    Function(Weak<FunctionData>),
}

/// A non-owning handle to a reference value.
///
/// Holding a `WeakValue` does not keep the value alive. It does keep the
/// allocation reserved, so the [`Identity`] it reports cannot be handed to
/// another value while the handle exists.
///
/// # Examples
///
/// ```
/// use sg_value::Value;
///
/// let value = Value::list([Value::from(1)]);
/// let weak = value.downgrade().unwrap();
/// assert!(weak.is_alive());
/// assert_eq!(Some(weak.identity()), value.identity());
///
/// drop(value);
/// assert!(!weak.is_alive());
/// assert!(!weak.refers_to(&Value::list([])));
/// ```
#[derive(Clone)]
pub struct WeakValue(WeakKind);

macro_rules! weak_dispatch {
    ($this:expr, $weak:ident => $expr:expr) => {
        match $this {
            WeakKind::Symbol($weak) => $expr,
            WeakKind::List($weak) => $expr,
            WeakKind::Record($weak) => $expr,
            WeakKind::Map($weak) => $expr,
            WeakKind::Set($weak) => $expr,
            WeakKind::RegExp($weak) => $expr,
            WeakKind::Instance($weak) => $expr,
            WeakKind::Function($weak) => $expr,
        }
    };
}

impl WeakValue {
    /// Returns `true` while some strong handle to the value exists.
    #[inline]
    pub fn is_alive(&self) -> bool {
        weak_dispatch!(&self.0, weak => weak.strong_count() > 0)
    }

    /// Returns the identity of the referenced allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        weak_dispatch!(&self.0, weak => Identity::of_weak(weak))
    }

    /// Returns `true` if this handle refers to the allocation behind `value`.
    #[inline]
    pub fn refers_to(&self, value: &Value) -> bool {
        value.identity() == Some(self.identity())
    }
}

impl fmt::Debug for WeakValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakValue")
            .field("identity", &self.identity())
            .field("alive", &self.is_alive())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Value integration

impl Value {
    /// Returns the identity of a reference value, `None` for every other kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_value::Value;
    ///
    /// let a = Value::record([("x", 1)]);
    /// let b = a.clone();
    /// assert_eq!(a.identity(), b.identity());
    /// assert_ne!(a.identity(), Value::record([("x", 1)]).identity());
    /// assert_eq!(Value::from(1).identity(), None);
    /// ```
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Self::Symbol(v) => Some(v.identity()),
            Self::List(v) => Some(v.identity()),
            Self::Record(v) => Some(v.identity()),
            Self::Map(v) => Some(v.identity()),
            Self::Set(v) => Some(v.identity()),
            Self::RegExp(v) => Some(v.identity()),
            Self::Instance(v) => Some(v.identity()),
            Self::Function(v) => Some(v.identity()),
            Self::Undefined
            | Self::Null
            | Self::Bool(_)
            | Self::Number(_)
            | Self::BigInt(_)
            | Self::String(_)
            | Self::Date(_) => None,
        }
    }

    /// Returns a non-owning handle for a reference value, `None` for every other kind.
    pub fn downgrade(&self) -> Option<WeakValue> {
        let kind = match self {
            Self::Symbol(v) => WeakKind::Symbol(v.downgrade()),
            Self::List(v) => WeakKind::List(v.downgrade()),
            Self::Record(v) => WeakKind::Record(v.downgrade()),
            Self::Map(v) => WeakKind::Map(v.downgrade()),
            Self::Set(v) => WeakKind::Set(v.downgrade()),
            Self::RegExp(v) => WeakKind::RegExp(v.downgrade()),
            Self::Instance(v) => WeakKind::Instance(v.downgrade()),
            Self::Function(v) => WeakKind::Function(v.downgrade()),
            Self::Undefined
            | Self::Null
            | Self::Bool(_)
            | Self::Number(_)
            | Self::BigInt(_)
            | Self::String(_)
            | Self::Date(_) => return None,
        };
        Some(WeakValue(kind))
    }
}
