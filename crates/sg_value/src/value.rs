use alloc::rc::Rc;
use alloc::string::String;

use crate::ValueKind;
use crate::ops::{Date, Function, Instance, List, Record, RegExp, Symbol, ValueMap, ValueSet};

// -----------------------------------------------------------------------------
// Value

/// A node of a message or state tree.
///
/// Scalars are stored inline. Every other kind is a cheap handle to an
/// immutable shared allocation; see [`Value::identity`].
///
/// # Examples
///
/// ```
/// use sg_value::{Value, ValueKind};
///
/// let state = Value::record([
///     ("a", Value::from(42)),
///     ("b", Value::record([("b1", "test")])),
///     ("c", Value::list([Value::from(99), Value::record([("d", 123)])])),
/// ]);
///
/// assert_eq!(state.kind(), ValueKind::Record);
/// assert!(state.is_object());
/// assert_eq!(state.to_string(), "{ a: 42, b: { b1: 'test' }, c: [ 99, { d: 123 } ] }");
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(Rc<str>),
    Symbol(Symbol),
    List(List),
    Record(Record),
    Map(ValueMap),
    Set(ValueSet),
    Date(Date),
    RegExp(RegExp),
    Instance(Instance),
    Function(Function),
}

impl Value {
    /// Creates a [`List`] value.
    #[inline]
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(List::new(items))
    }

    /// Creates a [`Record`] value.
    #[inline]
    pub fn record<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Rc<str>>,
        V: Into<Value>,
    {
        Self::Record(Record::new(entries))
    }

    /// Creates a [`ValueMap`] value.
    #[inline]
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::Map(ValueMap::new(pairs))
    }

    /// Creates a [`ValueSet`] value.
    #[inline]
    pub fn set(members: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(ValueSet::new(members))
    }

    /// Creates a new unique [`Symbol`] value.
    #[inline]
    pub fn symbol(description: &str) -> Self {
        Self::Symbol(Symbol::new(Some(description)))
    }

    /// Creates a [`Function`] value.
    #[inline]
    pub fn function(name: &str, body: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self::Function(Function::new(name, body))
    }

    /// Creates an [`Instance`] value.
    #[inline]
    pub fn instance<K, V>(class: &str, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Rc<str>>,
        V: Into<Value>,
    {
        Self::Instance(Instance::new(class, fields))
    }

    /// Creates a [`RegExp`] value.
    #[inline]
    pub fn regexp(source: &str, flags: &str) -> Self {
        Self::RegExp(RegExp::new(source, flags))
    }

    /// Creates a [`Date`] value.
    #[inline]
    pub fn date(millis: f64) -> Self {
        Self::Date(Date::from_millis(millis))
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::List(_) => ValueKind::List,
            Self::Record(_) => ValueKind::Record,
            Self::Map(_) => ValueKind::Map,
            Self::Set(_) => ValueKind::Set,
            Self::Date(_) => ValueKind::Date,
            Self::RegExp(_) => ValueKind::RegExp,
            Self::Instance(_) => ValueKind::Instance,
            Self::Function(_) => ValueKind::Function,
        }
    }

    /// Returns `true` for object-like values, the ones that may expose children.
    ///
    /// See [`ValueKind::is_object`].
    #[inline]
    pub fn is_object(&self) -> bool {
        self.kind().is_object()
    }

    /// Returns `true` for `Undefined` and `Null`.
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns `true` if `self` and `other` are the same value.
    ///
    /// Reference kinds compare by [`identity`](Value::identity); scalars
    /// compare by content, with `NaN` equal to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_value::Value;
    ///
    /// let list = Value::list([]);
    /// assert!(list.is(&list.clone()));
    /// assert!(!list.is(&Value::list([])));
    ///
    /// assert!(Value::from("a").is(&Value::from("a")));
    /// assert!(Value::Number(f64::NAN).is(&Value::Number(f64::NAN)));
    /// assert!(!Value::Null.is(&Value::Undefined));
    /// ```
    pub fn is(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a.millis() == b.millis(),
            _ => match (self.identity(), other.identity()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Returns the string content of a `String` value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// Returns the number of a `Number` value.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the inner [`List`] of a `List` value.
    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the inner [`Record`] of a `Record` value.
    #[inline]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

macro_rules! from_variant {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

from_variant!(
    bool => Bool,
    Rc<str> => String,
    Symbol => Symbol,
    List => List,
    Record => Record,
    ValueMap => Map,
    ValueSet => Set,
    Date => Date,
    RegExp => RegExp,
    Instance => Instance,
    Function => Function,
);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes `Null`.
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    #[inline]
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::list(iter)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::ValueKind;

    #[test]
    fn object_kinds() {
        assert!(Value::list([]).is_object());
        assert!(Value::record::<&str, Value>([]).is_object());
        assert!(Value::map::<Value, Value>([]).is_object());
        assert!(Value::set([]).is_object());
        assert!(Value::date(0.0).is_object());
        assert!(Value::regexp("a+", "g").is_object());
        assert!(Value::instance::<&str, Value>("Foo", []).is_object());

        assert!(!Value::Null.is_object());
        assert!(!Value::Undefined.is_object());
        assert!(!Value::from("s").is_object());
        assert!(!Value::symbol("s").is_object());
        assert!(!Value::function("f", |_| Value::Undefined).is_object());
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(3_u8).kind(), ValueKind::Number);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(None::<i32>).kind(), ValueKind::Null);
        assert!(Value::from(Some("x")).is(&Value::from("x")));

        let list: Value = [Value::from(1), Value::from(2)].into_iter().collect();
        assert_eq!(list.as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn identity_follows_handles() {
        let record = Value::record([("a", 1)]);
        let copy = record.clone();
        assert!(record.is(&copy));
        assert!(!record.is(&Value::record([("a", 1)])));
        assert!(!Value::from(1).is(&Value::from("1")));
    }
}
