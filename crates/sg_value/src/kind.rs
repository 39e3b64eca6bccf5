use core::fmt;

// -----------------------------------------------------------------------------
// ValueKind

/// An enumeration of the "kinds" of a [`Value`].
///
/// Obtained via [`Value::kind`].
///
/// [`Value`]: crate::Value
/// [`Value::kind`]: crate::Value::kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Bool,
    Number,
    BigInt,
    String,
    Symbol,
    List,
    Record,
    Map,
    Set,
    Date,
    RegExp,
    Instance,
    Function,
}

impl ValueKind {
    /// Returns `true` for object-like kinds, the ones that may expose children.
    ///
    /// Symbols and functions are shared allocations but not objects.
    #[inline]
    pub const fn is_object(self) -> bool {
        matches!(
            self,
            Self::List
                | Self::Record
                | Self::Map
                | Self::Set
                | Self::Date
                | Self::RegExp
                | Self::Instance
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.pad("undefined"),
            Self::Null => f.pad("null"),
            Self::Bool => f.pad("boolean"),
            Self::Number => f.pad("number"),
            Self::BigInt => f.pad("bigint"),
            Self::String => f.pad("string"),
            Self::Symbol => f.pad("symbol"),
            Self::List => f.pad("list"),
            Self::Record => f.pad("record"),
            Self::Map => f.pad("map"),
            Self::Set => f.pad("set"),
            Self::Date => f.pad("date"),
            Self::RegExp => f.pad("regexp"),
            Self::Instance => f.pad("instance"),
            Self::Function => f.pad("function"),
        }
    }
}
