use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::fmt;

use crate::{Identity, Value};

// -----------------------------------------------------------------------------
// Symbol

pub(crate) struct SymbolData {
    description: Option<Rc<str>>,
}

/// A unique token. Two symbols are the same only if they are clones of one handle.
///
/// # Examples
///
/// ```
/// use sg_value::ops::Symbol;
///
/// let a = Symbol::new(Some("id"));
/// let b = Symbol::new(Some("id"));
/// assert_eq!(a.description(), Some("id"));
/// assert_ne!(a.identity(), b.identity());
/// assert_eq!(a.identity(), a.clone().identity());
/// ```
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

impl Symbol {
    /// Creates a new, unique symbol.
    pub fn new(description: Option<&str>) -> Self {
        Self(Rc::new(SymbolData {
            description: description.map(Rc::from),
        }))
    }

    /// Returns the description given at creation.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Returns the identity of the underlying allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<SymbolData> {
        Rc::downgrade(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(description) => write!(f, "Symbol({description})"),
            None => f.write_str("Symbol()"),
        }
    }
}

// -----------------------------------------------------------------------------
// Function

pub(crate) struct FunctionData {
    name: Rc<str>,
    body: Box<dyn Fn(&[Value]) -> Value>,
}

/// A named callable.
///
/// # Examples
///
/// ```
/// use sg_value::ops::Function;
/// use sg_value::Value;
///
/// let double = Function::new("double", |args: &[Value]| match args.first() {
///     Some(Value::Number(n)) => Value::Number(n * 2.0),
///     _ => Value::Undefined,
/// });
///
/// assert_eq!(double.name(), "double");
/// assert!(double.call(&[Value::from(21)]).is(&Value::from(42)));
/// ```
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    /// Creates a callable. An empty `name` denotes an anonymous function.
    pub fn new(name: impl Into<Rc<str>>, body: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(FunctionData {
            name: name.into(),
            body: Box::new(body),
        }))
    }

    /// Returns the function name, empty for anonymous functions.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Invokes the function.
    #[inline]
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.body)(args)
    }

    /// Returns the identity of the underlying allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<FunctionData> {
        Rc::downgrade(&self.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            "" => f.write_str("[Function (anonymous)]"),
            name => write!(f, "[Function: {name}]"),
        }
    }
}

// -----------------------------------------------------------------------------
// RegExp

pub(crate) struct RegExpData {
    source: Rc<str>,
    flags: Rc<str>,
}

/// A regular expression literal, kept as source text and flags.
#[derive(Clone)]
pub struct RegExp(Rc<RegExpData>);

impl RegExp {
    /// Creates a regular expression value. The pattern is not compiled.
    pub fn new(source: impl Into<Rc<str>>, flags: impl Into<Rc<str>>) -> Self {
        Self(Rc::new(RegExpData {
            source: source.into(),
            flags: flags.into(),
        }))
    }

    /// Returns the pattern source.
    #[inline]
    pub fn source(&self) -> &str {
        &self.0.source
    }

    /// Returns the flags.
    #[inline]
    pub fn flags(&self) -> &str {
        &self.0.flags
    }

    /// Returns the identity of the underlying allocation.
    #[inline]
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<RegExpData> {
        Rc::downgrade(&self.0)
    }
}

impl fmt::Debug for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags())
    }
}

// -----------------------------------------------------------------------------
// Date

/// A point in time, as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Date(f64);

impl Date {
    /// Creates a date from milliseconds since the Unix epoch.
    #[inline]
    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    /// Returns milliseconds since the Unix epoch.
    #[inline]
    pub const fn millis(self) -> f64 {
        self.0
    }
}
