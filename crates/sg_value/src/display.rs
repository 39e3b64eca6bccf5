//! Human-readable rendering of values, in the style of a JavaScript console.

use core::fmt::{self, Display, Formatter, Write};

use crate::Value;

/// Containers nested deeper than this are abbreviated, e.g. `[Object]`.
const MAX_DEPTH: usize = 3;

impl Display for Value {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Render { value: self, depth: 0 }.fmt(f)
    }
}

impl fmt::Debug for Value {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Render<'a> {
    value: &'a Value,
    depth: usize,
}

impl<'a> Render<'a> {
    #[inline]
    fn child(&self, value: &'a Value) -> Self {
        Render {
            value,
            depth: self.depth + 1,
        }
    }
}

impl Display for Render<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let abbreviate = self.depth > MAX_DEPTH;

        match self.value {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, *n),
            Value::BigInt(n) => write!(f, "{n}n"),
            Value::String(s) => write_quoted(f, s),
            Value::Symbol(symbol) => fmt::Debug::fmt(symbol, f),
            Value::Function(function) => fmt::Debug::fmt(function, f),
            Value::RegExp(regexp) => fmt::Debug::fmt(regexp, f),
            Value::Date(date) => {
                f.write_str("Date(")?;
                write_number(f, date.millis())?;
                f.write_char(')')
            }
            Value::List(list) if list.is_empty() => f.write_str("[]"),
            Value::List(_) if abbreviate => f.write_str("[Array]"),
            Value::List(list) => {
                f.write_str("[ ")?;
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    self.child(item).fmt(f)?;
                }
                f.write_str(" ]")
            }
            Value::Record(record) if record.is_empty() => f.write_str("{}"),
            Value::Record(_) if abbreviate => f.write_str("[Object]"),
            Value::Record(record) => self.write_fields(f, record.iter()),
            Value::Instance(instance) => {
                let class = instance.class_name();
                if instance.fields().is_empty() {
                    write!(f, "{class} {{}}")
                } else if abbreviate {
                    write!(f, "[{class}]")
                } else {
                    write!(f, "{class} ")?;
                    self.write_fields(f, instance.fields().iter())
                }
            }
            Value::Map(map) if abbreviate && !map.is_empty() => f.write_str("[Map]"),
            Value::Map(map) => {
                write!(f, "Map({}) {{", map.len())?;
                for (index, (key, value)) in map.iter().enumerate() {
                    f.write_str(if index > 0 { ", " } else { " " })?;
                    write!(f, "{} => {}", self.child(key), self.child(value))?;
                }
                f.write_str(if map.is_empty() { "}" } else { " }" })
            }
            Value::Set(set) if abbreviate && !set.is_empty() => f.write_str("[Set]"),
            Value::Set(set) => {
                write!(f, "Set({}) {{", set.len())?;
                for (index, item) in set.iter().enumerate() {
                    f.write_str(if index > 0 { ", " } else { " " })?;
                    self.child(item).fmt(f)?;
                }
                f.write_str(if set.is_empty() { "}" } else { " }" })
            }
        }
    }
}

impl<'a> Render<'a> {
    fn write_fields(
        &self,
        f: &mut Formatter<'_>,
        fields: impl Iterator<Item = (&'a str, &'a Value)>,
    ) -> fmt::Result {
        f.write_str("{ ")?;
        for (index, (key, value)) in fields.enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            if is_identifier(key) {
                f.write_str(key)?;
            } else {
                write_quoted(f, key)?;
            }
            write!(f, ": {}", self.child(value))?;
        }
        f.write_str(" }")
    }
}

fn write_number(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{n}")
    }
}

fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::Value;

    #[test]
    fn scalars() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::BigInt(7).to_string(), "7n");
        assert_eq!(Value::from("it's").to_string(), "'it\\'s'");
    }

    #[test]
    fn opaque_kinds() {
        assert_eq!(Value::symbol("b").to_string(), "Symbol(b)");
        assert_eq!(
            Value::function("reducer", |_| Value::Undefined).to_string(),
            "[Function: reducer]"
        );
        assert_eq!(
            Value::function("", |_| Value::Undefined).to_string(),
            "[Function (anonymous)]"
        );
        assert_eq!(Value::regexp("a+", "gi").to_string(), "/a+/gi");
        assert_eq!(Value::date(0.0).to_string(), "Date(0)");
    }

    #[test]
    fn containers() {
        assert_eq!(Value::list([]).to_string(), "[]");
        assert_eq!(Value::record::<&str, Value>([]).to_string(), "{}");
        assert_eq!(
            Value::record([("a b", 1), ("c", 2)]).to_string(),
            "{ 'a b': 1, c: 2 }"
        );
        assert_eq!(
            Value::map([("b", Value::symbol("b"))]).to_string(),
            "Map(1) { 'b' => Symbol(b) }"
        );
        assert_eq!(Value::map::<Value, Value>([]).to_string(), "Map(0) {}");
        assert_eq!(
            Value::set([Value::from(1), Value::from(2), Value::from(1)]).to_string(),
            "Set(2) { 1, 2 }"
        );
        assert_eq!(
            Value::instance("Point", [("x", 1)]).to_string(),
            "Point { x: 1 }"
        );
    }

    #[test]
    fn deep_nesting_is_abbreviated() {
        let deep = Value::record([(
            "a",
            Value::record([("b", Value::record([("c", Value::record([("d", Value::list([Value::from(1)]))]))]))]),
        )]);
        assert_eq!(deep.to_string(), "{ a: { b: { c: { d: [Array] } } } }");
    }
}
