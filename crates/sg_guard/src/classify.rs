//! Provide the two capabilities a scan is built from.
//!
//! - [`ValueClassifier`] decides whether one value, taken alone, may live in
//!   a message or the state.
//! - [`EntryEnumerator`] lists the children a scan descends into.
//!
//! Both are implemented for plain closures. When a classifier is widened to
//! accept a new object kind, the enumerator usually has to learn how to
//! list that kind's children too, so the two are replaced in tandem.

use sg_value::Value;
use sg_value::access::Key;

// -----------------------------------------------------------------------------
// ValueClassifier

/// Decides whether a single value is serializable on its own.
///
/// Children are not the classifier's concern; a container is judged only by
/// its own kind and the scan visits its children separately.
pub trait ValueClassifier {
    fn is_serializable(&self, value: &Value) -> bool;
}

impl<F: Fn(&Value) -> bool> ValueClassifier for F {
    #[inline]
    fn is_serializable(&self, value: &Value) -> bool {
        self(value)
    }
}

/// The default classifier, see [`is_plain`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainClassifier;

impl ValueClassifier for PlainClassifier {
    #[inline]
    fn is_serializable(&self, value: &Value) -> bool {
        is_plain(value)
    }
}

/// Returns `true` for plain data.
///
/// Accepted: `undefined`, `null`, booleans, numbers, strings, lists (their
/// elements are judged separately) and plain records. Everything with a
/// class identity or no data representation is rejected: big integers,
/// symbols, functions, maps, sets, dates, regular expressions and instances.
///
/// # Examples
///
/// ```
/// use sg_guard::is_plain;
/// use sg_value::Value;
///
/// assert!(is_plain(&Value::Null));
/// assert!(is_plain(&Value::list([Value::symbol("inner")])));
/// assert!(!is_plain(&Value::map::<Value, Value>([])));
/// assert!(!is_plain(&Value::instance("Todo", [("done", false)])));
/// ```
pub fn is_plain(value: &Value) -> bool {
    matches!(
        value,
        Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::List(_)
            | Value::Record(_)
    )
}

// -----------------------------------------------------------------------------
// EntryEnumerator

/// Lists the children of a value, in the order a scan visits them.
///
/// Called for every object-like value the classifier accepted; it must not
/// panic on a kind it does not know and should return no entries instead.
pub trait EntryEnumerator {
    fn entries_of(&self, value: &Value) -> Vec<(Key, Value)>;
}

impl<F: Fn(&Value) -> Vec<(Key, Value)>> EntryEnumerator for F {
    #[inline]
    fn entries_of(&self, value: &Value) -> Vec<(Key, Value)> {
        self(value)
    }
}

/// The default enumerator: own fields and list elements.
///
/// Records and instances yield their fields in insertion order, lists yield
/// `(index, element)` in ascending order. Other kinds have no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnEntries;

impl EntryEnumerator for OwnEntries {
    fn entries_of(&self, value: &Value) -> Vec<(Key, Value)> {
        match value {
            Value::Record(record) => record
                .iter()
                .map(|(key, child)| (Key::from(key), child.clone()))
                .collect(),
            Value::Instance(instance) => instance
                .fields()
                .iter()
                .map(|(key, child)| (Key::from(key), child.clone()))
                .collect(),
            Value::List(list) => list
                .iter()
                .enumerate()
                .map(|(index, child)| (Key::Index(index), child.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
