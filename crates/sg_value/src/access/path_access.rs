//! Provide path accessing for [`Value`].

use crate::Value;
use crate::access::{Key, KeyPath};

impl Value {
    /// Returns the child of `self` addressed by `key`.
    ///
    /// Records and instances are addressed by name, lists by index.
    /// Any other pairing yields `None`.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match self {
            Self::Record(record) => record.get(key.as_name()?),
            Self::Instance(instance) => instance.get(key.as_name()?),
            Self::List(list) => list.get(key.as_index()?),
            _ => None,
        }
    }

    /// Returns the nested value addressed by `path`; the root path yields `self`.
    pub fn access(&self, path: &KeyPath) -> Option<&Value> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Value;
    use crate::access::{Key, KeyPath};

    #[test]
    fn access_through_kinds() {
        let state = Value::record([
            ("list", Value::list([Value::Null, Value::instance("Point", [("x", 7)])])),
            ("map", Value::map([("k", 1)])),
        ]);

        let x = KeyPath::from_dotted("list.1.x");
        assert!(state.access(&x).unwrap().is(&Value::from(7)));

        let by_index: KeyPath = [Key::from("list"), Key::Index(0)].into_iter().collect();
        assert!(state.access(&by_index).unwrap().is(&Value::Null));

        assert!(state.access(&KeyPath::from_dotted("map.k")).is_none());
        assert!(state.access(&KeyPath::from_dotted("list.x")).is_none());
        assert!(state.access(&KeyPath::from_dotted("missing")).is_none());
    }
}
