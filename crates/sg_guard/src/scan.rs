//! Provide the recursive scan that finds the first non-serializable value.
//!
//! The walk is depth-first and pre-order: a node is judged before its
//! children, children are visited in the enumerator's order, and the walk
//! stops at the first violation. For every node:
//!
//! 1. an ignored path is skipped together with its whole subtree;
//! 2. a node found in the cache is skipped without being judged;
//! 3. a node that is its own ancestor is reported as a cycle;
//! 4. a node the classifier rejects is reported;
//! 5. an object-like node is descended into;
//! 6. a node whose subtree came out clean is added to the cache, unless an
//!    ignored path inside it was skipped: the cache is keyed by identity
//!    alone and must hold the same answer at every path.

use core::fmt;

use sg_value::access::KeyPath;
use sg_value::{Identity, Value};

use crate::{EntryEnumerator, IgnoreSet, ScanCache, ValueClassifier};

// -----------------------------------------------------------------------------
// Violation

/// Why a value was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// The classifier rejected the value.
    NotSerializable,
    /// The value contains itself; descending would never end.
    Cycle,
}

/// The first offending value of a scan, with the path that leads to it.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Where the value sits; the root path when the scanned value itself is at fault.
    pub path: KeyPath,
    /// The offending value, unchanged.
    pub value: Value,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::NotSerializable => {
                write!(f, "non-serializable value at `{}`: {}", self.path, self.value)
            }
            ViolationKind::Cycle => {
                write!(f, "cyclic reference at `{}`: {}", self.path, self.value)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Scanner

/// A reusable scan configuration.
///
/// A scanner has no state of its own; the optional cache is lent per call.
///
/// # Examples
///
/// ```
/// use sg_guard::{IgnoreSet, OwnEntries, PlainClassifier, Scanner};
/// use sg_value::Value;
///
/// let ignored = IgnoreSet::new();
/// let scanner = Scanner::new(&PlainClassifier, &OwnEntries, &ignored);
///
/// let bad = Value::function("b1", |_| Value::Undefined);
/// let state = Value::record([
///     ("a", Value::from(42)),
///     ("b", Value::record([("b1", bad.clone())])),
/// ]);
///
/// let violation = scanner.scan(&state, None).unwrap();
/// assert_eq!(violation.path.to_string(), "b.b1");
/// assert!(violation.value.is(&bad));
/// ```
#[derive(Clone, Copy)]
pub struct Scanner<'a> {
    classifier: &'a dyn ValueClassifier,
    enumerator: &'a dyn EntryEnumerator,
    ignored: &'a IgnoreSet,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner from its three collaborators.
    #[inline]
    pub fn new(
        classifier: &'a dyn ValueClassifier,
        enumerator: &'a dyn EntryEnumerator,
        ignored: &'a IgnoreSet,
    ) -> Self {
        Self {
            classifier,
            enumerator,
            ignored,
        }
    }

    /// Scans `value` from the root path.
    #[inline]
    pub fn scan(&self, value: &Value, cache: Option<&mut ScanCache>) -> Option<Violation> {
        self.scan_at(value, KeyPath::root(), cache)
    }

    /// Scans `value` as if it sat at `path` inside a larger tree.
    ///
    /// Ignore patterns are matched against the full path, `path` included.
    pub fn scan_at(
        &self,
        value: &Value,
        path: KeyPath,
        cache: Option<&mut ScanCache>,
    ) -> Option<Violation> {
        Walk {
            scanner: *self,
            path,
            ancestors: Vec::new(),
            cache,
            skipped: 0,
        }
        .visit(value)
    }
}

/// Scans `value`, starting at `path`, and returns the first violation in pre-order.
///
/// A free-standing form of [`Scanner::scan_at`].
pub fn find_non_serializable_value(
    value: &Value,
    path: &KeyPath,
    classifier: &dyn ValueClassifier,
    enumerator: &dyn EntryEnumerator,
    ignored: &IgnoreSet,
    cache: Option<&mut ScanCache>,
) -> Option<Violation> {
    Scanner::new(classifier, enumerator, ignored).scan_at(value, path.clone(), cache)
}

// -----------------------------------------------------------------------------
// Walk

struct Walk<'a, 'c> {
    scanner: Scanner<'a>,
    path: KeyPath,
    /// Identities of the containers on the current recursion chain.
    ancestors: Vec<Identity>,
    cache: Option<&'c mut ScanCache>,
    /// Number of nodes skipped by an ignore pattern so far.
    skipped: usize,
}

impl Walk<'_, '_> {
    fn visit(&mut self, value: &Value) -> Option<Violation> {
        if self.scanner.ignored.matches(&self.path) {
            self.skipped += 1;
            return None;
        }

        if self.cache.as_deref().is_some_and(|cache| cache.has(value)) {
            return None;
        }

        let identity = value.identity();
        if identity.is_some_and(|identity| self.ancestors.contains(&identity)) {
            return Some(self.violation(value, ViolationKind::Cycle));
        }

        if !self.scanner.classifier.is_serializable(value) {
            return Some(self.violation(value, ViolationKind::NotSerializable));
        }

        if !value.is_object() {
            return None;
        }

        let skipped_before = self.skipped;
        if let Some(identity) = identity {
            self.ancestors.push(identity);
        }
        let found = self.visit_entries(value);
        if identity.is_some() {
            self.ancestors.pop();
        }

        if found.is_none()
            && self.skipped == skipped_before
            && let Some(cache) = self.cache.as_deref_mut()
        {
            cache.mark_verified(value);
        }
        found
    }

    fn visit_entries(&mut self, value: &Value) -> Option<Violation> {
        for (key, child) in self.scanner.enumerator.entries_of(value) {
            self.path.push(key);
            let found = self.visit(&child);
            self.path.pop();

            if found.is_some() {
                return found;
            }
        }
        None
    }

    #[inline]
    fn violation(&self, value: &Value, kind: ViolationKind) -> Violation {
        Violation {
            path: self.path.clone(),
            value: value.clone(),
            kind,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use sg_value::Value;
    use sg_value::access::{Key, KeyPath};

    use super::{ViolationKind, find_non_serializable_value};
    use crate::{EntryEnumerator, IgnorePattern, IgnoreSet, OwnEntries, PlainClassifier};
    use crate::{ScanCache, Scanner, ValueClassifier};

    fn scan(value: &Value) -> Option<super::Violation> {
        let ignored = IgnoreSet::new();
        Scanner::new(&PlainClassifier, &OwnEntries, &ignored).scan(value, None)
    }

    fn ignoring(patterns: &[&str]) -> IgnoreSet {
        patterns
            .iter()
            .map(|p| p.parse::<IgnorePattern>().unwrap())
            .collect()
    }

    #[test]
    fn plain_tree_passes() {
        let state = Value::record([
            ("a", Value::from(42)),
            ("b", Value::record([("b1", "test")])),
            ("c", Value::list([Value::from(99), Value::record([("d", 123)])])),
        ]);
        assert!(scan(&state).is_none());
    }

    #[test]
    fn reports_nested_path_and_value() {
        let bad = Value::function("b1", |_| Value::Undefined);
        let state = Value::record([
            ("a", Value::from(42)),
            ("b", Value::record([("b1", bad.clone())])),
            ("c", Value::list([Value::from(99), Value::record([("d", 123)])])),
        ]);

        let violation = scan(&state).unwrap();
        assert_eq!(violation.path.to_string(), "b.b1");
        assert!(violation.value.is(&bad));
        assert_eq!(violation.kind, ViolationKind::NotSerializable);
    }

    #[test]
    fn first_in_pre_order_wins() {
        let map = Value::map([("x", 1)]);
        let symbol = Value::symbol("d");
        let state = Value::record([
            ("a", Value::from(42)),
            ("b", Value::record([("b1", "test")])),
            (
                "c",
                Value::list([
                    Value::from(99),
                    Value::record([("d", 123)]),
                    map.clone(),
                    Value::from(99),
                ]),
            ),
            ("d", symbol),
        ]);

        let violation = scan(&state).unwrap();
        assert_eq!(violation.path.to_string(), "c.2");
        assert!(violation.value.is(&map));
    }

    #[test]
    fn root_value_reports_root_marker() {
        let symbol = Value::symbol("root");
        let violation = scan(&symbol).unwrap();
        assert!(violation.path.is_root());
        assert_eq!(violation.path.to_string(), "<root>");
        assert!(violation.value.is(&symbol));
    }

    #[test]
    fn null_is_serializable() {
        let state = Value::record([
            ("a", Value::Null),
            ("b", Value::list([Value::Null, Value::Undefined])),
        ]);
        assert!(scan(&state).is_none());
        assert!(scan(&Value::Null).is_none());
    }

    #[test]
    fn custom_pair_reports_deeper_value() {
        let symbol = Value::symbol("b");
        let state = Value::record([("a", Value::map([(Value::from("b"), symbol.clone())]))]);

        let violation = scan(&state).unwrap();
        assert_eq!(violation.path.to_string(), "a");

        let accept_maps = |value: &Value| crate::is_plain(value) || matches!(value, Value::Map(_));
        let map_entries = |value: &Value| match value {
            Value::Map(map) => map
                .iter()
                .map(|(k, v)| {
                    let key = match k.as_str() {
                        Some(name) => Key::from(name),
                        None => Key::from(k.to_string()),
                    };
                    (key, v.clone())
                })
                .collect(),
            other => OwnEntries.entries_of(other),
        };

        let ignored = IgnoreSet::new();
        let violation = Scanner::new(&accept_maps, &map_entries, &ignored)
            .scan(&state, None)
            .unwrap();
        assert_eq!(violation.path.to_string(), "a.b");
        assert!(violation.value.is(&symbol));
    }

    #[test]
    fn accepting_everything_reports_nothing() {
        let state = Value::record([
            ("f", Value::function("f", |_| Value::Undefined)),
            ("s", Value::symbol("s")),
        ]);
        let ignored = IgnoreSet::new();
        let everything = |_: &Value| true;
        assert!(Scanner::new(&everything, &OwnEntries, &ignored).scan(&state, None).is_none());
    }

    #[test]
    fn ignored_subtree_is_opaque() {
        let state = Value::record([
            ("a", Value::record([("b", Value::record([("c", Value::symbol("c"))]))])),
            ("d", Value::list([Value::from(1), Value::date(0.0)])),
        ]);

        let ignored = ignoring(&["a.b", "d.*"]);
        let calls = Cell::new(0_usize);
        let counting = |value: &Value| {
            calls.set(calls.get() + 1);
            PlainClassifier.is_serializable(value)
        };

        let found = Scanner::new(&counting, &OwnEntries, &ignored).scan(&state, None);
        assert!(found.is_none());
        // root, a, d
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn ignoring_root_skips_everything() {
        let ignored = ignoring(&[""]);
        let violation = Scanner::new(&PlainClassifier, &OwnEntries, &ignored)
            .scan(&Value::symbol("x"), None);
        assert!(violation.is_none());
    }

    #[test]
    fn starting_path_counts_for_ignores() {
        let ignored = ignoring(&["payload.secret"]);
        let value = Value::record([("secret", Value::symbol("s"))]);
        let found = find_non_serializable_value(
            &value,
            &KeyPath::from_dotted("payload"),
            &PlainClassifier,
            &OwnEntries,
            &ignored,
            None,
        );
        assert!(found.is_none());

        let found = find_non_serializable_value(
            &value,
            &KeyPath::root(),
            &PlainClassifier,
            &OwnEntries,
            &ignored,
            None,
        );
        assert_eq!(found.unwrap().path.to_string(), "secret");
    }

    #[test]
    fn self_yielding_enumerator_is_a_cycle() {
        let node = Value::record([("name", "loop")]);
        let with_self = |value: &Value| {
            let mut entries = OwnEntries.entries_of(value);
            if value.as_record().is_some() {
                entries.push((Key::from("self"), value.clone()));
            }
            entries
        };

        let ignored = IgnoreSet::new();
        let violation = Scanner::new(&PlainClassifier, &with_self, &ignored)
            .scan(&node, None)
            .unwrap();
        assert_eq!(violation.kind, ViolationKind::Cycle);
        assert_eq!(violation.path.to_string(), "self");
        assert!(violation.value.is(&node));
    }

    #[test]
    fn shared_siblings_are_not_cycles() {
        let shared = Value::record([("x", 1)]);
        let state = Value::list([shared.clone(), shared.clone()]);
        assert!(scan(&state).is_none());
    }

    #[test]
    fn cache_skips_verified_subtrees() {
        let stable = Value::record([("deep", Value::list([Value::from(1), Value::from(2)]))]);
        let first = Value::record([("stable", stable.clone()), ("count", Value::from(0))]);
        let second = first.as_record().unwrap().with("count", 1);

        let calls = Cell::new(0_usize);
        let counting = |value: &Value| {
            calls.set(calls.get() + 1);
            PlainClassifier.is_serializable(value)
        };
        let ignored = IgnoreSet::new();
        let scanner = Scanner::new(&counting, &OwnEntries, &ignored);
        let mut cache = ScanCache::new();

        assert!(scanner.scan(&first, Some(&mut cache)).is_none());
        // first, stable, deep, 1, 2, count
        assert_eq!(calls.get(), 6);
        assert!(cache.has(&stable));

        calls.set(0);
        assert!(scanner.scan(&Value::Record(second), Some(&mut cache)).is_none());
        // second, count
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn failed_subtrees_are_not_cached() {
        let bad = Value::record([("f", Value::function("f", |_| Value::Undefined))]);
        let state = Value::record([("bad", bad.clone())]);

        let ignored = IgnoreSet::new();
        let scanner = Scanner::new(&PlainClassifier, &OwnEntries, &ignored);
        let mut cache = ScanCache::new();

        assert!(scanner.scan(&state, Some(&mut cache)).is_some());
        assert!(!cache.has(&bad));
        assert!(!cache.has(&state));
        assert!(scanner.scan(&state, Some(&mut cache)).is_some());
    }

    #[test]
    fn partly_ignored_subtrees_are_not_cached() {
        let shared = Value::record([("cb", Value::function("cb", |_| Value::Undefined))]);
        let state = Value::record([("a", shared.clone()), ("b", shared.clone())]);

        let ignored = ignoring(&["a.cb"]);
        let scanner = Scanner::new(&PlainClassifier, &OwnEntries, &ignored);
        let mut cache = ScanCache::new();

        let uncached = scanner.scan(&state, None).map(|v| v.path.to_string());
        let cached = scanner
            .scan(&state, Some(&mut cache))
            .map(|v| v.path.to_string());

        assert_eq!(uncached.as_deref(), Some("b.cb"));
        assert_eq!(cached, uncached);
        assert!(!cache.has(&shared));
        assert!(!cache.has(&state));
    }

    #[test]
    fn clean_siblings_of_ignored_paths_are_cached() {
        let clean = Value::list([Value::from(1)]);
        let state = Value::record([
            ("clean", clean.clone()),
            ("session", Value::symbol("token")),
        ]);

        let ignored = ignoring(&["session"]);
        let scanner = Scanner::new(&PlainClassifier, &OwnEntries, &ignored);
        let mut cache = ScanCache::new();

        assert!(scanner.scan(&state, Some(&mut cache)).is_none());
        assert!(cache.has(&clean));
        assert!(!cache.has(&state));
    }
}
