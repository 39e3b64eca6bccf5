//! Provide keys, key paths and path-based access for values.
//!
//! A [`Key`] names one child of a container: a field name of a record or an
//! instance, or an index of a list. A [`KeyPath`] is an ordered sequence of
//! keys leading from a root value to a nested one.
//!
//! Paths are kept structured and only rendered at the edge. The rendering
//! joins keys with `.` and shows the empty path as [`ROOT_MARKER`].
//!
//! # Examples
//!
//! ```
//! use sg_value::access::{Key, KeyPath};
//! use sg_value::Value;
//!
//! let state = Value::record([
//!     ("c", Value::list([Value::from(99), Value::record([("d", 123)])])),
//! ]);
//!
//! let path: KeyPath = [Key::from("c"), Key::from(1_usize), Key::from("d")].into_iter().collect();
//! assert_eq!(path.to_string(), "c.1.d");
//! assert!(state.access(&path).unwrap().is(&Value::from(123)));
//!
//! assert_eq!(KeyPath::root().to_string(), "<root>");
//! assert!(state.access(&KeyPath::root()).unwrap().is(&state));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod key;
mod path;
mod path_access;

// -----------------------------------------------------------------------------
// Exports

pub use key::Key;
pub use path::{KeyPath, ROOT_MARKER};
