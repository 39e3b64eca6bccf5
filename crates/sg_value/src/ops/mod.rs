//! Provide the container and opaque types a [`Value`] can hold.
//!
//! ## Menu
//!
//! ### Data
//!
//! - [`List`]: an ordered sequence, the only sequence container.
//! - [`Record`]: a plain keyed record, keys kept in insertion order.
//!
//! ### Objects with a class identity
//!
//! - [`ValueMap`]: an ordered map with arbitrary keys.
//! - [`ValueSet`]: an ordered set.
//! - [`Instance`]: fields tagged with a class name.
//! - [`Date`], [`RegExp`].
//!
//! ### Non-data
//!
//! - [`Symbol`]: a unique token, equal only to itself.
//! - [`Function`]: a named callable.
//!
//! Every container is immutable once built. Methods such as [`Record::with`]
//! return a new container and leave the receiver untouched, so a previous
//! snapshot holding the old handle never observes a change.
//!
//! [`Value`]: crate::Value

// -----------------------------------------------------------------------------
// Modules

mod instance_ops;
mod list_ops;
mod map_ops;
mod opaque_ops;
mod record_ops;
mod set_ops;

// -----------------------------------------------------------------------------
// Exports

pub use instance_ops::Instance;
pub use list_ops::List;
pub use map_ops::ValueMap;
pub use opaque_ops::{Date, Function, RegExp, Symbol};
pub use record_ops::Record;
pub use set_ops::ValueSet;

pub(crate) use instance_ops::InstanceData;
pub(crate) use opaque_ops::{FunctionData, RegExpData, SymbolData};
