#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod display;
mod identity;
mod kind;
mod value;

pub mod access;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use identity::{Identity, WeakValue};
pub use kind::ValueKind;
pub use value::Value;
