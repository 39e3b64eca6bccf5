#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// alloc paths

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod classify;
mod pattern;
mod scan;

pub mod middleware;

// -----------------------------------------------------------------------------
// Top-level exports

pub use cache::ScanCache;
pub use classify::{EntryEnumerator, OwnEntries, PlainClassifier, ValueClassifier, is_plain};
pub use pattern::{IgnorePattern, IgnoreSet, PatternError, PatternSegment, WILDCARD};
pub use scan::{Scanner, Violation, ViolationKind, find_non_serializable_value};

pub use middleware::{
    Diagnostic, DiagnosticSink, GuardOptions, Guarded, InvariantMiddleware, LogSink, MemorySink,
    MiddlewareConfig, Pipeline, action_type,
};

/// Target of every log record emitted by the guard.
pub const LOG_TARGET: &str = "serial_guard";
