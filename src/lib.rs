#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use sg_guard as guard;
pub use sg_os as os;
pub use sg_utils as utils;
pub use sg_value as value;

pub use sg_guard::{
    Diagnostic, DiagnosticSink, GuardOptions, Guarded, IgnorePattern, InvariantMiddleware,
    MiddlewareConfig, Pipeline,
};
pub use sg_value::Value;
