#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
compile_error!("`sg_os` needs a clock; enable the `std` or `web` feature.");

// -----------------------------------------------------------------------------
// Modules

pub mod time;
