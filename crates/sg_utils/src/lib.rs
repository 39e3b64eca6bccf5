#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod addr_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use addr_map::AddrMap;
