//! Temporal quantification
//!
//! This module provides a cross-platform alternative to the standard library's `time` module.
//! - In `web` environments, it re-exports `web_time` crate's implementation.
//! - In `std` environments, it directly re-exports the standard library's contents.
//!
//! See the [standard library](https://doc.rust-lang.org/std/time) for further details.

pub use core::time::{Duration, TryFromFloatSecsError};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use ::web_time::{Instant, SystemTime, SystemTimeError};

#[cfg(all(feature = "std", not(all(target_arch = "wasm32", feature = "web"))))]
pub use ::std::time::{Instant, SystemTime, SystemTimeError};

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Duration, Instant};

    #[test]
    fn instant_is_monotonic() {
        let start = Instant::now();
        let later = Instant::now();
        assert!(later >= start);
        assert!(start.elapsed() >= Duration::ZERO);
    }
}
