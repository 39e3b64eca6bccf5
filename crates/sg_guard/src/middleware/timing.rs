//! Provide [`ScanTimer`], the stopwatch around the scans of one dispatch.

use sg_os::time::{Duration, Instant};

/// Accumulates the time spent in scans, excluding the wrapped pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScanTimer {
    elapsed: Duration,
}

impl ScanTimer {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
        }
    }

    /// Runs `f` and adds its duration to the total.
    pub(crate) fn measure<R>(&mut self, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        self.elapsed += start.elapsed();
        result
    }

    #[inline]
    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns `true` if the total strictly exceeds `threshold`.
    #[inline]
    pub(crate) fn exceeds(&self, threshold: Duration) -> bool {
        self.elapsed > threshold
    }
}

#[cfg(test)]
mod tests {
    use sg_os::time::Duration;

    use super::ScanTimer;

    #[test]
    fn accumulates_measured_sections() {
        let mut timer = ScanTimer::new();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert!(!timer.exceeds(Duration::ZERO));

        let value = timer.measure(|| {
            std::thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(value, 7);
        let first = timer.elapsed();
        assert!(first >= Duration::from_millis(2));

        timer.measure(|| std::thread::sleep(Duration::from_millis(1)));
        assert!(timer.elapsed() >= first + Duration::from_millis(1));
        assert!(timer.exceeds(Duration::from_millis(2)));
    }
}
