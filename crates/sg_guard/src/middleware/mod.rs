//! Provide [`InvariantMiddleware`], the dispatch-pipeline stage that scans
//! every message and every resulting state.
//!
//! A store is seen through the [`Pipeline`] trait: something that accepts a
//! message and exposes its current state. The middleware sits in front of
//! one, and [`Guarded`] bundles the two into a new pipeline.

// -----------------------------------------------------------------------------
// Modules

mod config;
mod diagnostic;
mod timing;

// -----------------------------------------------------------------------------
// Exports

pub use config::{DEFAULT_WARN_AFTER, GuardOptions, MiddlewareConfig};
pub use diagnostic::{
    ACTION_DOCS, Diagnostic, DiagnosticSink, LogSink, MIDDLEWARE_NAME, MemorySink, STATE_DOCS,
};

use core::fmt;

use sg_value::Value;

use crate::{ScanCache, Scanner};
use timing::ScanTimer;

// -----------------------------------------------------------------------------
// Pipeline

/// A stage of a dispatch pipeline.
pub trait Pipeline {
    /// What a dispatch returns to the caller.
    type Output;

    /// Handles a message.
    fn next(&mut self, action: &Value) -> Self::Output;

    /// Returns the current state.
    fn state(&self) -> Value;
}

/// Returns the `type` field of a message, if it has one.
///
/// # Examples
///
/// ```
/// use sg_value::Value;
///
/// let action = Value::record([("type", "todos/add")]);
/// assert_eq!(sg_guard::action_type(&action).and_then(Value::as_str), Some("todos/add"));
/// assert!(sg_guard::action_type(&Value::from(1)).is_none());
/// ```
pub fn action_type(action: &Value) -> Option<&Value> {
    action.as_record()?.get("type")
}

// -----------------------------------------------------------------------------
// InvariantMiddleware

/// Scans messages before and state after each dispatch, reporting what it
/// finds to a [`DiagnosticSink`].
///
/// The middleware never alters the dispatch: the message is always forwarded
/// and the output of the next stage is returned unchanged.
///
/// # Examples
///
/// ```
/// use sg_guard::{InvariantMiddleware, MemorySink, MiddlewareConfig, Pipeline};
/// use sg_value::Value;
///
/// struct Counter(f64);
///
/// impl Pipeline for Counter {
///     type Output = ();
///
///     fn next(&mut self, _: &Value) {
///         self.0 += 1.0;
///     }
///
///     fn state(&self) -> Value {
///         Value::record([("count", self.0)])
///     }
/// }
///
/// let sink = MemorySink::new();
/// let mut store = InvariantMiddleware::new(MiddlewareConfig::new())
///     .with_sink(sink.clone())
///     .wrap(Counter(0.0));
///
/// store.next(&Value::record([("type", "inc")]));
/// store.next(&Value::record([("type", Value::symbol("inc"))]));
///
/// assert_eq!(store.get_ref().0, 2.0);
/// assert!(sink.diagnostics()[0].is_violation());
/// ```
pub struct InvariantMiddleware {
    config: MiddlewareConfig,
    cache: Option<ScanCache>,
    sink: Box<dyn DiagnosticSink>,
}

impl InvariantMiddleware {
    /// Creates a middleware reporting to a [`LogSink`].
    pub fn new(config: MiddlewareConfig) -> Self {
        let cache = (!config.cache_disabled()).then(ScanCache::new);
        Self {
            config,
            cache,
            sink: Box::new(LogSink),
        }
    }

    /// Replaces the diagnostic sink.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    #[inline]
    pub fn config(&self) -> &MiddlewareConfig {
        &self.config
    }

    /// Returns the state cache, `None` when disabled.
    #[inline]
    pub fn cache(&self) -> Option<&ScanCache> {
        self.cache.as_ref()
    }

    /// Puts the middleware in front of `pipeline`.
    #[inline]
    pub fn wrap<P: Pipeline>(self, pipeline: P) -> Guarded<P> {
        Guarded::new(pipeline, self)
    }

    /// Dispatches `action` to `next`, scanning around it.
    pub fn dispatch<P: Pipeline + ?Sized>(&mut self, next: &mut P, action: &Value) -> P::Output {
        let Self {
            config,
            cache,
            sink,
        } = self;
        let mut timer = ScanTimer::new();

        if Self::scans_action(config, action) {
            let scanner = Scanner::new(
                config.classifier(),
                config.enumerator(),
                config.ignored_action_paths(),
            );
            if let Some(violation) = timer.measure(|| scanner.scan(action, None)) {
                sink.report(&Diagnostic::action(violation, action));
            }
        }

        let output = next.next(action);

        if !config.state_ignored() {
            let state = next.state();
            let scanner = Scanner::new(
                config.classifier(),
                config.enumerator(),
                config.ignored_paths(),
            );
            if let Some(violation) = timer.measure(|| scanner.scan(&state, cache.as_mut())) {
                sink.report(&Diagnostic::state(violation, action));
            }
        }

        if timer.exceeds(config.warn_after()) {
            sink.report(&Diagnostic::ScanPerformanceWarning {
                elapsed: timer.elapsed(),
                threshold: config.warn_after(),
            });
        }

        output
    }

    fn scans_action(config: &MiddlewareConfig, action: &Value) -> bool {
        if config.actions_ignored() {
            return false;
        }
        match action_type(action).and_then(Value::as_str) {
            Some(name) if config.is_action_type_ignored(name) => {
                log::debug!(target: crate::LOG_TARGET, "skipping scan of ignored message type `{name}`");
                false
            }
            _ => true,
        }
    }
}

impl Default for InvariantMiddleware {
    #[inline]
    fn default() -> Self {
        Self::new(MiddlewareConfig::new())
    }
}

impl fmt::Debug for InvariantMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvariantMiddleware")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Guarded

/// A pipeline with an [`InvariantMiddleware`] in front of it.
#[derive(Debug)]
pub struct Guarded<P> {
    pipeline: P,
    guard: InvariantMiddleware,
}

impl<P: Pipeline> Guarded<P> {
    #[inline]
    pub fn new(pipeline: P, guard: InvariantMiddleware) -> Self {
        Self { pipeline, guard }
    }

    #[inline]
    pub fn get_ref(&self) -> &P {
        &self.pipeline
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut P {
        &mut self.pipeline
    }

    #[inline]
    pub fn middleware(&self) -> &InvariantMiddleware {
        &self.guard
    }

    /// Splits into the wrapped pipeline and the middleware.
    #[inline]
    pub fn into_parts(self) -> (P, InvariantMiddleware) {
        (self.pipeline, self.guard)
    }
}

impl<P: Pipeline> Pipeline for Guarded<P> {
    type Output = P::Output;

    #[inline]
    fn next(&mut self, action: &Value) -> Self::Output {
        self.guard.dispatch(&mut self.pipeline, action)
    }

    #[inline]
    fn state(&self) -> Value {
        self.pipeline.state()
    }
}

// -----------------------------------------------------------------------------
// Tests
