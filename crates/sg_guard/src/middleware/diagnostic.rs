//! Provide the diagnostics a guarded dispatch can produce, and where they go.

use alloc::rc::Rc;
use core::cell::RefCell;

use log::Level;
use sg_os::time::Duration;
use sg_value::Value;
use sg_value::access::KeyPath;
use thiserror::Error;

use crate::Violation;

/// Name used in performance warnings.
pub const MIDDLEWARE_NAME: &str = "SerializableStateInvariantMiddleware";

/// Closing reference of an action violation.
pub const ACTION_DOCS: &str = "(See https://docs.rs/serial_guard/latest/serial_guard/#why-messages-must-be-serializable)\n\
     (To allow non-serializable values see: https://docs.rs/serial_guard/latest/serial_guard/#working-with-non-serializable-data)";

/// Closing reference of a state violation.
pub const STATE_DOCS: &str = "(See https://docs.rs/serial_guard/latest/serial_guard/#what-may-live-in-the-state)";

// -----------------------------------------------------------------------------
// Diagnostic

/// A finding of the guard. Never returned as an error from a dispatch.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum Diagnostic {
    #[error(
        "A non-serializable value was detected in an action, in the path: `{path}`. Value: {value}\n\
         Take a look at the logic that dispatched this action: {action}\n\
         {docs}",
        docs = ACTION_DOCS
    )]
    NonSerializableActionValue {
        path: KeyPath,
        value: Value,
        action: Value,
    },

    #[error(
        "A non-serializable value was detected in the state, in the path: `{path}`. Value: {value}\n\
         Take a look at the reducer(s) handling this action type: {action_type}.\n\
         {docs}",
        docs = STATE_DOCS
    )]
    NonSerializableStateValue {
        path: KeyPath,
        value: Value,
        action_type: String,
    },

    #[error(
        "{name} took {elapsed_ms}ms, which is more than the warning threshold of {threshold_ms}ms.\n\
         If your state or actions are very large, you may want to narrow the scan with ignored paths, \
         or disable the middleware as it might cause too much of a slowdown in development mode.\n\
         The check is meant for development builds; leave it out of production builds.",
        name = MIDDLEWARE_NAME,
        elapsed_ms = .elapsed.as_millis(),
        threshold_ms = .threshold.as_millis(),
    )]
    ScanPerformanceWarning { elapsed: Duration, threshold: Duration },
}

impl Diagnostic {
    /// Builds the diagnostic for a violation found in `action`.
    pub fn action(violation: Violation, action: &Value) -> Self {
        Self::NonSerializableActionValue {
            path: violation.path,
            value: violation.value,
            action: action.clone(),
        }
    }

    /// Builds the diagnostic for a violation found in the state produced by `action`.
    pub fn state(violation: Violation, action: &Value) -> Self {
        Self::NonSerializableStateValue {
            path: violation.path,
            value: violation.value,
            action_type: action_type_name(action),
        }
    }

    /// Returns `true` for the two violation diagnostics.
    #[inline]
    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            Self::NonSerializableActionValue { .. } | Self::NonSerializableStateValue { .. }
        )
    }

    /// Returns the log level a [`LogSink`] uses for this diagnostic.
    #[inline]
    pub fn level(&self) -> Level {
        if self.is_violation() {
            Level::Error
        } else {
            Level::Warn
        }
    }
}

/// Renders the `type` of a message; strings appear without quotes.
fn action_type_name(action: &Value) -> String {
    match crate::action_type(action) {
        Some(Value::String(name)) => String::from(&**name),
        Some(other) => other.to_string(),
        None => Value::Undefined.to_string(),
    }
}

// -----------------------------------------------------------------------------
// DiagnosticSink

/// The receiver of diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl<F: FnMut(&Diagnostic)> DiagnosticSink for F {
    #[inline]
    fn report(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic);
    }
}

/// The default sink: forwards every diagnostic to the `log` facade.
///
/// Violations are logged at `error`, performance warnings at `warn`, both
/// under the `serial_guard` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    #[inline]
    fn report(&mut self, diagnostic: &Diagnostic) {
        log::log!(target: crate::LOG_TARGET, diagnostic.level(), "{diagnostic}");
    }
}

/// A sink that keeps diagnostics in memory.
///
/// Clones share one buffer, so a handle kept outside the middleware sees
/// everything reported to the one inside.
///
/// # Examples
///
/// ```
/// use sg_guard::{Diagnostic, DiagnosticSink, MemorySink};
/// use sg_os::time::Duration;
///
/// let sink = MemorySink::new();
/// let mut inner = sink.clone();
/// inner.report(&Diagnostic::ScanPerformanceWarning {
///     elapsed: Duration::from_millis(40),
///     threshold: Duration::from_millis(32),
/// });
///
/// assert_eq!(sink.len(), 1);
/// assert!(sink.messages()[0].contains("took 40ms"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink(Rc<RefCell<Vec<Diagnostic>>>);

impl MemorySink {
    /// Creates an empty sink.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of diagnostics held.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if nothing was reported.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns a copy of the diagnostics held.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.0.borrow().clone()
    }

    /// Returns the rendered text of the diagnostics held.
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().iter().map(ToString::to_string).collect()
    }

    /// Removes and returns the diagnostics held.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.0.take()
    }
}

impl DiagnosticSink for MemorySink {
    #[inline]
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.0.borrow_mut().push(diagnostic.clone());
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use sg_value::Value;
    use sg_value::access::KeyPath;

    use super::{ACTION_DOCS, Diagnostic, STATE_DOCS};
    use crate::{Violation, ViolationKind};

    fn violation(path: &str, value: Value) -> Violation {
        Violation {
            path: KeyPath::from_dotted(path),
            value,
            kind: ViolationKind::NotSerializable,
        }
    }

    #[test]
    fn action_message_shape() {
        let symbol = Value::symbol("SOME_CONSTANT");
        let action = Value::record([("type", symbol.clone())]);
        let text = Diagnostic::action(violation("type", symbol), &action).to_string();

        assert_eq!(
            text,
            format!(
                "A non-serializable value was detected in an action, in the path: `type`. Value: Symbol(SOME_CONSTANT)\n\
                 Take a look at the logic that dispatched this action: {{ type: Symbol(SOME_CONSTANT) }}\n\
                 {ACTION_DOCS}"
            )
        );
    }

    #[test]
    fn state_message_shape() {
        let action = Value::record([("type", "TEST_ACTION")]);
        let text = Diagnostic::state(violation("testSlice.a", Value::map::<Value, Value>([])), &action)
            .to_string();

        assert_eq!(
            text,
            format!(
                "A non-serializable value was detected in the state, in the path: `testSlice.a`. Value: Map(0) {{}}\n\
                 Take a look at the reducer(s) handling this action type: TEST_ACTION.\n\
                 {STATE_DOCS}"
            )
        );
    }

    #[test]
    fn non_string_action_type_is_rendered() {
        let action = Value::record([("type", Value::symbol("T"))]);
        let diagnostic = Diagnostic::state(violation("", Value::symbol("s")), &action);
        assert!(matches!(
            &diagnostic,
            Diagnostic::NonSerializableStateValue { action_type, .. } if action_type == "Symbol(T)"
        ));
        assert!(diagnostic.to_string().contains("path: `<root>`"));

        let untyped = Diagnostic::state(violation("a", Value::symbol("s")), &Value::from(3));
        assert!(untyped.to_string().contains("action type: undefined."));
    }
}
