//! Provide the configuration of an [`InvariantMiddleware`](crate::InvariantMiddleware).

use core::fmt;

use serde::Deserialize;
use sg_os::time::Duration;
use sg_utils::hash::HashSet;

use crate::{EntryEnumerator, IgnorePattern, IgnoreSet, OwnEntries, PlainClassifier, ValueClassifier};

/// Default scan budget per dispatch before a performance warning is emitted.
pub const DEFAULT_WARN_AFTER: Duration = Duration::from_millis(32);

// -----------------------------------------------------------------------------
// GuardOptions

/// The data-only part of a [`MiddlewareConfig`], loadable with `serde`.
///
/// Field names are camel case, missing fields take their defaults and
/// `warnAfter` is given in milliseconds. Patterns are dot-separated strings.
///
/// # Examples
///
/// ```
/// use sg_guard::GuardOptions;
///
/// let options: GuardOptions = serde_json::from_str(r#"{
///     "ignoredActions": ["persist/REHYDRATE"],
///     "ignoredPaths": ["router.*.location"],
///     "warnAfter": 64
/// }"#).unwrap();
///
/// assert_eq!(options.warn_after, 64);
/// assert_eq!(options.ignored_paths[0].to_string(), "router.*.location");
/// assert!(!options.disable_cache);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GuardOptions {
    pub ignored_actions: Vec<String>,
    pub ignored_action_paths: Vec<IgnorePattern>,
    pub ignored_paths: Vec<IgnorePattern>,
    /// Milliseconds.
    pub warn_after: u64,
    pub disable_cache: bool,
    pub ignore_state: bool,
    pub ignore_actions: bool,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            ignored_actions: Vec::new(),
            ignored_action_paths: Vec::new(),
            ignored_paths: Vec::new(),
            warn_after: DEFAULT_WARN_AFTER.as_millis() as u64,
            disable_cache: false,
            ignore_state: false,
            ignore_actions: false,
        }
    }
}

// -----------------------------------------------------------------------------
// MiddlewareConfig

/// Everything an [`InvariantMiddleware`](crate::InvariantMiddleware) is built from.
///
/// Built with consuming `with_*`/setter methods, then frozen inside the
/// middleware.
///
/// # Examples
///
/// ```
/// use sg_guard::{IgnorePattern, MiddlewareConfig};
/// use sg_os::time::Duration;
///
/// let config = MiddlewareConfig::new()
///     .ignore_action_type("persist/REHYDRATE")
///     .ignore_action_path("meta.arg".parse::<IgnorePattern>().unwrap())
///     .ignore_path("router".parse::<IgnorePattern>().unwrap())
///     .with_warn_after(Duration::from_millis(100));
///
/// assert!(config.is_action_type_ignored("persist/REHYDRATE"));
/// assert_eq!(config.ignored_paths().len(), 1);
/// assert!(!config.cache_disabled());
/// ```
pub struct MiddlewareConfig {
    classifier: Box<dyn ValueClassifier>,
    enumerator: Box<dyn EntryEnumerator>,
    ignored_actions: HashSet<String>,
    ignored_action_paths: IgnoreSet,
    ignored_paths: IgnoreSet,
    warn_after: Duration,
    disable_cache: bool,
    ignore_state: bool,
    ignore_actions: bool,
}

impl MiddlewareConfig {
    /// Creates the default configuration: plain-data rules, nothing ignored,
    /// cache enabled, 32ms budget.
    pub fn new() -> Self {
        Self {
            classifier: Box::new(PlainClassifier),
            enumerator: Box::new(OwnEntries),
            ignored_actions: HashSet::default(),
            ignored_action_paths: IgnoreSet::new(),
            ignored_paths: IgnoreSet::new(),
            warn_after: DEFAULT_WARN_AFTER,
            disable_cache: false,
            ignore_state: false,
            ignore_actions: false,
        }
    }

    /// Creates a configuration from loaded options, keeping the default
    /// classifier and enumerator.
    pub fn from_options(options: GuardOptions) -> Self {
        let GuardOptions {
            ignored_actions,
            ignored_action_paths,
            ignored_paths,
            warn_after,
            disable_cache,
            ignore_state,
            ignore_actions,
        } = options;

        Self::new()
            .with_ignored_actions(ignored_actions)
            .with_ignored_action_paths(ignored_action_paths)
            .with_ignored_paths(ignored_paths)
            .with_warn_after(Duration::from_millis(warn_after))
            .disable_cache(disable_cache)
            .ignore_state(ignore_state)
            .ignore_actions(ignore_actions)
    }

    /// Replaces the classifier.
    ///
    /// A classifier that accepts a new object kind usually needs a matching
    /// [`with_enumerator`](Self::with_enumerator) to descend into it.
    pub fn with_classifier(mut self, classifier: impl ValueClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Replaces the entry enumerator.
    pub fn with_enumerator(mut self, enumerator: impl EntryEnumerator + 'static) -> Self {
        self.enumerator = Box::new(enumerator);
        self
    }

    /// Skips scanning messages of the given type.
    pub fn ignore_action_type(mut self, action_type: impl Into<String>) -> Self {
        self.ignored_actions.insert(action_type.into());
        self
    }

    /// Skips scanning messages of each given type.
    pub fn with_ignored_actions<T: Into<String>>(mut self, action_types: impl IntoIterator<Item = T>) -> Self {
        self.ignored_actions
            .extend(action_types.into_iter().map(Into::into));
        self
    }

    /// Exempts a path inside messages.
    pub fn ignore_action_path(mut self, pattern: IgnorePattern) -> Self {
        self.ignored_action_paths.insert(pattern);
        self
    }

    /// Exempts each given path inside messages.
    pub fn with_ignored_action_paths(mut self, patterns: impl IntoIterator<Item = IgnorePattern>) -> Self {
        self.ignored_action_paths.extend(patterns);
        self
    }

    /// Exempts a path inside the state.
    pub fn ignore_path(mut self, pattern: IgnorePattern) -> Self {
        self.ignored_paths.insert(pattern);
        self
    }

    /// Exempts each given path inside the state.
    pub fn with_ignored_paths(mut self, patterns: impl IntoIterator<Item = IgnorePattern>) -> Self {
        self.ignored_paths.extend(patterns);
        self
    }

    /// Sets the scan budget per dispatch.
    pub fn with_warn_after(mut self, threshold: Duration) -> Self {
        self.warn_after = threshold;
        self
    }

    /// Turns the cache off, forcing a full state scan on every dispatch.
    pub fn disable_cache(mut self, disable: bool) -> Self {
        self.disable_cache = disable;
        self
    }

    /// Turns state scanning off.
    pub fn ignore_state(mut self, ignore: bool) -> Self {
        self.ignore_state = ignore;
        self
    }

    /// Turns message scanning off.
    pub fn ignore_actions(mut self, ignore: bool) -> Self {
        self.ignore_actions = ignore;
        self
    }

    #[inline]
    pub fn classifier(&self) -> &dyn ValueClassifier {
        &*self.classifier
    }

    #[inline]
    pub fn enumerator(&self) -> &dyn EntryEnumerator {
        &*self.enumerator
    }

    /// Returns `true` if messages of `action_type` are never scanned.
    #[inline]
    pub fn is_action_type_ignored(&self, action_type: &str) -> bool {
        self.ignored_actions.contains(action_type)
    }

    #[inline]
    pub fn ignored_action_paths(&self) -> &IgnoreSet {
        &self.ignored_action_paths
    }

    #[inline]
    pub fn ignored_paths(&self) -> &IgnoreSet {
        &self.ignored_paths
    }

    #[inline]
    pub fn warn_after(&self) -> Duration {
        self.warn_after
    }

    #[inline]
    pub fn cache_disabled(&self) -> bool {
        self.disable_cache
    }

    #[inline]
    pub fn state_ignored(&self) -> bool {
        self.ignore_state
    }

    #[inline]
    pub fn actions_ignored(&self) -> bool {
        self.ignore_actions
    }
}

impl Default for MiddlewareConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MiddlewareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareConfig")
            .field("ignored_actions", &self.ignored_actions)
            .field("ignored_action_paths", &self.ignored_action_paths)
            .field("ignored_paths", &self.ignored_paths)
            .field("warn_after", &self.warn_after)
            .field("disable_cache", &self.disable_cache)
            .field("ignore_state", &self.ignore_state)
            .field("ignore_actions", &self.ignore_actions)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use sg_os::time::Duration;
    use sg_value::Value;
    use sg_value::access::KeyPath;

    use super::{DEFAULT_WARN_AFTER, GuardOptions, MiddlewareConfig};
    use crate::IgnorePattern;

    #[test]
    fn defaults() {
        let config = MiddlewareConfig::default();
        assert_eq!(config.warn_after(), Duration::from_millis(32));
        assert!(config.ignored_paths().is_empty());
        assert!(config.ignored_action_paths().is_empty());
        assert!(!config.cache_disabled());
        assert!(!config.state_ignored());
        assert!(!config.actions_ignored());
        assert!(config.classifier().is_serializable(&Value::from("x")));
        assert!(!config.classifier().is_serializable(&Value::symbol("x")));

        let options = GuardOptions::default();
        assert_eq!(Duration::from_millis(options.warn_after), DEFAULT_WARN_AFTER);
    }

    #[test]
    fn custom_classifier_is_used() {
        let config = MiddlewareConfig::new().with_classifier(|_: &Value| true);
        assert!(config.classifier().is_serializable(&Value::symbol("x")));
    }

    #[test]
    fn options_from_json() {
        let options: GuardOptions = serde_json::from_str(
            r#"{
                "ignoredActions": ["TEST_ACTION", "other"],
                "ignoredActionPaths": ["meta.arg", "payload.*"],
                "ignoredPaths": ["testSlice.a"],
                "warnAfter": 5,
                "disableCache": true,
                "ignoreState": true
            }"#,
        )
        .unwrap();

        let config = MiddlewareConfig::from_options(options);
        assert!(config.is_action_type_ignored("TEST_ACTION"));
        assert!(config.is_action_type_ignored("other"));
        assert!(!config.is_action_type_ignored("third"));
        assert_eq!(config.ignored_action_paths().len(), 2);
        assert!(config.ignored_paths().matches(&KeyPath::from_dotted("testSlice.a")));
        assert_eq!(config.warn_after(), Duration::from_millis(5));
        assert!(config.cache_disabled());
        assert!(config.state_ignored());
        assert!(!config.actions_ignored());
    }

    #[test]
    fn options_from_ron() {
        let options: GuardOptions = ron::from_str(
            r#"(
                ignoredPaths: ["entities.*.meta", ""],
                ignoreActions: true,
            )"#,
        )
        .unwrap();

        assert_eq!(options.warn_after, 32);
        assert!(options.ignore_actions);
        assert_eq!(options.ignored_paths[1], IgnorePattern::root());

        let config = MiddlewareConfig::from_options(options);
        assert!(config.ignored_paths().matches(&KeyPath::from_dotted("entities.3.meta")));
        assert!(config.ignored_paths().matches(&KeyPath::root()));
        assert!(config.actions_ignored());
    }

    #[test]
    fn malformed_options_are_rejected() {
        let bad_pattern = serde_json::from_str::<GuardOptions>(r#"{ "ignoredPaths": ["a..b"] }"#);
        assert!(bad_pattern.is_err());

        let unknown = serde_json::from_str::<GuardOptions>(r#"{ "ignoredPath": [] }"#);
        assert!(unknown.is_err());
    }
}
