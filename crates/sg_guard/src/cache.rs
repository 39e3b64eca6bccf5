//! Provide [`ScanCache`], the memory of subtrees already proven serializable.

use sg_utils::AddrMap;
use sg_value::{Value, WeakValue};

/// The table is pruned of dead entries once it grows past this size.
const MIN_PRUNE_LEN: usize = 64;

// -----------------------------------------------------------------------------
// ScanCache

/// An identity-keyed record of values whose whole subtree passed a scan.
///
/// Entries hold a [`WeakValue`], so the cache never keeps a value alive.
/// Holding the weak handle also keeps the address reserved, therefore an
/// entry can never be mistaken for a newer value that reuses the memory.
/// Entries whose value died are dropped by [`prune`](ScanCache::prune),
/// which also runs on its own whenever the table doubles.
///
/// Nothing is ever invalidated: the cache relies on values being immutable,
/// which every container in [`sg_value`] is.
///
/// # Examples
///
/// ```
/// use sg_guard::ScanCache;
/// use sg_value::Value;
///
/// let mut cache = ScanCache::new();
/// let subtree = Value::record([("a", 1)]);
///
/// cache.mark_verified(&subtree);
/// assert!(cache.has(&subtree));
/// assert!(cache.has(&subtree.clone()));
/// assert!(!cache.has(&Value::record([("a", 1)])));
///
/// drop(subtree);
/// cache.prune();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug)]
pub struct ScanCache {
    entries: AddrMap<WeakValue>,
    prune_at: usize,
}

impl ScanCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: AddrMap::new(),
            prune_at: MIN_PRUNE_LEN,
        }
    }

    /// Returns `true` if `value` was marked verified.
    ///
    /// Always `false` for values without identity, such as scalars.
    #[inline]
    pub fn has(&self, value: &Value) -> bool {
        value.identity().is_some_and(|identity| {
            self.entries
                .get(identity.addr())
                .is_some_and(|weak| weak.refers_to(value))
        })
    }

    /// Records that `value` and everything below it is serializable.
    ///
    /// Values without identity are not recorded.
    pub fn mark_verified(&mut self, value: &Value) {
        let Some(weak) = value.downgrade() else {
            return;
        };
        self.entries.insert(weak.identity().addr(), weak);

        if self.entries.len() >= self.prune_at {
            self.prune();
            self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_LEN);
        }
    }

    /// Drops the entries whose value is no longer alive.
    pub fn prune(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, weak| weak.is_alive());
        log::trace!(
            target: crate::LOG_TARGET,
            "scan cache pruned {} dead entries, {} remain",
            before - self.entries.len(),
            self.entries.len(),
        );
    }

    /// Returns the number of entries, dead ones included until pruned.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScanCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests
