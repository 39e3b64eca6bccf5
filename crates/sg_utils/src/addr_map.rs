use core::fmt::Debug;

use crate::hash::FixedHashState;
use crate::hash::hashbrown::HashMap;

// -----------------------------------------------------------------------------
// AddrMap

/// A specialized map container with an allocation address as the fixed key type.
///
/// Addresses are aligned, so the low bits carry no information; keys are
/// therefore run through [`FixedHashState`] rather than used as hashes directly.
///
/// The map only stores the address. Whether the address still denotes the
/// same allocation is the caller's business, usually by storing a weak
/// handle as the value.
pub struct AddrMap<V>(HashMap<usize, V, FixedHashState>);

impl<V> AddrMap<V> {
    /// Creates an empty `AddrMap`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_utils::AddrMap;
    /// let map = AddrMap::<i32>::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(FixedHashState))
    }

    /// Returns a reference to the value stored for the address.
    pub fn get(&self, addr: usize) -> Option<&V> {
        self.0.get(&addr)
    }

    /// Inserts an address-value pair into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_utils::AddrMap;
    ///
    /// let mut map = AddrMap::new();
    /// assert_eq!(map.insert(0x1000, "a"), None);
    /// assert_eq!(map.insert(0x1000, "b"), Some("a"));
    /// assert_eq!(map.get(0x1000), Some(&"b"));
    /// ```
    pub fn insert(&mut self, addr: usize, v: V) -> Option<V> {
        self.0.insert(addr, v)
    }

    /// Retains only the entries specified by the predicate.
    #[inline]
    pub fn retain(&mut self, mut f: impl FnMut(usize, &mut V) -> bool) {
        self.0.retain(|addr, v| f(*addr, v));
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for AddrMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for AddrMap<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: Debug> Debug for AddrMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::AddrMap;

    #[test]
    fn retain_by_address() {
        let mut map = AddrMap::new();
        for addr in [8_usize, 16, 24, 32] {
            map.insert(addr, addr / 8);
        }
        map.retain(|addr, _| addr % 16 == 0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(16), Some(&2));
        assert_eq!(map.get(8), None);
        map.retain(|_, value| *value > 10);
        assert!(map.is_empty());
    }
}
