//! Entries detached from a map.

use std::fmt;

use super::position::Position;

/// An entry that has been extracted from an [`OrderedMap`](super::OrderedMap)
/// and is owned by the caller.
///
/// While detached, the key may be changed freely: ordering and uniqueness
/// only apply again when the handle is inserted with
/// [`insert_node`](super::OrderedMap::insert_node).
///
/// # Examples
///
/// ```rust
/// use ordmap::ordered::OrderedMap;
///
/// let mut map: OrderedMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into();
///
/// let mut node = map.extract(&1).unwrap();
/// *node.key_mut() = 4;
/// map.insert_node(node);
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&2, &3, &4]);
/// assert_eq!(map.get(&4), Some(&'a'));
/// ```
pub struct NodeHandle<K, V> {
    key: K,
    value: V,
}

impl<K, V> NodeHandle<K, V> {
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the key mutably. Only possible while detached.
    #[inline]
    pub const fn key_mut(&mut self) -> &mut K {
        &mut self.key
    }

    /// Returns the value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value mutably.
    #[inline]
    pub const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Consumes the handle, returning the key and value.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeHandle<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeHandle")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

/// Outcome of [`OrderedMap::insert_node`](super::OrderedMap::insert_node).
///
/// When the key was already present the map is unchanged, `inserted` is
/// `false`, `position` names the existing entry and the rejected handle comes
/// back in `node`.
#[derive(Debug)]
pub struct InsertNodeResult<K, V> {
    /// The inserted entry, or the entry that blocked the insertion.
    pub position: Position,
    /// Whether the node was linked into the map.
    pub inserted: bool,
    /// The handle, returned when it was not inserted.
    pub node: Option<NodeHandle<K, V>>,
}
