//! Mutable ordered map based on a red-black tree.
//!
//! This module provides [`OrderedMap`], a sorted associative container with
//! unique keys, ordered by a pluggable [`Comparator`].
//!
//! # Overview
//!
//! - O(log N) lookup, insert and erase
//! - O(1) amortized insert when given a correct position hint
//! - O(1) `len`, `is_empty`, first/last entry and `swap`
//! - O(log N + k) range queries where k is the number of results
//!
//! # Examples
//!
//! ```rust
//! use ordmap::ordered::OrderedMap;
//!
//! let mut map: OrderedMap<String, i32> = [
//!     ("CPU".to_string(), 10),
//!     ("GPU".to_string(), 15),
//!     ("RAM".to_string(), 20),
//! ]
//! .into();
//!
//! *map.get_or_default("CPU".to_string()) = 25; // update an existing value
//! *map.get_or_default("SSD".to_string()) = 30; // insert a new value
//!
//! let keys: Vec<&str> = map.keys().map(String::as_str).collect();
//! assert_eq!(keys, vec!["CPU", "GPU", "RAM", "SSD"]);
//! assert_eq!(map["CPU"], 25);
//! ```
//!
//! # Duplicate keys
//!
//! The first insertion of a key wins. [`OrderedMap::insert`],
//! [`OrderedMap::emplace`], [`OrderedMap::try_emplace`], [`Extend`] and
//! [`FromIterator`] all leave an existing entry untouched; only
//! [`OrderedMap::insert_or_assign`] replaces a value.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Index, RangeBounds};

use tracing::{debug, trace};

use super::compare::{Comparator, NaturalOrder, ReverseOrder, ValueComparator, ordering};
use super::error::MapError;
use super::iter::{IntoIter, Iter, IterMut, Keys, Range, Values, ValuesMut};
use super::node_handle::{InsertNodeResult, NodeHandle};
use super::position::Position;
use super::tree::{NodeId, Search, Side, Tree};

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// A sorted map with unique keys, backed by a red-black tree.
///
/// Entries are kept in ascending order of the comparator `C`, which is fixed
/// at construction. The default comparator, [`NaturalOrder`], uses the key's
/// [`Ord`] implementation.
///
/// Lookups return references or [`Position`] handles. Positions are stable:
/// they survive unrelated inserts and erasures, which makes them suitable as
/// insertion hints and for erase-while-walking loops.
///
/// # Time Complexity
///
/// | Operation                    | Complexity         |
/// |------------------------------|--------------------|
/// | `get` / `find` / `contains`  | O(log N)           |
/// | `insert` / `erase`           | O(log N)           |
/// | `insert_hint` (correct hint) | O(1) amortized     |
/// | `lower_bound` / `upper_bound`| O(log N)           |
/// | `range`                      | O(log N + k)       |
/// | `merge`                      | O(M log(N + M))    |
/// | `swap` / `len`               | O(1)               |
///
/// # Examples
///
/// ```rust
/// use ordmap::ordered::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &2, &3]);
///
/// // Reverse iteration is descending.
/// let values: Vec<&&str> = map.values().rev().collect();
/// assert_eq!(values, vec![&"three", &"two", &"one"]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, C = NaturalOrder> {
    tree: Tree<K, V>,
    comparator: C,
}

static_assertions::assert_impl_all!(OrderedMap<String, i32>: Send, Sync);
static_assertions::assert_impl_all!(Position: Send, Sync, Copy);
static_assertions::assert_impl_all!(OrderedMap<String, i32, ReverseOrder>: Hash);
static_assertions::assert_not_impl_any!(
    OrderedMap<String, i32, fn(&String, &String) -> bool>: Hash
);

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map ordered by [`NaturalOrder`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let map: OrderedMap<String, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: Tree::new(),
            comparator: NaturalOrder,
        }
    }
}

// =============================================================================
// Comparator-independent operations
// =============================================================================

impl<K, V, C> OrderedMap<K, V, C> {
    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut numbers = OrderedMap::new();
    /// assert!(numbers.is_empty());
    ///
    /// numbers.insert(42, 13);
    /// numbers.insert(13_317, 123);
    /// assert!(!numbers.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Returns the largest number of entries a map of this type can address.
    #[inline]
    #[must_use]
    pub const fn max_size(&self) -> usize {
        Tree::<K, V>::max_nodes()
    }

    /// Returns the comparator the map was built with.
    #[inline]
    #[must_use]
    pub const fn key_comp(&self) -> &C {
        &self.comparator
    }

    /// Returns a comparator over `(key, value)` entries that compares keys
    /// only.
    #[inline]
    #[must_use]
    pub const fn value_comp(&self) -> ValueComparator<'_, C> {
        ValueComparator::new(&self.comparator)
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let coins: OrderedMap<i32, &str> =
    ///     [(10, "dime"), (1, "penny"), (25, "quarter"), (5, "nickel")].into();
    ///
    /// let largest_first: Vec<&str> = coins.iter().rev().map(|(_, name)| *name).collect();
    /// assert_eq!(largest_first, vec!["quarter", "dime", "nickel", "penny"]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.tree)
    }

    /// Returns an iterator over entries with mutable values, in ascending
    /// key order.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.tree)
    }

    /// Returns an iterator over keys in ascending order.
    #[inline]
    #[must_use]
    pub const fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over values in key order.
    #[inline]
    #[must_use]
    pub const fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable values in key order.
    #[must_use]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Consumes the map, yielding its keys in ascending order.
    pub fn into_keys(self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator {
        self.into_iter().map(|(key, _)| key)
    }

    /// Consumes the map, yielding its values in key order.
    pub fn into_values(self) -> impl DoubleEndedIterator<Item = V> + ExactSizeIterator {
        self.into_iter().map(|(_, value)| value)
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|id| self.entry_of(id))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|id| self.entry_of(id))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.tree.first()?;
        Some(self.tree.detach(id))
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.tree.last()?;
        Some(self.tree.detach(id))
    }

    /// Removes every entry.
    ///
    /// Positions taken before the call become stale.
    pub fn clear(&mut self) {
        let removed = self.len();
        self.tree.clear();
        trace!(removed, "cleared ordered map");
    }

    /// Exchanges the contents (and comparators) of two maps in O(1).
    ///
    /// A [`Position`] taken from one map names the same entry through the
    /// other map afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut alice: OrderedMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into();
    /// let mut bob: OrderedMap<i32, char> = [(7, 'Z'), (8, 'Y'), (9, 'X'), (10, 'W')].into();
    /// let two = alice.find(&2);
    ///
    /// alice.swap(&mut bob);
    ///
    /// assert_eq!(alice.len(), 4);
    /// assert_eq!(bob.entry_at(two), Some((&2, &'b')));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Removes every entry for which `predicate` returns `true`, returning
    /// how many were removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut data: OrderedMap<i32, char> =
    ///     [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd'), (5, 'e'), (4, 'f'), (5, 'g')].into();
    ///
    /// let removed = data.erase_if(|key, _| key & 1 == 1);
    /// assert_eq!(removed, 3);
    /// assert_eq!(data, [(2, 'b'), (4, 'd')].into());
    /// ```
    pub fn erase_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.tree.first();
        while let Some(id) = cursor {
            cursor = self.tree.successor(id);
            let node = self.tree.node(id);
            if predicate(&node.key, &node.value) {
                self.tree.detach(id);
                removed += 1;
            }
        }
        trace!(removed, remaining = self.len(), "erase_if finished");
        removed
    }

    /// Keeps only the entries for which `keep` returns `true`.
    ///
    /// Unlike [`erase_if`](Self::erase_if), the predicate sees values
    /// mutably.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut removed = 0_usize;
        let mut cursor = self.tree.first();
        while let Some(id) = cursor {
            cursor = self.tree.successor(id);
            let node = self.tree.node_mut(id);
            if !keep(&node.key, &mut node.value) {
                self.tree.detach(id);
                removed += 1;
            }
        }
        trace!(removed, remaining = self.len(), "retain finished");
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    /// Position of the smallest entry, or [`Position::END`] when empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.position_of(self.tree.first())
    }

    /// The past-the-end position.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Position {
        Position::END
    }

    /// Position following `position`.
    ///
    /// Returns `None` for the end position and for stale positions.
    #[must_use]
    pub fn next_position(&self, position: Position) -> Option<Position> {
        let id = self.resolve(position)?;
        Some(self.position_of(self.tree.successor(id)))
    }

    /// Position preceding `position`.
    ///
    /// The end position steps back to the last entry. Returns `None` for the
    /// first entry, for stale positions, and for the end of an empty map.
    #[must_use]
    pub fn prev_position(&self, position: Position) -> Option<Position> {
        let previous = if position.is_end() {
            self.tree.last()
        } else {
            self.tree.predecessor(self.resolve(position)?)
        };
        previous.map(|id| self.position_of(Some(id)))
    }

    /// The entry at `position`, or `None` for the end or a stale position.
    #[must_use]
    pub fn entry_at(&self, position: Position) -> Option<(&K, &V)> {
        self.resolve(position).map(|id| self.entry_of(id))
    }

    /// The entry at `position` with a mutable value.
    #[must_use]
    pub fn entry_at_mut(&mut self, position: Position) -> Option<(&K, &mut V)> {
        let id = self.resolve(position)?;
        let node = self.tree.node_mut(id);
        Some((&node.key, &mut node.value))
    }

    /// Erases the entry at `position` and returns the position after it.
    ///
    /// Every other position stays valid. Returns `None`, erasing nothing,
    /// for the end position or a stale one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, &str> =
    ///     [(1, "one"), (2, "two"), (3, "three"), (4, "four"), (5, "five"), (6, "six")].into();
    ///
    /// // Erase all odd numbers while walking.
    /// let mut position = map.begin();
    /// while let Some((key, _)) = map.entry_at(position) {
    ///     position = if key % 2 == 1 {
    ///         map.erase_at(position).unwrap()
    ///     } else {
    ///         map.next_position(position).unwrap()
    ///     };
    /// }
    /// let keys: Vec<&i32> = map.keys().collect();
    /// assert_eq!(keys, vec![&2, &4, &6]);
    /// ```
    pub fn erase_at(&mut self, position: Position) -> Option<Position> {
        let id = self.resolve(position)?;
        let next = self.tree.successor(id);
        self.tree.detach(id);
        Some(self.position_of(next))
    }

    /// Detaches the entry at `position` without dropping it.
    pub fn extract_at(&mut self, position: Position) -> Option<NodeHandle<K, V>> {
        let id = self.resolve(position)?;
        let (key, value) = self.tree.detach(id);
        Some(NodeHandle::new(key, value))
    }

    fn resolve(&self, position: Position) -> Option<NodeId> {
        let (slot, generation) = position.slot()?;
        self.tree.is_live(slot, generation).then_some(slot)
    }

    fn position_of(&self, id: Option<NodeId>) -> Position {
        id.and_then(|id| {
            self.tree
                .generation(id)
                .map(|generation| Position::entry(id, generation))
        })
        .unwrap_or(Position::END)
    }

    fn entry_of(&self, id: NodeId) -> (&K, &V) {
        let node = self.tree.node(id);
        (&node.key, &node.value)
    }
}

// =============================================================================
// Ordered operations
// =============================================================================

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// The comparator may be a closure, which is how keys without a natural
    /// order are usually handled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// #[derive(Debug, Clone, Copy, PartialEq)]
    /// struct Point {
    ///     x: f64,
    ///     y: f64,
    /// }
    ///
    /// let by_y = |left: &Point, right: &Point| left.y < right.y;
    /// let mut magnitudes = OrderedMap::with_comparator(by_y);
    /// magnitudes.insert(Point { x: 5.0, y: -12.0 }, 13.0);
    /// magnitudes.insert(Point { x: 3.0, y: 4.0 }, 5.0);
    /// magnitudes.insert(Point { x: -8.0, y: -15.0 }, 17.0);
    ///
    /// let ys: Vec<f64> = magnitudes.keys().map(|point| point.y).collect();
    /// assert_eq!(ys, vec![-15.0, -12.0, 4.0]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::new(),
            comparator,
        }
    }

    /// Builds a map from `entries` ordered by `comparator`.
    ///
    /// When a key repeats, its first occurrence wins.
    #[must_use]
    pub fn from_entries_with<I>(entries: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_comparator(comparator);
        map.insert_many(entries);
        map
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Returns a reference to the value for `key`.
    ///
    /// The probe may be any type the comparator can order against `K` in
    /// both directions; for [`NaturalOrder`] that includes `str` for
    /// `String` keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.find_node(key).map(|id| &self.tree.node(id).value)
    }

    /// Returns a mutable reference to the value for `key`.
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        let id = self.find_node(key)?;
        Some(&mut self.tree.node_mut(id).value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.find_node(key).map(|id| self.entry_of(id))
    }

    /// Checked access: returns the value for `key` or
    /// [`MapError::KeyNotFound`].
    ///
    /// # Errors
    ///
    /// [`MapError::KeyNotFound`] when no entry is equivalent to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let constants: OrderedMap<String, f64> = [("e".to_string(), 2.5)].into();
    ///
    /// assert_eq!(constants.at("e"), Ok(&2.5));
    /// assert!(constants.at("pi").is_err());
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, MapError>
    where
        Q: ?Sized + fmt::Debug,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.get(key).ok_or_else(|| MapError::key_not_found(key))
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// [`MapError::KeyNotFound`] when no entry is equivalent to `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, MapError>
    where
        Q: ?Sized + fmt::Debug,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        match self.find_node(key) {
            Some(id) => Ok(&mut self.tree.node_mut(id).value),
            None => Err(MapError::key_not_found(key)),
        }
    }

    /// Returns `true` if an entry is equivalent to `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.find_node(key).is_some()
    }

    /// Number of entries equivalent to `key`: always 0 or 1.
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        usize::from(self.contains(key))
    }

    /// Position of the entry equivalent to `key`, or [`Position::END`].
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.position_of(self.find_node(key))
    }

    /// Position of the first entry whose key does not precede `key`.
    #[must_use]
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.position_of(self.lower_bound_node(key))
    }

    /// Position of the first entry whose key `key` precedes.
    #[must_use]
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.position_of(self.upper_bound_node(key))
    }

    /// The span of entries equivalent to `key`, as `(lower_bound, upper_bound)`.
    ///
    /// Keys are unique, so the span holds zero or one entry. When `key` is
    /// absent both positions name its insertion point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(0, "zero"), (1, "one"), (2, "two")].into();
    ///
    /// let (lower, upper) = map.equal_range(&1);
    /// assert_eq!(map.entry_at(lower), Some((&1, &"one")));
    /// assert_eq!(map.next_position(lower), Some(upper));
    ///
    /// let (lower, upper) = map.equal_range(&-1);
    /// assert_eq!((lower, upper), (map.begin(), map.begin()));
    ///
    /// let (lower, upper) = map.equal_range(&3);
    /// assert!(lower.is_end() && upper.is_end());
    /// ```
    #[must_use]
    pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns an iterator over the entries whose keys fall within `bounds`.
    ///
    /// A range whose start follows its end is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let map: OrderedMap<i32, char> = (1..=9).zip('a'..='i').collect();
    ///
    /// let middle: Vec<i32> = map.range(3..6).map(|(key, _)| *key).collect();
    /// assert_eq!(middle, vec![3, 4, 5]);
    ///
    /// let tail: Vec<char> = map.range(8..).map(|(_, value)| *value).collect();
    /// assert_eq!(tail, vec!['h', 'i']);
    /// ```
    pub fn range<Q, R>(&self, bounds: R) -> Range<'_, K, V>
    where
        Q: ?Sized,
        R: RangeBounds<Q>,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        let front = match bounds.start_bound() {
            Bound::Included(start) => self.lower_bound_node(start),
            Bound::Excluded(start) => self.upper_bound_node(start),
            Bound::Unbounded => self.tree.first(),
        };
        let back = match bounds.end_bound() {
            Bound::Included(end) => self.tree.before(self.upper_bound_node(end)),
            Bound::Excluded(end) => self.tree.before(self.lower_bound_node(end)),
            Bound::Unbounded => self.tree.last(),
        };
        match (front, back) {
            (Some(front_id), Some(back_id))
                if !self.key_less(&self.tree.node(back_id).key, &self.tree.node(front_id).key) =>
            {
                Range::new(&self.tree, front, back)
            }
            _ => Range::empty(&self.tree),
        }
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Inserts `key` with `value` unless an equivalent key is present.
    ///
    /// Returns the position of the entry holding the key and whether the
    /// insertion happened. An existing entry is never modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut heights = OrderedMap::new();
    /// let (_, inserted) = heights.insert("Hinata".to_string(), 162.8);
    /// assert!(inserted);
    ///
    /// let (position, inserted) = heights.insert("Hinata".to_string(), 164.2);
    /// assert!(!inserted);
    /// assert_eq!(heights.entry_at(position).map(|(_, height)| *height), Some(162.8));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        let search = self.locate_key(&key);
        let (id, inserted) = self.attach_at(search, key, value);
        (self.position_of(Some(id)), inserted)
    }

    /// Inserts using `hint` as a guess of where the key belongs.
    ///
    /// The hint is correct when it names the entry right after the key's
    /// slot (or the entry right before it, or [`Position::END`] for a key
    /// that belongs last); the node is then linked without searching from
    /// the root. Any other hint only costs the fallback search. Returns the
    /// position of the entry holding the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::{OrderedMap, Position};
    ///
    /// let mut map = OrderedMap::new();
    /// let mut hint = Position::END;
    /// for key in 0..1000 {
    ///     // Ascending keys always belong right after the last insertion.
    ///     hint = map.insert_hint(hint, key, 'b');
    /// }
    /// assert_eq!(map.len(), 1000);
    /// assert_eq!(map.entry_at(hint), Some((&999, &'b')));
    /// ```
    pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> Position {
        let search = self.search_with_hint(hint, &key);
        let (id, _) = self.attach_at(search, key, value);
        self.position_of(Some(id))
    }

    /// Inserts every entry, first occurrence of a key winning. Returns the
    /// number of entries actually inserted.
    pub fn insert_many<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut inserted = 0;
        for (key, value) in entries {
            if self.insert(key, value).1 {
                inserted += 1;
            }
        }
        inserted
    }

    /// Copies the entries of `other` whose keys are absent here.
    pub fn insert_from<D>(&mut self, other: &OrderedMap<K, V, D>) -> usize
    where
        K: Clone,
        V: Clone,
    {
        self.insert_many(
            other
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }

    /// Inserts `key` with `value`, replacing the value if the key exists.
    ///
    /// The returned flag is `true` when a new entry was created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert_or_assign("a".to_string(), "apple").1);
    /// assert!(!map.insert_or_assign("a".to_string(), "almond").1);
    /// assert_eq!(map.get("a"), Some(&"almond"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (&mut V, bool) {
        match self.locate_key(&key) {
            Search::Found(id) => {
                let slot = &mut self.tree.node_mut(id).value;
                *slot = value;
                (slot, false)
            }
            Search::Vacant { parent, side } => {
                let id = self.tree.attach(parent, side, key, value);
                (&mut self.tree.node_mut(id).value, true)
            }
        }
    }

    /// Inserts an already-built entry unless the key exists, in which case
    /// `key` and `value` are dropped and the existing entry is untouched.
    pub fn emplace(&mut self, key: K, value: V) -> (&mut V, bool) {
        let search = self.locate_key(&key);
        let (id, inserted) = self.attach_at(search, key, value);
        (&mut self.tree.node_mut(id).value, inserted)
    }

    /// Hinted form of [`emplace`](Self::emplace); see
    /// [`insert_hint`](Self::insert_hint) for what makes a hint correct.
    pub fn emplace_hint(&mut self, hint: Position, key: K, value: V) -> Position {
        self.insert_hint(hint, key, value)
    }

    /// Inserts `key` with a value built by `make_value`, calling it only if
    /// the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// let mut built = 0;
    ///
    /// map.try_emplace("sun", || { built += 1; "star" });
    /// map.try_emplace("sun", || { built += 1; "planet" });
    ///
    /// assert_eq!(built, 1);
    /// assert_eq!(map.get(&"sun"), Some(&"star"));
    /// ```
    pub fn try_emplace<F>(&mut self, key: K, make_value: F) -> (&mut V, bool)
    where
        F: FnOnce() -> V,
    {
        match self.locate_key(&key) {
            Search::Found(id) => (&mut self.tree.node_mut(id).value, false),
            Search::Vacant { parent, side } => {
                let id = self.tree.attach(parent, side, key, make_value());
                (&mut self.tree.node_mut(id).value, true)
            }
        }
    }

    /// Returns the value for `key`, inserting `V::default()` first if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let sentence = "this sentence is not a sentence this is a lie";
    /// let mut word_counts: OrderedMap<&str, usize> = OrderedMap::new();
    /// for word in sentence.split_whitespace() {
    ///     *word_counts.get_or_default(word) += 1;
    /// }
    ///
    /// assert_eq!(word_counts.get(&"sentence"), Some(&2));
    /// assert_eq!(word_counts.get(&"lie"), Some(&1));
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.try_emplace(key, V::default).0
    }

    // -------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------

    /// Removes the entry equivalent to `key`, returning how many entries
    /// were removed (0 or 1).
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.find_node(key).map_or(0, |id| {
            self.tree.detach(id);
            1
        })
    }

    /// Removes the entry equivalent to `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry equivalent to `key`, returning the stored key and
    /// value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        let id = self.find_node(key)?;
        Some(self.tree.detach(id))
    }

    // -------------------------------------------------------------------------
    // Node handles
    // -------------------------------------------------------------------------

    /// Detaches the entry equivalent to `key`, handing ownership to the
    /// caller.
    pub fn extract<Q>(&mut self, key: &Q) -> Option<NodeHandle<K, V>>
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        self.remove_entry(key)
            .map(|(key, value)| NodeHandle::new(key, value))
    }

    /// Links a detached node into this map unless its key is present.
    ///
    /// On a collision the map is unchanged and the node comes back in
    /// [`InsertNodeResult::node`].
    pub fn insert_node(&mut self, node: NodeHandle<K, V>) -> InsertNodeResult<K, V> {
        let search = self.locate_key(node.key());
        self.link_node(search, node)
    }

    /// Hinted form of [`insert_node`](Self::insert_node).
    pub fn insert_node_hint(&mut self, hint: Position, node: NodeHandle<K, V>) -> InsertNodeResult<K, V> {
        let search = self.search_with_hint(hint, node.key());
        self.link_node(search, node)
    }

    /// Moves every entry of `source` whose key is absent here into this map.
    ///
    /// Entries whose key already exists stay in `source`. Returns the number
    /// of entries moved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let mut target: OrderedMap<i32, &str> = [(1, "x")].into();
    /// let mut source: OrderedMap<i32, &str> = [(1, "a"), (5, "b")].into();
    ///
    /// assert_eq!(target.merge(&mut source), 1);
    /// assert_eq!(target, [(1, "x"), (5, "b")].into());
    /// assert_eq!(source, [(1, "a")].into());
    /// ```
    pub fn merge<D>(&mut self, source: &mut OrderedMap<K, V, D>) -> usize {
        let mut moved = 0;
        let mut cursor = source.tree.first();
        while let Some(id) = cursor {
            cursor = source.tree.successor(id);
            if let Search::Vacant { parent, side } = self.locate_key(&source.tree.node(id).key) {
                let (key, value) = source.tree.detach(id);
                self.tree.attach(parent, side, key, value);
                moved += 1;
            }
        }
        trace!(moved, left_behind = source.len(), "merged ordered maps");
        moved
    }

    // -------------------------------------------------------------------------
    // Auditing
    // -------------------------------------------------------------------------

    /// Audits the tree: red-black colouring, black heights, parent links,
    /// cached first/last entries and strictly ascending key order.
    ///
    /// # Errors
    ///
    /// [`MapError::InvariantViolation`] describing the first problem found.
    /// With a consistent comparator this never happens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmap::ordered::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = (0..100).map(|key| (key, key)).collect();
    /// assert_eq!(map.verify(), Ok(()));
    /// ```
    pub fn verify(&self) -> Result<(), MapError> {
        self.tree
            .audit(|left, right| self.key_less(left, right))
            .map_err(MapError::invariant_violation)
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    #[inline]
    fn key_less(&self, left: &K, right: &K) -> bool {
        <C as Comparator<K>>::less(&self.comparator, left, right)
    }

    fn key_ordering(&self, left: &K, right: &K) -> Ordering {
        ordering(&self.comparator, left, right)
    }

    fn locate_key(&self, key: &K) -> Search {
        self.tree
            .locate(|stored| ordering(&self.comparator, key, stored))
    }

    fn find_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        Q: ?Sized,
        C: Comparator<Q, K> + Comparator<K, Q>,
    {
        match self
            .tree
            .locate(|stored| ordering(&self.comparator, key, stored))
        {
            Search::Found(id) => Some(id),
            Search::Vacant { .. } => None,
        }
    }

    fn lower_bound_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        Q: ?Sized,
        C: Comparator<K, Q>,
    {
        self.tree
            .lower_bound(|stored| <C as Comparator<K, Q>>::less(&self.comparator, stored, key))
    }

    fn upper_bound_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        self.tree
            .upper_bound(|stored| <C as Comparator<Q, K>>::less(&self.comparator, key, stored))
    }

    fn attach_at(&mut self, search: Search, key: K, value: V) -> (NodeId, bool) {
        match search {
            Search::Found(id) => (id, false),
            Search::Vacant { parent, side } => (self.tree.attach(parent, side, key, value), true),
        }
    }

    fn link_node(&mut self, search: Search, node: NodeHandle<K, V>) -> InsertNodeResult<K, V> {
        match search {
            Search::Found(id) => InsertNodeResult {
                position: self.position_of(Some(id)),
                inserted: false,
                node: Some(node),
            },
            Search::Vacant { parent, side } => {
                let (key, value) = node.into_parts();
                let id = self.tree.attach(parent, side, key, value);
                InsertNodeResult {
                    position: self.position_of(Some(id)),
                    inserted: true,
                    node: None,
                }
            }
        }
    }

    fn search_with_hint(&self, hint: Position, key: &K) -> Search {
        self.hinted_search(hint, key).unwrap_or_else(|| {
            debug!(len = self.len(), "insertion hint rejected, searching from the root");
            self.locate_key(key)
        })
    }

    /// Resolves a hint into a search result without descending from the
    /// root, or `None` when the hint does not border the key's slot.
    fn hinted_search(&self, hint: Position, key: &K) -> Option<Search> {
        let Some((slot, generation)) = hint.slot() else {
            return match self.tree.last() {
                None => Some(Search::Vacant {
                    parent: None,
                    side: Side::Left,
                }),
                Some(last) if self.key_less(&self.tree.node(last).key, key) => {
                    Some(Self::vacant_at(self.tree.vacancy_after(last)))
                }
                Some(_) => None,
            };
        };
        if !self.tree.is_live(slot, generation) {
            return None;
        }

        let hint_key = &self.tree.node(slot).key;
        if self.key_less(key, hint_key) {
            match self.tree.predecessor(slot) {
                Some(previous) if !self.key_less(&self.tree.node(previous).key, key) => None,
                _ => Some(Self::vacant_at(self.tree.vacancy_before(slot))),
            }
        } else if self.key_less(hint_key, key) {
            match self.tree.successor(slot) {
                Some(next) if !self.key_less(key, &self.tree.node(next).key) => None,
                _ => Some(Self::vacant_at(self.tree.vacancy_after(slot))),
            }
        } else {
            Some(Search::Found(slot))
        }
    }

    const fn vacant_at((parent, side): (NodeId, Side)) -> Search {
        Search::Vacant {
            parent: Some(parent),
            side,
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self {
            tree: Tree::new(),
            comparator: C::default(),
        }
    }
}

/// Collects entries into a map; the first occurrence of a key wins.
impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries_with(iter, C::default())
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_many(iter);
    }
}

impl<'a, K: Copy + 'a, V: Copy + 'a, C: Comparator<K>> Extend<(&'a K, &'a V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.insert_many(iter.into_iter().map(|(key, value)| (*key, *value)));
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut OrderedMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Fail-fast lookup.
///
/// # Panics
///
/// Panics with the [`MapError::KeyNotFound`] message if no entry is
/// equivalent to the key. Use [`OrderedMap::get`] or [`OrderedMap::at`] to
/// handle absence.
impl<K, V, C, Q> Index<&Q> for OrderedMap<K, V, C>
where
    Q: ?Sized + fmt::Debug,
    C: Comparator<K> + Comparator<Q, K> + Comparator<K, Q>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.at(key) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Two maps are equal when they have the same length and, pairwise in
/// iteration order, equivalent keys and equal values.
impl<K, V: PartialEq, C: Comparator<K>> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((left_key, left_value), (right_key, right_value))| {
                    self.key_ordering(left_key, right_key) == Ordering::Equal
                        && left_value == right_value
                })
    }
}

impl<K, V: Eq, C: Comparator<K>> Eq for OrderedMap<K, V, C> {}

/// Lexicographic over entries: keys first (by the comparator), then values.
impl<K, V: PartialOrd, C: Comparator<K>> PartialOrd for OrderedMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Some(Ordering::Equal),
                (None, Some(_)) => return Some(Ordering::Less),
                (Some(_), None) => return Some(Ordering::Greater),
                (Some((left_key, left_value)), Some((right_key, right_value))) => {
                    match self.key_ordering(left_key, right_key) {
                        Ordering::Equal => match left_value.partial_cmp(right_value) {
                            Some(Ordering::Equal) => {}
                            non_equal => return non_equal,
                        },
                        key_order => return Some(key_order),
                    }
                }
            }
        }
    }
}

impl<K, V: Ord, C: Comparator<K>> Ord for OrderedMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some((left_key, left_value)), Some((right_key, right_value))) => {
                    let entry_order = self
                        .key_ordering(left_key, right_key)
                        .then_with(|| left_value.cmp(right_value));
                    if entry_order != Ordering::Equal {
                        return entry_order;
                    }
                }
            }
        }
    }
}

impl<K: Hash, V: Hash, C> OrderedMap<K, V, C> {
    /// Hashes the length, then each entry in key order.
    fn hash_entries<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

// `Hash` is only offered for comparators whose equivalence is `Ord`
// equality. A custom comparator can treat distinct keys as equivalent, and
// hashing those keys would then disagree with `==`.

impl<K: Ord + Hash, V: Hash> Hash for OrderedMap<K, V, NaturalOrder> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_entries(state);
    }
}

impl<K: Ord + Hash, V: Hash> Hash for OrderedMap<K, V, ReverseOrder> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_entries(state);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> OrderedMap<i32, &'static str> {
        [(1, "one"), (2, "two"), (3, "three"), (4, "four"), (5, "five")].into()
    }

    #[rstest]
    fn test_display_empty() {
        let map: OrderedMap<i32, String> = OrderedMap::new();
        assert_eq!(format!("{map}"), "{}");
    }

    #[rstest]
    fn test_display_sorted() {
        let map: OrderedMap<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into();
        assert_eq!(format!("{map}"), "{1: a, 2: b, 3: c}");
    }

    #[rstest]
    fn test_debug_like_std_map() {
        let map: OrderedMap<i32, char> = [(2, 'b'), (1, 'a')].into();
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
    }

    #[rstest]
    fn test_insert_keeps_first_value() {
        let mut map = OrderedMap::new();
        assert!(map.insert("a", 1).1);
        assert!(!map.insert("a", 2).1);
        assert!(map.insert("b", 3).1);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a"), Some(&1));
    }

    #[rstest]
    fn test_get_mut_updates_in_place() {
        let mut map = sample();
        if let Some(value) = map.get_mut(&3) {
            *value = "THREE";
        }
        assert_eq!(map.get(&3), Some(&"THREE"));
        assert_eq!(map.get_mut(&9), None);
    }

    #[rstest]
    fn test_at_mut_reports_missing_key() {
        let mut map = sample();
        assert_eq!(
            map.at_mut(&9),
            Err(MapError::KeyNotFound {
                key: "9".to_string()
            })
        );
        if let Ok(value) = map.at_mut(&1) {
            *value = "uno";
        }
        assert_eq!(map[&1], "uno");
    }

    #[rstest]
    #[should_panic(expected = "key not found: 42")]
    fn test_index_panics_on_missing_key() {
        let map = sample();
        let _value: &str = map[&42];
    }

    #[rstest]
    fn test_first_and_last() {
        let mut map = sample();
        assert_eq!(map.first_key_value(), Some((&1, &"one")));
        assert_eq!(map.last_key_value(), Some((&5, &"five")));
        assert_eq!(map.pop_first(), Some((1, "one")));
        assert_eq!(map.pop_last(), Some((5, "five")));
        assert_eq!(map.len(), 3);
        assert_eq!(map.verify(), Ok(()));
    }

    #[rstest]
    fn test_count_is_zero_or_one() {
        let map = sample();
        assert_eq!(map.count(&2), 1);
        assert_eq!(map.count(&7), 0);
    }

    #[rstest]
    fn test_remove_and_remove_entry() {
        let mut map = sample();
        assert_eq!(map.remove(&2), Some("two"));
        assert_eq!(map.remove(&2), None);
        assert_eq!(map.remove_entry(&4), Some((4, "four")));
        assert_eq!(map.erase(&9), 0);
        assert_eq!(map.erase(&1), 1);
        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, vec![3, 5]);
    }

    #[rstest]
    fn test_hint_before_hint_entry() {
        let mut map: OrderedMap<i32, char> = [(10, 'a'), (30, 'c')].into();
        let thirty = map.find(&30);
        let twenty = map.insert_hint(thirty, 20, 'b');
        assert_eq!(map.entry_at(twenty), Some((&20, &'b')));
        assert_eq!(map.next_position(twenty), Some(thirty));
        assert_eq!(map.verify(), Ok(()));
    }

    #[rstest]
    fn test_hint_after_hint_entry() {
        let mut map: OrderedMap<i32, char> = [(10, 'a'), (30, 'c')].into();
        let ten = map.find(&10);
        let twenty = map.insert_hint(ten, 20, 'b');
        assert_eq!(map.prev_position(twenty), Some(ten));
        assert_eq!(map.verify(), Ok(()));
    }

    #[rstest]
    fn test_wrong_hint_still_inserts_in_order() {
        let mut map: OrderedMap<i32, char> = [(10, 'a'), (20, 'b'), (30, 'c')].into();
        let ten = map.find(&10);
        map.insert_hint(ten, 40, 'd');
        map.insert_hint(Position::END, 5, 'z');
        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, vec![5, 10, 20, 30, 40]);
        assert_eq!(map.verify(), Ok(()));
    }

    #[rstest]
    fn test_hint_on_existing_key_returns_existing() {
        let mut map: OrderedMap<i32, char> = [(10, 'a'), (20, 'b')].into();
        let twenty = map.find(&20);
        let position = map.insert_hint(twenty, 20, 'x');
        assert_eq!(position, twenty);
        assert_eq!(map.get(&20), Some(&'b'));
    }

    #[rstest]
    fn test_stale_hint_falls_back() {
        let mut map: OrderedMap<i32, char> = [(10, 'a'), (20, 'b')].into();
        let stale = map.find(&10);
        map.erase(&10);
        let position = map.insert_hint(stale, 15, 'x');
        assert_eq!(map.entry_at(position), Some((&15, &'x')));
        assert_eq!(map.verify(), Ok(()));
    }

    #[rstest]
    fn test_prev_position_from_end_and_begin() {
        let map = sample();
        let last = map.prev_position(map.end());
        assert_eq!(last.and_then(|position| map.entry_at(position)), Some((&5, &"five")));
        assert_eq!(map.prev_position(map.begin()), None);

        let empty: OrderedMap<i32, i32> = OrderedMap::new();
        assert_eq!(empty.prev_position(empty.end()), None);
        assert!(empty.begin().is_end());
    }

    #[rstest]
    fn test_entry_at_mut() {
        let mut map = sample();
        let position = map.find(&4);
        if let Some((_, value)) = map.entry_at_mut(position) {
            *value = "FOUR";
        }
        assert_eq!(map.get(&4), Some(&"FOUR"));
    }

    #[rstest]
    fn test_range_bounds() {
        let map: OrderedMap<i32, i32> = (0..10).map(|key| (key * 2, key)).collect();
        let collect = |range: Range<'_, i32, i32>| range.map(|(key, _)| *key).collect::<Vec<_>>();

        assert_eq!(collect(map.range(3..9)), vec![4, 6, 8]);
        assert_eq!(collect(map.range(4..=8)), vec![4, 6, 8]);
        assert_eq!(collect(map.range(..3)), vec![0, 2]);
        assert_eq!(collect(map.range(15..)), vec![16, 18]);
        assert_eq!(
            collect(map.range((Bound::Excluded(4), Bound::Excluded(10)))),
            vec![6, 8]
        );
        assert_eq!(collect(map.range(5..6)), Vec::<i32>::new());
        assert_eq!(collect(map.range(100..)), Vec::<i32>::new());
        assert_eq!(collect(map.range(8..4)), Vec::<i32>::new());
    }

    #[rstest]
    fn test_range_double_ended() {
        let map: OrderedMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
        let mut range = map.range(2..7);
        assert_eq!(range.next(), Some((&2, &2)));
        assert_eq!(range.next_back(), Some((&6, &6)));
        let rest: Vec<i32> = range.map(|(key, _)| *key).collect();
        assert_eq!(rest, vec![3, 4, 5]);
    }

    #[rstest]
    fn test_range_with_str_probe() {
        let map: OrderedMap<String, usize> = ["apple", "banana", "cherry", "date"]
            .into_iter()
            .enumerate()
            .map(|(index, word)| (word.to_string(), index))
            .collect();
        let picked: Vec<&str> = map
            .range::<str, _>((Bound::Included("b"), Bound::Excluded("d")))
            .map(|(key, _)| key.as_str())
            .collect();
        assert_eq!(picked, vec!["banana", "cherry"]);
    }

    #[rstest]
    fn test_reverse_order_map() {
        let map: OrderedMap<i32, char, ReverseOrder> = [(1, 'a'), (3, 'c'), (2, 'b')].into_iter().collect();
        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, vec![3, 2, 1]);
        assert_eq!(map.entry_at(map.lower_bound(&2)), Some((&2, &'b')));
        assert_eq!(map.verify(), Ok(()));
    }

    #[rstest]
    fn test_values_mut_and_iter_mut() {
        let mut map = OrderedMap::from([(1, 10), (2, 20), (3, 30)]);
        for value in map.values_mut() {
            *value += 1;
        }
        for (key, value) in &mut map {
            *value += key;
        }
        let values: Vec<i32> = map.values().copied().collect();
        assert_eq!(values, vec![12, 23, 34]);
    }

    #[rstest]
    fn test_into_keys_and_values() {
        let map = sample();
        let keys: Vec<i32> = map.clone().into_keys().collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        let values: Vec<&str> = map.into_values().rev().collect();
        assert_eq!(values, vec!["five", "four", "three", "two", "one"]);
    }

    #[rstest]
    fn test_extend_by_reference() {
        let mut map = OrderedMap::from([(1, 1)]);
        let source = [(1, 100), (2, 200)];
        map.extend(source.iter().map(|(key, value)| (key, value)));
        assert_eq!(map, OrderedMap::from([(1, 1), (2, 200)]));
    }

    #[rstest]
    fn test_insert_from_copies_missing() {
        let mut target = OrderedMap::from([(1, "x")]);
        let source = OrderedMap::from([(1, "a"), (2, "b")]);
        assert_eq!(target.insert_from(&source), 1);
        assert_eq!(target, OrderedMap::from([(1, "x"), (2, "b")]));
        assert_eq!(source.len(), 2);
    }

    #[rstest]
    fn test_retain_sees_mutable_values() {
        let mut map: OrderedMap<i32, i32> = (1..=6).map(|key| (key, key)).collect();
        map.retain(|key, value| {
            *value *= 10;
            key % 3 != 0
        });
        assert_eq!(map, OrderedMap::from([(1, 10), (2, 20), (4, 40), (5, 50)]));
    }

    #[rstest]
    fn test_max_size_is_positive() {
        let map: OrderedMap<char, char> = OrderedMap::new();
        assert!(map.max_size() > 1_000_000);
    }

    #[rstest]
    fn test_clear_then_reuse() {
        let mut map = sample();
        let stale = map.find(&3);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.entry_at(stale), None);
        map.insert(3, "again");
        assert_eq!(map.entry_at(stale), None);
        assert_eq!(map.verify(), Ok(()));
    }

    #[rstest]
    fn test_key_comp_is_stored_comparator() {
        let map: OrderedMap<i32, i32, ReverseOrder> = OrderedMap::with_comparator(ReverseOrder);
        assert_eq!(*map.key_comp(), ReverseOrder);
        assert!(map.key_comp().less(&2, &1));
    }
}
