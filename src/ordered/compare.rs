//! Ordering strategies for [`OrderedMap`](super::OrderedMap).
//!
//! A map stores one comparator value next to its tree and consults it for
//! every ordering decision. A comparator is a strict weak ordering expressed
//! as a "strictly precedes" predicate: `less(a, b)` is `true` iff `a` sorts
//! before `b`. Two keys are *equivalent* when neither precedes the other.
//!
//! # Provided comparators
//!
//! - [`NaturalOrder`]: ascending [`Ord`] order (the default).
//! - [`ReverseOrder`]: descending [`Ord`] order.
//! - Any closure or function `Fn(&K, &K) -> bool`.
//! - Any user type implementing [`Comparator<K>`].
//!
//! # Heterogeneous lookup
//!
//! Lookup methods accept a probe `Q` whenever the comparator orders `Q`
//! against `K` in both directions, i.e. `C: Comparator<Q, K> + Comparator<K, Q>`.
//! [`NaturalOrder`] can order `str` against `String` and `[T]` against
//! `Vec<T>`; user comparators can add their own pairs.
//!
//! ```rust
//! use ordmap::ordered::{Comparator, OrderedMap};
//!
//! struct FatKey {
//!     id: u32,
//!     payload: Vec<u8>,
//! }
//!
//! struct LightKey {
//!     id: u32,
//! }
//!
//! struct ById;
//!
//! impl Comparator<FatKey> for ById {
//!     fn less(&self, left: &FatKey, right: &FatKey) -> bool {
//!         left.id < right.id
//!     }
//! }
//!
//! impl Comparator<LightKey, FatKey> for ById {
//!     fn less(&self, left: &LightKey, right: &FatKey) -> bool {
//!         left.id < right.id
//!     }
//! }
//!
//! impl Comparator<FatKey, LightKey> for ById {
//!     fn less(&self, left: &FatKey, right: &LightKey) -> bool {
//!         left.id < right.id
//!     }
//! }
//!
//! let mut map = OrderedMap::with_comparator(ById);
//! map.insert(FatKey { id: 7, payload: vec![0; 1024] }, "seven");
//!
//! // No FatKey (and no kilobyte payload) is built for the lookup.
//! assert_eq!(map.get(&LightKey { id: 7 }), Some(&"seven"));
//! assert!(!map.contains(&LightKey { id: 8 }));
//! # assert_eq!(map.iter().next().map(|(key, _)| key.payload.len()), Some(1024));
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A strict weak ordering between values of `L` and values of `R`.
///
/// `Comparator<K>` (i.e. `Comparator<K, K>`) is what an
/// [`OrderedMap<K, V, C>`](super::OrderedMap) needs to store keys. The mixed
/// forms `Comparator<Q, K>` and `Comparator<K, Q>` let the map be probed with
/// a `Q` without building a `K`; both directions must agree with the
/// key-to-key ordering.
///
/// Inconsistent comparators do not cause memory unsafety, but they break the
/// map's ordering and uniqueness guarantees.
/// [`OrderedMap::verify`](super::OrderedMap::verify) detects the damage.
pub trait Comparator<L: ?Sized, R: ?Sized = L> {
    /// Returns `true` iff `left` strictly precedes `right`.
    fn less(&self, left: &L, right: &R) -> bool;
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self(left, right)
    }
}

/// Derives a three-way answer from a "strictly precedes" comparator.
///
/// `Ordering::Equal` means "equivalent", not "identical".
#[inline]
pub(crate) fn ordering<L, R, C>(comparator: &C, left: &L, right: &R) -> Ordering
where
    L: ?Sized,
    R: ?Sized,
    C: Comparator<L, R> + Comparator<R, L>,
{
    if <C as Comparator<L, R>>::less(comparator, left, right) {
        Ordering::Less
    } else if <C as Comparator<R, L>>::less(comparator, right, left) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

// =============================================================================
// NaturalOrder
// =============================================================================

/// Orders keys ascending by their [`Ord`] implementation.
///
/// This is the default comparator of [`OrderedMap`](super::OrderedMap). It is
/// also transparent for owned/borrowed pairs: maps keyed by `String` accept
/// `&str` probes and maps keyed by `Vec<T>` accept `&[T]` probes.
///
/// # Examples
///
/// ```rust
/// use ordmap::ordered::{Comparator, NaturalOrder};
///
/// assert!(NaturalOrder.less(&1, &2));
/// assert!(!NaturalOrder.less(&2, &2));
/// assert!(NaturalOrder.less(&"apple".to_string(), "banana"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        left < right
    }
}

impl Comparator<String, str> for NaturalOrder {
    #[inline]
    fn less(&self, left: &String, right: &str) -> bool {
        left.as_str() < right
    }
}

impl Comparator<str, String> for NaturalOrder {
    #[inline]
    fn less(&self, left: &str, right: &String) -> bool {
        left < right.as_str()
    }
}

impl<T: Ord> Comparator<Vec<T>, [T]> for NaturalOrder {
    #[inline]
    fn less(&self, left: &Vec<T>, right: &[T]) -> bool {
        left.as_slice() < right
    }
}

impl<T: Ord> Comparator<[T], Vec<T>> for NaturalOrder {
    #[inline]
    fn less(&self, left: &[T], right: &Vec<T>) -> bool {
        left < right.as_slice()
    }
}

// =============================================================================
// ReverseOrder
// =============================================================================

/// Orders keys descending by their [`Ord`] implementation.
///
/// # Examples
///
/// ```rust
/// use ordmap::ordered::{OrderedMap, ReverseOrder};
///
/// let mut map = OrderedMap::with_comparator(ReverseOrder);
/// map.insert(1, 'a');
/// map.insert(3, 'c');
/// map.insert(2, 'b');
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&3, &2, &1]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<T: Ord + ?Sized> Comparator<T> for ReverseOrder {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        right < left
    }
}

// =============================================================================
// ValueComparator
// =============================================================================

/// Orders whole entries by key only, using a map's comparator.
///
/// Returned by [`OrderedMap::value_comp`](super::OrderedMap::value_comp).
///
/// # Examples
///
/// ```rust
/// use ordmap::ordered::OrderedMap;
///
/// let map: OrderedMap<char, i32> = [('a', 9), ('b', 1)].into();
/// let by_key = map.value_comp();
///
/// // Values are ignored: 'a' precedes 'b' even though 9 > 1.
/// assert!(by_key.less_entries((&'a', &9), (&'b', &1)));
/// assert!(!by_key.less_entries((&'b', &1), (&'a', &9)));
/// ```
pub struct ValueComparator<'a, C> {
    comparator: &'a C,
}

impl<'a, C> ValueComparator<'a, C> {
    pub(crate) const fn new(comparator: &'a C) -> Self {
        Self { comparator }
    }

    /// Returns `true` iff the key of `left` strictly precedes the key of
    /// `right`.
    #[inline]
    pub fn less_entries<K, V>(&self, left: (&K, &V), right: (&K, &V)) -> bool
    where
        C: Comparator<K>,
    {
        self.comparator.less(left.0, right.0)
    }
}

impl<K, V, C: Comparator<K>> Comparator<(K, V)> for ValueComparator<'_, C> {
    #[inline]
    fn less(&self, left: &(K, V), right: &(K, V)) -> bool {
        self.comparator.less(&left.0, &right.0)
    }
}

impl<C> Clone for ValueComparator<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ValueComparator<'_, C> {}

impl<C: fmt::Debug> fmt::Debug for ValueComparator<'_, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ValueComparator")
            .field("comparator", self.comparator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 1, Ordering::Greater)]
    #[case(2, 2, Ordering::Equal)]
    fn test_ordering_from_less(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(ordering(&NaturalOrder, &left, &right), expected);
    }

    #[rstest]
    fn test_reverse_order_flips() {
        assert!(ReverseOrder.less(&2, &1));
        assert!(!ReverseOrder.less(&1, &2));
        assert_eq!(ordering(&ReverseOrder, &1, &2), Ordering::Greater);
    }

    #[rstest]
    fn test_closure_is_comparator() {
        let by_length = |left: &&str, right: &&str| left.len() < right.len();
        assert!(by_length.less(&"ab", &"abc"));
        // Same length: equivalent, although the strings differ.
        assert_eq!(ordering(&by_length, &"ab", &"xy"), Ordering::Equal);
    }

    #[rstest]
    fn test_natural_order_string_probe_both_directions() {
        let owned = "mango".to_string();
        assert!(Comparator::<String, str>::less(&NaturalOrder, &owned, "peach"));
        assert!(Comparator::<str, String>::less(&NaturalOrder, "apple", &owned));
        assert_eq!(ordering(&NaturalOrder, "mango", &owned), Ordering::Equal);
    }

    #[rstest]
    fn test_natural_order_slice_probe() {
        let owned = vec![1, 2, 3];
        assert!(Comparator::<Vec<i32>, [i32]>::less(&NaturalOrder, &owned, &[1, 2, 4][..]));
        assert_eq!(ordering(&NaturalOrder, &[1, 2, 3][..], &owned), Ordering::Equal);
    }

    #[rstest]
    fn test_value_comparator_ignores_values() {
        let comparator = NaturalOrder;
        let by_key = ValueComparator::new(&comparator);
        assert!(by_key.less_entries((&1, &"z"), (&2, &"a")));
        assert!(!by_key.less_entries((&2, &"a"), (&2, &"z")));
        assert!(by_key.less(&(1, 'z'), &(2, 'a')));
    }
}
