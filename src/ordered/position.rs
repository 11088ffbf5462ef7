//! Stable handles to entries of an [`OrderedMap`](super::OrderedMap).

use super::tree::NodeId;

/// A copyable handle naming one entry of a map, or the end sentinel.
///
/// Positions are what lookups such as [`find`](super::OrderedMap::find),
/// [`lower_bound`](super::OrderedMap::lower_bound) and
/// [`equal_range`](super::OrderedMap::equal_range) return, and what
/// positional operations such as [`erase_at`](super::OrderedMap::erase_at)
/// and [`insert_hint`](super::OrderedMap::insert_hint) consume.
///
/// A position does not borrow the map, so the map can be mutated while the
/// position is held:
///
/// - inserting, erasing or extracting *other* entries leaves it valid;
/// - once its own entry is erased or extracted it goes stale, and every
///   accessor treats it as naming nothing (it never aliases a later entry);
/// - [`swap`](super::OrderedMap::swap) moves it along with its entry, so it
///   must then be used with the other map.
///
/// Using a position with a map it did not come from is a logic error; it
/// yields unspecified (but memory-safe) results.
///
/// # Examples
///
/// ```rust
/// use ordmap::ordered::OrderedMap;
///
/// let mut map: OrderedMap<i32, &str> = [(1, "one"), (2, "two"), (3, "three")].into();
/// let two = map.find(&2);
///
/// map.erase(&1);
/// map.insert(4, "four");
/// assert_eq!(map.entry_at(two), Some((&2, &"two")));
///
/// map.erase(&2);
/// assert_eq!(map.entry_at(two), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    target: Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Target {
    Entry { slot: NodeId, generation: u64 },
    End,
}

impl Position {
    /// The past-the-end position of every map.
    pub const END: Self = Self {
        target: Target::End,
    };

    pub(crate) const fn entry(slot: NodeId, generation: u64) -> Self {
        Self {
            target: Target::Entry { slot, generation },
        }
    }

    /// Returns `true` for the past-the-end position.
    ///
    /// A stale position is *not* the end position.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.target, Target::End)
    }

    pub(crate) const fn slot(&self) -> Option<(NodeId, u64)> {
        match self.target {
            Target::Entry { slot, generation } => Some((slot, generation)),
            Target::End => None,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::END
    }
}
