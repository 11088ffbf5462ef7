//! Serde support for [`OrderedMap`], enabled by the `serde` feature.
//!
//! A map serializes as a serde map in key order. Deserializing rebuilds the
//! map with `C::default()`; when the input repeats a key, the first
//! occurrence wins, as with every other insertion path.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::compare::Comparator;
use super::map::OrderedMap;

impl<K, V, C> Serialize for OrderedMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V, C> {
    marker: PhantomData<fn() -> OrderedMap<K, V, C>>,
}

impl<K, V, C> OrderedMapVisitor<K, V, C> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, K, V, C> Visitor<'de> for OrderedMapVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = OrderedMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = OrderedMap::with_comparator(C::default());
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, C> Deserialize<'de> for OrderedMap<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor::new())
    }
}
