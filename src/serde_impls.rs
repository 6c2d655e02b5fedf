//! Optional serde support (feature `serde`).
//!
//! - `UniqueList` serializes as a sequence. Deserializing replays the
//!   sequence through the seeding path, so duplicates in the input collapse
//!   to their first occurrence.
//! - `IndexedMap` serializes as a map in key order. Deserializing keeps the
//!   input order; a repeated key updates the value without moving.

use crate::indexed_map::IndexedMap;
use crate::policy::DuplicatePolicy;
use crate::unique_list::UniqueList;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};

impl<E, P> Serialize for UniqueList<E, P>
where
    E: Serialize,
{
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, E, P> Deserialize<'de> for UniqueList<E, P>
where
    E: Deserialize<'de>,
    P: DuplicatePolicy<E> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<E>::deserialize(deserializer)?;
        Ok(Self::with_policy(items, P::default()))
    }
}

impl<K, V, S> Serialize for IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash + Serialize,
    V: Serialize,
    S: BuildHasher + Clone,
{
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.collect_map(self.iter())
    }
}

struct IndexedMapVisitor<K, V, S> {
    _pd: PhantomData<fn() -> IndexedMap<K, V, S>>,
}

impl<'de, K, V, S> Visitor<'de> for IndexedMapVisitor<K, V, S>
where
    K: Clone + Eq + Hash + Deserialize<'de>,
    V: Deserialize<'de>,
    S: BuildHasher + Clone + Default,
{
    type Value = IndexedMap<K, V, S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = IndexedMap::with_hasher(S::default());
        while let Some((k, v)) = access.next_entry()? {
            map.put(k, v);
        }
        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash + Deserialize<'de>,
    V: Deserialize<'de>,
    S: BuildHasher + Clone + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(IndexedMapVisitor { _pd: PhantomData })
    }
}
