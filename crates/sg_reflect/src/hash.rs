//! Hash containers used across the crate.
//!
//! [`hashbrown`] tables hashed with [`foldhash`]: faster than the std
//! default hasher, without pulling in a separate utility crate.

use core::any::TypeId;

/// Default hash map: [`hashbrown::HashMap`] with [`foldhash`] hashing.
pub type HashMap<K, V> = hashbrown::HashMap<K, V, foldhash::fast::RandomState>;

/// Default hash set: [`hashbrown::HashSet`] with [`foldhash`] hashing.
pub type HashSet<T> = hashbrown::HashSet<T, foldhash::fast::RandomState>;

/// A map keyed by [`TypeId`].
///
/// Uses a fixed seed: `TypeId` values are already well distributed and the
/// table must be constructible in `const` context (see the static info
/// cells in [`crate::impls`]).
pub type TypeIdMap<V> = hashbrown::HashMap<TypeId, V, foldhash::fast::FixedState>;

/// Creates an empty [`TypeIdMap`] in `const` context.
pub const fn type_id_map<V>() -> TypeIdMap<V> {
    hashbrown::HashMap::with_hasher(foldhash::fast::FixedState::with_seed(0))
}
