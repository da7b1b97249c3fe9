//! Maps and sets are converted as a whole, so they are opaque.

use alloc::collections::{BTreeMap, BTreeSet};
use core::fmt::Debug;
use core::hash::BuildHasher;

use crate::Reflect;

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Clone + Debug + Send + Sync + 'static,
    V: Clone + Debug + Send + Sync + 'static,
{
    crate::__impl_opaque_methods!();
}

impl<T> Reflect for BTreeSet<T> where T: Clone + Debug + Send + Sync + 'static {
    crate::__impl_opaque_methods!();
}

impl<K, V, S> Reflect for hashbrown::HashMap<K, V, S>
where
    K: Clone + Debug + Send + Sync + 'static,
    V: Clone + Debug + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    crate::__impl_opaque_methods!();
}

#[cfg(feature = "std")]
impl<K, V, S> Reflect for std::collections::HashMap<K, V, S>
where
    K: Clone + Debug + Send + Sync + 'static,
    V: Clone + Debug + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    crate::__impl_opaque_methods!();
}

#[cfg(feature = "std")]
impl<T, S> Reflect for std::collections::HashSet<T, S>
where
    T: Clone + Debug + Send + Sync + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    crate::__impl_opaque_methods!();
}

// -----------------------------------------------------------------------------
// Tests
