//! Provide a fixed-seed hash state and the hash containers built on it.
//!
//! Based on *hashbrown* and *foldhash*. The seed is fixed, so the iteration
//! order of a container only depends on its content.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x7E27_1B1E_5A0C_93D1);

/// A hasher whose results only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed Hash State based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use vt_reflect::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// let mut b = FixedHashState.build_hasher();
/// "field".hash(&mut a);
/// "field".hash(&mut b);
///
/// assert_eq!(a.finish(), b.finish());
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
