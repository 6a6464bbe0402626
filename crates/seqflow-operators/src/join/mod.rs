//! Equi-join stages.
//!
//! Both build a key → inner-elements lookup with the strategy on the key type
//! when the first output element is requested, then stream the outer input.
//! Output follows outer order; matches for one outer element follow inner
//! discovery order.

use seqflow_core::capability::{KeyGroups, Strategy};

mod group;
mod inner;

pub use group::GroupJoin;
pub use inner::Join;

/// Drain `inner` into a lookup keyed by `key_of`.
fn build_lookup<U, K, S, KI>(
    strategy: &S,
    inner: impl Iterator<Item = U>,
    mut key_of: KI,
) -> S::Groups<U>
where
    S: Strategy<K>,
    KI: FnMut(&U) -> K,
{
    let mut lookup = strategy.key_groups::<U>();
    for u in inner {
        let k = key_of(&u);
        lookup.push(k, u);
    }
    lookup
}
