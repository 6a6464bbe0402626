use std::hash::Hash;

use super::{HashStrategy, Strategy};

/// Static strategy selection for a key type: hash if it hashes, otherwise an
/// ordered tree if it is totally ordered, otherwise a linear equality scan.
///
/// Auto-strategy operators (`distinct`, `union`, `join`, `group_by`, ...)
/// require `K: Cascade`; a type without an impl does not compile there. Opt a
/// type in with [`impl_cascade!`](crate::impl_cascade), or call the explicit
/// `_by_hash` / `_by_order` / `_by_equality` / `_with` forms instead.
pub trait Cascade: Sized + 'static {
    type Strategy: Strategy<Self> + Default;
}

/// Implement [`Cascade`] for one or more types.
///
/// ```
/// use seqflow_core::impl_cascade;
///
/// #[derive(PartialEq, Eq, PartialOrd, Ord, Clone)]
/// struct Version(u32, u32);
///
/// #[derive(PartialEq)]
/// struct Reading(f64);
///
/// impl_cascade!(ordered => Version);
/// impl_cascade!(linear => Reading);
/// ```
#[macro_export]
macro_rules! impl_cascade {
    (hash => $($t:ty),+ $(,)?) => {
        $(
            impl $crate::capability::Cascade for $t {
                type Strategy = $crate::capability::HashStrategy;
            }
        )+
    };
    (ordered => $($t:ty),+ $(,)?) => {
        $(
            impl $crate::capability::Cascade for $t {
                type Strategy = $crate::capability::OrderStrategy;
            }
        )+
    };
    (linear => $($t:ty),+ $(,)?) => {
        $(
            impl $crate::capability::Cascade for $t {
                type Strategy = $crate::capability::EqualityStrategy;
            }
        )+
    };
}

impl_cascade!(
    hash => bool, char, (), i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    String, &'static str, std::borrow::Cow<'static, str>
);

// Floats have neither `Hash` nor `Ord`.
impl_cascade!(linear => f32, f64);

impl<T: Hash + Eq + 'static> Cascade for Option<T> {
    type Strategy = HashStrategy;
}

impl<T: Hash + Eq + 'static> Cascade for Vec<T> {
    type Strategy = HashStrategy;
}

impl<T: Hash + Eq + 'static> Cascade for Box<T> {
    type Strategy = HashStrategy;
}

macro_rules! cascade_tuple {
    ($($name:ident),+) => {
        impl<$($name: Hash + Eq + 'static),+> Cascade for ($($name,)+) {
            type Strategy = HashStrategy;
        }
    };
}

cascade_tuple!(A, B);
cascade_tuple!(A, B, C);
cascade_tuple!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::StrategyKind;

    fn kind_of<K: Cascade>() -> StrategyKind {
        Strategy::<K>::kind(&K::Strategy::default())
    }

    #[derive(PartialEq, Eq, PartialOrd, Ord, Clone)]
    struct Version(u32);

    impl_cascade!(ordered => Version);

    #[test]
    fn test_builtin_selection() {
        assert_eq!(kind_of::<u64>(), StrategyKind::Hash);
        assert_eq!(kind_of::<(String, char)>(), StrategyKind::Hash);
        assert_eq!(kind_of::<Option<Vec<u8>>>(), StrategyKind::Hash);
        assert_eq!(kind_of::<f64>(), StrategyKind::Linear);
        assert_eq!(kind_of::<Version>(), StrategyKind::Ordered);
    }
}
