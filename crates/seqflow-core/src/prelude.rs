//! Convenient re-exports for downstream crates.

pub use crate::capability::{
    Cascade, EqualityComparer, EqualityStrategy, HashStrategy, KeyGroups, KeySet, Natural,
    OrderComparer, OrderStrategy, Strategy, StrategyKind,
};
pub use crate::config::SequenceConfig;
pub use crate::error::{Error, Result};
pub use crate::impl_cascade;
pub use crate::step::Step;
