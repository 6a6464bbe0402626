#![forbid(unsafe_code)]
//! seqflow-core: errors, configuration, and the capability cascade shared by the engine crates.
//!
//! Design intent:
//! - No evaluation machinery here; this crate only decides *how* keys are compared.
//! - Strategy selection is static: a key type either names its strategy through
//!   [`capability::Cascade`] or the auto-strategy operators refuse to compile.
//! - Hash-based structures use a fixed-seed hasher so output order is repeatable.

pub mod capability;
pub mod config;
pub mod error;
pub mod prelude;
pub mod step;

pub use capability::{
    Cascade, EqualityComparer, EqualityStrategy, HashStrategy, KeyGroups, KeySet, Natural,
    OrderComparer, OrderStrategy, Strategy, StrategyKind,
};
pub use config::SequenceConfig;
pub use error::{Error, Result};
pub use step::Step;
