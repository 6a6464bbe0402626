#![forbid(unsafe_code)]
//! seqflow: lazy, chainable query combinators over in-memory sequences.
//!
//! ```
//! use seqflow::prelude::*;
//!
//! let evens = Sequence::range(1, 10)
//!     .filter(|x| x % 2 == 0)
//!     .select(|x| x * 10);
//! assert_eq!(evens.to_vec(), vec![20, 40, 60, 80, 100]);
//! ```
//!
//! Crates:
//! - `seqflow-core`: errors, config, capability cascade.
//! - `seqflow-operators`: operator stages.
//! - `seqflow-exec`: sequence state, cursors, query traits.

pub use seqflow_core::capability::{
    Cascade, EqualityStrategy, HashStrategy, OrderStrategy, Strategy, StrategyKind,
};
pub use seqflow_core::config::{self, SequenceConfig};
pub use seqflow_core::error::{Error, Result};
pub use seqflow_core::impl_cascade;
pub use seqflow_exec::{
    metrics, Cursor, Grouping, JoinQuery, Query, Sequence, SequenceCursor, SetQuery,
    TerminalQuery,
};
pub use seqflow_operators::{OpPlan, Pipelining};

pub mod prelude {
    //! Everything needed to build and run pipelines.

    pub use seqflow_core::prelude::*;
    pub use seqflow_exec::{
        Cursor, Grouping, JoinQuery, Query, Sequence, SequenceCursor, SetQuery, TerminalQuery,
    };
}
