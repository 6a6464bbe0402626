#![forbid(unsafe_code)]
//! seqflow-exec: sequence state machine, cursors, and the chainable query surface.
//!
//! Design intent:
//! - A `Sequence` is either a live generator or a shared, materialized buffer;
//!   Flush moves it from the first to the second exactly once.
//! - Owned receivers are final accesses (read the generator in place),
//!   borrowed receivers are stable accesses (flush, then read the buffer).
//! - Operators only attach stages; evaluation happens when a cursor is pulled.
//! - Single-threaded: `Sequence` is neither `Send` nor `Sync`.

pub mod cursor;
pub mod grouping;
pub mod metrics;
pub mod query;
pub mod sequence;

mod state;

pub use cursor::{BufferCursor, Cursor, GeneratorCursor, SequenceCursor};
pub use grouping::Grouping;
pub use metrics::MetricsSnapshot;
pub use query::{JoinQuery, Query, SetQuery, TerminalQuery};
pub use sequence::Sequence;
