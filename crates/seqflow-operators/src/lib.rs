#![forbid(unsafe_code)]
//! seqflow-operators: pull-based operator stages (filter/map/window/concat/sort/set/group/join).
//!
//! Design intent:
//! - Every stage is a plain struct implementing [`Operator`]; `attach` wraps an
//!   upstream iterator into a boxed generator and MUST NOT pull anything.
//! - Streaming stages pull one upstream element per yielded element (or fewer).
//! - Blocking stages (sort, reverse, distinct, union, intersect, except,
//!   group_by) drain their upstream on the first pull, via [`Deferred`].
//! - Key comparison always goes through a `seqflow_core` [`Strategy`](seqflow_core::Strategy).

pub mod deferred;
pub mod plan;
pub mod traits;

pub mod concat;
pub mod filter;
pub mod group;
pub mod map;

pub mod join;
pub mod set;
pub mod sort;
pub mod window;

pub use deferred::{deferred, Deferred};
pub use plan::{OpPlan, Pipelining};
pub use traits::{Generator, Operator};
