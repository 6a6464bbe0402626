//! Operator trait + the generator type every stage produces.
//!
//! The exec crate hands each operator the upstream cursor (an iterator over
//! the source sequence) and stores the returned generator as the state of a
//! new, not yet evaluated sequence.

use crate::plan::{OpPlan, Pipelining};

/// A suspended computation yielding one element per pull.
///
/// Dropping it drops everything the computation captured (upstream cursors,
/// closures, partially built buffers).
pub type Generator<T> = Box<dyn Iterator<Item = T>>;

/// Trait that all operators must implement.
///
/// Invariants:
/// - `attach` is lazy: it builds the generator but never pulls from `upstream`.
/// - Output order is a deterministic function of the input order and the
///   strategy in use.
pub trait Operator<T>: Sized + 'static {
    type Output: 'static;

    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    fn pipelining(&self) -> Pipelining {
        Pipelining::Streaming
    }

    fn plan(&self) -> OpPlan {
        OpPlan::new(self.name(), self.pipelining())
    }

    /// Wrap `upstream` into the generator for this stage.
    fn attach<I>(self, upstream: I) -> Generator<Self::Output>
    where
        I: Iterator<Item = T> + 'static;
}
