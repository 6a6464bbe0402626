//! Metrics/tracing hooks.
//!
//! Counters are thread-local: a sequence never crosses threads, so every
//! event is recorded on the thread that evaluated it. Trace events are only
//! emitted with the `tracing` feature.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use seqflow_operators::OpPlan;

thread_local! {
    static COUNTERS: Cell<MetricsSnapshot> = const { Cell::new(MetricsSnapshot::ZERO) };
}

/// Counter values at one point in time, for the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Generator → buffer transitions.
    pub flushes: u64,
    /// Elements collected by those transitions.
    pub elements_flushed: u64,
    /// Generators dropped after running to completion.
    pub generators_released: u64,
    pub operators_attached: u64,
}

impl MetricsSnapshot {
    const ZERO: Self = Self {
        flushes: 0,
        elements_flushed: 0,
        generators_released: 0,
        operators_attached: 0,
    };

    /// Counter deltas between `earlier` and `self`.
    pub fn since(&self, earlier: &MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            flushes: self.flushes.saturating_sub(earlier.flushes),
            elements_flushed: self.elements_flushed.saturating_sub(earlier.elements_flushed),
            generators_released: self
                .generators_released
                .saturating_sub(earlier.generators_released),
            operators_attached: self
                .operators_attached
                .saturating_sub(earlier.operators_attached),
        }
    }
}

pub fn snapshot() -> MetricsSnapshot {
    COUNTERS.with(Cell::get)
}

pub fn reset() {
    COUNTERS.with(|c| c.set(MetricsSnapshot::ZERO));
}

fn bump(update: impl FnOnce(&mut MetricsSnapshot)) {
    COUNTERS.with(|c| {
        let mut m = c.get();
        update(&mut m);
        c.set(m);
    });
}

pub(crate) fn record_flush(elements: usize) {
    bump(|m| {
        m.flushes += 1;
        m.elements_flushed += elements as u64;
    });
    #[cfg(feature = "tracing")]
    tracing::trace!(elements, "flushed generator into buffer");
}

pub(crate) fn record_release() {
    bump(|m| m.generators_released += 1);
    #[cfg(feature = "tracing")]
    tracing::trace!("released exhausted generator");
}

pub(crate) fn record_attach(plan: OpPlan) {
    bump(|m| m.operators_attached += 1);
    emit_attach(plan);
}

#[cfg(feature = "tracing")]
fn emit_attach(plan: OpPlan) {
    if seqflow_core::config::global().trace_operators {
        tracing::trace!(op = plan.name, pipelining = %plan.pipelining, "operator attached");
    }
}

#[cfg(not(feature = "tracing"))]
fn emit_attach(_plan: OpPlan) {}
