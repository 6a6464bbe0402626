//! Operator planning surface: `Pipelining` and `OpPlan`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a stage can yield before its upstream is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipelining {
    /// Pulls upstream on demand, one element at a time.
    Streaming,
    /// Drains upstream completely before yielding the first element.
    Blocking,
}

impl fmt::Display for Pipelining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pipelining::Streaming => "streaming",
            Pipelining::Blocking => "blocking",
        })
    }
}

/// Description of one attached stage, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpPlan {
    pub name: &'static str,
    pub pipelining: Pipelining,
}

impl OpPlan {
    pub fn new(name: &'static str, pipelining: Pipelining) -> Self {
        Self { name, pipelining }
    }

    pub fn is_blocking(&self) -> bool {
        self.pipelining == Pipelining::Blocking
    }
}
