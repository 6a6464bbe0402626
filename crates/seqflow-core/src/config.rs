//! Engine configuration that downstream crates can serialize/deserialize.
//!
//! The engine reads a single process-global [`SequenceConfig`]. Install one
//! explicitly with [`install`], or let [`global`] fall back to [`SequenceConfig::from_env`].

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound accepted for `flush_capacity_hint` (16 Mi elements).
pub const MAX_FLUSH_CAPACITY_HINT: usize = 1 << 24;

static GLOBAL: OnceCell<SequenceConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Minimum initial capacity of the buffer a Flush collects into. The
    /// generator's own size hint wins when it is larger.
    pub flush_capacity_hint: usize,

    /// Accumulator size at which the linear-equality strategy warns (once)
    /// that it is doing quadratic work.
    pub linear_scan_warn_threshold: usize,

    /// Emit a trace event for every operator attached to a pipeline.
    /// Only has an effect with the `tracing` feature.
    pub trace_operators: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            flush_capacity_hint: 16,
            linear_scan_warn_threshold: 4096,
            trace_operators: false,
        }
    }
}

impl SequenceConfig {
    /// Defaults overridden by any `SEQFLOW_*` variable that parses. Values
    /// that fail to parse are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but an unparsable value is an error.
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.flush_capacity_hint > MAX_FLUSH_CAPACITY_HINT {
            return Err(Error::Config(format!(
                "flush_capacity_hint {} exceeds {}",
                self.flush_capacity_hint, MAX_FLUSH_CAPACITY_HINT
            )));
        }
        if self.linear_scan_warn_threshold == 0 {
            return Err(Error::Config(
                "linear_scan_warn_threshold must be > 0".into(),
            ));
        }
        Ok(())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("SEQFLOW_FLUSH_CAPACITY_HINT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.flush_capacity_hint = v.min(MAX_FLUSH_CAPACITY_HINT);
            }
        }

        if let Some(s) = lookup("SEQFLOW_LINEAR_SCAN_WARN_THRESHOLD") {
            if let Ok(v) = s.parse::<usize>() {
                if v > 0 {
                    cfg.linear_scan_warn_threshold = v;
                }
            }
        }

        if let Some(s) = lookup("SEQFLOW_TRACE_OPERATORS") {
            if let Some(v) = parse_flag(&s) {
                cfg.trace_operators = v;
            }
        }

        cfg
    }

    fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(s) = lookup("SEQFLOW_FLUSH_CAPACITY_HINT") {
            cfg.flush_capacity_hint = parse_usize("SEQFLOW_FLUSH_CAPACITY_HINT", &s)?;
        }
        if let Some(s) = lookup("SEQFLOW_LINEAR_SCAN_WARN_THRESHOLD") {
            cfg.linear_scan_warn_threshold =
                parse_usize("SEQFLOW_LINEAR_SCAN_WARN_THRESHOLD", &s)?;
        }
        if let Some(s) = lookup("SEQFLOW_TRACE_OPERATORS") {
            cfg.trace_operators = parse_flag(&s).ok_or_else(|| {
                Error::Config(format!("SEQFLOW_TRACE_OPERATORS: expected a boolean, got {s:?}"))
            })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

/// The installed configuration, or the environment-derived one if nothing
/// was installed before the first read.
pub fn global() -> &'static SequenceConfig {
    GLOBAL.get_or_init(SequenceConfig::from_env)
}

/// Install the process-global configuration. Fails if the config is invalid
/// or if a configuration is already in effect (installed or read).
pub fn install(cfg: SequenceConfig) -> Result<()> {
    cfg.validate()?;
    GLOBAL
        .set(cfg)
        .map_err(|_| Error::Config("global configuration already initialized".into()))
}

fn parse_usize(name: &str, s: &str) -> Result<usize> {
    s.trim()
        .parse::<usize>()
        .map_err(|e| Error::Config(format!("{name}: {e}")))
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
