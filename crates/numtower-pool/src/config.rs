//! Pool configuration
//!
//! Sizing and diagnostic options for a [`Pool`](crate::Pool), with presets
//! for memory-constrained and allocation-heavy workloads.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration for a free-list pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of instances created by the first growth step
    pub initial_capacity: usize,

    /// Hard ceiling on the number of instances the pool may ever create
    pub max_capacity: usize,

    /// Element slots reserved in every freshly created buffer
    pub buffer_capacity: usize,

    /// Run the free-list consistency check after every release
    pub verify_on_release: bool,

    /// Maintain acquisition/release counters
    pub collect_statistics: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_capacity: 65_536,
            buffer_capacity: 9, // a 3x3 matrix fits without reallocating
            verify_on_release: false,
            collect_statistics: true,
        }
    }
}

/// Named pool configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolPreset {
    Default,
    LowMemory,
    HighThroughput,
    Debug,
}

impl PoolPreset {
    pub fn config(self) -> PoolConfig {
        match self {
            PoolPreset::Default => PoolConfig::default(),
            PoolPreset::LowMemory => PoolConfig::low_memory(),
            PoolPreset::HighThroughput => PoolConfig::high_throughput(),
            PoolPreset::Debug => PoolConfig::debug(),
        }
    }
}

impl FromStr for PoolPreset {
    type Err = String;

    /// Case-insensitive; `-` and `_` are interchangeable
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "default" => Ok(PoolPreset::Default),
            "low-memory" => Ok(PoolPreset::LowMemory),
            "high-throughput" => Ok(PoolPreset::HighThroughput),
            "debug" => Ok(PoolPreset::Debug),
            other => Err(format!("unknown pool preset `{other}`")),
        }
    }
}

impl PoolConfig {
    /// Small pool with a tight ceiling
    pub fn low_memory() -> Self {
        Self {
            initial_capacity: 4,
            max_capacity: 4_096,
            buffer_capacity: 4,
            ..Default::default()
        }
    }

    /// Large pool for long-running evaluation sessions
    pub fn high_throughput() -> Self {
        Self {
            initial_capacity: 256,
            max_capacity: 1 << 20,
            buffer_capacity: 16,
            collect_statistics: false,
            ..Default::default()
        }
    }

    /// Verifies the free list on every release
    pub fn debug() -> Self {
        Self {
            initial_capacity: 2,
            verify_on_release: true,
            collect_statistics: true,
            ..Default::default()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        name.parse::<PoolPreset>().ok().map(PoolPreset::config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_capacity == 0 {
            return Err("Initial capacity must be > 0".to_string());
        }

        if self.max_capacity == 0 {
            return Err("Maximum capacity must be > 0".to_string());
        }

        if self.initial_capacity > self.max_capacity {
            return Err(format!(
                "Initial capacity {} exceeds maximum capacity {}",
                self.initial_capacity, self.max_capacity
            ));
        }

        if self.buffer_capacity == 0 {
            return Err("Buffer capacity must be > 0".to_string());
        }

        Ok(())
    }

    /// Capacity after one growth step from `current`.
    ///
    /// An empty pool starts at `initial_capacity`; afterwards the pool doubles
    /// while that stays within the ceiling and otherwise takes the remaining
    /// headroom in one step.
    pub fn next_capacity(&self, current: usize) -> usize {
        if current == 0 {
            self.initial_capacity.min(self.max_capacity)
        } else if current <= self.max_capacity / 2 {
            current * 2
        } else {
            self.max_capacity
        }
    }
}
