//! Bounded free-list pool
//!
//! Hands out reusable instances from a free list guarded by a single lock,
//! growing lazily up to a fixed ceiling. Released instances are reset before
//! they rejoin the free list so that no stale contents survive reuse.

use parking_lot::Mutex;
use std::collections::HashSet;
use thiserror::Error;

pub mod config;
pub mod stats;

pub use config::{PoolConfig, PoolPreset};
pub use stats::{PoolStats, PoolStatsSnapshot};

/// Errors raised by pool bookkeeping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("{pool} pool exhausted: all {capacity} instances are in use")]
    Exhausted { pool: &'static str, capacity: usize },

    #[error("{pool} pool accounting violated: {detail}")]
    Accounting { pool: &'static str, detail: String },

    #[error("{pool} pool free list holds instance {identity:#x} more than once")]
    Duplicate { pool: &'static str, identity: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PoolError>;

/// Types that can live in a [`Pool`]
pub trait Recycle: Send + Sized {
    /// Build a fresh instance while the pool grows
    fn fresh(config: &PoolConfig) -> Self;

    /// Drop any contents so the instance can be handed out again
    fn recycle(&mut self);

    /// Address-like identity used to detect double insertion, if the
    /// instance has one
    fn identity(&self) -> Option<usize>;
}

impl<T: Send> Recycle for Vec<T> {
    fn fresh(config: &PoolConfig) -> Self {
        Vec::with_capacity(config.buffer_capacity)
    }

    fn recycle(&mut self) {
        self.clear();
    }

    fn identity(&self) -> Option<usize> {
        (self.capacity() > 0).then(|| self.as_ptr() as usize)
    }
}

struct PoolState<T> {
    free: Vec<T>,
    capacity: usize,
    outstanding: usize,
    config: PoolConfig,
}

/// A lock-guarded free list with lazy growth
pub struct Pool<T: Recycle> {
    name: &'static str,
    state: Mutex<PoolState<T>>,
    stats: PoolStats,
}

impl<T: Recycle> Pool<T> {
    pub fn new(name: &'static str, config: PoolConfig) -> Result<Self> {
        config.validate().map_err(PoolError::Config)?;
        Ok(Self::build(name, config))
    }

    pub fn with_defaults(name: &'static str) -> Self {
        Self::build(name, PoolConfig::default())
    }

    fn build(name: &'static str, config: PoolConfig) -> Self {
        Self {
            name,
            state: Mutex::new(PoolState {
                free: Vec::new(),
                capacity: 0,
                outstanding: 0,
                config,
            }),
            stats: PoolStats::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Take an instance from the free list, growing the pool if it is empty.
    ///
    /// Fails with [`PoolError::Exhausted`] once every instance up to the
    /// configured ceiling is in use.
    pub fn acquire(&self) -> Result<T> {
        let mut state = self.state.lock();
        if state.free.is_empty() {
            self.grow(&mut state)?;
        }
        let item = state.free.pop().ok_or_else(|| PoolError::Accounting {
            pool: self.name,
            detail: "free list empty after growth".to_string(),
        })?;
        state.outstanding += 1;
        self.stats
            .record_acquire(state.outstanding, state.config.collect_statistics);
        Ok(item)
    }

    fn grow(&self, state: &mut PoolState<T>) -> Result<()> {
        if state.capacity >= state.config.max_capacity {
            log::error!(
                "{} pool exhausted at {} instances",
                self.name,
                state.capacity
            );
            return Err(PoolError::Exhausted {
                pool: self.name,
                capacity: state.capacity,
            });
        }

        let target = state.config.next_capacity(state.capacity);
        let added = target - state.capacity;
        state.free.reserve(added);
        for _ in 0..added {
            let fresh = T::fresh(&state.config);
            state.free.push(fresh);
        }
        state.capacity = target;
        self.stats.record_growth(target);
        log::debug!("{} pool grew by {added} to {target} instances", self.name);
        Ok(())
    }

    /// Return an instance to the free list.
    ///
    /// The instance is reset before the lock is taken, so releasing an
    /// instance whose contents hold other pooled instances is safe.
    pub fn release(&self, mut item: T) -> Result<()> {
        item.recycle();

        let mut state = self.state.lock();
        if state.outstanding == 0 {
            return Err(PoolError::Accounting {
                pool: self.name,
                detail: "release without a matching acquire".to_string(),
            });
        }
        state.outstanding -= 1;

        if state.capacity > state.config.max_capacity {
            // Shrunk by reconfiguration while this instance was out.
            state.capacity -= 1;
            self.stats.record_capacity(state.capacity);
            drop(item);
        } else {
            state.free.push(item);
        }

        self.stats
            .record_release(state.outstanding, state.config.collect_statistics);

        if state.config.verify_on_release {
            self.verify(&state)?;
        }
        Ok(())
    }

    /// Verify free-list accounting and that no instance appears twice
    pub fn check_consistency(&self) -> Result<()> {
        let state = self.state.lock();
        self.verify(&state)
    }

    fn verify(&self, state: &PoolState<T>) -> Result<()> {
        if state.free.len() + state.outstanding != state.capacity {
            return Err(PoolError::Accounting {
                pool: self.name,
                detail: format!(
                    "{} free + {} outstanding != capacity {}",
                    state.free.len(),
                    state.outstanding,
                    state.capacity
                ),
            });
        }

        let mut seen = HashSet::with_capacity(state.free.len());
        for identity in state.free.iter().filter_map(Recycle::identity) {
            if !seen.insert(identity) {
                return Err(PoolError::Duplicate {
                    pool: self.name,
                    identity,
                });
            }
        }
        Ok(())
    }

    /// Replace the configuration, dropping free instances above the new ceiling
    pub fn configure(&self, config: PoolConfig) -> Result<()> {
        config.validate().map_err(PoolError::Config)?;

        let mut state = self.state.lock();
        state.config = config;
        while state.capacity > state.config.max_capacity && state.free.pop().is_some() {
            state.capacity -= 1;
        }
        self.stats.record_capacity(state.capacity);
        log::info!(
            "{} pool reconfigured: capacity {} of max {}",
            self.name,
            state.capacity,
            state.config.max_capacity
        );
        Ok(())
    }

    pub fn config(&self) -> PoolConfig {
        self.state.lock().config.clone()
    }

    pub fn stats(&self) -> PoolStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Instances ready to be handed out without growing
    pub fn available(&self) -> usize {
        self.state.lock().free.len()
    }

    /// Instances currently handed out
    pub fn outstanding(&self) -> usize {
        self.state.lock().outstanding
    }

    /// Instances created so far
    pub fn capacity(&self) -> usize {
        self.state.lock().capacity
    }
}

impl<T: Recycle> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Pool")
            .field("name", &self.name)
            .field("capacity", &state.capacity)
            .field("outstanding", &state.outstanding)
            .field("free", &state.free.len())
            .finish()
    }
}
