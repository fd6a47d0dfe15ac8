//! numtower: the numeric tower of a calculator engine
//!
//! Values ([`NumberValue`]) are integers, reals, complex numbers, symbolic
//! constants or matrices of values. Every operation consumes its operands and
//! returns a canonical value; undefined results are `Invalid`, which absorbs
//! everything it touches.
//!
//! ```no_run
//! use numtower::{add, NumberValue};
//!
//! let sum = add(NumberValue::Integer(2), NumberValue::Complex(2.0, 3.0));
//! assert_eq!(sum, NumberValue::Complex(4.0, 3.0));
//! ```

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

pub mod config;

pub use config::{ConfigLoader, LogLevel, LoggingConfig, PoolPreset, PoolSection, TowerConfig};

pub use numtower_codec as codec;
pub use numtower_logging as logging;
pub use numtower_pool as pool;
pub use numtower_runtime::*;
pub use numtower_value::{
    check_element_pool, configure_element_pool, element_pool_config, element_pool_stats, equals,
    simplify, ValueError, MAX_DIMENSION,
};

static DEFAULT_ANGLE_UNIT: Lazy<RwLock<AngleUnit>> = Lazy::new(|| RwLock::new(AngleUnit::Radians));

pub fn default_angle_unit() -> AngleUnit {
    *DEFAULT_ANGLE_UNIT.read()
}

pub fn set_default_angle_unit(unit: AngleUnit) {
    *DEFAULT_ANGLE_UNIT.write() = unit;
}

/// Convert an angle in the configured default unit to radians
pub fn to_radians_default(value: NumberValue) -> NumberValue {
    to_radians(value, default_angle_unit())
}

/// Convert an angle in radians to the configured default unit
pub fn from_radians_default(value: NumberValue) -> NumberValue {
    from_radians(value, default_angle_unit())
}

/// Apply a configuration to the process.
///
/// Installs logging when enabled, reconfigures the matrix element pool and
/// sets the default angle unit. The returned guard must be kept alive when
/// logging had to fall back to a thread-scoped subscriber.
pub fn init(config: &TowerConfig) -> Result<Option<logging::LoggingGuard>> {
    let guard = config.logging.enabled.then(|| {
        logging::init_logging(logging::LoggingOptions {
            level: Some(config.logging.level.as_str().to_string()),
        })
    });

    let pool_config = config.pool.resolve()?;
    configure_element_pool(pool_config).context("Failed to configure matrix element pool")?;
    set_default_angle_unit(config.angle);

    log::info!(
        "numtower initialized (angle unit {:?}, element pool max {})",
        config.angle,
        element_pool_config().max_capacity
    );
    Ok(guard)
}
