//! Process-wide initialization

use numtower::{
    element_pool_config, from_radians_default, init, to_radians_default, AngleUnit, NumberValue,
    PoolPreset, TowerConfig,
};
use std::f64::consts::PI;

#[test]
fn test_init_applies_pool_and_angle_settings() {
    let mut config = TowerConfig::default();
    config.logging.enabled = false;
    config.pool.preset = Some(PoolPreset::Debug);
    config.pool.max_capacity = Some(100_000);
    config.angle = AngleUnit::Degrees;

    let guard = init(&config).unwrap();
    assert!(guard.is_none());

    let pool = element_pool_config();
    assert!(pool.verify_on_release);
    assert_eq!(pool.max_capacity, 100_000);

    let radians = to_radians_default(NumberValue::Integer(180));
    assert_eq!(radians, NumberValue::Real(PI));
    let degrees = from_radians_default(NumberValue::Real(PI / 2.0));
    assert_eq!(degrees, NumberValue::Integer(90));

    // Matrices still work with the new pool settings.
    let m = NumberValue::matrix(2, 2, vec![1.into(), 2.into(), 3.into(), 4.into()]);
    assert_eq!(numtower::det(m), NumberValue::Integer(-2));
}

#[test]
fn test_init_rejects_invalid_pool() {
    let mut config = TowerConfig::default();
    config.logging.enabled = false;
    config.pool.buffer_capacity = Some(0);
    assert!(init(&config).is_err());
}
