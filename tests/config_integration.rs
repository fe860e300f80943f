//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use impulse2d::config::AppConfig;
use impulse2d::physics::SimulationWorld;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("IMP2D_WORLD__CAPACITY", "42");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("IMP2D_WORLD__CAPACITY");
    assert_eq!(config.world.capacity, 42);
}

#[test]
#[serial]
fn test_env_override_nested_bool() {
    std::env::set_var("IMP2D_PHYSICS__GRAVITY_ENABLED", "false");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("IMP2D_PHYSICS__GRAVITY_ENABLED");

    assert!(!config.physics.gravity_enabled);
    let world = SimulationWorld::with_config(config.to_world_config()).unwrap();
    assert!(!world.gravity_enabled());
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("IMP2D_WORLD__CAPACITY");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    // Values from config/default.toml, unless a local user.toml overrides them
    if !cwd.join("config/user.toml").exists() {
        assert_eq!(config.world.width, 1200.0);
        assert_eq!(config.harness.ticks, 600);
        assert_eq!(config.debug.log_level, "info");
    }
    assert!(config.to_world_config().validate().is_ok());
}

#[test]
#[serial]
fn test_bad_env_value_is_an_error() {
    std::env::set_var("IMP2D_WORLD__WIDTH", "wide");
    let result = AppConfig::load();
    std::env::remove_var("IMP2D_WORLD__WIDTH");
    assert!(result.is_err());
}
