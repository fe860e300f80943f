//! impulse2d - headless stress runner
//!
//! Loads configuration, runs the harness once per configured object count and
//! exits non-zero if any run broke a world invariant.

use std::process::ExitCode;

use impulse2d::config::AppConfig;
use impulse2d::systems::Harness;

fn main() -> ExitCode {
    // Load configuration before logging so it can pick the default filter
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let world_config = config.to_world_config();
    log::info!(
        "World {}x{}, capacity {}, gravity {:?} ({})",
        world_config.width,
        world_config.height,
        world_config.capacity,
        world_config.gravity,
        if world_config.gravity_enabled { "on" } else { "off" }
    );

    let harness = match Harness::new(config.harness.clone(), world_config, config.physics.fixed_dt) {
        Ok(harness) => harness,
        Err(e) => {
            log::error!("Invalid harness setup: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reports = match harness.run() {
        Ok(reports) => reports,
        Err(e) => {
            log::error!("Harness failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut healthy = true;
    for report in &reports {
        if report.is_healthy() {
            log::info!("{}", report);
        } else {
            log::error!("{}", report);
            healthy = false;
        }
    }

    if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
