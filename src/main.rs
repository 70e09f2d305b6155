use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hms_core::constants::{FACILITY_NAME_ENV, HISTORY_TIMESTAMPS_ENV, SCRIPT_PATH_ENV};
use hms_core::{CoreConfig, Outcome, Registry, Script};

/// Main entry point for the hospital registry runner
///
/// Replays a command script against a fresh registry and prints one status line per command
/// on stdout. Logs go to stderr.
///
/// # Environment Variables
/// - `HMS_SCRIPT`: path to a command script (default: the built-in workflow)
/// - `HMS_FACILITY_NAME`: facility name shown in information blocks
/// - `HMS_HISTORY_TIMESTAMPS`: prefix history lines with their timestamps
/// - `RUST_LOG`: log filter (default directive: `hms=info`)
///
/// # Returns
/// * `Ok(())` - If the script was parsed and run
/// * `Err(anyhow::Error)` - If configuration or the script is invalid
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("hms=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = CoreConfig::from_env_values(
        std::env::var(FACILITY_NAME_ENV).ok(),
        std::env::var(HISTORY_TIMESTAMPS_ENV).ok(),
    )?;

    let script = match std::env::var(SCRIPT_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let path = PathBuf::from(path);
            tracing::info!("++ Running script {}", path.display());
            Script::load(&path)?
        }
        _ => {
            tracing::info!("++ Running default workflow");
            Script::default_workflow()?
        }
    };

    tracing::info!("++ Facility: {}", cfg.facility_name());

    let mut registry = Registry::new(Arc::new(cfg));
    let steps = registry.run_script(&script);

    for step in &steps {
        println!("{step}");
    }

    let failed = steps.iter().filter(|s| s.outcome != Outcome::Ok).count();
    tracing::info!(
        commands = steps.len(),
        not_ok = failed,
        "-- Script finished"
    );

    Ok(())
}
