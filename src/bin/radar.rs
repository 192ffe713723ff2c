//! Quantum Radar batch pass
//!
//! Reads feed snapshots, scores signals, classifies trends, writes the
//! dashboard files and logs the alerts that should be delivered.

use chrono::Utc;
use quantum_radar::config::{get_environment, RadarConfig};
use quantum_radar::core::runtime::RadarRuntime;
use quantum_radar::logging;
use quantum_radar::services::feeds::JsonSnapshotProvider;
use quantum_radar::store::JsonStore;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RadarConfig::from_env()?;
    logging::init_logging();

    info!(environment = %get_environment(), tickers = ?config.tickers, "Starting Quantum Radar pass");

    let provider = JsonSnapshotProvider::new(&config.input_dir);
    let store = JsonStore::new(&config.output_dir, &config.state_path);
    let runtime = RadarRuntime::new(config);

    let output = runtime.run_once(&provider, &store, Utc::now())?;

    for alert in &output.alerts {
        info!(alert = %alert.message(), "alert");
    }
    for point in &output.trend {
        info!(
            ticker = %point.ticker,
            status = %point.status,
            score = point.score,
            "trend {} {} (score {})",
            point.ticker,
            point.status,
            point.score
        );
    }

    info!(path = %store.data_path().display(), "wrote dashboard data");
    Ok(())
}
