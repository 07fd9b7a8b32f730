use std::path::Path;

use log::{error, info, warn};

use player_roster::{config, logging, roster};

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_owned());

    // Load config from file and merge with default config
    let config = config::Config::load(&config_path)?;

    logging::setup_logger(config.general.log_level.into(), &config.general.log_dir)?;

    let report = roster::run(&config, Path::new(&config_path))?;
    for (index, e) in &report.rejected {
        warn!("Entry {} does not conform: {}", index, e);
    }
    info!(
        "{} entries, {} conforming, {} selected",
        report.total(),
        report.players.len(),
        report.selected().count()
    );

    if let Err(e) = roster::enforce(&report, config.roster.strict) {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
