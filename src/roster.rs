use std::path::Path;

use anyhow::Context;
use log::debug;
use serde_json::Value;

use crate::config::Config;
use crate::player::{Player, SelectablePlayer};
use crate::record::{decode_from_value, DecodeError};

/// Outcome of checking a list of records against [`SelectablePlayer`].
#[derive(Debug, Default)]
pub struct Report {
    pub players: Vec<SelectablePlayer>,
    pub rejected: Vec<(usize, DecodeError)>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.players.len() + self.rejected.len()
    }

    pub fn selected(&self) -> impl Iterator<Item = &SelectablePlayer> {
        self.players.iter().filter(|player| player.selected)
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Decodes one record. Without `require_selection`, a record lacking
/// `selected` is taken as an unselected player.
pub fn check_record(value: &Value, require_selection: bool) -> Result<SelectablePlayer, DecodeError> {
    match decode_from_value::<SelectablePlayer>(value) {
        Err(DecodeError::MissingField("selected")) if !require_selection => {
            Ok(decode_from_value::<Player>(value)?.with_selection(false))
        }
        result => result,
    }
}

pub fn check_records(records: &[Value], require_selection: bool) -> Report {
    let mut report = Report::default();

    for (index, record) in records.iter().enumerate() {
        match check_record(record, require_selection) {
            Ok(player) => {
                debug!("Entry {} conforms: id {}", index, player.id);
                report.players.push(player);
            }
            Err(e) => {
                debug!("Entry {} does not conform: {}", index, e);
                report.rejected.push((index, e));
            }
        }
    }

    report
}

pub fn check_file(path: &Path, require_selection: bool) -> anyhow::Result<Report> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster {}", path.display()))?;
    let records: Vec<Value> = serde_json::from_str(&contents)
        .with_context(|| format!("roster {} is not a JSON array", path.display()))?;

    Ok(check_records(&records, require_selection))
}

/// Checks the configured roster, then writes `config` back to `config_path`
/// whether or not the roster could be read.
pub fn run(config: &Config, config_path: &Path) -> anyhow::Result<Report> {
    let report = check_file(&config.roster.path, config.roster.require_selection);
    config.save(config_path)?;
    report
}

/// Fails when `strict` is set and any entry was rejected.
pub fn enforce(report: &Report, strict: bool) -> anyhow::Result<()> {
    if strict && !report.is_clean() {
        anyhow::bail!(
            "{} of {} entries do not conform",
            report.rejected.len(),
            report.total()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Ada", "info": "", "selected": true}),
            json!({"id": 2, "name": "Bo", "info": "bench"}),
            json!({"id": "3", "name": "Cy", "info": "", "selected": false}),
            json!({"id": 4, "name": "Di", "info": "", "selected": false, "team": "red"}),
        ]
    }

    #[test]
    fn strict_selection() {
        let report = check_records(&records(), true);
        assert_eq!(report.total(), 4);
        assert_eq!(report.players.len(), 2);
        assert_eq!(
            report.rejected,
            vec![
                (1, DecodeError::MissingField("selected")),
                (
                    2,
                    DecodeError::InvalidType {
                        field: "id",
                        expected: crate::record::Kind::Integer
                    }
                ),
            ]
        );
        assert_eq!(report.selected().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
        assert!(!report.is_clean());
    }

    #[test]
    fn missing_selection_defaults_to_unselected() {
        let report = check_records(&records(), false);
        assert_eq!(report.players.len(), 3);
        assert_eq!(report.rejected.len(), 1);

        let bo = report.players.iter().find(|p| p.id == 2).unwrap();
        assert!(!bo.selected);
        assert_eq!(bo.info, "bench");
    }

    #[test]
    fn bad_selected_value_is_still_rejected() {
        let record = json!({"id": 1, "name": "a", "info": "b", "selected": 1});
        assert!(matches!(
            check_record(&record, false),
            Err(DecodeError::InvalidType { field: "selected", .. })
        ));
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "player_roster_{}_{}",
            std::process::id(),
            name
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_roster(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("roster.json");
        std::fs::write(&path, serde_json::to_string(&records()).unwrap()).unwrap();
        path
    }

    #[test]
    fn run_creates_missing_config() {
        let dir = scratch("fresh");
        let config_path = dir.join("fresh.toml");
        let _ = std::fs::remove_file(&config_path);

        let mut config = Config::load(&config_path).unwrap();
        config.roster.path = write_roster(&dir);

        let report = run(&config, &config_path).unwrap();
        assert_eq!(report.total(), 4);
        assert!(config_path.exists());

        let reloaded = Config::load(&config_path).unwrap();
        assert_eq!(reloaded.roster.path, config.roster.path);
        assert_eq!(reloaded.general.log_level, config.general.log_level);
    }

    #[test]
    fn run_saves_config_when_roster_is_missing() {
        let dir = scratch("missing");
        let config_path = dir.join("config.toml");
        std::fs::write(&config_path, "[general]\nlog_level = \"loud\"\n").unwrap();

        let mut config = Config::load(&config_path).unwrap();
        config.roster.path = dir.join("missing.json");

        assert!(run(&config, &config_path).is_err());

        let saved = std::fs::read_to_string(&config_path).unwrap();
        assert!(saved.contains("log_level = \"off\""), "{}", saved);
        assert!(saved.contains("missing.json"), "{}", saved);
    }

    #[test]
    fn run_saves_config_when_roster_is_malformed() {
        let dir = scratch("malformed");
        let config_path = dir.join("config.toml");
        let _ = std::fs::remove_file(&config_path);

        let mut config = Config::load(&config_path).unwrap();
        config.roster.path = dir.join("roster.json");
        std::fs::write(&config.roster.path, "{\"id\": 1}").unwrap();

        assert!(run(&config, &config_path).is_err());
        assert!(config_path.exists());
    }

    #[test]
    fn strict_mode_fails_on_rejected_entries() {
        let report = check_records(&records(), true);
        assert!(enforce(&report, true).is_err());
        assert!(enforce(&report, false).is_ok());

        let clean = check_records(&records()[..1], true);
        assert!(enforce(&clean, true).is_ok());
    }

    #[test]
    fn empty_roster_is_clean() {
        let report = check_records(&[], true);
        assert_eq!(report.total(), 0);
        assert!(report.is_clean());
    }
}
