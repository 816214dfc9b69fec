//! Command-line and environment configuration.

use clap::Parser;
use museum_core::default_log_level;
use std::path::{Path, PathBuf};

/// Museum artifact inventory manager.
#[derive(Parser, Debug, Clone)]
#[command(name = "museum", about = "Manage museum artifact records from the console", version)]
pub struct CliConfig {
    /// SQLite database file holding the artifacts table
    #[arg(long, env = "MUSEUM_DB_PATH", default_value = "museum.sqlite3")]
    pub db_path: PathBuf,

    /// Use a throwaway in-memory database instead of --db-path
    #[arg(long)]
    pub in_memory: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MUSEUM_LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, env = "MUSEUM_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Log directory made absolute against `cwd`.
    pub fn resolved_log_dir(&self, cwd: &Path) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                cwd.join(dir)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    #[test]
    fn flags_override_defaults() {
        let config = CliConfig::try_parse_from([
            "museum",
            "--db-path",
            "/tmp/inventory.sqlite3",
            "--log-level",
            "warn",
            "--in-memory",
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/inventory.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert!(config.in_memory);
    }

    #[test]
    fn relative_log_dir_resolves_against_cwd() {
        let config = CliConfig::try_parse_from(["museum", "--log-dir", "logs"]).unwrap();

        assert_eq!(
            config.resolved_log_dir(Path::new("/srv/museum")),
            Some(PathBuf::from("/srv/museum/logs"))
        );
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(CliConfig::try_parse_from(["museum", "--drop-table"]).is_err());
    }
}
