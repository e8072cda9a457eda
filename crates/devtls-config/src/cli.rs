//! CLI override definitions and application logic.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Overrides layered on top of the config file.
///
/// All options are global so they may appear before or after the subcommand.
#[derive(Debug, Clone, Args, Default)]
pub struct CliOverrides {
    /// Directory holding tls.key, tls.csr and tls.crt (default: current directory)
    #[arg(long, global = true, env = "TARGET_DIR")]
    pub target_dir: Option<PathBuf>,
    /// Override certificate validity in days
    #[arg(long, global = true)]
    pub validity_days: Option<u32>,
    /// Refuse to replace artifacts that already exist
    #[arg(long, global = true)]
    pub no_overwrite: bool,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.target_dir {
        config.store.target_dir = v.clone();
    }
    if let Some(v) = overrides.validity_days {
        config.certificate.validity_days = v;
    }
    if overrides.no_overwrite {
        config.store.overwrite = false;
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config.store.target_dir = PathBuf::from("/from/file");
        let overrides = CliOverrides {
            target_dir: Some(PathBuf::from("/from/cli")),
            validity_days: Some(90),
            no_overwrite: true,
            log_level: Some("debug".into()),
        };

        apply_overrides(&mut config, &overrides);

        assert_eq!(config.store.target_dir, PathBuf::from("/from/cli"));
        assert_eq!(config.certificate.validity_days, 90);
        assert!(!config.store.overwrite);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn empty_overrides_keep_config() {
        let mut config = Config::default();
        config.store.cert_file = "server.crt".into();
        apply_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.store.cert_file, "server.crt");
        assert!(config.store.overwrite);
        assert_eq!(config.store.target_dir, PathBuf::from("."));
    }
}
