//! Configuration file loading and error types.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid yaml in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid toml in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unsupported config format for {} (expected json, jsonc, yaml, yml or toml)", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("validation: {0}")]
    Validation(String),
}

/// Load a config file, choosing the parser from its extension.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let owned = || path.to_path_buf();
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    if !matches!(extension, "json" | "jsonc" | "yaml" | "yml" | "toml") {
        return Err(ConfigError::UnsupportedFormat { path: owned() });
    }
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: owned(),
        source,
    })?;
    match extension {
        "json" | "jsonc" => {
            let stripped = json_comments::StripComments::new(data.as_bytes());
            serde_json::from_reader(stripped).map_err(|source| ConfigError::Json {
                path: owned(),
                source,
            })
        }
        "yaml" | "yml" => serde_yaml::from_str(&data).map_err(|source| ConfigError::Yaml {
            path: owned(),
            source,
        }),
        _ => toml::from_str(&data).map_err(|source| ConfigError::Toml {
            path: owned(),
            source,
        }),
    }
}

/// Load the config file if one was given, otherwise start from defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_toml_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devtls.toml");
        fs::write(
            &path,
            r#"
[store]
target_dir = "/srv/tls"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.target_dir, Path::new("/srv/tls"));
        assert_eq!(config.store.key_file, "tls.key");
        assert_eq!(config.store.request_file, "tls.csr");
        assert_eq!(config.store.cert_file, "tls.crt");
        assert!(config.store.overwrite);
        assert_eq!(config.certificate.validity_days, 365);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn loads_jsonc_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devtls.jsonc");
        fs::write(
            &path,
            r#"{
  // shorter lifetime for CI certificates
  "certificate": { "validity_days": 30 },
  "store": { "overwrite": false }
}"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.certificate.validity_days, 30);
        assert!(!config.store.overwrite);
    }

    #[test]
    fn loads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devtls.yaml");
        fs::write(
            &path,
            "store:\n  cert_file: server.pem\nlogging:\n  format: json\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.cert_file, "server.pem");
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devtls.ini");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Io { path: ref p, .. } if p == &path));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn parse_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[certificate]\nvalidity_days = \"soon\"\n").unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_path_falls_back_to_defaults() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config.store.target_dir, Path::new("."));
        assert_eq!(config.certificate.validity_days, 365);
    }
}
