//! Configuration validation logic.

use std::path::{Component, Path};

use crate::Config;
use crate::defaults::max_validity_days;
use crate::loader::ConfigError;

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.store.target_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("store.target_dir is empty".into()));
    }
    let files = [
        ("store.key_file", &config.store.key_file),
        ("store.request_file", &config.store.request_file),
        ("store.cert_file", &config.store.cert_file),
    ];
    for (field, name) in files {
        validate_file_name(field, name)?;
    }
    if files[0].1 == files[1].1 || files[0].1 == files[2].1 || files[1].1 == files[2].1 {
        return Err(ConfigError::Validation(
            "store.key_file, store.request_file and store.cert_file must differ".into(),
        ));
    }
    if config.certificate.validity_days == 0
        || config.certificate.validity_days > max_validity_days()
    {
        return Err(ConfigError::Validation(format!(
            "certificate.validity_days must be 1..={}",
            max_validity_days()
        )));
    }
    // Logging
    let valid_formats = ["pretty", "compact", "json"];
    if let Some(format) = config.logging.format.as_deref()
        && !valid_formats.contains(&format)
    {
        return Err(ConfigError::Validation(format!(
            "logging.format must be one of: {:?}",
            valid_formats
        )));
    }
    let valid_outputs = ["stderr", "stdout"];
    if let Some(output) = config.logging.output.as_deref()
        && !valid_outputs.contains(&output)
    {
        return Err(ConfigError::Validation(format!(
            "logging.output must be one of: {:?}",
            valid_outputs
        )));
    }
    Ok(())
}

/// Artifact names are plain file names: all three artifacts share one directory.
fn validate_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} is empty")));
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must be a file name without directories, got {name:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_nested_file_name() {
        let mut config = Config::default();
        config.store.cert_file = "certs/tls.crt".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("store.cert_file"));
    }

    #[test]
    fn rejects_parent_dir_file_name() {
        let mut config = Config::default();
        config.store.key_file = "..".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_colliding_file_names() {
        let mut config = Config::default();
        config.store.request_file = config.store.key_file.clone();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn rejects_zero_validity() {
        let mut config = Config::default();
        config.certificate.validity_days = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = Some("xml".into());
        assert!(validate_config(&config).is_err());
    }
}
