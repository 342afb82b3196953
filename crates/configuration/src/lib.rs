use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_logging;
pub use settings::{Analysis, Config, Logging, Output, OutputFormat};

/// Prefix for environment overrides, e.g. `CURVESTATS_ANALYSIS__WINDOW_SIZE=60`.
pub const ENV_PREFIX: &str = "CURVESTATS";

/// Loads the application configuration from `config.toml` in the working
/// directory, if present, layered under environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(None)
}

/// Like `load_config`, but reads an explicit file, which must then exist.
pub fn load_config_from(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let file = write_toml("");
        let config = load_config_from(Some(file.path())).unwrap();
        assert_eq!(config.analysis.window_size, 30);
        assert_eq!(config.analysis.risk_free_rate, 0.0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_file_values_are_read() {
        let file = write_toml(
            r#"
            [analysis]
            window_size = 63
            risk_free_rate = 0.04

            [output]
            format = "json"
            "#,
        );
        let config = load_config_from(Some(file.path())).unwrap();
        assert_eq!(config.analysis.window_size, 63);
        assert_eq!(config.analysis.risk_free_rate, 0.04);
        assert_eq!(config.analysis.parallel_threshold, 512);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let file = write_toml("[analysis]\nwindow_size = 0\n");
        let err = load_config_from(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
