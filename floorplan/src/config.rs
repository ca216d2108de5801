//! Render settings from an optional TOML file plus command-line overrides.

use std::path::{Path, PathBuf};

use floorplan_core::RenderConfig;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub fn parse_config(content: &str) -> Result<RenderConfig, ConfigError> {
    let cfg: RenderConfig = toml::from_str(content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Load a config file. Without a path the defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<RenderConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

pub fn validate(cfg: &RenderConfig) -> Result<(), ConfigError> {
    if cfg.scale_px_per_m.is_nan() || cfg.scale_px_per_m <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "scale_px_per_m must be positive, got {}",
            cfg.scale_px_per_m
        )));
    }
    if cfg.supersample.is_nan() || cfg.supersample <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "supersample must be positive, got {}",
            cfg.supersample
        )));
    }
    if !(1..=100).contains(&cfg.jpeg_quality) {
        return Err(ConfigError::Invalid(format!(
            "jpeg_quality must be within 1..=100, got {}",
            cfg.jpeg_quality
        )));
    }
    if cfg.padding_m < 0.0 || cfg.wall_thickness_px < 0.0 {
        return Err(ConfigError::Invalid(
            "padding_m and wall_thickness_px must not be negative".into(),
        ));
    }
    Ok(())
}

/// Config file (if any) with flag overrides applied on top.
pub fn resolve(cli: &Cli) -> Result<RenderConfig, ConfigError> {
    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(s) = cli.scale {
        cfg.scale_px_per_m = s;
    }
    if let Some(f) = cli.supersample {
        cfg.supersample = f;
    }
    validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = parse_config("scale_px_per_m = 50.0\n").unwrap();
        assert_eq!(cfg.scale_px_per_m, 50.0);
        assert_eq!(cfg.padding_m, 2.0);
        assert_eq!(cfg.wall_thickness_px, 6.0);
        assert_eq!(cfg.supersample, 2.0);
        assert_eq!(cfg.jpeg_quality, 90);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(parse_config("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "padding_m = 1.0\njpeg_quality = 75").unwrap();
        let cfg = load_config(Some(f.path())).unwrap();
        assert_eq!(cfg.padding_m, 1.0);
        assert_eq!(cfg.jpeg_quality, 75);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse_config("scale_px_per_m = \"big\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            parse_config("supersample = 0.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_config("jpeg_quality = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
