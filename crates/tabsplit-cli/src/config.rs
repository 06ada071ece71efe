//! Engine configuration for the binary: optional TOML file, then flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tabsplit_types::{EngineConfig, RoundingMode};

/// Command-line overrides applied on top of the file configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub share_precision: Option<u32>,
    pub display_precision: Option<u32>,
    pub rounding: Option<RoundingMode>,
    pub max_settlement_steps: Option<usize>,
    pub skip_conservation_check: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(dp) = self.share_precision {
            config.share_precision = dp;
        }
        if let Some(dp) = self.display_precision {
            config.display_precision = dp;
        }
        if let Some(mode) = self.rounding {
            config.rounding = mode;
        }
        if let Some(steps) = self.max_settlement_steps {
            config.max_settlement_steps = steps;
        }
        if self.skip_conservation_check {
            config.check_conservation = false;
        }
    }
}

/// Parse a TOML configuration. Missing keys keep their defaults.
pub fn parse(text: &str) -> Result<EngineConfig> {
    toml::from_str(text).context("invalid engine configuration")
}

/// Build the effective configuration and validate it.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&text).with_context(|| format!("in config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    overrides.apply(&mut config);
    config.validate()?;

    tracing::debug!(
        share_precision = config.share_precision,
        display_precision = config.display_precision,
        rounding = %config.rounding,
        check_conservation = config.check_conservation,
        max_settlement_steps = config.max_settlement_steps,
        "Engine configuration resolved"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse(r#"rounding = "half-even""#).unwrap();
        assert_eq!(config.rounding, RoundingMode::HalfEven);
        assert_eq!(config.share_precision, EngineConfig::default().share_precision);
        assert!(config.check_conservation);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn bad_value_rejected() {
        assert!(parse(r#"rounding = "sideways""#).is_err());
        assert!(parse("share_precision = -1").is_err());
    }

    #[test]
    fn overrides_win() {
        let overrides = Overrides {
            share_precision: Some(4),
            rounding: Some(RoundingMode::HalfEven),
            skip_conservation_check: true,
            ..Overrides::default()
        };
        let config = resolve(None, &overrides).unwrap();
        assert_eq!(config.share_precision, 4);
        assert_eq!(config.display_precision, 2);
        assert_eq!(config.rounding, RoundingMode::HalfEven);
        assert!(!config.check_conservation);
    }

    #[test]
    fn incoherent_overrides_rejected() {
        let overrides = Overrides {
            share_precision: Some(1),
            ..Overrides::default()
        };
        assert!(resolve(None, &overrides).is_err());
    }

    #[test]
    fn missing_file_reported() {
        let err = resolve(Some(Path::new("/nonexistent/tabsplit.toml")), &Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
