use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use underdark_core::SlugSeparator;
use underdark_system_chamber::ChamberOrigin;
use underdark_system_tilemap::GridSize;

/// Configuration file picked up from the working directory when present.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "underdark.toml";

/// Settings shared by every command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Reference point chamber coordinates are derived from.
    pub(crate) origin: ChamberOrigin,
    /// Tilemap expansion settings.
    pub(crate) tilemap: TilemapConfig,
    /// Slug rendering settings.
    pub(crate) slug: SlugConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TilemapConfig {
    /// Side length of expanded tilemaps.
    pub(crate) grid_size: GridSize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SlugConfig {
    /// Separator placed between slug tokens.
    pub(crate) separator: SlugSeparator,
}

impl Config {
    /// Loads the configuration from `path`, or from [`DEFAULT_CONFIG_PATH`]
    /// when it exists, falling back to defaults otherwise.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    tracing::debug!("no configuration file found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config = parse_config(&contents)
            .with_context(|| format!("invalid configuration {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("failed to parse configuration toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;
    use underdark_core::Compass;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").expect("empty config parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.tilemap.grid_size, GridSize::EIGHTEEN);
        assert_eq!(config.slug.separator, SlugSeparator::Comma);
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
                [origin]
                realm_id = 2
                manor = "0x2000300000000"

                [tilemap]
                grid_size = 20

                [slug]
                separator = "hyphen"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.origin.realm_id, 2);
        assert_eq!(
            config.origin.manor,
            Compass::default().with_north(2).with_east(3).to_coord()
        );
        assert_eq!(config.tilemap.grid_size, GridSize::TWENTY);
        assert_eq!(config.slug.separator, SlugSeparator::Hyphen);
    }

    #[test]
    fn partial_origin_keeps_default_manor() {
        let config = parse_config("[origin]\nrealm_id = 9\n").expect("config parses");
        assert_eq!(config.origin.realm_id, 9);
        assert_eq!(config.origin.manor, ChamberOrigin::default().manor);
    }

    #[test]
    fn rejects_odd_grid_sizes_and_unknown_keys() {
        assert!(parse_config("[tilemap]\ngrid_size = 19\n").is_err());
        assert!(parse_config("[tilemap]\nzoom = 2\n").is_err());
    }
}
