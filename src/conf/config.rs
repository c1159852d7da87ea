use std::path::Path;

use crate::{
    conf::{ChartsConfig, ClientConfig, EndpointConfig},
    core::ExploreError::{self, ConfigParsingError},
};
use config::Config as CConfig;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "EXPLORE";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, ExploreError> {
        let config = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        Ok(config)
    }

    /// Loads a TOML file, then applies `EXPLORE_*` environment overrides
    /// (`EXPLORE_CLIENT__BASE_URL` sets `client.base_url`).
    pub fn from_file(path: &Path) -> Result<Config, ExploreError> {
        let config = CConfig::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        Ok(config)
    }
}
