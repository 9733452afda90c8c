use serde::Deserialize;
use thiserror::Error;

use std::path::PathBuf;

use crate::data::Timeframe;
use crate::swings::DEFAULT_LOOKBACK;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file path is not valid UTF-8")]
    FilePathIntoString,
    #[error("failed to read config: {0}")]
    SettingsInit(String),
    #[error("failed to deserialize config: {0}")]
    Deserialize(String),
    #[error("lookback must be at least 1, got {0}")]
    InvalidLookback(usize),
    #[error("config lists no instruments")]
    NoInstruments,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentConfig {
    /// Display name, e.g. the ticker
    pub name: String,
    /// Path to the CSV file (timestamp,open,high,low,close,volume)
    pub input: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Candles on each side that confirm a swing point
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// Timeframes to resample every instrument into
    #[serde(default = "default_timeframes")]
    pub timeframes: Vec<Timeframe>,

    /// Print JSON instead of text
    #[serde(default)]
    pub json: bool,

    pub instruments: Vec<InstrumentConfig>,
}

fn default_lookback() -> usize {
    DEFAULT_LOOKBACK
}

fn default_timeframes() -> Vec<Timeframe> {
    vec![Timeframe::Native]
}

impl Config {
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let filename = path
            .into_os_string()
            .into_string()
            .map_err(|_| ConfigError::FilePathIntoString)?;
        Self::from_source(config::File::with_name(&filename))
    }

    fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Config = config::Config::builder()
            .add_source(source)
            .build()
            .map_err(|err| ConfigError::SettingsInit(err.to_string()))?
            .try_deserialize()
            .map_err(|err| ConfigError::Deserialize(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_lookback(self.lookback)?;
        if self.instruments.is_empty() {
            return Err(ConfigError::NoInstruments);
        }
        Ok(())
    }
}

/// Zero would make every candle its own swing point.
pub fn validate_lookback(lookback: usize) -> Result<usize, ConfigError> {
    if lookback == 0 {
        return Err(ConfigError::InvalidLookback(lookback));
    }
    Ok(lookback)
}
