use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde::de::{Deserializer, Error};

use crate::core::{EmptyResult, GenericResult};
use crate::rates::{BankRatesFeed, CentralBankFeed, KeyRateAsIs, KeyRateMargin, RateFeed};
use crate::taxes::FlatTaxRate;
use crate::types::Decimal;

pub const DEFAULT_CONFIG_DIR_PATH: &str = "~/.deposit-interest";

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,

    #[serde(default)]
    pub rates: RatesConfig,
}

impl Config {
    pub fn new(config_dir: &str) -> GenericResult<Config> {
        let config_dir = PathBuf::from(shellexpand::tilde(config_dir).to_string());
        let path = config_dir.join("config.yaml");

        if !path.try_exists().map_err(|e| format!("Failed to stat() {:?}: {}", path, e))? {
            debug!("{:?} doesn't exist. Using the default configuration.", path);
            return Ok(Config::default());
        }

        Config::load(&path).map_err(|e| format!("Error while reading {:?} configuration file: {}", path, e).into())
    }

    pub fn load(path: &Path) -> GenericResult<Config> {
        let data = fs::read(path)?;
        let mut config: Config = serde_yaml::from_slice(&data)?;

        config.validate()?;

        if let Some(path) = config.rates.path.as_mut() {
            *path = shellexpand::tilde(path).to_string();
        }

        Ok(config)
    }

    pub fn tax_rate(&self) -> GenericResult<FlatTaxRate> {
        FlatTaxRate::new(self.tax_rate)
    }

    fn validate(&self) -> EmptyResult {
        FlatTaxRate::new(self.tax_rate)?;

        if self.rates.margin.is_sign_negative() {
            return Err!("Invalid interest rate margin: {}", self.rates.margin);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tax_rate: default_tax_rate(),
            rates: RatesConfig::default(),
        }
    }
}

fn default_tax_rate() -> Decimal {
    FlatTaxRate::DEFAULT_RATE
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RatesConfig {
    #[serde(default)]
    pub feed: FeedType,
    pub path: Option<String>,
    #[serde(default = "default_margin")]
    pub margin: Decimal,
}

impl RatesConfig {
    pub fn feed(&self) -> Box<dyn RateFeed> {
        match self.feed {
            FeedType::CentralBank => Box::new(CentralBankFeed::new(if self.margin.is_zero() {
                Box::new(KeyRateAsIs)
            } else {
                Box::new(KeyRateMargin::new(self.margin))
            })),
            FeedType::Banks => Box::new(BankRatesFeed),
        }
    }
}

impl Default for RatesConfig {
    fn default() -> RatesConfig {
        RatesConfig {
            feed: FeedType::default(),
            path: None,
            margin: default_margin(),
        }
    }
}

fn default_margin() -> Decimal {
    KeyRateMargin::DEFAULT_MARGIN
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum FeedType {
    #[default]
    CentralBank,
    Banks,
}

impl<'de> Deserialize<'de> for FeedType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let value = String::deserialize(deserializer)?;

        Ok(match value.as_str() {
            "central-bank" => FeedType::CentralBank,
            "banks" => FeedType::Banks,

            _ => return Err(D::Error::unknown_variant(&value, &[
                "central-bank", "banks",
            ])),
        })
    }
}
