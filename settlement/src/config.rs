//! Configuration for the settlement engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Formatted position of the port of New York, the contract's destination.
///
/// In-port detection is an exact match on this literal, not a geofence.
pub const PORT_OF_NEW_YORK: &str = "/LAT:40.6840N/LONG:74.0062W";

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Destination port position literal for in-port detection
    pub destination_port: String,

    /// Payout split configuration
    pub split: SplitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "coldchain-settlement".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            destination_port: PORT_OF_NEW_YORK.to_string(),
            split: SplitConfig::default(),
        }
    }
}

/// Payout split between the receiving parties
///
/// The wholesaler is always debited the full amount; the shares here
/// apportion it between manufacturer and shipper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Manufacturer share of the payout (default 0.85)
    pub manufacturer_share: Decimal,

    /// Shipper share of the payout (default 0.15)
    pub shipper_share: Decimal,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            manufacturer_share: Decimal::new(85, 2),
            shipper_share: Decimal::new(15, 2),
        }
    }
}

impl SplitConfig {
    /// Validate that the shares are non-negative and sum to 1
    pub fn validate(&self) -> crate::Result<()> {
        if self.manufacturer_share < Decimal::ZERO || self.shipper_share < Decimal::ZERO {
            return Err(crate::Error::Config(
                "payout shares must be non-negative".to_string(),
            ));
        }
        if self.manufacturer_share + self.shipper_share != Decimal::ONE {
            return Err(crate::Error::Config(format!(
                "payout shares must sum to 1, got {} + {}",
                self.manufacturer_share, self.shipper_share
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.split.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(port) = std::env::var("COLDCHAIN_DESTINATION_PORT") {
            config.destination_port = port;
        }

        if let Ok(share) = std::env::var("COLDCHAIN_MANUFACTURER_SHARE") {
            config.split.manufacturer_share = parse_share("COLDCHAIN_MANUFACTURER_SHARE", &share)?;
        }

        if let Ok(share) = std::env::var("COLDCHAIN_SHIPPER_SHARE") {
            config.split.shipper_share = parse_share("COLDCHAIN_SHIPPER_SHARE", &share)?;
        }

        config.split.validate()?;
        Ok(config)
    }
}

fn parse_share(name: &str, value: &str) -> crate::Result<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|e| crate::Error::Config(format!("Failed to parse {}: {}", name, e)))
}
