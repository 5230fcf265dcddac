use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use tiffin_core::geo::GeoPoint;
use tiffin_delivery::{DeliveryZone, EtaParams, FeeSchedule, FeeTier, ZoneConfigError};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub delivery: DeliveryConfig,
    pub storefront: StorefrontRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// One row of the fee-tier table. A `step_fee` makes the band distance
/// stepped: `fee + step_fee x ceil(km - min_km)`.
#[derive(Debug, Deserialize, Clone)]
pub struct TierConfig {
    pub min_km: f64,
    pub max_km: f64,
    pub fee: i32,
    #[serde(default)]
    pub step_fee: Option<i32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeliveryConfig {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub outer_radius_km: f64,
    #[serde(default = "default_prep_minutes")]
    pub prep_minutes: u32,
    #[serde(default = "default_minutes_per_km")]
    pub minutes_per_km: f64,
    pub tiers: Vec<TierConfig>,
}

fn default_prep_minutes() -> u32 {
    20
}

fn default_minutes_per_km() -> f64 {
    5.0
}

impl DeliveryConfig {
    /// Build the validated zone; a malformed tier table fails startup
    /// instead of producing unmatched distances at runtime.
    pub fn zone(&self) -> Result<DeliveryZone, ZoneConfigError> {
        let tiers = self
            .tiers
            .iter()
            .map(|tier| FeeTier {
                min_km: tier.min_km,
                max_km: tier.max_km,
                fee: match tier.step_fee {
                    Some(step) => FeeSchedule::Stepped {
                        base: tier.fee,
                        step,
                        from_km: tier.min_km,
                    },
                    None => FeeSchedule::Flat(tier.fee),
                },
            })
            .collect();

        DeliveryZone::new(
            GeoPoint::new(self.center_latitude, self.center_longitude),
            self.outer_radius_km,
            tiers,
        )
    }

    pub fn eta(&self) -> EtaParams {
        EtaParams {
            prep_minutes: self.prep_minutes,
            minutes_per_km: self.minutes_per_km,
        }
    }
}

/// Per-category minimum-order settings from the admin collaborator.
/// Categories absent from the map fall back to the registry default.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorefrontRules {
    #[serde(default)]
    pub category_minimums: HashMap<String, i32>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of TIFFIN)
            // Eg.. `TIFFIN_SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("TIFFIN").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
