use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub booking_rules: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Owner-adjustable business rules: the per-seat-type premium table and the
/// bound on how long a booking attempt may hold seat claims.
#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_claim_timeout_ms")]
    pub claim_timeout_ms: u64,
    #[serde(default = "default_seat_multipliers")]
    pub seat_multipliers: HashMap<String, Decimal>,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            claim_timeout_ms: default_claim_timeout_ms(),
            seat_multipliers: default_seat_multipliers(),
        }
    }
}

fn default_claim_timeout_ms() -> u64 {
    5_000
}

fn default_seat_multipliers() -> HashMap<String, Decimal> {
    let mut m = HashMap::new();
    m.insert("standard".to_string(), Decimal::new(10, 1)); // 1.0
    m.insert("vip".to_string(), Decimal::new(15, 1)); // 1.5
    m.insert("couple".to_string(), Decimal::new(13, 1)); // 1.3
    m.insert("super_vip".to_string(), Decimal::new(20, 1)); // 2.0
    m
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MARQUEE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
