//! # Configuration
//!
//! Settings are layered: built-in defaults, then `KITCHEN_*` environment
//! variables, then command-line flags. Later layers win.
//!
//! | Flag | Environment | Default |
//! |------|-------------|---------|
//! | `--orders <path>` | | required unless `--keep-running` |
//! | `--rate <n>` | `KITCHEN_RATE` | 2 orders/s |
//! | `--min-pickup <secs>` | `KITCHEN_MIN_PICKUP` | 2 |
//! | `--max-pickup <secs>` | `KITCHEN_MAX_PICKUP` | 6 |
//! | `--discard-rate <secs>` | `KITCHEN_SWEEP_INTERVAL` | 10 |
//! | `--seed <n>` | `KITCHEN_SEED` | OS entropy |
//! | `--verbose` | `KITCHEN_VERBOSE` | off |
//! | `--keep-running` | | off |
//!
//! Shelf capacities come only from the environment
//! (`KITCHEN_HOT_CAPACITY`, `KITCHEN_COLD_CAPACITY`, `KITCHEN_FROZEN_CAPACITY`,
//! `KITCHEN_OVERFLOW_CAPACITY`).

mod error;

pub use error::*;

use crate::dispatcher::DispatchSettings;
use crate::kitchen::ShelfCapacities;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const USAGE: &str = "\
Usage: cloud-kitchen --orders <path> [options]

Options:
  --orders <path>        JSON array of orders to replay
  --rate <n>             orders ingested per second (default 2)
  --min-pickup <secs>    earliest courier arrival (default 2)
  --max-pickup <secs>    latest courier arrival (default 6)
  --discard-rate <secs>  seconds between expired-order sweeps (default 10)
  --seed <n>             seed for eviction and courier delays
  --verbose              print every shelf after each event
  --keep-running         keep serving after the feed is drained (Ctrl-C to stop)
  -h, --help             show this message

Log level is controlled by RUST_LOG (default info).";

/// Everything needed to start a [`KitchenSystem`](crate::lifecycle::KitchenSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenConfig {
    pub orders_path: Option<PathBuf>,
    pub ingestion_rate: u32,
    pub min_pickup_secs: u64,
    pub max_pickup_secs: u64,
    pub sweep_interval_secs: u64,
    pub verbose: bool,
    pub keep_running: bool,
    pub seed: Option<u64>,
    pub capacities: ShelfCapacities,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            orders_path: None,
            ingestion_rate: 2,
            min_pickup_secs: 2,
            max_pickup_secs: 6,
            sweep_interval_secs: 10,
            verbose: false,
            keep_running: false,
            seed: None,
            capacities: ShelfCapacities::default(),
        }
    }
}

impl KitchenConfig {
    /// Builds the config from the process environment and `args` (without the program name).
    pub fn load<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(args)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlays `KITCHEN_*` variables looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("KITCHEN_RATE") {
            self.ingestion_rate = parse_value("KITCHEN_RATE", &v)?;
        }
        if let Some(v) = get("KITCHEN_MIN_PICKUP") {
            self.min_pickup_secs = parse_value("KITCHEN_MIN_PICKUP", &v)?;
        }
        if let Some(v) = get("KITCHEN_MAX_PICKUP") {
            self.max_pickup_secs = parse_value("KITCHEN_MAX_PICKUP", &v)?;
        }
        if let Some(v) = get("KITCHEN_SWEEP_INTERVAL") {
            self.sweep_interval_secs = parse_value("KITCHEN_SWEEP_INTERVAL", &v)?;
        }
        if let Some(v) = get("KITCHEN_VERBOSE") {
            self.verbose = parse_flag("KITCHEN_VERBOSE", &v)?;
        }
        if let Some(v) = get("KITCHEN_SEED") {
            self.seed = Some(parse_value("KITCHEN_SEED", &v)?);
        }
        if let Some(v) = get("KITCHEN_HOT_CAPACITY") {
            self.capacities.hot = parse_value("KITCHEN_HOT_CAPACITY", &v)?;
        }
        if let Some(v) = get("KITCHEN_COLD_CAPACITY") {
            self.capacities.cold = parse_value("KITCHEN_COLD_CAPACITY", &v)?;
        }
        if let Some(v) = get("KITCHEN_FROZEN_CAPACITY") {
            self.capacities.frozen = parse_value("KITCHEN_FROZEN_CAPACITY", &v)?;
        }
        if let Some(v) = get("KITCHEN_OVERFLOW_CAPACITY") {
            self.capacities.overflow = parse_value("KITCHEN_OVERFLOW_CAPACITY", &v)?;
        }
        Ok(())
    }

    /// Overlays command-line flags. Accepts `--flag value` and `--flag=value`.
    pub fn apply_args<I, S>(&mut self, args: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            let name = flag.trim_start_matches('-');

            match name {
                "h" | "help" => return Err(ConfigError::HelpRequested),
                "verbose" => self.verbose = true,
                "keep-running" => self.keep_running = true,
                "orders" | "rate" | "min-pickup" | "max-pickup" | "discard-rate" | "seed" => {
                    let value = match inline {
                        Some(value) => value,
                        None => args
                            .next()
                            .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?,
                    };
                    match name {
                        "orders" => self.orders_path = Some(PathBuf::from(value)),
                        "rate" => self.ingestion_rate = parse_value(&flag, &value)?,
                        "min-pickup" => self.min_pickup_secs = parse_value(&flag, &value)?,
                        "max-pickup" => self.max_pickup_secs = parse_value(&flag, &value)?,
                        "discard-rate" => self.sweep_interval_secs = parse_value(&flag, &value)?,
                        _ => self.seed = Some(parse_value(&flag, &value)?),
                    }
                }
                _ => return Err(ConfigError::UnknownFlag(arg)),
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.orders_path.is_none() && !self.keep_running {
            return Err(ConfigError::MissingOrdersPath);
        }
        if self.ingestion_rate == 0 {
            return Err(ConfigError::ZeroRate);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::ZeroSweepInterval);
        }
        if self.min_pickup_secs > self.max_pickup_secs {
            return Err(ConfigError::PickupWindow {
                min: self.min_pickup_secs,
                max: self.max_pickup_secs,
            });
        }
        Ok(())
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            ingestion_rate: self.ingestion_rate,
            min_pickup: Duration::from_secs(self.min_pickup_secs),
            max_pickup: Duration::from_secs(self.max_pickup_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
            verbose: self.verbose,
            keep_running: self.keep_running,
            seed: self.seed,
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
