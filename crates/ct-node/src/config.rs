//! # Node Configuration
//!
//! Everything is read from environment variables.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CT_OWNER` | required | Hex identity of the registry owner, not all zeros |
//! | `CT_CREATION_POLICY` | `open` | `open` or `owner-only` |
//! | `CT_BUS_CAPACITY` | `1000` | Event bus buffer per subscriber |
//!
//! Logging variables are documented in `ct-telemetry`.

use ct_01_cargo_registry::{CreationPolicy, RegistryConfig};
use ct_telemetry::TelemetryConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{Identity, IdentityParseError};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `CT_OWNER` is not set.
    #[error("CT_OWNER is not set: the registry needs an owner identity")]
    MissingOwner,

    /// `CT_OWNER` is not a valid identity.
    #[error("CT_OWNER is invalid: {0}")]
    InvalidOwner(#[from] IdentityParseError),

    /// `CT_OWNER` is the all-zero identity.
    #[error("CT_OWNER must not be the zero identity")]
    ZeroOwner,

    /// `CT_CREATION_POLICY` is not recognized.
    #[error("CT_CREATION_POLICY is invalid: {0}")]
    InvalidCreationPolicy(String),

    /// `CT_BUS_CAPACITY` is not a positive integer.
    #[error("CT_BUS_CAPACITY must be a positive integer, got {0:?}")]
    InvalidBusCapacity(String),
}

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Registry owner and creation policy.
    pub registry: RegistryConfig,
    /// Event bus capacity.
    pub bus_capacity: usize,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl NodeConfig {
    /// Configuration for `owner` with every other setting at its default.
    #[must_use]
    pub fn new(owner: Identity) -> Self {
        Self {
            registry: RegistryConfig::new(owner),
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
            telemetry: TelemetryConfig::default(),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.telemetry = TelemetryConfig::from_env();
        Ok(config)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Logging settings are left at their defaults.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner: Identity = lookup("CT_OWNER")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingOwner)?
            .trim()
            .parse()?;
        if owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }

        let creation_policy = match lookup("CT_CREATION_POLICY") {
            Some(raw) => raw
                .parse::<CreationPolicy>()
                .map_err(ConfigError::InvalidCreationPolicy)?,
            None => CreationPolicy::default(),
        };

        let bus_capacity = match lookup("CT_BUS_CAPACITY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidBusCapacity(raw)),
            },
            None => DEFAULT_CHANNEL_CAPACITY,
        };

        Ok(Self {
            registry: RegistryConfig::new(owner).with_creation_policy(creation_policy),
            bus_capacity,
            telemetry: TelemetryConfig::default(),
        })
    }
}
