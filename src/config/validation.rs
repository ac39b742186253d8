//! Configuration validation.
//!
//! # Responsibilities
//! - Every subnet spec parses under the configured options
//! - Metrics address is a socket address when metrics are enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SubnetConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::SubnetConfig;
use crate::error::SubnetError;
use crate::net::Subnet;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Subnet at `index` failed to parse.
    Subnet { index: usize, error: SubnetError },
    /// Metrics enabled with an unparsable bind address.
    MetricsAddress(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Subnet { index, error } => write!(f, "subnets[{}]: {}", index, error),
            ValidationError::MetricsAddress(addr) => {
                write!(f, "observability.metrics_address: invalid socket address '{}'", addr)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &SubnetConfig) -> Result<(), Vec<ValidationError>> {
    let options = config.parsing.options();
    let mut errors: Vec<ValidationError> = config
        .subnets
        .iter()
        .enumerate()
        .filter_map(|(index, spec)| {
            Subnet::parse(spec, options)
                .err()
                .map(|error| ValidationError::Subnet { index, error })
        })
        .collect();

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
