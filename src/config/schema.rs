//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//!
//! ```toml
//! subnets = ["10.0.0.0/8", "192.168.0.0/255.255.0.0", "2001:db8::/32"]
//! sort = true
//!
//! [parsing]
//! resolve_hostnames = false
//! check_mask_family = true
//!
//! [observability]
//! log_level = "info"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SubnetResult;
use crate::matching::{sort_subnets_with, SubnetClassifier, SubnetMatcher};
use crate::net::ParseOptions;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubnetConfig {
    /// Subnet specs, `<address>/<mask-or-length>`.
    pub subnets: Vec<String>,

    /// Sort most specific first before compiling.
    pub sort: bool,

    /// Address and mask parsing policy.
    pub parsing: ParsingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for SubnetConfig {
    fn default() -> Self {
        Self {
            subnets: Vec::new(),
            sort: true,
            parsing: ParsingConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl SubnetConfig {
    /// Subnet specs in the order they will be compiled.
    pub fn ordered_subnets(&self) -> SubnetResult<Vec<String>> {
        if self.sort {
            sort_subnets_with(&self.subnets, self.parsing.options())
        } else {
            Ok(self.subnets.clone())
        }
    }

    pub fn build_classifier(&self) -> SubnetResult<SubnetClassifier> {
        SubnetClassifier::with_options(self.ordered_subnets()?, self.parsing.options())
    }

    pub fn build_matcher(&self) -> SubnetResult<SubnetMatcher> {
        SubnetMatcher::with_options(&self.subnets, self.parsing.options())
    }
}

/// Parsing policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Allow resolver lookups for non-literal IPv4 text. Blocks on DNS.
    pub resolve_hostnames: bool,

    /// Reject mask literals of the other family.
    pub check_mask_family: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            resolve_hostnames: false,
            check_mask_family: true,
        }
    }
}

impl ParsingConfig {
    pub fn options(&self) -> ParseOptions {
        ParseOptions::strict()
            .resolve_hostnames(self.resolve_hostnames)
            .check_mask_family(self.check_mask_family)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
