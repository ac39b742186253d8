//! Error definitions for subnet parsing and matching.

use thiserror::Error;

use crate::net::Family;

/// Errors that can occur while parsing subnets or query addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubnetError {
    /// Text is not a literal (or resolvable) address.
    #[error("malformed address: '{0}'")]
    MalformedAddress(String),

    /// Subnet spec lacks the `/` separator.
    #[error("malformed subnet spec '{0}': expected <address>/<mask-or-length>")]
    MalformedSubnetSpec(String),

    /// Prefix length out of range, or mask literal that does not parse.
    #[error("invalid mask or prefix length '{mask}' for {family}")]
    InvalidMaskLength { mask: String, family: Family },

    /// Mask literal notation disagrees with the address family.
    #[error("mask '{mask}' is {mask_family} notation but address is {family}")]
    MaskFamilyMismatch {
        mask: String,
        family: Family,
        mask_family: Family,
    },
}

/// Result type for subnet operations.
pub type SubnetResult<T> = Result<T, SubnetError>;
