//! Subnet descriptor.
//!
//! A [`Subnet`] is parsed once from `"<address>/<mask-or-length>"` text and
//! never changes afterwards. The stored network is pre-masked, so
//! `network == network & mask` always holds.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{SubnetError, SubnetResult};
use crate::net::codec::{parse_address, parse_mask_or_length, Address, Mask};
use crate::net::{Family, ParseOptions};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subnet {
    label: String,
    network: Address,
    mask: Mask,
}

impl Subnet {
    /// Parse a subnet spec.
    pub fn parse(text: &str, options: ParseOptions) -> SubnetResult<Self> {
        let (addr_part, mask_part) = text
            .split_once('/')
            .ok_or_else(|| SubnetError::MalformedSubnetSpec(text.to_string()))?;

        let family = Family::of_text(addr_part);
        let address = parse_address(addr_part, options)?;
        let mask = parse_mask_or_length(mask_part, family, options)?;

        // Both sides were parsed for `family`, so this only fails if a
        // resolver handed back a different family.
        let network = address
            .masked(&mask)
            .ok_or_else(|| SubnetError::MaskFamilyMismatch {
                mask: mask_part.to_string(),
                family: address.family(),
                mask_family: family,
            })?;

        Ok(Self {
            label: text.to_string(),
            network,
            mask,
        })
    }

    /// Original spec text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn family(&self) -> Family {
        self.network.family()
    }

    /// Network address with host bits cleared.
    pub fn network(&self) -> Address {
        self.network
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Prefix length, if the mask is contiguous.
    pub fn prefix_len(&self) -> Option<u8> {
        self.mask.prefix_len()
    }

    /// Check membership of a typed address. Other families never match.
    pub fn contains(&self, addr: IpAddr) -> bool {
        Address::from(addr)
            .masked(&self.mask)
            .is_some_and(|masked| masked == self.network)
    }

    /// Network bytes, then mask bytes, then label bytes, as one sequence.
    pub(crate) fn ordering_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.network
            .as_bytes()
            .iter()
            .chain(self.mask.as_bytes())
            .chain(self.label.as_bytes())
            .copied()
    }

    pub(crate) fn into_label(self) -> String {
        self.label
    }
}

impl FromStr for Subnet {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subnet::parse(s, ParseOptions::default())
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
