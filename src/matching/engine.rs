//! Compiled subnet set shared by the matcher and classifier.
//!
//! # Responsibilities
//! - Parse every spec once at build time
//! - Partition subnets by family, preserving input order
//! - Answer "index of first subnet containing this address"
//!
//! # Design Decisions
//! - Linear scan, first match wins; order is the caller's precedence
//! - IPv4 compared as u32, IPv6 as u128
//! - Immutable after construction (thread-safe without locks)

use std::net::IpAddr;
use std::ops::BitAnd;

use crate::error::SubnetResult;
use crate::net::codec::parse_address;
use crate::net::{Address, ParseOptions, Subnet};

#[derive(Debug, Clone, Copy)]
struct Slot<T> {
    network: T,
    mask: T,
    /// Position in the original spec list.
    index: usize,
}

fn first_match<T>(slots: &[Slot<T>], addr: T) -> Option<usize>
where
    T: Copy + PartialEq + BitAnd<Output = T>,
{
    slots
        .iter()
        .find(|slot| addr & slot.mask == slot.network)
        .map(|slot| slot.index)
}

/// Family-partitioned list of compiled subnets.
#[derive(Debug, Clone, Default)]
pub struct SubnetSet {
    v4: Vec<Slot<u32>>,
    v6: Vec<Slot<u128>>,
    labels: Vec<String>,
    options: ParseOptions,
}

impl SubnetSet {
    /// Parse and compile specs. Any malformed spec fails the whole build.
    pub fn compile<I, S>(specs: I, options: ParseOptions) -> SubnetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let subnets = specs
            .into_iter()
            .map(|spec| Subnet::parse(spec.as_ref(), options))
            .collect::<SubnetResult<Vec<_>>>()?;
        Ok(Self::from_subnets(subnets, options))
    }

    /// Compile already-parsed subnets. `options` governs query text parsing.
    pub fn from_subnets(subnets: Vec<Subnet>, options: ParseOptions) -> Self {
        let mut set = Self {
            options,
            ..Self::default()
        };

        for subnet in subnets {
            let index = set.labels.len();
            match (subnet.network(), subnet.mask()) {
                (Address::V4(network), Address::V4(mask)) => set.v4.push(Slot {
                    network: u32::from_be_bytes(network),
                    mask: u32::from_be_bytes(mask),
                    index,
                }),
                (Address::V6(network), Address::V6(mask)) => set.v6.push(Slot {
                    network: u128::from_be_bytes(network),
                    mask: u128::from_be_bytes(mask),
                    index,
                }),
                // Subnet::parse never pairs masks across families.
                _ => continue,
            }
            set.labels.push(subnet.into_label());
        }

        tracing::debug!(
            v4 = set.v4.len(),
            v6 = set.v6.len(),
            "Compiled subnet set"
        );
        set
    }

    /// Index of the first subnet containing `addr`.
    pub fn find(&self, addr: IpAddr) -> Option<usize> {
        match addr {
            IpAddr::V4(v4) => first_match(&self.v4, u32::from(v4)),
            IpAddr::V6(v6) => first_match(&self.v6, u128::from(v6)),
        }
    }

    /// Parse query text and look it up.
    pub fn find_text(&self, text: &str) -> SubnetResult<Option<usize>> {
        let addr = parse_address(text, self.options)?;
        Ok(self.find(addr.to_ip()))
    }

    /// Label of the subnet at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Labels in compiled order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn v4_len(&self) -> usize {
        self.v4.len()
    }

    pub fn v6_len(&self) -> usize {
        self.v6.len()
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }
}
