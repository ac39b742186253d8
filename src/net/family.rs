//! Address family classification.

use std::fmt;
use std::net::IpAddr;

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Classify text by separator: a colon means IPv6, anything else IPv4.
    pub fn of_text(text: &str) -> Self {
        if text.contains(':') {
            Family::V6
        } else {
            Family::V4
        }
    }

    /// Classify a mask-or-length literal.
    ///
    /// Returns `None` for bare prefix lengths (no `.` and no `:`).
    pub fn of_mask_literal(text: &str) -> Option<Self> {
        if text.contains(':') {
            Some(Family::V6)
        } else if text.contains('.') {
            Some(Family::V4)
        } else {
            None
        }
    }

    /// Byte width of an address of this family.
    pub const fn width(self) -> usize {
        match self {
            Family::V4 => 4,
            Family::V6 => 16,
        }
    }

    /// Largest valid prefix length.
    pub const fn max_prefix(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }
}

impl From<IpAddr> for Family {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}
