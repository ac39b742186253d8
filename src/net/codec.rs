//! Address codec.
//!
//! Converts address, mask and prefix-length text into fixed-width binary
//! form: 4 bytes for IPv4, 16 bytes for IPv6.
//!
//! # Parsing rules
//! - IPv4 text follows classic `inet_aton`: one to four dot-separated
//!   parts in decimal, octal (`0` prefix) or hex (`0x` prefix), the last
//!   part filling the remaining bytes (`127.1` is `127.0.0.1`).
//! - IPv6 text follows `inet_pton`, including `::` compression and
//!   embedded dotted-quad tails.
//! - IPv4-family text that is not a literal may be handed to the system
//!   resolver when [`ParseOptions::resolve_hostnames`] is set. This is the
//!   only place in the crate that can block on I/O.
//! - Masks are always literal; they never go through the resolver.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, ToSocketAddrs};

use crate::error::{SubnetError, SubnetResult};
use crate::net::{Family, ParseOptions};

/// Fixed-width binary address. Also used to represent masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    V4([u8; 4]),
    V6([u8; 16]),
}

/// A mask has the same representation as the address it pairs with.
pub type Mask = Address;

impl Address {
    pub fn family(&self) -> Family {
        match self {
            Address::V4(_) => Family::V4,
            Address::V6(_) => Family::V6,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Address::V4(b) => b,
            Address::V6(b) => b,
        }
    }

    /// Bitwise AND with a mask of the same family.
    ///
    /// Returns `None` when the families differ.
    pub fn masked(&self, mask: &Mask) -> Option<Address> {
        match (self, mask) {
            (Address::V4(a), Address::V4(m)) => Some(Address::V4(and_bytes(a, m))),
            (Address::V6(a), Address::V6(m)) => Some(Address::V6(and_bytes(a, m))),
            _ => None,
        }
    }

    /// Number of leading one-bits if this is a contiguous mask.
    pub fn prefix_len(&self) -> Option<u8> {
        let ones: u32 = self
            .as_bytes()
            .iter()
            .map(|b| b.leading_ones())
            .scan(true, |full, n| {
                // Stop counting after the first byte that is not all ones.
                if !*full {
                    return Some(0);
                }
                *full = n == 8;
                Some(n)
            })
            .sum();
        let len = u8::try_from(ones).ok()?;
        (cidr_to_mask(len, self.family())? == *self).then_some(len)
    }

    pub fn to_ip(&self) -> IpAddr {
        match *self {
            Address::V4(b) => IpAddr::V4(Ipv4Addr::from(b)),
            Address::V6(b) => IpAddr::V6(Ipv6Addr::from(b)),
        }
    }
}

fn and_bytes<const N: usize>(a: &[u8; N], m: &[u8; N]) -> [u8; N] {
    let mut out = [0u8; N];
    for i in 0..N {
        out[i] = a[i] & m[i];
    }
    out
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Address::V4(v4.octets()),
            IpAddr::V6(v6) => Address::V6(v6.octets()),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address::V4(addr.octets())
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Address::V6(addr.octets())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip())
    }
}

/// Parse address text, inferring the family from the presence of a colon.
pub fn parse_address(text: &str, options: ParseOptions) -> SubnetResult<Address> {
    let malformed = || SubnetError::MalformedAddress(text.to_string());
    match Family::of_text(text) {
        Family::V6 => text.parse::<Ipv6Addr>().map(Address::from).map_err(|_| malformed()),
        Family::V4 => {
            if let Some(addr) = inet_aton(text) {
                return Ok(Address::from(addr));
            }
            if options.resolve_hostnames {
                return resolve_v4(text).map(Address::from).ok_or_else(malformed);
            }
            Err(malformed())
        }
    }
}

/// Parse the right-hand side of a subnet spec as a mask for `family`.
///
/// Text containing the family's separator (`.` for IPv4, `:` for IPv6) is a
/// mask literal; anything else must be a prefix length.
pub fn parse_mask_or_length(text: &str, family: Family, options: ParseOptions) -> SubnetResult<Mask> {
    let invalid = || SubnetError::InvalidMaskLength {
        mask: text.to_string(),
        family,
    };

    if options.check_mask_family {
        if let Some(mask_family) = Family::of_mask_literal(text) {
            if mask_family != family {
                return Err(SubnetError::MaskFamilyMismatch {
                    mask: text.to_string(),
                    family,
                    mask_family,
                });
            }
        }
    }

    let is_literal = match family {
        Family::V4 => text.contains('.'),
        Family::V6 => text.contains(':'),
    };

    if is_literal {
        let mask = match family {
            Family::V4 => inet_aton(text).map(Address::from),
            Family::V6 => text.parse::<Ipv6Addr>().ok().map(Address::from),
        };
        return mask.ok_or_else(invalid);
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse::<u8>()
        .ok()
        .and_then(|len| cidr_to_mask(len, family))
        .ok_or_else(invalid)
}

/// Build a mask with the top `length` bits set.
///
/// Returns `None` when `length` exceeds the family's width.
pub fn cidr_to_mask(length: u8, family: Family) -> Option<Mask> {
    if length > family.max_prefix() {
        return None;
    }
    let mut bytes = [0u8; 16];
    let mut remaining = usize::from(length);
    for byte in bytes.iter_mut().take(family.width()) {
        let take = remaining.min(8);
        if take > 0 {
            *byte = 0xff << (8 - take);
        }
        remaining -= take;
    }
    Some(match family {
        Family::V4 => Address::V4([bytes[0], bytes[1], bytes[2], bytes[3]]),
        Family::V6 => Address::V6(bytes),
    })
}

/// Classic `inet_aton` parsing of IPv4 text.
pub fn inet_aton(text: &str) -> Option<Ipv4Addr> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.is_empty() || parts.len() > 4 {
        return None;
    }

    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        values.push(parse_aton_part(part)?);
    }

    let (last, head) = values.split_last()?;
    // The last part fills whatever bytes the leading parts left over.
    let limit: u32 = match head.len() {
        0 => u32::MAX,
        1 => 0x00ff_ffff,
        2 => 0x0000_ffff,
        _ => 0x0000_00ff,
    };
    if *last > limit || head.iter().any(|&v| v > 0xff) {
        return None;
    }

    let mut addr = *last;
    for (i, &v) in head.iter().enumerate() {
        addr |= v << (24 - 8 * i);
    }
    Some(Ipv4Addr::from(addr))
}

fn parse_aton_part(part: &str) -> Option<u32> {
    let (digits, radix) = if let Some(hex) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
        (hex, 16)
    } else if part.len() > 1 && part.starts_with('0') {
        (&part[1..], 8)
    } else {
        (part, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

fn resolve_v4(host: &str) -> Option<Ipv4Addr> {
    tracing::debug!(host = %host, "resolving non-literal address");
    let addrs = match (host, 0u16).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            tracing::debug!(host = %host, error = %e, "address resolution failed");
            return None;
        }
    };
    addrs.into_iter().find_map(|sa| match sa.ip() {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> ParseOptions {
        ParseOptions::strict()
    }

    #[test]
    fn test_parse_v4_literal() {
        let addr = parse_address("192.168.1.1", strict()).unwrap();
        assert_eq!(addr, Address::V4([192, 168, 1, 1]));
        assert_eq!(addr.family(), Family::V4);
    }

    #[test]
    fn test_parse_v6_literal() {
        let addr = parse_address("2001:db8::1", strict()).unwrap();
        assert_eq!(addr.family(), Family::V6);
        assert_eq!(addr.as_bytes()[..4], [0x20, 0x01, 0x0d, 0xb8]);
        assert_eq!(addr.as_bytes()[15], 1);

        let mapped = parse_address("::ffff:10.0.0.1", strict()).unwrap();
        assert_eq!(mapped.as_bytes()[12..], [10, 0, 0, 1]);
    }

    #[test]
    fn test_inet_aton_short_forms() {
        assert_eq!(inet_aton("127.1"), Some(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(inet_aton("10.1.2"), Some(Ipv4Addr::new(10, 1, 0, 2)));
        assert_eq!(inet_aton("10"), Some(Ipv4Addr::new(0, 0, 0, 10)));
        assert_eq!(inet_aton("0x7f.1"), Some(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(inet_aton("010.0.0.1"), Some(Ipv4Addr::new(8, 0, 0, 1)));
        assert_eq!(inet_aton("4294967295"), Some(Ipv4Addr::BROADCAST));
    }

    #[test]
    fn test_inet_aton_rejects() {
        assert_eq!(inet_aton(""), None);
        assert_eq!(inet_aton("256.0.0.1"), None);
        assert_eq!(inet_aton("1.2.3.4.5"), None);
        assert_eq!(inet_aton("1..2"), None);
        assert_eq!(inet_aton("1.2.3.256"), None);
        assert_eq!(inet_aton("09.0.0.1"), None);
        assert_eq!(inet_aton("0x"), None);
        assert_eq!(inet_aton("+1.2.3.4"), None);
        assert_eq!(inet_aton("example"), None);
    }

    #[test]
    fn test_malformed_address() {
        assert_eq!(
            parse_address("not-an-ip", strict()),
            Err(SubnetError::MalformedAddress("not-an-ip".into()))
        );
        assert!(parse_address("2001:db8::zz", strict()).is_err());
        assert!(parse_address("999.999.999.999", strict()).is_err());
    }

    #[test]
    fn test_cidr_to_mask() {
        assert_eq!(cidr_to_mask(0, Family::V4), Some(Address::V4([0, 0, 0, 0])));
        assert_eq!(cidr_to_mask(8, Family::V4), Some(Address::V4([255, 0, 0, 0])));
        assert_eq!(cidr_to_mask(12, Family::V4), Some(Address::V4([255, 240, 0, 0])));
        assert_eq!(cidr_to_mask(32, Family::V4), Some(Address::V4([255; 4])));
        assert_eq!(cidr_to_mask(33, Family::V4), None);

        let m48 = cidr_to_mask(48, Family::V6).unwrap();
        assert_eq!(m48.as_bytes()[..6], [0xff; 6]);
        assert!(m48.as_bytes()[6..].iter().all(|&b| b == 0));
        assert_eq!(cidr_to_mask(128, Family::V6), Some(Address::V6([0xff; 16])));
        assert_eq!(cidr_to_mask(129, Family::V6), None);
    }

    #[test]
    fn test_parse_mask_or_length() {
        let m = parse_mask_or_length("255.0.0.0", Family::V4, strict()).unwrap();
        assert_eq!(m, Address::V4([255, 0, 0, 0]));

        let m = parse_mask_or_length("16", Family::V4, strict()).unwrap();
        assert_eq!(m, Address::V4([255, 255, 0, 0]));

        let m = parse_mask_or_length("ffff:ffff::", Family::V6, strict()).unwrap();
        assert_eq!(m, cidr_to_mask(32, Family::V6).unwrap());

        let m = parse_mask_or_length("64", Family::V6, strict()).unwrap();
        assert_eq!(m.prefix_len(), Some(64));
    }

    #[test]
    fn test_parse_mask_or_length_invalid() {
        for bad in ["33", "", "-1", "+8", " 8", "abc", "1000", "255.0.0.300"] {
            assert!(
                matches!(
                    parse_mask_or_length(bad, Family::V4, strict()),
                    Err(SubnetError::InvalidMaskLength { .. })
                ),
                "expected InvalidMaskLength for {bad:?}"
            );
        }
        assert!(matches!(
            parse_mask_or_length("129", Family::V6, strict()),
            Err(SubnetError::InvalidMaskLength { .. })
        ));
    }

    #[test]
    fn test_mask_family_mismatch() {
        assert_eq!(
            parse_mask_or_length("ffff::", Family::V4, strict()),
            Err(SubnetError::MaskFamilyMismatch {
                mask: "ffff::".into(),
                family: Family::V4,
                mask_family: Family::V6,
            })
        );
        assert!(matches!(
            parse_mask_or_length("255.255.0.0", Family::V6, strict()),
            Err(SubnetError::MaskFamilyMismatch { .. })
        ));
    }

    #[test]
    fn test_mask_family_unchecked_falls_back_to_length() {
        let lenient = strict().check_mask_family(false);
        assert!(matches!(
            parse_mask_or_length("ffff::", Family::V4, lenient),
            Err(SubnetError::InvalidMaskLength { .. })
        ));
        assert!(matches!(
            parse_mask_or_length("255.255.0.0", Family::V6, lenient),
            Err(SubnetError::InvalidMaskLength { .. })
        ));
    }

    #[test]
    fn test_masked_and_prefix_len() {
        let addr = Address::V4([192, 168, 1, 77]);
        let mask = cidr_to_mask(24, Family::V4).unwrap();
        assert_eq!(addr.masked(&mask), Some(Address::V4([192, 168, 1, 0])));
        assert_eq!(addr.masked(&cidr_to_mask(24, Family::V6).unwrap()), None);

        assert_eq!(mask.prefix_len(), Some(24));
        assert_eq!(Address::V4([255, 0, 255, 0]).prefix_len(), None);
        assert_eq!(Address::V6([0; 16]).prefix_len(), Some(0));
    }

    #[test]
    fn test_resolve_disabled_in_strict_mode() {
        assert!(parse_address("localhost", strict()).is_err());
    }
}
