//! Compiled membership predicate.

use std::net::IpAddr;

use crate::error::SubnetResult;
use crate::matching::engine::SubnetSet;
use crate::net::{ParseOptions, Subnet};

/// Answers "is this address inside any configured subnet?".
///
/// Built once, then queried any number of times. Safe to share across
/// threads; queries only read state fixed at build time.
#[derive(Debug, Clone, Default)]
pub struct SubnetMatcher {
    set: SubnetSet,
}

impl SubnetMatcher {
    /// Compile specs with default parsing options.
    pub fn new<I, S>(specs: I) -> SubnetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_options(specs, ParseOptions::default())
    }

    pub fn with_options<I, S>(specs: I, options: ParseOptions) -> SubnetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            set: SubnetSet::compile(specs, options)?,
        })
    }

    /// Single-spec convenience form.
    pub fn from_spec(spec: &str) -> SubnetResult<Self> {
        Self::new([spec])
    }

    pub fn from_subnets(subnets: Vec<Subnet>, options: ParseOptions) -> Self {
        Self {
            set: SubnetSet::from_subnets(subnets, options),
        }
    }

    /// Parse `address` and test membership.
    ///
    /// A malformed address fails only this call. An address of a family
    /// with no configured subnets is simply not a member.
    pub fn matches(&self, address: &str) -> SubnetResult<bool> {
        Ok(self.set.find_text(address)?.is_some())
    }

    pub fn matches_addr(&self, addr: IpAddr) -> bool {
        self.set.find(addr).is_some()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubnetError;

    #[test]
    fn test_private_ranges() {
        let m = SubnetMatcher::new(["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"]).unwrap();
        assert_eq!(m.matches("192.168.1.1"), Ok(true));
        assert_eq!(m.matches("172.31.255.255"), Ok(true));
        assert_eq!(m.matches("172.32.0.0"), Ok(false));
        assert_eq!(m.matches("8.8.8.8"), Ok(false));
    }

    #[test]
    fn test_explicit_mask() {
        let m = SubnetMatcher::from_spec("10.0.0.0/255.0.0.0").unwrap();
        assert_eq!(m.matches("10.2.127.1"), Ok(true));
        assert_eq!(m.matches("11.0.0.1"), Ok(false));
    }

    #[test]
    fn test_family_isolation() {
        let m = SubnetMatcher::new(["192.168.1.0/24", "2001:db8:1337::/48"]).unwrap();
        assert_eq!(m.matches("2001:db8:dead:beef::5"), Ok(false));
        assert_eq!(m.matches("2001:db8:1337::5"), Ok(true));
        assert_eq!(m.matches("192.168.1.1"), Ok(true));

        let v4_only = SubnetMatcher::from_spec("0.0.0.0/0").unwrap();
        assert_eq!(v4_only.matches("::1"), Ok(false));
        let v6_only = SubnetMatcher::from_spec("::/0").unwrap();
        assert_eq!(v6_only.matches("127.0.0.1"), Ok(false));
    }

    #[test]
    fn test_host_routes() {
        let m = SubnetMatcher::new(["10.1.2.3/32", "2001:db8::1/128"]).unwrap();
        assert!(m.matches_addr("10.1.2.3".parse().unwrap()));
        assert!(!m.matches_addr("10.1.2.4".parse().unwrap()));
        assert!(m.matches_addr("2001:db8::1".parse().unwrap()));
        assert!(!m.matches_addr("2001:db8::2".parse().unwrap()));
    }

    #[test]
    fn test_malformed_query_keeps_matcher_usable() {
        let m = SubnetMatcher::with_options(["10.0.0.0/8"], ParseOptions::strict()).unwrap();
        assert!(matches!(
            m.matches("not-an-ip"),
            Err(SubnetError::MalformedAddress(_))
        ));
        assert_eq!(m.matches("10.0.0.1"), Ok(true));
    }

    #[test]
    fn test_empty_matcher() {
        let m = SubnetMatcher::new(Vec::<String>::new()).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.matches("10.0.0.1"), Ok(false));
    }
}
