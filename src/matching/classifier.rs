//! Compiled subnet classifier.

use std::net::IpAddr;

use crate::error::SubnetResult;
use crate::matching::engine::SubnetSet;
use crate::net::{ParseOptions, Subnet};

/// Returns the label of the first configured subnet containing an address.
///
/// Feed it the output of [`sort_subnets`](crate::sort_subnets) to make the
/// most specific overlapping subnet win.
#[derive(Debug, Clone, Default)]
pub struct SubnetClassifier {
    set: SubnetSet,
}

impl SubnetClassifier {
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

    pub fn from_subnets(subnets: Vec<Subnet>, options: ParseOptions) -> Self {
        Self {
            set: SubnetSet::from_subnets(subnets, options),
        }
    }

    /// Parse `address` and return the matching label, if any.
    pub fn classify(&self, address: &str) -> SubnetResult<Option<&str>> {
        Ok(self
            .set
            .find_text(address)?
            .and_then(|index| self.set.label(index)))
    }

    pub fn classify_addr(&self, addr: IpAddr) -> Option<&str> {
        self.set.find(addr).and_then(|index| self.set.label(index))
    }

    /// Configured labels, in precedence order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.set.labels()
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

    #[test]
    fn test_classify_mixed_families() {
        let c = SubnetClassifier::new(["192.168.1.0/24", "2001:db8:1337::/48", "10.0.0.0/255.0.0.0"])
            .unwrap();
        assert_eq!(c.classify("10.2.127.1"), Ok(Some("10.0.0.0/255.0.0.0")));
        assert_eq!(c.classify("192.168.1.9"), Ok(Some("192.168.1.0/24")));
        assert_eq!(c.classify("2001:db8:1337:42::1"), Ok(Some("2001:db8:1337::/48")));
        assert_eq!(c.classify("8.8.8.8"), Ok(None));
    }

    #[test]
    fn test_first_match_wins() {
        let c = SubnetClassifier::new(["192.168.0.0/16", "192.168.0.1/32"]).unwrap();
        assert_eq!(
            c.classify_addr("192.168.0.1".parse().unwrap()),
            Some("192.168.0.0/16")
        );
    }

    #[test]
    fn test_label_is_original_text() {
        let c = SubnetClassifier::new(["10.9.9.9/8"]).unwrap();
        assert_eq!(c.classify("10.0.0.1"), Ok(Some("10.9.9.9/8")));
        assert_eq!(c.labels().collect::<Vec<_>>(), ["10.9.9.9/8"]);
    }
}
