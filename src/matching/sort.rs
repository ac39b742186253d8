//! Specificity ordering of subnet specs.
//!
//! Subnets are ordered by descending byte comparison of masked network,
//! then mask, then label, read as one continuous byte sequence. For two
//! overlapping subnets of the same family, the more specific one has a
//! network that is numerically greater or equal and, on a tie, a larger
//! mask, so it always sorts first. Across families the sequence is still
//! compared byte by byte: an IPv4 mask is compared against bytes 4..8 of
//! an IPv6 network.

use std::cmp::Ordering;

use crate::error::SubnetResult;
use crate::net::{ParseOptions, Subnet};

/// Sort specs most specific first, using default parsing options.
pub fn sort_subnets<I, S>(specs: I) -> SubnetResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sort_subnets_with(specs, ParseOptions::default())
}

/// Sort specs most specific first. Fails on the first malformed spec.
pub fn sort_subnets_with<I, S>(specs: I, options: ParseOptions) -> SubnetResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut subnets = specs
        .into_iter()
        .map(|spec| Subnet::parse(spec.as_ref(), options))
        .collect::<SubnetResult<Vec<_>>>()?;
    sort_parsed(&mut subnets);
    Ok(subnets.into_iter().map(Subnet::into_label).collect())
}

/// Sort already-parsed subnets in place.
pub fn sort_parsed(subnets: &mut [Subnet]) {
    subnets.sort_by(specificity_order);
    tracing::trace!(count = subnets.len(), "Sorted subnets by specificity");
}

/// Comparator placing more specific subnets first.
pub fn specificity_order(a: &Subnet, b: &Subnet) -> Ordering {
    b.ordering_bytes().cmp(a.ordering_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubnetError;
    use crate::matching::SubnetClassifier;

    #[test]
    fn test_sort_overlapping() {
        let sorted = sort_subnets(["192.168.0.0/24", "192.168.0.1/32", "192.168.0.0/16"]).unwrap();
        assert_eq!(sorted, ["192.168.0.1/32", "192.168.0.0/24", "192.168.0.0/16"]);
    }

    #[test]
    fn test_sorted_classifier_picks_most_specific() {
        let sorted = sort_subnets(["192.168.0.0/24", "192.168.0.1/32", "192.168.0.0/16"]).unwrap();
        let c = SubnetClassifier::new(&sorted).unwrap();
        assert_eq!(c.classify("192.168.0.1"), Ok(Some("192.168.0.1/32")));
        assert_eq!(c.classify("192.168.0.2"), Ok(Some("192.168.0.0/24")));
        assert_eq!(c.classify("192.168.7.1"), Ok(Some("192.168.0.0/16")));
    }

    #[test]
    fn test_equal_mask_descending_network() {
        let sorted = sort_subnets(["10.0.0.0/8", "11.0.0.0/8", "9.0.0.0/8"]).unwrap();
        assert_eq!(sorted, ["11.0.0.0/8", "10.0.0.0/8", "9.0.0.0/8"]);
    }

    #[test]
    fn test_label_breaks_ties() {
        let sorted = sort_subnets(["10.0.0.0/255.0.0.0", "10.0.0.0/8", "10.1.2.3/8"]).unwrap();
        // Same network and mask; descending label order.
        assert_eq!(sorted, ["10.1.2.3/8", "10.0.0.0/8", "10.0.0.0/255.0.0.0"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = sort_subnets(["10.0.0.0/8", "2001:db8::/32", "10.0.0.0/24", "::/0", "0.0.0.0/0"]).unwrap();
        let twice = sort_subnets(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_rejects_bad_spec() {
        assert!(matches!(
            sort_subnets(["10.0.0.0/8", "10.0.0.0"]),
            Err(SubnetError::MalformedSubnetSpec(_))
        ));
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_subnets(Vec::<&str>::new()).unwrap().is_empty());
    }
}
