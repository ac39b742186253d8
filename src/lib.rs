//! IP subnet membership and classification.
//!
//! Compile a list of `"<address>/<mask-or-length>"` specs once, then ask,
//! for any number of addresses, whether (and to which spec) each belongs.
//! IPv4 and IPv6 may be mixed; masks may be prefix lengths or literals.
//!
//! ```
//! use subnet_match::{sort_subnets, subnet_classifier, subnet_matcher};
//!
//! let private = subnet_matcher(["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"]).unwrap();
//! assert!(private.matches("192.168.1.1").unwrap());
//! assert!(!private.matches("8.8.8.8").unwrap());
//!
//! let sorted = sort_subnets(["192.168.0.0/24", "192.168.0.1/32", "192.168.0.0/16"]).unwrap();
//! let classifier = subnet_classifier(&sorted).unwrap();
//! assert_eq!(classifier.classify("192.168.0.1").unwrap(), Some("192.168.0.1/32"));
//! ```

pub mod config;
pub mod error;
pub mod matching;
pub mod net;
pub mod observability;

pub use error::{SubnetError, SubnetResult};
pub use matching::{sort_subnets, sort_subnets_with, SharedClassifier, SubnetClassifier, SubnetMatcher};
pub use net::{Address, Family, Mask, ParseOptions, Subnet};

/// Compile a membership predicate from one or more subnet specs.
pub fn subnet_matcher<I, S>(specs: I) -> SubnetResult<SubnetMatcher>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SubnetMatcher::new(specs)
}

/// Compile a classifier returning the label of the first matching spec.
pub fn subnet_classifier<I, S>(specs: I) -> SubnetResult<SubnetClassifier>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SubnetClassifier::new(specs)
}
