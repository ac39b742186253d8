//! Hot-swappable classifier.
//!
//! A compiled [`SubnetClassifier`] never changes. To pick up a new subnet
//! list, build a fresh one and [`store`](SharedClassifier::store) it; readers
//! that already loaded the previous snapshot keep using it until they drop
//! their handle.

use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::SubnetResult;
use crate::matching::SubnetClassifier;
use crate::observability::metrics;

/// Classifier behind an `ArcSwap` for lock-free reads during reloads.
#[derive(Debug)]
pub struct SharedClassifier {
    current: ArcSwap<SubnetClassifier>,
    version: AtomicU64,
}

impl SharedClassifier {
    pub fn new(classifier: SubnetClassifier) -> Self {
        metrics::record_configured_subnets(classifier.len());
        Self {
            current: ArcSwap::from_pointee(classifier),
            version: AtomicU64::new(1),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<SubnetClassifier> {
        self.current.load_full()
    }

    /// Swap in a new classifier. Returns the new version number.
    pub fn store(&self, classifier: SubnetClassifier) -> u64 {
        let count = classifier.len();
        self.current.store(Arc::new(classifier));
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        metrics::record_configured_subnets(count);
        metrics::record_reload(true);
        tracing::info!(version, subnets = count, "Classifier swapped");
        version
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Classify against the current snapshot.
    pub fn classify(&self, address: &str) -> SubnetResult<Option<String>> {
        let snapshot = self.current.load();
        let label = snapshot.classify(address)?.map(str::to_string);
        Ok(label)
    }

    pub fn classify_addr(&self, addr: IpAddr) -> Option<String> {
        self.current.load().classify_addr(addr).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_swaps_snapshot() {
        let shared = SharedClassifier::new(SubnetClassifier::new(["10.0.0.0/8"]).unwrap());
        assert_eq!(shared.version(), 1);
        assert_eq!(shared.classify("10.1.1.1").unwrap().as_deref(), Some("10.0.0.0/8"));

        let old = shared.load();
        let version = shared.store(SubnetClassifier::new(["192.168.0.0/16"]).unwrap());
        assert_eq!(version, 2);
        assert_eq!(shared.version(), 2);

        assert_eq!(shared.classify("10.1.1.1").unwrap(), None);
        assert_eq!(
            shared.classify_addr("192.168.3.4".parse().unwrap()).as_deref(),
            Some("192.168.0.0/16")
        );
        // A previously loaded snapshot is unaffected.
        assert_eq!(old.classify("10.1.1.1").unwrap(), Some("10.0.0.0/8"));
    }
}
