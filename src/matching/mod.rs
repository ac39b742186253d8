//! Matching subsystem.
//!
//! # Data Flow
//! ```text
//! Compilation (once):
//!     spec strings
//!     → sort.rs (optional: most specific first)
//!     → engine.rs (parse, partition by family, freeze)
//!     → SubnetMatcher / SubnetClassifier
//!
//! Query (many times, any thread):
//!     address text → codec → pick v4/v6 list → linear scan → first match
//! ```
//!
//! # Design Decisions
//! - Compiled values are immutable; reload means build a new one and swap
//! - First match wins, so ordering is precedence
//! - No match is a normal result, never an error

pub mod classifier;
pub mod engine;
pub mod matcher;
pub mod shared;
pub mod sort;

pub use classifier::SubnetClassifier;
pub use engine::SubnetSet;
pub use matcher::SubnetMatcher;
pub use shared::SharedClassifier;
pub use sort::{sort_subnets, sort_subnets_with};
