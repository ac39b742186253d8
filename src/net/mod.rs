//! Address and subnet parsing.
//!
//! # Data Flow
//! ```text
//! "<address>/<mask-or-length>"
//!     → family.rs (classify by separator: ':' is IPv6)
//!     → codec.rs (address text → 4/16 bytes, mask text or length → mask bytes)
//!     → subnet.rs (pre-mask network, keep original label)
//!     → Subnet (immutable)
//! ```
//!
//! # Design Decisions
//! - Family is decided once, before any parsing
//! - Addresses and masks share one fixed-width representation
//! - Resolution of non-literal text is opt-in per ParseOptions

pub mod codec;
pub mod family;
pub mod options;
pub mod subnet;

pub use codec::{Address, Mask};
pub use family::Family;
pub use options::ParseOptions;
pub use subnet::Subnet;
