//! Parsing policy shared by specs and query addresses.

/// Controls how address and mask text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fall back to the system resolver for IPv4-family text that is not a
    /// literal. The lookup may block on network I/O.
    pub resolve_hostnames: bool,

    /// Reject mask literals whose notation disagrees with the address family.
    pub check_mask_family: bool,
}

impl ParseOptions {
    /// Literal-only parsing: no resolver calls, family check on.
    pub const fn strict() -> Self {
        Self {
            resolve_hostnames: false,
            check_mask_family: true,
        }
    }

    pub const fn resolve_hostnames(mut self, enabled: bool) -> Self {
        self.resolve_hostnames = enabled;
        self
    }

    pub const fn check_mask_family(mut self, enabled: bool) -> Self {
        self.check_mask_family = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            resolve_hostnames: true,
            check_mask_family: true,
        }
    }
}
