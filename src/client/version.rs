//! Server version reported by `dbms.components()`

use std::fmt;

/// `major.minor.patch` of the connected server
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse versions such as `3.2.3`, `3.5` or `4.0.0-alpha09mr02`.
    ///
    /// Missing components are zero and any suffix after the numeric part of
    /// a component is ignored. Returns `None` when the major component has
    /// no digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.').map(leading_number);
        let major = parts.next().flatten()?;
        let minor = parts.next().flatten().unwrap_or(0);
        let patch = parts.next().flatten().unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }

    /// Servers from 4.0 onwards can host several databases
    pub fn supports_multiple_databases(&self) -> bool {
        self.major >= 4
    }
}

fn leading_number(part: &str) -> Option<u32> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        assert_eq!(ServerVersion::parse("3.2.3"), Some(ServerVersion::new(3, 2, 3)));
    }

    #[test]
    fn test_parse_short_and_suffixed() {
        assert_eq!(ServerVersion::parse("3.5"), Some(ServerVersion::new(3, 5, 0)));
        assert_eq!(ServerVersion::parse("4.0.0-alpha09mr02"), Some(ServerVersion::new(4, 0, 0)));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(ServerVersion::parse("kernel"), None);
        assert_eq!(ServerVersion::parse(""), None);
    }

    #[test]
    fn test_ordering_and_capabilities() {
        let old = ServerVersion::new(3, 5, 12);
        let new = ServerVersion::new(4, 0, 0);
        assert!(old < new);
        assert!(!old.supports_multiple_databases());
        assert!(new.supports_multiple_databases());
    }
}
