//! Connection URIs and server addresses

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{GraphClientError, GraphClientResult};

/// Port used when a URI or host entry does not name one
pub const DEFAULT_BOLT_PORT: u16 = 7687;

/// Scheme of a connection URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoltScheme {
    /// `bolt://`, a direct connection to a single server
    Bolt,
    /// `bolt+routing://` (or `neo4j://`) with cluster-aware routing
    Routing,
    /// Anything else (`http`, `https`, `ftp`, ...)
    Other(String),
}

impl BoltScheme {
    /// Classify a scheme string (case-insensitive)
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme.to_ascii_lowercase().as_str() {
            "bolt" => BoltScheme::Bolt,
            "bolt+routing" | "neo4j" => BoltScheme::Routing,
            other => BoltScheme::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BoltScheme::Bolt => "bolt",
            BoltScheme::Routing => "bolt+routing",
            BoltScheme::Other(s) => s,
        }
    }
}

impl fmt::Display for BoltScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host and port the driver can connect to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse an alternate host entry.
    ///
    /// Entries containing `://` are treated as whole URIs of any scheme and
    /// only the host and explicit port survive. Anything else is `host` or
    /// `host:port`; IPv6 hosts must be bracketed.
    pub fn parse(entry: &str) -> GraphClientResult<Self> {
        let trimmed = entry.trim();
        let invalid = |reason: &str| GraphClientError::InvalidAddress {
            address: entry.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("address is empty"));
        }

        if let Some((_, authority)) = trimmed.split_once("://") {
            // `url` hides ports equal to a special scheme's default (`https://h:443`),
            // so parse the authority under a scheme with no default port
            let url = Url::parse(&format!("bolt://{}", authority)).map_err(|e| invalid(&e.to_string()))?;
            let host = url
                .host_str()
                .filter(|h| !h.is_empty())
                .ok_or_else(|| invalid("URI has no host"))?;
            return Ok(Self::new(host, url.port().unwrap_or(DEFAULT_BOLT_PORT)));
        }

        let (host, port) = if trimmed.starts_with('[') {
            let end = trimmed.find(']').ok_or_else(|| invalid("unterminated IPv6 host"))?;
            let rest = &trimmed[end + 1..];
            let port = match rest {
                "" => None,
                _ => Some(rest.strip_prefix(':').ok_or_else(|| invalid("unexpected text after host"))?),
            };
            (&trimmed[..=end], port)
        } else {
            match trimmed.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (trimmed, None),
            }
        };

        if host.is_empty() || host == "[]" {
            return Err(invalid("address has no host"));
        }
        if !host.starts_with('[') && host.contains(':') {
            return Err(invalid("IPv6 hosts must be enclosed in brackets"));
        }

        let port = match port {
            Some(p) => p
                .parse::<u16>()
                .map_err(|e| invalid(&format!("invalid port '{}': {}", p, e)))?,
            None => DEFAULT_BOLT_PORT,
        };

        Ok(Self::new(host, port))
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A parsed connection URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUri {
    scheme: BoltScheme,
    /// Scheme as written, so `neo4j://` reaches the driver unchanged
    scheme_name: String,
    host: String,
    port: u16,
}

impl ConnectionUri {
    /// Parse a connection URI such as `bolt://localhost:7687`
    pub fn parse(uri: &str) -> GraphClientResult<Self> {
        let invalid = |reason: String| GraphClientError::InvalidUri {
            uri: uri.to_string(),
            reason,
        };

        let url = Url::parse(uri.trim()).map_err(|e| invalid(e.to_string()))?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("URI has no host".to_string()))?
            .to_string();

        Ok(Self {
            scheme: BoltScheme::from_scheme(url.scheme()),
            scheme_name: url.scheme().to_string(),
            host,
            port: url.port().unwrap_or(DEFAULT_BOLT_PORT),
        })
    }

    pub fn scheme(&self) -> &BoltScheme {
        &self.scheme
    }

    pub fn scheme_name(&self) -> &str {
        &self.scheme_name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the URI requests cluster routing
    pub fn is_routing(&self) -> bool {
        self.scheme == BoltScheme::Routing
    }

    /// Whether the scheme is one the Bolt client can use at all
    pub fn is_bolt(&self) -> bool {
        matches!(self.scheme, BoltScheme::Bolt | BoltScheme::Routing)
    }

    /// The host/port pair this URI points at
    pub fn address(&self) -> ServerAddress {
        ServerAddress::new(self.host.clone(), self.port)
    }
}

impl fmt::Display for ConnectionUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme_name, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routing_uri() {
        let uri = ConnectionUri::parse("bolt+routing://virtual.foo.com").unwrap();
        assert!(uri.is_routing());
        assert_eq!(uri.host(), "virtual.foo.com");
        assert_eq!(uri.port(), DEFAULT_BOLT_PORT);
    }

    #[test]
    fn test_parse_keeps_explicit_port() {
        let uri = ConnectionUri::parse("bolt://localhost:7688").unwrap();
        assert_eq!(uri.scheme(), &BoltScheme::Bolt);
        assert_eq!(uri.port(), 7688);
        assert_eq!(uri.to_string(), "bolt://localhost:7688");
    }

    #[test]
    fn test_neo4j_scheme_is_routing() {
        assert!(ConnectionUri::parse("neo4j://core1").unwrap().is_routing());
    }

    #[test]
    fn test_neo4j_scheme_keeps_its_name() {
        let uri = ConnectionUri::parse("neo4j://core1.example.com").unwrap();
        assert_eq!(uri.scheme(), &BoltScheme::Routing);
        assert_eq!(uri.scheme_name(), "neo4j");
        assert_eq!(uri.to_string(), "neo4j://core1.example.com:7687");
    }

    #[test]
    fn test_other_schemes_are_not_bolt() {
        for raw in ["http://foo.com", "https://foo.com", "ftp://foo.com"] {
            let uri = ConnectionUri::parse(raw).unwrap();
            assert!(!uri.is_bolt(), "{} should not be a bolt uri", raw);
        }
    }

    #[test]
    fn test_uri_without_scheme_is_invalid() {
        let err = ConnectionUri::parse("localhost").unwrap_err();
        assert!(matches!(err, GraphClientError::InvalidUri { .. }));
    }

    #[test]
    fn test_address_with_port() {
        let addr = ServerAddress::parse("x.foo.com:7699").unwrap();
        assert_eq!(addr, ServerAddress::new("x.foo.com", 7699));
    }

    #[test]
    fn test_address_from_whole_uri() {
        let addr = ServerAddress::parse("ftp://x.foo.com").unwrap();
        assert_eq!(addr.host, "x.foo.com");
        assert_eq!(addr.port, DEFAULT_BOLT_PORT);
    }

    #[test]
    fn test_whole_uri_keeps_port_equal_to_scheme_default() {
        assert_eq!(ServerAddress::parse("https://x.foo.com:443").unwrap().port, 443);
        assert_eq!(ServerAddress::parse("http://x.foo.com:80").unwrap().port, 80);
        assert_eq!(ServerAddress::parse("ftp://x.foo.com:21").unwrap().port, 21);
        assert_eq!(ServerAddress::parse("https://x.foo.com").unwrap().port, DEFAULT_BOLT_PORT);
    }

    #[test]
    fn test_whole_uri_with_ipv6_host() {
        let addr = ServerAddress::parse("bolt://[::1]:7690").unwrap();
        assert_eq!(addr.host, "[::1]");
        assert_eq!(addr.port, 7690);
    }

    #[test]
    fn test_bracketed_ipv6_address() {
        let addr = ServerAddress::parse("[::1]:7690").unwrap();
        assert_eq!(addr.host, "[::1]");
        assert_eq!(addr.port, 7690);
    }

    #[test]
    fn test_invalid_addresses() {
        for entry in ["", "   ", "x.foo.com:notaport", "::1", ":7687"] {
            assert!(
                matches!(ServerAddress::parse(entry), Err(GraphClientError::InvalidAddress { .. })),
                "expected '{}' to be rejected",
                entry
            );
        }
    }
}
