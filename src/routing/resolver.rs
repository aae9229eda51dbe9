//! Address resolver for routing URIs
//!
//! A routing driver starts from a single (possibly virtual) address and asks
//! the resolver which concrete servers stand behind it.

use indexmap::IndexSet;
use tracing::debug;

use crate::error::GraphClientResult;
use crate::routing::uri::{ConnectionUri, ServerAddress};

/// Expands a virtual routing address into the configured alternate hosts
#[derive(Debug, Clone)]
pub struct AddressResolver {
    virtual_address: ServerAddress,
    addresses: IndexSet<ServerAddress>,
}

impl AddressResolver {
    /// Create a resolver for `virtual_uri` backed by `hosts`.
    ///
    /// Duplicate entries collapse into one address; first occurrence fixes
    /// the order.
    pub fn new<I, S>(virtual_uri: &ConnectionUri, hosts: I) -> GraphClientResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut addresses = IndexSet::new();
        for host in hosts {
            addresses.insert(ServerAddress::parse(host.as_ref())?);
        }

        debug!(
            "Routing resolver for {} covers {} address(es)",
            virtual_uri,
            addresses.len()
        );

        Ok(Self {
            virtual_address: virtual_uri.address(),
            addresses,
        })
    }

    /// Resolve an address to the set of servers to try.
    ///
    /// The configured hosts are returned whatever address is asked about.
    pub fn resolve(&self, _address: Option<&ServerAddress>) -> IndexSet<ServerAddress> {
        self.addresses.clone()
    }

    /// Address of the routing URI the resolver was built for
    pub fn virtual_address(&self) -> &ServerAddress {
        &self.virtual_address
    }

    pub fn addresses(&self) -> &IndexSet<ServerAddress> {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphClientError;
    use crate::routing::uri::DEFAULT_BOLT_PORT;

    fn virtual_uri() -> ConnectionUri {
        ConnectionUri::parse("bolt+routing://virtual.foo.com").unwrap()
    }

    #[test]
    fn test_resolves_every_host() {
        let resolver = AddressResolver::new(&virtual_uri(), ["x.foo.com", "y.foo.com"]).unwrap();
        let resolved = resolver.resolve(None);

        assert_eq!(resolved.len(), 2);
        assert!(resolved.contains(&ServerAddress::new("x.foo.com", DEFAULT_BOLT_PORT)));
        assert!(resolved.contains(&ServerAddress::new("y.foo.com", DEFAULT_BOLT_PORT)));
    }

    #[test]
    fn test_ignores_requested_address() {
        let resolver = AddressResolver::new(&virtual_uri(), ["x.foo.com"]).unwrap();
        let other = ServerAddress::new("elsewhere", 1);

        assert_eq!(resolver.resolve(Some(&other)), resolver.resolve(None));
    }

    #[test]
    fn test_duplicates_collapse() {
        let resolver = AddressResolver::new(
            &virtual_uri(),
            ["x.foo.com", "bolt://x.foo.com", "x.foo.com:7687", "y.foo.com"],
        )
        .unwrap();

        let hosts: Vec<&str> = resolver.addresses().iter().map(|a| a.host.as_str()).collect();
        assert_eq!(hosts, vec!["x.foo.com", "y.foo.com"]);
    }

    #[test]
    fn test_bad_entry_fails_construction() {
        let err = AddressResolver::new(&virtual_uri(), ["x.foo.com", "y.foo.com:port"]).unwrap_err();
        assert!(matches!(err, GraphClientError::InvalidAddress { .. }));
    }

    #[test]
    fn test_virtual_address() {
        let resolver = AddressResolver::new(&virtual_uri(), ["x.foo.com"]).unwrap();
        assert_eq!(resolver.virtual_address().host, "virtual.foo.com");
    }
}
