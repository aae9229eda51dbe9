//! BoltGraphClient: Cypher over an external Bolt driver
//!
//! The client validates the connection URI, owns the optional routing
//! resolver, discovers the server version on `connect` and runs statements
//! built with [`BoltGraphClient::cypher`] through short-lived driver sessions.

pub mod legacy;
pub mod reference;
pub mod version;

use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{check_scheme, ClientConfig};
use crate::cypher::{CypherFluentQuery, CypherQuery, PropertyCase};
use crate::driver::{
    AccessMode, AuthToken, Driver, DriverError, DriverFactory, DriverRecord, DriverSettings, SessionConfig,
    Statement,
};
use crate::error::{GraphClientError, GraphClientResult};
use crate::mapping::map_records;
use crate::routing::{AddressResolver, ConnectionUri, VIRTUAL_ROUTING_URI};

pub use reference::{DeleteMode, IndexFor, NodeReference, RelationshipReference};
pub use version::ServerVersion;

/// Statement used on connect to discover the server version
pub const SERVER_COMPONENTS_QUERY: &str = "CALL dbms.components()";

/// Graph client speaking Cypher through a Bolt driver
pub struct BoltGraphClient {
    uri: ConnectionUri,
    resolver: Option<Arc<AddressResolver>>,
    auth: AuthToken,
    encrypted: bool,
    property_case: PropertyCase,
    default_database: Option<String>,
    driver: Option<Arc<dyn Driver>>,
    server_version: Option<ServerVersion>,
    connected: bool,
    last_bookmark: Mutex<Option<String>>,
}

impl BoltGraphClient {
    /// Client for a single `bolt://` or `bolt+routing://` URI
    pub fn new(uri: &str) -> GraphClientResult<Self> {
        Self::with_hosts(uri, std::iter::empty::<&str>())
    }

    /// Client for a routing URI backed by alternate hosts.
    ///
    /// With a non-empty host list the URI must use the routing scheme. With
    /// an empty list this is the same as [`BoltGraphClient::new`].
    pub fn with_hosts<I, S>(uri: &str, hosts: I) -> GraphClientResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let uri = ConnectionUri::parse(uri)?;
        let hosts: Vec<S> = hosts.into_iter().collect();
        check_scheme(&uri, !hosts.is_empty())?;

        let resolver = if hosts.is_empty() {
            None
        } else {
            Some(Arc::new(AddressResolver::new(&uri, hosts.iter())?))
        };

        Ok(Self::from_parts(uri, resolver, None))
    }

    /// Client for a list of hosts, no routing URI required
    pub fn from_hosts<I, S>(hosts: I) -> GraphClientResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_hosts(VIRTUAL_ROUTING_URI, hosts)
    }

    /// Wrap a driver that already exists
    pub fn from_driver(driver: Arc<dyn Driver>) -> GraphClientResult<Self> {
        let uri = ConnectionUri::parse(driver.uri())?;
        Ok(Self::from_parts(uri, None, Some(driver)))
    }

    /// Client from a loaded configuration
    pub fn from_config(config: &ClientConfig) -> GraphClientResult<Self> {
        config.validate()?;
        let mut client = Self::with_hosts(&config.uri, &config.hosts)?;
        client.auth = config.auth_token();
        client.encrypted = config.encrypted;
        client.property_case = config.property_case;
        client.default_database = config.database.clone();
        Ok(client)
    }

    fn from_parts(uri: ConnectionUri, resolver: Option<Arc<AddressResolver>>, driver: Option<Arc<dyn Driver>>) -> Self {
        Self {
            uri,
            resolver,
            auth: AuthToken::None,
            encrypted: false,
            property_case: PropertyCase::AsIs,
            default_database: None,
            driver,
            server_version: None,
            connected: false,
            last_bookmark: Mutex::new(None),
        }
    }

    pub fn with_auth(mut self, auth: AuthToken) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_property_case(mut self, case: PropertyCase) -> Self {
        self.property_case = case;
        self
    }

    pub fn with_default_database(mut self, database: &str) -> Self {
        self.default_database = Some(database.to_string());
        self
    }

    pub fn uri(&self) -> &ConnectionUri {
        &self.uri
    }

    /// Resolver handed to the driver; only present when alternate hosts were given
    pub fn address_resolver(&self) -> Option<&AddressResolver> {
        self.resolver.as_deref()
    }

    pub fn property_case(&self) -> PropertyCase {
        self.property_case
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn server_version(&self) -> Option<ServerVersion> {
        self.server_version
    }

    pub fn supports_multiple_databases(&self) -> bool {
        self.server_version
            .map(|v| v.supports_multiple_databases())
            .unwrap_or(false)
    }

    /// Settings a driver factory receives from `connect_with`
    pub fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            uri: self.uri.clone(),
            auth: self.auth.clone(),
            encrypted: self.encrypted,
            resolver: self.resolver.clone(),
        }
    }

    /// Build a driver with `factory`, then connect through it
    pub async fn connect_with(&mut self, factory: &dyn DriverFactory) -> GraphClientResult<()> {
        let driver = factory.create(&self.driver_settings())?;
        self.driver = Some(driver);
        self.connect().await
    }

    /// Discover the server version and mark the client connected
    pub async fn connect(&mut self) -> GraphClientResult<()> {
        let driver = self.driver.clone().ok_or(GraphClientError::DriverUnavailable)?;

        let session = driver.session(SessionConfig {
            access_mode: AccessMode::Read,
            ..SessionConfig::default()
        })?;
        let result = session.run(Statement::new(SERVER_COMPONENTS_QUERY)).await;
        let closed = session.close().await;
        let records = result?;
        closed?;

        let (name, version) = parse_components(&records)?;
        info!("Connected to {} {} at {}", name, version, self.uri);

        self.server_version = Some(version);
        self.connected = true;
        Ok(())
    }

    /// Close the driver and forget the connection state
    pub async fn close(&mut self) -> GraphClientResult<()> {
        if let Some(driver) = self.driver.take() {
            driver.close().await?;
        }
        self.connected = false;
        self.server_version = None;
        self.set_last_bookmark(None);
        Ok(())
    }

    /// Bookmark reported by the session of the last successful statement.
    ///
    /// Pass it to `with_bookmark` so a later read observes that write.
    pub fn last_bookmark(&self) -> Option<String> {
        self.last_bookmark.lock().ok().and_then(|slot| slot.clone())
    }

    fn set_last_bookmark(&self, bookmark: Option<String>) {
        if let Ok(mut slot) = self.last_bookmark.lock() {
            *slot = bookmark;
        }
    }

    /// Start a fluent Cypher query
    pub fn cypher(&self) -> CypherFluentQuery<'_> {
        CypherFluentQuery::new(self)
    }

    /// Run a query, discarding records
    pub async fn execute_cypher(&self, query: &CypherQuery) -> GraphClientResult<()> {
        self.run(query).await.map(|_| ())
    }

    /// Run a query and map each record into `T`
    pub async fn execute_get_cypher_results<T: DeserializeOwned>(&self, query: &CypherQuery) -> GraphClientResult<Vec<T>> {
        let records = self.run(query).await?;
        map_records(&records, self.property_case)
    }

    /// Run a query and return the raw records
    pub async fn execute_get_records(&self, query: &CypherQuery) -> GraphClientResult<Vec<DriverRecord>> {
        self.run(query).await
    }

    async fn run(&self, query: &CypherQuery) -> GraphClientResult<Vec<DriverRecord>> {
        if !self.connected {
            return Err(GraphClientError::NotConnected);
        }
        let driver = self.driver.as_ref().ok_or(GraphClientError::NotConnected)?;

        let statement = query.to_statement(self.property_case)?;
        let config = query.session_config(self.target_database(query));
        debug!(
            "Running {:?} statement with {} parameter(s): {}",
            config.access_mode,
            statement.parameters.len(),
            statement.text
        );

        let started = Instant::now();
        let session = driver.session(config)?;
        let result = session.run(statement).await;
        if result.is_ok() {
            if let Some(bookmark) = session.last_bookmark() {
                debug!("Session reported bookmark {}", bookmark);
                self.set_last_bookmark(Some(bookmark));
            }
        }
        let closed = session.close().await;
        let records = result?;
        closed?;

        debug!(
            "Statement returned {} record(s) in {} ms",
            records.len(),
            started.elapsed().as_millis()
        );
        Ok(records)
    }

    fn target_database(&self, query: &CypherQuery) -> Option<String> {
        let requested = query
            .database()
            .map(str::to_string)
            .or_else(|| self.default_database.clone());

        match requested {
            Some(db) if !self.supports_multiple_databases() => {
                warn!("Server cannot select databases; ignoring database '{}'", db);
                None
            }
            other => other,
        }
    }
}

fn parse_components(records: &[DriverRecord]) -> Result<(String, ServerVersion), DriverError> {
    let record = records
        .first()
        .ok_or_else(|| DriverError::UnexpectedResponse("dbms.components() returned no records".to_string()))?;

    let name = record
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown server")
        .to_string();

    let raw = record
        .get("versions")
        .and_then(|v| v.as_list())
        .and_then(|versions| versions.first())
        .and_then(|v| v.as_str())
        .ok_or_else(|| DriverError::UnexpectedResponse("dbms.components() returned no version".to_string()))?;

    let version = ServerVersion::parse(raw)
        .ok_or_else(|| DriverError::UnexpectedResponse(format!("unrecognised server version '{}'", raw)))?;

    Ok((name, version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::DriverValue;

    #[test]
    fn test_parse_components() {
        let records = vec![DriverRecord::new(vec![
            ("name", DriverValue::from("neo4j kernel")),
            ("versions", DriverValue::from(vec!["3.2.3"])),
        ])];

        let (name, version) = parse_components(&records).unwrap();
        assert_eq!(name, "neo4j kernel");
        assert_eq!(version, ServerVersion::new(3, 2, 3));
    }

    #[test]
    fn test_parse_components_without_versions() {
        let records = vec![DriverRecord::new(vec![("name", DriverValue::from("neo4j kernel"))])];
        assert!(matches!(
            parse_components(&records),
            Err(DriverError::UnexpectedResponse(_))
        ));
        assert!(parse_components(&[]).is_err());
    }

    #[test]
    fn test_client_starts_disconnected() {
        let client = BoltGraphClient::new("bolt://localhost").unwrap();
        assert!(!client.is_connected());
        assert!(client.server_version().is_none());
        assert!(!client.supports_multiple_databases());
    }

    #[tokio::test]
    async fn test_connect_without_driver() {
        let mut client = BoltGraphClient::new("bolt://localhost").unwrap();
        assert!(matches!(client.connect().await, Err(GraphClientError::DriverUnavailable)));
    }

    #[tokio::test]
    async fn test_query_before_connect() {
        let client = BoltGraphClient::new("bolt://localhost").unwrap();
        let result = client.cypher().match_("(n)").return_("n").records().await;
        assert!(matches!(result, Err(GraphClientError::NotConnected)));
    }

    #[test]
    fn test_driver_settings_carry_resolver_and_auth() {
        let client = BoltGraphClient::with_hosts("bolt+routing://virtual.foo.com", ["x.foo.com"])
            .unwrap()
            .with_auth(AuthToken::basic("neo4j", "secret"));

        let settings = client.driver_settings();
        assert!(settings.uri.is_routing());
        assert_eq!(settings.resolver.map(|r| r.len()), Some(1));
        assert_eq!(settings.auth, AuthToken::basic("neo4j", "secret"));
    }
}
