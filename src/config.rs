//! Client configuration
//!
//! Loaded from YAML or built in code; the constructors apply the same scheme
//! rules either way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::cypher::PropertyCase;
use crate::driver::{AuthToken, REDACTED};
use crate::error::{GraphClientError, GraphClientResult};
use crate::routing::ConnectionUri;

/// Connection and serialization settings for a `BoltGraphClient`
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Connection URI (`bolt://` or `bolt+routing://`)
    pub uri: String,
    /// Alternate routing hosts; requires a routing URI
    pub hosts: Vec<String>,
    /// Username (optional)
    pub user: Option<String>,
    /// Password (optional)
    pub password: Option<String>,
    /// Authentication realm (optional)
    pub realm: Option<String>,
    /// Request an encrypted connection
    pub encrypted: bool,
    /// Casing applied to property keys
    pub property_case: PropertyCase,
    /// Default database for queries that do not pick one
    pub database: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            hosts: Vec::new(),
            user: None,
            password: None,
            realm: None,
            encrypted: false,
            property_case: PropertyCase::AsIs,
            database: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("uri", &self.uri)
            .field("hosts", &self.hosts)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("realm", &self.realm)
            .field("encrypted", &self.encrypted)
            .field("property_case", &self.property_case)
            .field("database", &self.database)
            .finish()
    }
}

impl ClientConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> GraphClientResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| GraphClientError::Config(e.to_string()))
    }

    /// Read and parse a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> GraphClientResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml(&self) -> GraphClientResult<String> {
        serde_yaml::to_string(self).map_err(|e| GraphClientError::Config(e.to_string()))
    }

    /// Copy safe to print: the password, when set, is masked
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| REDACTED.to_string()),
            ..self.clone()
        }
    }

    /// Credentials to hand to the driver
    pub fn auth_token(&self) -> AuthToken {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => AuthToken::Basic {
                user: user.clone(),
                password: password.clone(),
                realm: self.realm.clone(),
            },
            _ => AuthToken::None,
        }
    }

    /// Check URI, scheme and credential consistency without connecting
    pub fn validate(&self) -> GraphClientResult<ConnectionUri> {
        if self.user.is_some() != self.password.is_some() {
            return Err(GraphClientError::Config(
                "user and password must be supplied together".to_string(),
            ));
        }
        let uri = ConnectionUri::parse(&self.uri)?;
        check_scheme(&uri, !self.hosts.is_empty())?;
        Ok(uri)
    }
}

/// Scheme rules shared by config validation and the client constructors
pub(crate) fn check_scheme(uri: &ConnectionUri, has_hosts: bool) -> GraphClientResult<()> {
    if has_hosts && !uri.is_routing() {
        return Err(GraphClientError::UnsupportedScheme {
            scheme: uri.scheme_name().to_string(),
            reason: "alternate hosts can only be used with a 'bolt+routing://' URI".to_string(),
        });
    }
    if !uri.is_bolt() {
        return Err(GraphClientError::UnsupportedScheme {
            scheme: uri.scheme_name().to_string(),
            reason: "the Bolt client needs a 'bolt://' or 'bolt+routing://' URI".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.uri, "bolt://localhost:7687");
        assert_eq!(config.auth_token(), AuthToken::None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = ClientConfig::from_yaml_str(
            r#"
uri: "bolt+routing://cluster.example.com"
hosts: ["core1.example.com", "core2.example.com:7688"]
user: neo4j
password: secret
property_case: camel_case
"#,
        )
        .unwrap();

        assert_eq!(config.hosts.len(), 2);
        assert_eq!(config.property_case, PropertyCase::CamelCase);
        assert!(!config.encrypted);
        assert_eq!(config.auth_token(), AuthToken::basic("neo4j", "secret"));
        assert!(config.validate().unwrap().is_routing());
    }

    #[test]
    fn test_hosts_need_routing_scheme() {
        let config = ClientConfig {
            uri: "bolt://single.example.com".to_string(),
            hosts: vec!["x.example.com".to_string()],
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(GraphClientError::UnsupportedScheme { .. })));
    }

    #[test]
    fn test_user_without_password() {
        let config = ClientConfig {
            user: Some("neo4j".to_string()),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(GraphClientError::Config(_))));
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = ClientConfig {
            database: Some("movies".to_string()),
            ..ClientConfig::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

        let loaded = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_redacted_masks_password() {
        let config = ClientConfig {
            user: Some("neo4j".to_string()),
            password: Some("s3cret-pw".to_string()),
            ..ClientConfig::default()
        };

        let shown = serde_json::to_string(&config.redacted()).unwrap();
        assert!(shown.contains("neo4j"));
        assert!(!shown.contains("s3cret-pw"));
        assert!(!format!("{:?}", config).contains("s3cret-pw"));
        assert_eq!(config.redacted().user, config.user);
        assert_eq!(ClientConfig::default().redacted().password, None);
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(
            ClientConfig::from_yaml_str("uri: [unterminated"),
            Err(GraphClientError::Config(_))
        ));
    }
}
