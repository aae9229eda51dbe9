//! Fluent Cypher query builder
//!
//! Each clause method appends one line to the statement. Values never get
//! spliced into the text; they travel as named parameters.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::client::BoltGraphClient;
use crate::cypher::params::serialize_param;
use crate::cypher::query::CypherQuery;
use crate::driver::{AccessMode, DriverRecord};
use crate::error::{GraphClientError, GraphClientResult};

/// Builder returned by [`BoltGraphClient::cypher`]
#[must_use = "a query builder does nothing until it is executed"]
pub struct CypherFluentQuery<'a> {
    client: &'a BoltGraphClient,
    clauses: Vec<String>,
    parameters: IndexMap<String, JsonValue>,
    access_mode: AccessMode,
    database: Option<String>,
    bookmarks: Vec<String>,
    next_auto_param: usize,
}

impl<'a> CypherFluentQuery<'a> {
    pub(crate) fn new(client: &'a BoltGraphClient) -> Self {
        Self {
            client,
            clauses: Vec::new(),
            parameters: IndexMap::new(),
            access_mode: AccessMode::Write,
            database: None,
            bookmarks: Vec::new(),
            next_auto_param: 0,
        }
    }

    fn clause(mut self, keyword: &str, body: impl AsRef<str>) -> Self {
        self.clauses.push(format!("{} {}", keyword, body.as_ref()));
        self
    }

    /// Append a line of Cypher verbatim
    pub fn raw(mut self, text: &str) -> Self {
        self.clauses.push(text.to_string());
        self
    }

    pub fn match_(self, pattern: &str) -> Self {
        self.clause("MATCH", pattern)
    }

    pub fn optional_match(self, pattern: &str) -> Self {
        self.clause("OPTIONAL MATCH", pattern)
    }

    pub fn create(self, pattern: &str) -> Self {
        self.clause("CREATE", pattern)
    }

    pub fn merge(self, pattern: &str) -> Self {
        self.clause("MERGE", pattern)
    }

    /// `ON CREATE`, usually followed by `set`
    pub fn on_create(mut self) -> Self {
        self.clauses.push("ON CREATE".to_string());
        self
    }

    /// `ON MATCH`, usually followed by `set`
    pub fn on_match(mut self) -> Self {
        self.clauses.push("ON MATCH".to_string());
        self
    }

    pub fn set(self, assignments: &str) -> Self {
        self.clause("SET", assignments)
    }

    pub fn remove(self, items: &str) -> Self {
        self.clause("REMOVE", items)
    }

    pub fn delete(self, identities: &str) -> Self {
        self.clause("DELETE", identities)
    }

    pub fn detach_delete(self, identities: &str) -> Self {
        self.clause("DETACH DELETE", identities)
    }

    pub fn with(self, items: &str) -> Self {
        self.clause("WITH", items)
    }

    /// `UNWIND collection AS identity`
    pub fn unwind(self, collection: &str, identity: &str) -> Self {
        self.clause("UNWIND", format!("{} AS {}", collection, identity))
    }

    pub fn where_(self, condition: &str) -> Self {
        self.clause("WHERE", condition)
    }

    pub fn and_where(self, condition: &str) -> Self {
        self.clause("AND", condition)
    }

    pub fn or_where(self, condition: &str) -> Self {
        self.clause("OR", condition)
    }

    /// `WHERE expression = $pN`, with `value` stored as the generated parameter
    pub fn where_eq<T: Serialize + ?Sized>(self, expression: &str, value: &T) -> GraphClientResult<Self> {
        self.auto_param_clause("WHERE", expression, value)
    }

    pub fn and_where_eq<T: Serialize + ?Sized>(self, expression: &str, value: &T) -> GraphClientResult<Self> {
        self.auto_param_clause("AND", expression, value)
    }

    pub fn or_where_eq<T: Serialize + ?Sized>(self, expression: &str, value: &T) -> GraphClientResult<Self> {
        self.auto_param_clause("OR", expression, value)
    }

    pub fn call(self, procedure: &str) -> Self {
        self.clause("CALL", procedure)
    }

    pub fn yield_(self, items: &str) -> Self {
        self.clause("YIELD", items)
    }

    pub fn return_(self, items: &str) -> Self {
        self.clause("RETURN", items)
    }

    pub fn return_distinct(self, items: &str) -> Self {
        self.clause("RETURN DISTINCT", items)
    }

    pub fn order_by(self, items: &str) -> Self {
        self.clause("ORDER BY", items)
    }

    pub fn order_by_descending(self, items: &str) -> Self {
        self.clause("ORDER BY", format!("{} DESC", items))
    }

    pub fn skip(self, count: u64) -> Self {
        self.clause("SKIP", count.to_string())
    }

    pub fn limit(self, count: u64) -> Self {
        self.clause("LIMIT", count.to_string())
    }

    /// Attach a named parameter. Keys must be unique within the query.
    pub fn with_param<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> GraphClientResult<Self> {
        if self.parameters.contains_key(key) {
            return Err(GraphClientError::DuplicateParameter(key.to_string()));
        }
        let serialized = serialize_param(value)?;
        self.parameters.insert(key.to_string(), serialized);
        Ok(self)
    }

    /// Attach several named parameters
    pub fn with_params<K, T, I>(self, params: I) -> GraphClientResult<Self>
    where
        K: AsRef<str>,
        T: Serialize,
        I: IntoIterator<Item = (K, T)>,
    {
        let mut query = self;
        for (key, value) in params {
            query = query.with_param(key.as_ref(), &value)?;
        }
        Ok(query)
    }

    /// Run the statement in a read session
    pub fn read(mut self) -> Self {
        self.access_mode = AccessMode::Read;
        self
    }

    /// Run the statement against a specific database
    pub fn in_database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    pub fn with_bookmark(mut self, bookmark: &str) -> Self {
        self.bookmarks.push(bookmark.to_string());
        self
    }

    pub fn with_bookmarks<S: Into<String>>(mut self, bookmarks: impl IntoIterator<Item = S>) -> Self {
        self.bookmarks.extend(bookmarks.into_iter().map(Into::into));
        self
    }

    /// Snapshot of the statement built so far
    pub fn query(&self) -> CypherQuery {
        CypherQuery {
            text: self.clauses.join("\n"),
            parameters: self.parameters.clone(),
            access_mode: self.access_mode,
            database: self.database.clone(),
            bookmarks: self.bookmarks.clone(),
        }
    }

    /// Execute and discard any records
    pub async fn execute_without_results(self) -> GraphClientResult<()> {
        self.client.execute_cypher(&self.query()).await
    }

    /// Execute and map every record into `T`
    pub async fn results<T: DeserializeOwned>(self) -> GraphClientResult<Vec<T>> {
        self.client.execute_get_cypher_results(&self.query()).await
    }

    /// Execute and return the driver records untouched
    pub async fn records(self) -> GraphClientResult<Vec<DriverRecord>> {
        self.client.execute_get_records(&self.query()).await
    }

    fn auto_param_clause<T: Serialize + ?Sized>(
        mut self,
        keyword: &str,
        expression: &str,
        value: &T,
    ) -> GraphClientResult<Self> {
        let serialized = serialize_param(value)?;
        let name = self.next_param_name();
        self.parameters.insert(name.clone(), serialized);
        Ok(self.clause(keyword, format!("{} = ${}", expression, name)))
    }

    fn next_param_name(&mut self) -> String {
        loop {
            let name = format!("p{}", self.next_auto_param);
            self.next_auto_param += 1;
            if !self.parameters.contains_key(&name) {
                return name;
            }
        }
    }
}
