//! Test doubles for the driver seam
//!
//! `MockDriver` records every statement with the session options it ran
//! under and replays canned records keyed by statement text.

#![allow(dead_code)]

use async_trait::async_trait;
use boltgraph::{
    Driver, DriverError, DriverFactory, DriverRecord, DriverResult, DriverSettings, DriverValue, Session,
    SessionConfig, Statement, SERVER_COMPONENTS_QUERY,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    responses: HashMap<String, Vec<DriverRecord>>,
    failures: HashMap<String, DriverError>,
    executed: Vec<(SessionConfig, Statement)>,
    closed: bool,
    bookmark: Option<String>,
    close_failure: Option<DriverError>,
}

pub struct MockDriver {
    uri: String,
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    /// Driver at `bolt://localhost` reporting a 3.2.3 server
    pub fn new() -> Arc<Self> {
        Self::with_server("bolt://localhost", "3.2.3")
    }

    pub fn with_server(uri: &str, version: &str) -> Arc<Self> {
        let driver = Self {
            uri: uri.to_string(),
            state: Arc::new(Mutex::new(MockState::default())),
        };
        driver.respond(SERVER_COMPONENTS_QUERY, vec![server_info(version)]);
        Arc::new(driver)
    }

    pub fn respond(&self, text: &str, records: Vec<DriverRecord>) {
        self.state.lock().unwrap().responses.insert(text.to_string(), records);
    }

    pub fn fail(&self, text: &str, error: DriverError) {
        self.state.lock().unwrap().failures.insert(text.to_string(), error);
    }

    /// Bookmark every session reports after a statement
    pub fn set_bookmark(&self, bookmark: &str) {
        self.state.lock().unwrap().bookmark = Some(bookmark.to_string());
    }

    /// Make every session close fail from now on
    pub fn fail_close(&self, error: DriverError) {
        self.state.lock().unwrap().close_failure = Some(error);
    }

    /// Everything run so far, excluding the version probe
    pub fn executed(&self) -> Vec<(SessionConfig, Statement)> {
        self.state
            .lock()
            .unwrap()
            .executed
            .iter()
            .filter(|(_, s)| s.text != SERVER_COMPONENTS_QUERY)
            .cloned()
            .collect()
    }

    pub fn probe_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .executed
            .iter()
            .filter(|(_, s)| s.text == SERVER_COMPONENTS_QUERY)
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}

#[async_trait]
impl Driver for MockDriver {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn session(&self, config: SessionConfig) -> DriverResult<Box<dyn Session>> {
        Ok(Box::new(MockSession {
            config,
            state: self.state.clone(),
        }))
    }

    async fn close(&self) -> DriverResult<()> {
        self.state.lock().unwrap().closed = true;
        Ok(())
    }
}

struct MockSession {
    config: SessionConfig,
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl Session for MockSession {
    async fn run(&self, statement: Statement) -> DriverResult<Vec<DriverRecord>> {
        let mut state = self.state.lock().unwrap();
        let text = statement.text.clone();
        state.executed.push((self.config.clone(), statement));
        if let Some(err) = state.failures.get(&text) {
            return Err(err.clone());
        }
        Ok(state.responses.get(&text).cloned().unwrap_or_default())
    }

    fn last_bookmark(&self) -> Option<String> {
        self.state.lock().unwrap().bookmark.clone()
    }

    async fn close(&self) -> DriverResult<()> {
        match self.state.lock().unwrap().close_failure.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Factory handing out one pre-built mock and remembering what it was asked for
pub struct MockFactory {
    pub driver: Arc<MockDriver>,
    pub settings: Mutex<Option<DriverSettings>>,
}

impl MockFactory {
    pub fn new(driver: Arc<MockDriver>) -> Self {
        Self {
            driver,
            settings: Mutex::new(None),
        }
    }
}

impl DriverFactory for MockFactory {
    fn create(&self, settings: &DriverSettings) -> DriverResult<Arc<dyn Driver>> {
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(self.driver.clone())
    }
}

/// Record shaped like the first row of `CALL dbms.components()`
pub fn server_info(version: &str) -> DriverRecord {
    DriverRecord::new(vec![
        ("name", DriverValue::from("neo4j kernel")),
        ("versions", DriverValue::from(vec![version])),
        ("edition", DriverValue::from("community")),
    ])
}
