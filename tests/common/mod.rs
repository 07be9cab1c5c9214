//! Fake collaborators shared by the integration tests.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use linkhub_jobs::domain::NewClickRecord;
use linkhub_jobs::error::{ProviderError, RepositoryError};
use linkhub_jobs::prelude::*;

/// Email provider that records every send and replays a scripted result
/// sequence (defaulting to success once the script is exhausted).
#[derive(Default)]
pub struct FakeEmailProvider {
    pub sent: Mutex<Vec<(tokio::time::Instant, String)>>,
    pub script: Mutex<VecDeque<Result<(), ProviderError>>>,
}

impl FakeEmailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Result<(), ProviderError>>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
        }
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, to)| to.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailProvider for FakeEmailProvider {
    async fn send(&self, request: &EmailRequest) -> Result<(), ProviderError> {
        self.sent
            .lock()
            .unwrap()
            .push((tokio::time::Instant::now(), request.to.clone()));
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// Click repository backed by a Vec, optionally failing for one redirect id.
#[derive(Default)]
pub struct FakeClickRepository {
    pub records: Mutex<Vec<NewClickRecord>>,
    pub fail_for_redirect: Option<i64>,
}

impl FakeClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl ClickRepository for FakeClickRepository {
    async fn record_click(&self, record: NewClickRecord) -> Result<(), RepositoryError> {
        if self.fail_for_redirect == Some(record.redirect_id) {
            return Err(RepositoryError::Storage("simulated outage".to_string()));
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

/// Usage repository that tallies increments per redirect id.
#[derive(Default)]
pub struct FakeUsageRepository {
    pub increments: Mutex<Vec<i64>>,
}

impl FakeUsageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, redirect_id: i64) -> usize {
        self.increments
            .lock()
            .unwrap()
            .iter()
            .filter(|id| **id == redirect_id)
            .count()
    }
}

#[async_trait]
impl UsageRepository for FakeUsageRepository {
    async fn increment_counters(&self, redirect_id: i64) -> Result<(), RepositoryError> {
        self.increments.lock().unwrap().push(redirect_id);
        Ok(())
    }
}

/// Installs a test-friendly tracing subscriber; safe to call repeatedly.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Polls until `predicate` holds or a 5 second deadline expires.
pub async fn wait_until(predicate: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if predicate() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
