//! Common test utilities
//!
//! Shared across the integration tests of this crate.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tallycore::services::{RateProvider, RateQuote};
use tallycore::{create_pool, AppError, AppResult, Assistant, DbPool, InboundMessage, Reply, UserIdentity};
use tempfile::TempDir;

/// Rate provider returning a fixed quote, or a 503 when `None`
pub struct FixedRates(pub Option<RateQuote>);

#[async_trait]
impl RateProvider for FixedRates {
    async fn latest(&self) -> AppResult<RateQuote> {
        self.0
            .ok_or(AppError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

/// Assistant backed by a fresh on-disk database
pub struct TestEnvironment {
    pub dir: TempDir,
    pub pool: Arc<DbPool>,
    pub assistant: Arc<Assistant>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::with_rates(FixedRates(Some(RateQuote {
            usd_rub: 90.0,
            eur_rub: 100.0,
        })))
    }

    pub fn with_rates(rates: impl RateProvider + 'static) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.db");
        let pool = Arc::new(create_pool(path.to_str().unwrap()).unwrap());
        let assistant = Arc::new(Assistant::new(Arc::clone(&pool), Arc::new(rates)));
        Self { dir, pool, assistant }
    }

    /// Second assistant over the same database, as a second process would be
    pub fn sibling(&self) -> Assistant {
        Assistant::new(Arc::clone(&self.pool), Arc::new(FixedRates(None)))
    }

    pub async fn send(&self, user: i64, text: &str) -> Vec<Reply> {
        self.assistant.handle(&message(user, text)).await
    }

    /// Sends and returns only the reply texts
    pub async fn say(&self, user: i64, text: &str) -> Vec<String> {
        self.send(user, text).await.into_iter().map(|r| r.text).collect()
    }

    pub async fn register(&self, user: i64, categories: [&str; 3]) {
        self.send(user, "/start").await;
        for category in categories {
            self.send(user, category).await;
        }
    }
}

pub fn message(user: i64, text: &str) -> InboundMessage {
    InboundMessage::new(UserIdentity(user), format!("User {}", user), text)
}
