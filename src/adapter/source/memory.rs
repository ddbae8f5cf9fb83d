//! In-memory listing source.
//!
//! Serves a fixed batch of records. Used by callers that already hold
//! fetched data, and by tests to script platform behaviour.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ListingRecord, PlatformId};
use crate::error::{Error, Result};
use crate::port::ListingSource;

#[derive(Debug, Clone)]
enum Behaviour {
    Serve(Vec<ListingRecord>),
    Fail(String),
}

/// Source backed by records held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    platform: PlatformId,
    behaviour: Behaviour,
    delay: Option<Duration>,
}

impl MemorySource {
    /// Serve the given records on every fetch.
    #[must_use]
    pub fn new(platform: impl Into<PlatformId>, records: Vec<ListingRecord>) -> Self {
        Self {
            platform: platform.into(),
            behaviour: Behaviour::Serve(records),
            delay: None,
        }
    }

    /// A source whose every fetch fails with `reason`.
    #[must_use]
    pub fn failing(platform: impl Into<PlatformId>, reason: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            behaviour: Behaviour::Fail(reason.into()),
            delay: None,
        }
    }

    /// Wait this long before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ListingSource for MemorySource {
    fn platform(&self) -> &PlatformId {
        &self.platform
    }

    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.behaviour {
            Behaviour::Serve(records) => Ok(records.clone()),
            Behaviour::Fail(reason) => Err(Error::Source {
                platform: self.platform.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}
