use std::time::Duration;

use common::data::Snapshot;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::{api::Api, Error};

/// How the poller decides a full snapshot is worth fetching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDetection {
    /// Fetch and render the full snapshot on every tick.
    Always,
    /// Ask for the state checksum first, only fetching when it moved.
    #[default]
    Checksum,
}

/// Whether polling is running, and when the next poll is due.
#[derive(Debug, Default)]
pub struct PollerState {
    active: bool,
    next: Option<Instant>,
}

impl PollerState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Polls as soon as possible.
    fn start(&mut self) {
        self.active = true;
        self.next = Some(Instant::now());
    }

    fn arm(&mut self, interval: Duration) {
        self.active = true;
        self.next = Some(Instant::now() + interval);
    }

    fn stop(&mut self) {
        self.active = false;
        self.next = None;
    }
}

/// Fetches snapshots and owns the polling timer.
pub struct StatePoller<A> {
    api: A,
    detection: ChangeDetection,
    interval: Duration,
    state: PollerState,
    /// Checksum belonging to the last snapshot fetched.
    last_checksum: Option<String>,
}

impl<A: Api> StatePoller<A> {
    pub fn new(api: A, detection: ChangeDetection, interval: Duration) -> Self {
        Self {
            api,
            detection,
            interval,
            state: PollerState::default(),
            last_checksum: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline()
    }

    pub fn start(&mut self) {
        trace!("polling started");
        self.state.start();
    }

    /// Safe to call when already stopped.
    pub fn stop(&mut self) {
        if self.state.is_active() {
            trace!("polling stopped");
        }
        self.state.stop();
    }

    /// Schedules the next poll one interval from now.
    pub fn rearm(&mut self) {
        self.state.arm(self.interval);
    }

    pub async fn fetch_snapshot(&self) -> Result<Snapshot, Error> {
        self.api.fetch_snapshot().await
    }

    /// Fetches a snapshot if the server state changed since the last one.
    ///
    /// `force` fetches regardless, as after an action or on refresh.
    pub async fn poll(&mut self, force: bool) -> Result<Option<Snapshot>, Error> {
        let checksum = match self.detection {
            ChangeDetection::Always => None,
            ChangeDetection::Checksum => {
                let checksum = self.api.fetch_checksum().await?;
                if !force && checksum.is_some() && checksum == self.last_checksum {
                    debug!("state unchanged, skipping render");
                    return Ok(None);
                }
                checksum
            }
        };

        let snapshot = self.fetch_snapshot().await?;
        self.last_checksum = checksum;

        Ok(Some(snapshot))
    }
}
