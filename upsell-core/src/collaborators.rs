//! Interfaces the selection core calls into
//!
//! Platform-specific implementations (browser SDKs, storage, navigation)
//! provide these. Every call is fire-and-forget from the core's point of
//! view: errors are reported back only so they can be logged.
use crate::config::ExperimentConfig;
use crate::summary::RecordPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEvent {
    PageViewed,
    Confirmed,
}

/// An analytics notification tagged with the experiment identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub kind: AnalyticsEvent,
    /// Event name for tag-manager style SDKs
    pub name: String,
    /// Goal name for counter-based SDKs
    pub goal: String,
    pub counter: Option<u64>,
    pub variant: u32,
}

impl ExperimentConfig {
    #[must_use]
    pub fn tag(&self, kind: AnalyticsEvent) -> TrackedEvent {
        let (name, goal) = match kind {
            AnalyticsEvent::PageViewed => (&self.page_view_event, &self.page_view_goal),
            AnalyticsEvent::Confirmed => (&self.confirm_event, &self.confirm_goal),
        };
        TrackedEvent {
            kind,
            name: name.clone(),
            goal: goal.clone(),
            counter: self.metrika_counter,
            variant: self.variant,
        }
    }
}

/// Receives page-view and confirmation notifications.
pub trait AnalyticsReporter {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be handed to the SDK.
    fn report(&self, event: &TrackedEvent) -> Result<(), Self::Error>;
}

/// Receives the confirmed selection for business tracking.
pub trait RemoteRecorder {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fire the outbound request. Delivery is best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be issued.
    fn record(&self, payload: &RecordPayload) -> Result<(), Self::Error>;
}

/// Durable "this visitor already finished the flow" flag.
pub trait CompletionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error if none of the backing mechanisms can be read.
    fn is_completed(&self) -> Result<bool, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the flag could not be written.
    fn mark_completed(&self, at: DateTime<Utc>) -> Result<(), Self::Error>;
}

/// Moves the visitor on to the confirmation view.
pub trait Navigator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error if navigation could not be started.
    fn advance(&self) -> Result<(), Self::Error>;
}

/// Source of confirmation timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the host OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Completion store for deployments without the "already completed" guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompletionGuard;

impl CompletionStore for NoCompletionGuard {
    type Error = Infallible;

    fn is_completed(&self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn mark_completed(&self, _at: DateTime<Utc>) -> Result<(), Self::Error> {
        Ok(())
    }
}
