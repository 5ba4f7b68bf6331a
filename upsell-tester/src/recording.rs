//! Collaborators that journal every dispatch instead of touching the outside world
use chrono::{DateTime, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use upsell_core::{
    AnalyticsEvent, AnalyticsReporter, Clock, Collaborators, CompletionStore, LandingConfig,
    LandingSession, Navigator, RecordPayload, RemoteRecorder, TrackedEvent,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Report(TrackedEvent),
    Record(RecordPayload),
    MarkCompleted(DateTime<Utc>),
    Navigate,
}

impl Dispatch {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Report(event) => match event.kind {
                AnalyticsEvent::PageViewed => "report:page_viewed",
                AnalyticsEvent::Confirmed => "report:confirmed",
            },
            Self::Record(_) => "record",
            Self::MarkCompleted(_) => "mark_completed",
            Self::Navigate => "navigate",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Dispatch>>>);

impl Journal {
    fn push(&self, dispatch: Dispatch) {
        self.0.borrow_mut().push(dispatch);
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Dispatch> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.0.borrow().iter().map(Dispatch::label).collect()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("simulated {0} outage")]
pub struct SimulatedOutage(&'static str);

#[derive(Debug, Clone)]
pub struct RecordingReporter(Journal);

impl AnalyticsReporter for RecordingReporter {
    type Error = Infallible;

    fn report(&self, event: &TrackedEvent) -> Result<(), Self::Error> {
        self.0.push(Dispatch::Report(event.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RecordingRecorder {
    journal: Journal,
    offline: bool,
}

impl RemoteRecorder for RecordingRecorder {
    type Error = SimulatedOutage;

    fn record(&self, payload: &RecordPayload) -> Result<(), Self::Error> {
        if self.offline {
            return Err(SimulatedOutage("recorder"));
        }
        self.journal.push(Dispatch::Record(payload.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RecordingCompletion {
    journal: Journal,
    completed: Rc<Cell<bool>>,
}

impl CompletionStore for RecordingCompletion {
    type Error = Infallible;

    fn is_completed(&self) -> Result<bool, Self::Error> {
        Ok(self.completed.get())
    }

    fn mark_completed(&self, at: DateTime<Utc>) -> Result<(), Self::Error> {
        self.completed.set(true);
        self.journal.push(Dispatch::MarkCompleted(at));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RecordingNavigator(Journal);

impl Navigator for RecordingNavigator {
    type Error = Infallible;

    fn advance(&self) -> Result<(), Self::Error> {
        self.0.push(Dispatch::Navigate);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.timestamp_opt(1_735_689_600, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub type RecordedSession = LandingSession<
    RecordingReporter,
    RecordingRecorder,
    RecordingCompletion,
    RecordingNavigator,
    FixedClock,
>;

#[derive(Debug, Clone, Copy, Default)]
pub struct HarnessOptions {
    pub recorder_offline: bool,
    pub already_completed: bool,
}

/// A session wired to journaling collaborators.
pub struct Harness {
    pub session: RecordedSession,
    pub journal: Journal,
    pub clock: FixedClock,
}

impl Harness {
    #[must_use]
    pub fn new(config: &LandingConfig, options: HarnessOptions) -> Self {
        let journal = Journal::default();
        let clock = FixedClock::default();
        let session = LandingSession::new(
            config,
            Collaborators {
                reporter: RecordingReporter(journal.clone()),
                recorder: RecordingRecorder {
                    journal: journal.clone(),
                    offline: options.recorder_offline,
                },
                completion: RecordingCompletion {
                    journal: journal.clone(),
                    completed: Rc::new(Cell::new(options.already_completed)),
                },
                navigator: RecordingNavigator(journal.clone()),
                clock,
            },
        );
        Self {
            session,
            journal,
            clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upsell_core::Product;

    #[test]
    fn harness_journals_full_confirmation() {
        let config = LandingConfig {
            products: vec![Product::new("card", 50, "Card")],
            ..LandingConfig::default()
        };
        let mut harness = Harness::new(&config, HarnessOptions::default());
        harness.session.start();
        harness.session.toggle("card");
        harness.session.confirm();
        assert_eq!(
            harness.journal.labels(),
            vec![
                "report:page_viewed",
                "report:confirmed",
                "record",
                "mark_completed",
                "navigate"
            ]
        );
        assert!(matches!(
            harness.journal.entries()[3],
            Dispatch::MarkCompleted(at) if at == harness.clock.0
        ));
    }
}
