//! One landing-page visit: the selection controller wired to its collaborators
use crate::affordance::ContinueAffordance;
use crate::collaborators::{
    AnalyticsEvent, AnalyticsReporter, Clock, CompletionStore, Navigator, RemoteRecorder,
    SystemClock,
};
use crate::config::{ExperimentConfig, LandingConfig};
use crate::controller::{ProductDisplay, SelectionController};
use crate::summary::Summary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Constructed, `start` not called yet; input is ignored until it is
    #[default]
    Idle,
    /// Accepting toggles
    Ready,
    /// The visitor already completed the flow on an earlier visit
    AlreadyCompleted,
    /// A summary was dispatched; the visit is over
    Confirmed,
}

impl SessionPhase {
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Ready)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Ready,
    /// The navigator was already asked to leave the page
    AlreadyCompleted,
}

/// Bundle of the platform implementations a session dispatches to.
#[derive(Debug, Clone, Default)]
pub struct Collaborators<A, R, C, N, K = SystemClock> {
    pub reporter: A,
    pub recorder: R,
    pub completion: C,
    pub navigator: N,
    pub clock: K,
}

pub struct LandingSession<A, R, C, N, K = SystemClock>
where
    A: AnalyticsReporter,
    R: RemoteRecorder,
    C: CompletionStore,
    N: Navigator,
    K: Clock,
{
    controller: SelectionController,
    experiment: ExperimentConfig,
    collaborators: Collaborators<A, R, C, N, K>,
    phase: SessionPhase,
    page_view_sent: bool,
}

impl<A, R, C, N, K> LandingSession<A, R, C, N, K>
where
    A: AnalyticsReporter,
    R: RemoteRecorder,
    C: CompletionStore,
    N: Navigator,
    K: Clock,
{
    #[must_use]
    pub fn new(config: &LandingConfig, collaborators: Collaborators<A, R, C, N, K>) -> Self {
        Self {
            controller: SelectionController::with_catalog(config.catalog(), config.labels.clone()),
            experiment: config.experiment.clone(),
            collaborators,
            phase: SessionPhase::Idle,
            page_view_sent: false,
        }
    }

    /// Run the completion guard, then announce the page view once. Toggles and
    /// confirmations are ignored until this has run.
    pub fn start(&mut self) -> StartOutcome {
        match self.phase {
            SessionPhase::AlreadyCompleted | SessionPhase::Confirmed => {
                return StartOutcome::AlreadyCompleted;
            }
            SessionPhase::Idle | SessionPhase::Ready => {}
        }

        let completed = self
            .collaborators
            .completion
            .is_completed()
            .unwrap_or_else(|e| {
                log::warn!("completion flag unreadable, assuming fresh visit: {e}");
                false
            });
        if completed {
            log::info!("flow already completed, redirecting to confirmation view");
            self.phase = SessionPhase::AlreadyCompleted;
            log_failure("navigation", self.collaborators.navigator.advance());
            return StartOutcome::AlreadyCompleted;
        }

        if !self.page_view_sent {
            let event = self.experiment.tag(AnalyticsEvent::PageViewed);
            log_failure("page view report", self.collaborators.reporter.report(&event));
            self.page_view_sent = true;
        }
        self.phase = SessionPhase::Ready;
        StartOutcome::Ready
    }

    pub fn toggle(&mut self, product_id: &str) -> Option<ProductDisplay> {
        if !self.phase.accepts_input() {
            return None;
        }
        self.controller.toggle(product_id)
    }

    /// Snapshot the selection and hand it to every collaborator in order:
    /// analytics, remote record, completion flag, navigation.
    pub fn confirm(&mut self) -> Option<Summary> {
        if !self.phase.accepts_input() {
            return None;
        }
        let summary = self.controller.confirm(self.collaborators.clock.now())?;
        self.phase = SessionPhase::Confirmed;
        log::info!(
            "selection confirmed: {} product(s), total {}",
            summary.selected_ids.len(),
            summary.total_price
        );

        let event = self.experiment.tag(AnalyticsEvent::Confirmed);
        log_failure("confirm report", self.collaborators.reporter.report(&event));

        let payload = summary.to_record(self.controller.catalog(), self.experiment.variant);
        log_failure("remote record", self.collaborators.recorder.record(&payload));

        log_failure(
            "completion flag",
            self.collaborators.completion.mark_completed(summary.timestamp),
        );
        log_failure("navigation", self.collaborators.navigator.advance());

        Some(summary)
    }

    #[must_use]
    pub fn affordance_state(&self) -> ContinueAffordance {
        self.controller.affordance_state()
    }

    #[must_use]
    pub const fn controller(&self) -> &SelectionController {
        &self.controller
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn page_view_sent(&self) -> bool {
        self.page_view_sent
    }

    #[must_use]
    pub const fn collaborators(&self) -> &Collaborators<A, R, C, N, K> {
        &self.collaborators
    }
}

fn log_failure<E: std::error::Error>(step: &str, result: Result<(), E>) {
    if let Err(e) = result {
        log::warn!("{step} failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::collaborators::{NoCompletionGuard, TrackedEvent};
    use crate::summary::RecordPayload;
    use chrono::{DateTime, TimeZone, Utc};
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    #[derive(Debug, thiserror::Error)]
    #[error("offline")]
    struct Offline;

    #[derive(Clone, Default)]
    struct Reporter(Journal);

    impl AnalyticsReporter for Reporter {
        type Error = Infallible;

        fn report(&self, event: &TrackedEvent) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(format!("report:{}", event.name));
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        journal: Journal,
        offline: bool,
    }

    impl RemoteRecorder for Recorder {
        type Error = Offline;

        fn record(&self, payload: &RecordPayload) -> Result<(), Self::Error> {
            if self.offline {
                return Err(Offline);
            }
            self.journal
                .borrow_mut()
                .push(format!("record:{}", payload.total_price));
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct Flag {
        journal: Journal,
        completed: Rc<RefCell<bool>>,
    }

    impl CompletionStore for Flag {
        type Error = Infallible;

        fn is_completed(&self) -> Result<bool, Self::Error> {
            Ok(*self.completed.borrow())
        }

        fn mark_completed(&self, _at: DateTime<Utc>) -> Result<(), Self::Error> {
            *self.completed.borrow_mut() = true;
            self.journal.borrow_mut().push("complete".to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct Nav(Journal);

    impl Navigator for Nav {
        type Error = Infallible;

        fn advance(&self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push("navigate".to_string());
            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
        }
    }

    fn config() -> LandingConfig {
        LandingConfig {
            products: vec![
                Product::new("bracelet", 100, "Bracelet"),
                Product::new("card", 50, "Card"),
            ],
            ..LandingConfig::default()
        }
    }

    fn session(
        journal: &Journal,
        offline: bool,
        completed: bool,
    ) -> LandingSession<Reporter, Recorder, Flag, Nav, FixedClock> {
        LandingSession::new(
            &config(),
            Collaborators {
                reporter: Reporter(journal.clone()),
                recorder: Recorder {
                    journal: journal.clone(),
                    offline,
                },
                completion: Flag {
                    journal: journal.clone(),
                    completed: Rc::new(RefCell::new(completed)),
                },
                navigator: Nav(journal.clone()),
                clock: FixedClock,
            },
        )
    }

    #[test]
    fn page_view_is_reported_once() {
        let journal = Journal::default();
        let mut sess = session(&journal, false, false);
        assert_eq!(sess.start(), StartOutcome::Ready);
        assert_eq!(sess.start(), StartOutcome::Ready);
        assert_eq!(*journal.borrow(), vec!["report:page_view_landing"]);
        assert!(sess.page_view_sent());
    }

    #[test]
    fn confirm_dispatches_in_order() {
        let journal = Journal::default();
        let mut sess = session(&journal, false, false);
        sess.start();
        sess.toggle("bracelet");
        sess.toggle("card");
        let summary = sess.confirm().expect("selection present");
        assert_eq!(summary.total_price, 150);
        assert_eq!(summary.timestamp, FixedClock.now());
        assert_eq!(
            *journal.borrow(),
            vec![
                "report:page_view_landing",
                "report:click_continue",
                "record:150",
                "complete",
                "navigate",
            ]
        );
        assert_eq!(sess.phase(), SessionPhase::Confirmed);
    }

    #[test]
    fn empty_confirm_dispatches_nothing() {
        let journal = Journal::default();
        let mut sess = session(&journal, false, false);
        sess.start();
        assert!(sess.confirm().is_none());
        assert_eq!(journal.borrow().len(), 1);
        assert_eq!(sess.phase(), SessionPhase::Ready);
    }

    #[test]
    fn recorder_failure_does_not_stop_completion() {
        let journal = Journal::default();
        let mut sess = session(&journal, true, false);
        sess.start();
        sess.toggle("card");
        assert!(sess.confirm().is_some());
        let entries = journal.borrow();
        assert!(!entries.iter().any(|e| e.starts_with("record:")));
        assert!(entries.contains(&"complete".to_string()));
        assert_eq!(entries.last().map(String::as_str), Some("navigate"));
    }

    #[derive(Clone, Default)]
    struct BlockedReporter;

    impl AnalyticsReporter for BlockedReporter {
        type Error = Offline;

        fn report(&self, _event: &TrackedEvent) -> Result<(), Self::Error> {
            Err(Offline)
        }
    }

    #[derive(Clone, Default)]
    struct ReadOnlyFlag(Journal);

    impl CompletionStore for ReadOnlyFlag {
        type Error = Offline;

        fn is_completed(&self) -> Result<bool, Self::Error> {
            Err(Offline)
        }

        fn mark_completed(&self, _at: DateTime<Utc>) -> Result<(), Self::Error> {
            self.0.borrow_mut().push("complete:failed".to_string());
            Err(Offline)
        }
    }

    #[test]
    fn reporter_failure_does_not_stop_dispatch() {
        let journal = Journal::default();
        let mut sess = LandingSession::new(
            &config(),
            Collaborators {
                reporter: BlockedReporter,
                recorder: Recorder {
                    journal: journal.clone(),
                    offline: false,
                },
                completion: Flag {
                    journal: journal.clone(),
                    completed: Rc::default(),
                },
                navigator: Nav(journal.clone()),
                clock: FixedClock,
            },
        );
        assert_eq!(sess.start(), StartOutcome::Ready);
        assert!(sess.page_view_sent());
        sess.toggle("card");
        assert!(sess.confirm().is_some());
        assert_eq!(*journal.borrow(), vec!["record:50", "complete", "navigate"]);
    }

    #[test]
    fn completion_store_failure_still_navigates() {
        let journal = Journal::default();
        let mut sess = LandingSession::new(
            &config(),
            Collaborators {
                reporter: Reporter(journal.clone()),
                recorder: Recorder {
                    journal: journal.clone(),
                    offline: false,
                },
                completion: ReadOnlyFlag(journal.clone()),
                navigator: Nav(journal.clone()),
                clock: FixedClock,
            },
        );
        // an unreadable flag counts as a fresh visit
        assert_eq!(sess.start(), StartOutcome::Ready);
        sess.toggle("bracelet");
        assert!(sess.confirm().is_some());
        assert_eq!(
            *journal.borrow(),
            vec![
                "report:page_view_landing",
                "report:click_continue",
                "record:100",
                "complete:failed",
                "navigate",
            ]
        );
        assert_eq!(sess.phase(), SessionPhase::Confirmed);
    }

    #[test]
    fn input_before_start_is_ignored() {
        let journal = Journal::default();
        let mut sess = session(&journal, false, true);
        assert_eq!(sess.phase(), SessionPhase::Idle);
        assert!(sess.toggle("card").is_none());
        assert!(sess.confirm().is_none());
        assert!(journal.borrow().is_empty());
        assert!(sess.controller().selection().is_empty());

        assert_eq!(sess.start(), StartOutcome::AlreadyCompleted);
        assert_eq!(*journal.borrow(), vec!["navigate"]);
    }

    #[test]
    fn completed_flow_redirects_without_page_view() {
        let journal = Journal::default();
        let mut sess = session(&journal, false, true);
        assert_eq!(sess.start(), StartOutcome::AlreadyCompleted);
        assert_eq!(*journal.borrow(), vec!["navigate"]);
        assert!(sess.toggle("card").is_none());
        assert!(sess.confirm().is_none());
        assert!(!sess.page_view_sent());
    }

    #[test]
    fn confirmed_session_ignores_further_input() {
        let journal = Journal::default();
        let mut sess = session(&journal, false, false);
        sess.start();
        sess.toggle("card");
        sess.confirm();
        let dispatched = journal.borrow().len();
        assert!(sess.toggle("bracelet").is_none());
        assert!(sess.confirm().is_none());
        assert_eq!(journal.borrow().len(), dispatched);
        assert_eq!(sess.start(), StartOutcome::AlreadyCompleted);
    }

    #[test]
    fn guard_can_be_disabled() {
        let journal = Journal::default();
        let mut sess = LandingSession::new(
            &config(),
            Collaborators {
                reporter: Reporter(journal.clone()),
                recorder: Recorder::default(),
                completion: NoCompletionGuard,
                navigator: Nav(journal.clone()),
                clock: FixedClock,
            },
        );
        assert_eq!(sess.start(), StartOutcome::Ready);
        sess.toggle("bracelet");
        assert_eq!(sess.affordance_state().label, "Continue for 100 ₽");
    }
}
