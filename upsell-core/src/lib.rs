//! Upsell selection core
//!
//! Platform-agnostic logic for the add-on selection landing page: the product
//! catalog, the toggle state machine with its running total, the continue
//! control derivation and the confirmation summary. Analytics, remote
//! recording, the completion flag and navigation are collaborator traits that
//! platform crates implement.

pub mod affordance;
pub mod catalog;
pub mod collaborators;
pub mod config;
pub mod controller;
pub mod session;
pub mod summary;

pub use affordance::{AffordanceLabels, ContinueAffordance, render_template};
pub use catalog::{Catalog, Product};
pub use collaborators::{
    AnalyticsEvent, AnalyticsReporter, Clock, CompletionStore, Navigator, NoCompletionGuard,
    RemoteRecorder, SystemClock, TrackedEvent,
};
pub use config::{
    CompletionConfig, ConfigError, ExperimentConfig, LandingConfig, NavigationConfig,
    RecorderConfig,
};
pub use controller::{ProductDisplay, ProductState, SelectionController};
pub use session::{Collaborators, LandingSession, SessionPhase, StartOutcome};
pub use summary::{RecordPayload, Summary};
