//! Herald Core Library
//!
//! An asynchronous notification dispatch pipeline. Given a request, a dispatch
//! unit decides off the caller's path whether and how to present it, records
//! its created/displayed milestones and reports them to listeners with timing
//! telemetry.
//!
//! The building blocks, leaves first:
//! - [`policy`]: whether a request may be shown in the current app state
//! - [`grouping`]: group summaries and the per-group bookkeeping
//! - [`registrar`]: created/displayed classification
//! - [`coordinator`]: builds and presents requests and their group summaries
//! - [`dispatcher`]: bounded, fire-and-forget scheduling of dispatch units
//! - [`reporter`]: lifecycle signals and the debug timing line

pub mod collaborators;
pub mod config;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod grouping;
pub mod model;
pub mod policy;
pub mod registrar;
pub mod reporter;

// Re-export commonly used types
pub use collaborators::{
    EventSink, HostContext, LifecycleTracker, PlatformNotification, PresentationBuilder,
    PresentationSurface, SharedLifecycleTracker,
};
pub use config::{DispatchConfig, LoggingConfig};
pub use coordinator::{Presentation, PresentationCoordinator};
pub use dispatcher::{
    DispatchHandle, DispatchOutcome, DispatchStatsSnapshot, DispatcherBuilder,
    NotificationDispatcher,
};
pub use error::{DispatchError, DispatchResult};
pub use events::{EventBus, LifecycleEvent, LoggingEventSink};
pub use grouping::{GroupEntry, GroupState};
pub use model::{
    AppLifecycleState, LifecycleFlags, NotificationLayout, NotificationRequest,
    NotificationSource, ReceivedNotification,
};
pub use reporter::LifecycleReporter;
