//! Dispatch scheduler
//!
//! Every submitted request runs as one independent unit on a bounded worker
//! pool. A unit resolves the host context, registers the request's lifecycle
//! milestones, presents it when it has content and finally hands its outcome to
//! the reporter. Failures and panics stay inside the unit; the submitter only
//! ever sees `InvalidRequest` for an absent request.

mod builder;
mod stats;

pub use builder::DispatcherBuilder;
pub use stats::DispatchStatsSnapshot;

use crate::collaborators::HostContext;
use crate::config::DispatchConfig;
use crate::coordinator::{Presentation, PresentationCoordinator};
use crate::error::{DispatchError, DispatchResult};
use crate::grouping::GroupState;
use crate::model::{
    AppLifecycleState, LifecycleFlags, NotificationRequest, NotificationSource,
    ReceivedNotification,
};
use crate::registrar;
use crate::reporter::LifecycleReporter;
use futures::FutureExt;
use stats::DispatchStats;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::{Semaphore, oneshot};
use tracing::{debug, error, warn};

/// Final state of one dispatch unit
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub notification_id: i32,
    /// Milestones that were actually reported
    pub flags: LifecycleFlags,
    /// Snapshot handed to the event sink, absent when the unit failed
    pub received: Option<ReceivedNotification>,
    /// Id of the group summary this unit presented
    pub summary_id: Option<i32>,
    pub elapsed: Duration,
    pub error: Option<DispatchError>,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.received.is_some()
    }
}

/// Completion handle for a submitted request
///
/// Dropping it does not cancel anything; the unit runs to completion either way.
#[derive(Debug)]
pub struct DispatchHandle {
    notification_id: i32,
    receiver: oneshot::Receiver<DispatchOutcome>,
}

impl DispatchHandle {
    pub fn notification_id(&self) -> i32 {
        self.notification_id
    }

    /// Wait for the unit to finish
    pub async fn outcome(self) -> DispatchResult<DispatchOutcome> {
        self.receiver
            .await
            .map_err(|_| DispatchError::internal("dispatch unit ended without an outcome"))
    }
}

/// Schedules dispatch units for notification requests
pub struct NotificationDispatcher {
    inner: Arc<DispatchInner>,
    permits: Arc<Semaphore>,
    runtime: Handle,
    config: DispatchConfig,
}

pub(crate) struct DispatchInner {
    pub(crate) context: Weak<HostContext>,
    pub(crate) coordinator: PresentationCoordinator,
    pub(crate) reporter: LifecycleReporter,
    pub(crate) stats: DispatchStats,
}

/// What a unit hands to the reporter
struct UnitReport {
    received: Option<ReceivedNotification>,
    flags: LifecycleFlags,
    summary_id: Option<i32>,
    error: Option<DispatchError>,
}

impl UnitReport {
    fn failed(error: DispatchError) -> Self {
        Self {
            received: None,
            flags: LifecycleFlags::NONE,
            summary_id: None,
            error: Some(error),
        }
    }

    fn finished(intent: LifecycleFlags, presentation: Presentation) -> Self {
        Self {
            received: Some(ReceivedNotification::from(&presentation.request)),
            flags: LifecycleFlags::new(intent.created, intent.displayed && presentation.displayed),
            summary_id: presentation.summary.as_ref().map(|summary| summary.id),
            error: None,
        }
    }
}

impl NotificationDispatcher {
    pub fn builder(config: DispatchConfig) -> DispatcherBuilder {
        DispatcherBuilder::new(config)
    }

    /// Submit a request, counting it as created by its own `created_source`.
    ///
    /// Never blocks. Returns `InvalidRequest` if `request` is absent.
    pub fn submit(
        &self,
        request: Option<NotificationRequest>,
        lifecycle: AppLifecycleState,
    ) -> DispatchResult<DispatchHandle> {
        let request = Self::require(request)?;
        let source = request.created_source;
        Ok(self.spawn_unit(request, source, lifecycle))
    }

    /// Submit a request on behalf of an explicit creation source
    pub fn submit_with_source(
        &self,
        request: Option<NotificationRequest>,
        source: NotificationSource,
        lifecycle: AppLifecycleState,
    ) -> DispatchResult<DispatchHandle> {
        let request = Self::require(request)?;
        Ok(self.spawn_unit(request, source, lifecycle))
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn groups(&self) -> &Arc<GroupState> {
        self.inner.coordinator.groups()
    }

    fn require(request: Option<NotificationRequest>) -> DispatchResult<NotificationRequest> {
        request.ok_or_else(|| DispatchError::invalid_request("Notification cannot be empty or absent"))
    }

    fn spawn_unit(
        &self,
        request: NotificationRequest,
        source: NotificationSource,
        lifecycle: AppLifecycleState,
    ) -> DispatchHandle {
        let notification_id = request.id;
        let (sender, receiver) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        let permits = Arc::clone(&self.permits);

        inner.stats.record_submitted();
        self.runtime.spawn(async move {
            let outcome = match permits.acquire_owned().await {
                Ok(_permit) => inner.execute(request, source, lifecycle).await,
                Err(_) => inner.finish(
                    notification_id,
                    UnitReport::failed(DispatchError::internal("worker pool is closed")),
                    Duration::ZERO,
                ),
            };
            // The submitter may have dropped its handle.
            let _ = sender.send(outcome);
        });

        DispatchHandle {
            notification_id,
            receiver,
        }
    }
}

impl DispatchInner {
    async fn execute(
        &self,
        request: NotificationRequest,
        source: NotificationSource,
        lifecycle: AppLifecycleState,
    ) -> DispatchOutcome {
        let started = Instant::now();
        let notification_id = request.id;

        let report = match AssertUnwindSafe(self.run(request, source, lifecycle))
            .catch_unwind()
            .await
        {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                // Collaborator failures were already logged by the coordinator.
                if !e.is_collaborator_failure() {
                    warn!(notification_id, error = %e, "Dispatch unit failed");
                }
                UnitReport::failed(e)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(notification_id, panic = %message, "Dispatch unit panicked");
                UnitReport::failed(DispatchError::Panicked(message))
            }
        };

        self.finish(notification_id, report, started.elapsed())
    }

    async fn run(
        &self,
        mut request: NotificationRequest,
        source: NotificationSource,
        lifecycle: AppLifecycleState,
    ) -> DispatchResult<UnitReport> {
        let context = self
            .context
            .upgrade()
            .ok_or(DispatchError::ContextUnavailable)?;

        let intent = registrar::register(&mut request, lifecycle, source);

        let presentation = if request.has_content() {
            self.coordinator.present(&context, request).await?
        } else {
            debug!(notification_id = request.id, "Silent notification, nothing to present");
            Presentation::hidden(request)
        };

        Ok(UnitReport::finished(intent, presentation))
    }

    fn finish(&self, notification_id: i32, report: UnitReport, elapsed: Duration) -> DispatchOutcome {
        self.reporter
            .report(report.received.as_ref(), report.flags, elapsed);

        let outcome = DispatchOutcome {
            notification_id,
            flags: report.flags,
            received: report.received,
            summary_id: report.summary_id,
            elapsed,
            error: report.error,
        };
        self.stats.record_outcome(&outcome);
        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
