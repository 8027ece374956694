//! Lifecycle reporting and dispatch timing telemetry

use crate::collaborators::EventSink;
use crate::model::{LifecycleFlags, ReceivedNotification};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Emits created/displayed signals for requests that reached those states
pub struct LifecycleReporter {
    sink: Arc<dyn EventSink>,
    debug: bool,
}

impl LifecycleReporter {
    pub fn new(sink: Arc<dyn EventSink>, debug: bool) -> Self {
        Self { sink, debug }
    }

    /// Report one finished dispatch unit.
    ///
    /// Without a `result` nothing is signalled; the timing line is still
    /// logged when debug telemetry is on.
    pub fn report(
        &self,
        result: Option<&ReceivedNotification>,
        flags: LifecycleFlags,
        elapsed: Duration,
    ) {
        if let Some(notification) = result {
            if flags.created {
                self.sink.notify_created(notification);
            }
            if flags.displayed {
                self.sink.notify_displayed(notification);
            }
        }

        if self.debug {
            debug!(
                notification_id = result.map(|n| n.id),
                elapsed_ms = elapsed.as_millis() as u64,
                "{}",
                timing_line(flags, elapsed)
            );
        }
    }
}

/// "Notification created and displayed in 12ms"
pub fn timing_line(flags: LifecycleFlags, elapsed: Duration) -> String {
    let milestones = flags.milestones();
    if milestones.is_empty() {
        format!("Notification reached no lifecycle milestone in {}ms", elapsed.as_millis())
    } else {
        format!(
            "Notification {} in {}ms",
            milestones.join(" and "),
            elapsed.as_millis()
        )
    }
}
