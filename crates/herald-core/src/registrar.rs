//! Lifecycle event registration
//!
//! Classifies a request as created and/or meant to be displayed. Registration
//! stamps the creation metadata on the request, so a request that was already
//! registered once (a re-dispatched schedule, for instance) is never counted as
//! created a second time.

use crate::model::{AppLifecycleState, LifecycleFlags, NotificationRequest, NotificationSource};
use chrono::Utc;

/// Register a request at the start of its dispatch unit.
///
/// `displayed` in the returned flags is only the intent. The dispatcher clears
/// it unless the coordinator actually showed the notification.
pub fn register(
    request: &mut NotificationRequest,
    lifecycle: AppLifecycleState,
    source: NotificationSource,
) -> LifecycleFlags {
    let created = if request.created_at.is_none() {
        request.created_at = Some(Utc::now());
        request.created_lifecycle = Some(lifecycle);
        request.created_source = source;
        true
    } else {
        false
    };

    LifecycleFlags::new(created, request.has_content())
}
