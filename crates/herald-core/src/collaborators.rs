//! Interfaces of the collaborators the pipeline drives
//!
//! Building the platform object, rendering it, tracking the app lifecycle and
//! delivering lifecycle events all live outside the dispatch core. The pipeline
//! only sees these traits.

use crate::error::DispatchResult;
use crate::model::{AppLifecycleState, NotificationRequest, ReceivedNotification};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Host application context a dispatch unit runs against
///
/// Dispatchers only hold a weak reference to it; a unit that starts after the
/// host dropped its context fails with `ContextUnavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub app_id: String,
    /// Whether the presentation surface supports grouped notifications
    pub supports_grouping: bool,
}

impl HostContext {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            supports_grouping: true,
        }
    }

    pub fn with_grouping(mut self, supports_grouping: bool) -> Self {
        self.supports_grouping = supports_grouping;
        self
    }
}

/// Platform-presentable object produced by a `PresentationBuilder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformNotification {
    pub notification_id: i32,
    pub channel_key: String,
    pub group_key: Option<String>,
    pub group_summary: bool,
    /// Opaque, platform specific rendering data
    pub content: serde_json::Value,
}

/// Builds the platform object for a request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresentationBuilder: Send + Sync {
    /// # Errors
    ///
    /// Returns `DispatchError::Build` when the request content is malformed.
    async fn build(
        &self,
        context: &HostContext,
        request: &NotificationRequest,
    ) -> DispatchResult<PlatformNotification>;
}

/// The rendering surface notifications are shown on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresentationSurface: Send + Sync {
    /// # Errors
    ///
    /// Returns `DispatchError::Present` when the surface refuses the notification.
    async fn present(
        &self,
        request: &NotificationRequest,
        notification: PlatformNotification,
    ) -> DispatchResult<()>;

    /// Whether no member of `group_key` is currently shown.
    ///
    /// Callers must hold the group's lock in `GroupState`.
    async fn is_first_active_in_group(&self, group_key: &str) -> bool;
}

/// Source of the process-wide application lifecycle state
#[cfg_attr(test, mockall::automock)]
pub trait LifecycleTracker: Send + Sync {
    fn current_state(&self) -> AppLifecycleState;
}

/// Receives created/displayed milestones. Fire and forget.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    fn notify_created(&self, notification: &ReceivedNotification);

    fn notify_displayed(&self, notification: &ReceivedNotification);
}

/// In-process lifecycle tracker the host flips on foreground/background transitions
#[derive(Debug)]
pub struct SharedLifecycleTracker {
    state: RwLock<AppLifecycleState>,
}

impl SharedLifecycleTracker {
    pub fn new(initial: AppLifecycleState) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    pub fn set(&self, state: AppLifecycleState) {
        *self.state.write() = state;
    }
}

impl Default for SharedLifecycleTracker {
    fn default() -> Self {
        Self::new(AppLifecycleState::Foreground)
    }
}

impl LifecycleTracker for SharedLifecycleTracker {
    fn current_state(&self) -> AppLifecycleState {
        *self.state.read()
    }
}
