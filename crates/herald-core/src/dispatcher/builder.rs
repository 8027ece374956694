//! Builder for `NotificationDispatcher`

use super::{DispatchInner, NotificationDispatcher};
use crate::collaborators::{
    EventSink, HostContext, LifecycleTracker, PresentationBuilder, PresentationSurface,
    SharedLifecycleTracker,
};
use crate::config::DispatchConfig;
use crate::coordinator::PresentationCoordinator;
use crate::error::{DispatchError, DispatchResult};
use crate::grouping::GroupState;
use crate::reporter::LifecycleReporter;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::Semaphore;

/// Wires collaborators into a `NotificationDispatcher`
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = NotificationDispatcher::builder(DispatchConfig::default())
///     .context(&host)
///     .presentation_builder(Arc::new(builder))
///     .surface(Arc::new(surface))
///     .event_sink(Arc::new(EventBus::default()))
///     .build()?;
/// ```
pub struct DispatcherBuilder {
    config: DispatchConfig,
    context: Option<Weak<HostContext>>,
    builder: Option<Arc<dyn PresentationBuilder>>,
    surface: Option<Arc<dyn PresentationSurface>>,
    tracker: Option<Arc<dyn LifecycleTracker>>,
    sink: Option<Arc<dyn EventSink>>,
    groups: Option<Arc<GroupState>>,
    runtime: Option<Handle>,
}

impl DispatcherBuilder {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            context: None,
            builder: None,
            surface: None,
            tracker: None,
            sink: None,
            groups: None,
            runtime: None,
        }
    }

    /// Host context. Only a weak reference is kept.
    pub fn context(mut self, context: &Arc<HostContext>) -> Self {
        self.context = Some(Arc::downgrade(context));
        self
    }

    pub fn presentation_builder(mut self, builder: Arc<dyn PresentationBuilder>) -> Self {
        self.builder = Some(builder);
        self
    }

    pub fn surface(mut self, surface: Arc<dyn PresentationSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Defaults to a tracker stuck in the foreground
    pub fn lifecycle_tracker(mut self, tracker: Arc<dyn LifecycleTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Share group bookkeeping with other dispatchers on the same surface.
    /// Defaults to a fresh `GroupState` bounded by `max_tracked_groups`.
    pub fn group_state(mut self, groups: Arc<GroupState>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Runtime to spawn dispatch units on. Defaults to the current one.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> DispatchResult<NotificationDispatcher> {
        self.config.validate()?;

        let context = self
            .context
            .ok_or_else(|| DispatchError::config("a host context is required"))?;
        let builder = self
            .builder
            .ok_or_else(|| DispatchError::config("a presentation builder is required"))?;
        let surface = self
            .surface
            .ok_or_else(|| DispatchError::config("a presentation surface is required"))?;
        let sink = self
            .sink
            .ok_or_else(|| DispatchError::config("an event sink is required"))?;
        let tracker = self
            .tracker
            .unwrap_or_else(|| Arc::new(SharedLifecycleTracker::default()) as Arc<dyn LifecycleTracker>);
        let groups = self
            .groups
            .unwrap_or_else(|| Arc::new(GroupState::with_limit(self.config.max_tracked_groups)));
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current()
                .map_err(|e| DispatchError::config(format!("no tokio runtime available: {}", e)))?,
        };

        let inner = DispatchInner {
            context,
            coordinator: PresentationCoordinator::new(builder, surface, tracker, groups),
            reporter: LifecycleReporter::new(sink, self.config.debug),
            stats: Default::default(),
        };

        Ok(NotificationDispatcher {
            permits: Arc::new(Semaphore::new(self.config.max_concurrent_dispatches)),
            inner: Arc::new(inner),
            runtime,
            config: self.config,
        })
    }
}
