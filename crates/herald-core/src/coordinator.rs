//! Presentation coordinator
//!
//! Applies the display policy, builds the platform object, fronts a group with
//! its summary when the request is the group's first active member, and shows
//! the request on the presentation surface.

use crate::collaborators::{HostContext, LifecycleTracker, PresentationBuilder, PresentationSurface};
use crate::error::DispatchResult;
use crate::grouping::{GroupState, build_summary};
use crate::model::{NotificationLayout, NotificationRequest};
use crate::policy::should_display;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// What a presentation attempt produced
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub request: NotificationRequest,
    /// Whether the request was actually shown
    pub displayed: bool,
    /// Summary shown ahead of the request, if it opened its group
    pub summary: Option<NotificationRequest>,
}

impl Presentation {
    /// A request that was deliberately not shown
    pub fn hidden(request: NotificationRequest) -> Self {
        Self {
            request,
            displayed: false,
            summary: None,
        }
    }
}

pub struct PresentationCoordinator {
    builder: Arc<dyn PresentationBuilder>,
    surface: Arc<dyn PresentationSurface>,
    tracker: Arc<dyn LifecycleTracker>,
    groups: Arc<GroupState>,
}

impl PresentationCoordinator {
    pub fn new(
        builder: Arc<dyn PresentationBuilder>,
        surface: Arc<dyn PresentationSurface>,
        tracker: Arc<dyn LifecycleTracker>,
        groups: Arc<GroupState>,
    ) -> Self {
        Self {
            builder,
            surface,
            tracker,
            groups,
        }
    }

    pub fn groups(&self) -> &Arc<GroupState> {
        &self.groups
    }

    /// Present `request`.
    ///
    /// A request suppressed by the display policy is not a failure: it comes
    /// back untouched with `displayed == false`. Collaborator failures are
    /// logged here and returned, meaning nothing became visible.
    pub async fn present(
        &self,
        context: &HostContext,
        request: NotificationRequest,
    ) -> DispatchResult<Presentation> {
        let id = request.id;
        self.try_present(context, request).await.inspect_err(|e| {
            error!(notification_id = id, error = %e, "Failed to present notification");
        })
    }

    async fn try_present(
        &self,
        context: &HostContext,
        mut request: NotificationRequest,
    ) -> DispatchResult<Presentation> {
        let state = self.tracker.current_state();
        if !should_display(state, &request) {
            debug!(
                notification_id = request.id,
                lifecycle = %state,
                "Display policy suppressed notification"
            );
            return Ok(Presentation::hidden(request));
        }

        let notification = self.builder.build(context, &request).await?;

        let summary = match self.summary_group(context, &request) {
            Some(group_key) => {
                let mut group = self.groups.lock(&group_key).await;

                let summary = if self.surface.is_first_active_in_group(&group_key).await {
                    let summary = build_summary(&request);
                    let summary_notification = self.builder.build(context, &summary).await?;
                    self.surface.present(&summary, summary_notification).await?;
                    group.activate(summary.id);
                    debug!(
                        notification_id = request.id,
                        summary_id = summary.id,
                        group_key = %group_key,
                        "Presented group summary"
                    );
                    Some(summary)
                } else {
                    None
                };

                self.surface
                    .present(&request, notification)
                    .await
                    .inspect_err(|e| {
                        if let Some(summary) = &summary {
                            warn!(
                                notification_id = request.id,
                                summary_id = summary.id,
                                group_key = %group_key,
                                error = %e,
                                "Group summary left without its first member"
                            );
                        }
                    })?;
                group.members_shown += 1;
                summary
            }
            None => {
                self.surface.present(&request, notification).await?;
                None
            }
        };

        request.mark_displayed(state);
        Ok(Presentation {
            request,
            displayed: true,
            summary,
        })
    }

    /// Group key to summarize under, when grouping applies to `request`
    fn summary_group(&self, context: &HostContext, request: &NotificationRequest) -> Option<String> {
        if !context.supports_grouping || request.layout != NotificationLayout::Default {
            return None;
        }
        request.group().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        MockLifecycleTracker, MockPresentationBuilder, MockPresentationSurface,
        PlatformNotification,
    };
    use crate::error::DispatchError;
    use crate::model::AppLifecycleState;

    fn platform(request: &NotificationRequest) -> PlatformNotification {
        PlatformNotification {
            notification_id: request.id,
            channel_key: request.channel_key.clone(),
            group_key: request.group_key.clone(),
            group_summary: request.group_summary,
            content: serde_json::Value::Null,
        }
    }

    fn tracker(state: AppLifecycleState) -> Arc<MockLifecycleTracker> {
        let mut tracker = MockLifecycleTracker::new();
        tracker.expect_current_state().return_const(state);
        Arc::new(tracker)
    }

    fn echo_builder(times: usize) -> MockPresentationBuilder {
        let mut builder = MockPresentationBuilder::new();
        builder
            .expect_build()
            .times(times)
            .returning(|_, request| Ok(platform(request)));
        builder
    }

    fn coordinator(
        builder: MockPresentationBuilder,
        surface: MockPresentationSurface,
        state: AppLifecycleState,
    ) -> PresentationCoordinator {
        PresentationCoordinator::new(
            Arc::new(builder),
            Arc::new(surface),
            tracker(state),
            Arc::new(GroupState::new()),
        )
    }

    #[tokio::test]
    async fn test_ungrouped_request_is_presented_once() {
        let mut surface = MockPresentationSurface::new();
        surface.expect_is_first_active_in_group().never();
        surface
            .expect_present()
            .times(1)
            .withf(|request, _| request.id == 1)
            .returning(|_, _| Ok(()));

        let coordinator = coordinator(echo_builder(1), surface, AppLifecycleState::Foreground);
        let request = NotificationRequest::new(1, "c").with_title("Hi");
        let presentation = coordinator
            .present(&HostContext::new("app"), request)
            .await
            .unwrap();

        assert!(presentation.displayed);
        assert!(presentation.summary.is_none());
        assert_eq!(
            presentation.request.displayed_lifecycle,
            Some(AppLifecycleState::Foreground)
        );
    }

    #[tokio::test]
    async fn test_policy_suppression_is_a_no_op() {
        let mut builder = MockPresentationBuilder::new();
        builder.expect_build().never();
        let mut surface = MockPresentationSurface::new();
        surface.expect_present().never();

        let coordinator = coordinator(builder, surface, AppLifecycleState::Background);
        let request = NotificationRequest::new(2, "c")
            .with_title("Hi")
            .with_display(true, false);
        let presentation = coordinator
            .present(&HostContext::new("app"), request.clone())
            .await
            .unwrap();

        assert!(!presentation.displayed);
        assert_eq!(presentation.request, request);
    }

    #[tokio::test]
    async fn test_first_member_gets_summary() {
        let mut surface = MockPresentationSurface::new();
        surface
            .expect_is_first_active_in_group()
            .withf(|key| key == "chat")
            .times(1)
            .return_const(true);
        surface.expect_present().times(2).returning(|_, _| Ok(()));

        let coordinator = coordinator(echo_builder(2), surface, AppLifecycleState::Foreground);
        let request = NotificationRequest::new(3, "c")
            .with_title("Hi")
            .with_group("chat")
            .with_large_icon("asset://me.png");
        let presentation = coordinator
            .present(&HostContext::new("app"), request)
            .await
            .unwrap();

        let summary = presentation.summary.expect("summary presented");
        assert!(summary.group_summary);
        assert_ne!(summary.id, 3);
        assert!(summary.large_icon.is_none());
        assert_eq!(presentation.request.large_icon.as_deref(), Some("asset://me.png"));

        let entry = coordinator.groups().entry("chat").await.unwrap();
        assert_eq!(entry.summary_id, Some(summary.id));
        assert_eq!(entry.members_shown, 1);
    }

    #[tokio::test]
    async fn test_later_member_skips_summary() {
        let mut surface = MockPresentationSurface::new();
        surface
            .expect_is_first_active_in_group()
            .return_const(false);
        surface.expect_present().times(1).returning(|_, _| Ok(()));

        let coordinator = coordinator(echo_builder(1), surface, AppLifecycleState::Foreground);
        let request = NotificationRequest::new(4, "c").with_title("Hi").with_group("chat");
        let presentation = coordinator
            .present(&HostContext::new("app"), request)
            .await
            .unwrap();

        assert!(presentation.displayed);
        assert!(presentation.summary.is_none());
    }

    #[tokio::test]
    async fn test_no_summary_without_grouping_support_or_default_layout() {
        let mut surface = MockPresentationSurface::new();
        surface.expect_is_first_active_in_group().never();
        surface.expect_present().times(2).returning(|_, _| Ok(()));

        let coordinator = coordinator(echo_builder(2), surface, AppLifecycleState::Foreground);

        let request = NotificationRequest::new(5, "c").with_title("Hi").with_group("chat");
        let no_grouping = HostContext::new("app").with_grouping(false);
        let presentation = coordinator.present(&no_grouping, request).await.unwrap();
        assert!(presentation.summary.is_none());

        let request = NotificationRequest::new(6, "c")
            .with_title("Hi")
            .with_group("chat")
            .with_layout(NotificationLayout::BigText);
        let presentation = coordinator
            .present(&HostContext::new("app"), request)
            .await
            .unwrap();
        assert!(presentation.summary.is_none());
    }

    #[tokio::test]
    async fn test_surface_failure_is_returned() {
        let mut surface = MockPresentationSurface::new();
        surface
            .expect_present()
            .returning(|request, _| Err(DispatchError::present(request.id, "surface gone")));

        let coordinator = coordinator(echo_builder(1), surface, AppLifecycleState::Foreground);
        let request = NotificationRequest::new(7, "c").with_title("Hi");
        let result = coordinator.present(&HostContext::new("app"), request).await;
        assert!(matches!(result, Err(DispatchError::Present { id: 7, .. })));
    }

    #[tokio::test]
    async fn test_failed_first_member_keeps_summary_bookkeeping() {
        let mut surface = MockPresentationSurface::new();
        surface.expect_is_first_active_in_group().return_const(true);
        surface.expect_present().times(2).returning(|request, _| {
            if request.group_summary {
                Ok(())
            } else {
                Err(DispatchError::present(request.id, "surface gone"))
            }
        });

        let coordinator = coordinator(echo_builder(2), surface, AppLifecycleState::Foreground);
        let request = NotificationRequest::new(9, "c").with_title("Hi").with_group("chat");
        let result = coordinator.present(&HostContext::new("app"), request).await;
        assert!(matches!(result, Err(DispatchError::Present { id: 9, .. })));

        let entry = coordinator.groups().entry("chat").await.unwrap();
        assert!(entry.summary_id.is_some());
        assert_eq!(entry.activations, 1);
        assert_eq!(entry.members_shown, 0);
    }

    #[tokio::test]
    async fn test_build_failure_is_returned() {
        let mut builder = MockPresentationBuilder::new();
        builder
            .expect_build()
            .returning(|_, request| Err(DispatchError::build(request.id, "bad layout")));
        let mut surface = MockPresentationSurface::new();
        surface.expect_present().never();

        let coordinator = coordinator(builder, surface, AppLifecycleState::Foreground);
        let request = NotificationRequest::new(8, "c").with_title("Hi");
        let result = coordinator.present(&HostContext::new("app"), request).await;
        assert!(matches!(result, Err(DispatchError::Build { id: 8, .. })));
    }
}
