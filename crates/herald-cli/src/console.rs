//! Console collaborators: print instead of render

use async_trait::async_trait;
use dashmap::DashSet;
use herald_core::collaborators::{
    HostContext, PlatformNotification, PresentationBuilder, PresentationSurface,
};
use herald_core::{DispatchError, DispatchResult, NotificationLayout, NotificationRequest};
use serde_json::json;

/// Renders requests into a JSON payload
#[derive(Debug, Default)]
pub struct ConsoleBuilder;

#[async_trait]
impl PresentationBuilder for ConsoleBuilder {
    async fn build(
        &self,
        context: &HostContext,
        request: &NotificationRequest,
    ) -> DispatchResult<PlatformNotification> {
        if request.layout == NotificationLayout::BigPicture && request.big_picture.is_none() {
            return Err(DispatchError::build(
                request.id,
                "big picture layout requires a picture",
            ));
        }

        Ok(PlatformNotification {
            notification_id: request.id,
            channel_key: request.channel_key.clone(),
            group_key: request.group_key.clone(),
            group_summary: request.group_summary,
            content: json!({
                "app": context.app_id,
                "title": request.title,
                "body": request.body,
                "layout": request.layout,
                "big_picture": request.big_picture,
            }),
        })
    }
}

/// Prints notifications and tracks which groups have a member on screen
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    active_groups: DashSet<String>,
}

impl ConsoleSurface {
    pub fn render(notification: &PlatformNotification) -> String {
        let marker = if notification.group_summary {
            "[summary]"
        } else {
            "[notification]"
        };
        let group = notification
            .group_key
            .as_deref()
            .map(|g| format!(" group={}", g))
            .unwrap_or_default();
        format!(
            "{} #{} channel={}{} {}",
            marker,
            notification.notification_id,
            notification.channel_key,
            group,
            notification.content
        )
    }
}

#[async_trait]
impl PresentationSurface for ConsoleSurface {
    async fn present(
        &self,
        request: &NotificationRequest,
        notification: PlatformNotification,
    ) -> DispatchResult<()> {
        if let Some(group) = request.group() {
            self.active_groups.insert(group.to_string());
        }
        println!("{}", Self::render(&notification));
        Ok(())
    }

    async fn is_first_active_in_group(&self, group_key: &str) -> bool {
        !self.active_groups.contains(group_key)
    }
}
