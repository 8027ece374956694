//! Snapshot of a dispatched notification, as seen by event listeners

use super::lifecycle::AppLifecycleState;
use super::request::{NotificationRequest, NotificationSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedNotification {
    pub id: i32,
    pub channel_key: String,
    pub group_key: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub summary: Option<String>,
    pub payload: BTreeMap<String, String>,
    pub created_source: NotificationSource,
    pub created_lifecycle: Option<AppLifecycleState>,
    pub displayed_lifecycle: Option<AppLifecycleState>,
    pub created_at: Option<DateTime<Utc>>,
    pub displayed_at: Option<DateTime<Utc>>,
    pub group_summary: bool,
}

impl From<&NotificationRequest> for ReceivedNotification {
    fn from(request: &NotificationRequest) -> Self {
        Self {
            id: request.id,
            channel_key: request.channel_key.clone(),
            group_key: request.group_key.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
            summary: request.summary.clone(),
            payload: request.payload.clone(),
            created_source: request.created_source,
            created_lifecycle: request.created_lifecycle,
            displayed_lifecycle: request.displayed_lifecycle,
            created_at: request.created_at,
            displayed_at: request.displayed_at,
            group_summary: request.group_summary,
        }
    }
}
