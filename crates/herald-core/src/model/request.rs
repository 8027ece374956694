//! Notification request model

use super::lifecycle::AppLifecycleState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visual layout of a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLayout {
    #[default]
    Default,
    BigPicture,
    BigText,
    Inbox,
    ProgressBar,
    Messaging,
    MessagingGroup,
    MediaPlayer,
}

/// How a request originated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSource {
    #[default]
    Local,
    Schedule,
    ForegroundService,
    Firebase,
    OneSignal,
    #[serde(rename = "jpush")]
    JPush,
}

/// A single notification's description and display intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationRequest {
    pub id: i32,
    pub channel_key: String,
    pub group_key: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub summary: Option<String>,
    pub layout: NotificationLayout,
    pub display_on_foreground: bool,
    pub display_on_background: bool,
    pub created_source: NotificationSource,
    pub large_icon: Option<String>,
    pub big_picture: Option<String>,
    pub payload: BTreeMap<String, String>,
    pub group_summary: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub created_lifecycle: Option<AppLifecycleState>,
    pub displayed_at: Option<DateTime<Utc>>,
    pub displayed_lifecycle: Option<AppLifecycleState>,
}

impl Default for NotificationRequest {
    fn default() -> Self {
        Self {
            id: 0,
            channel_key: "basic_channel".to_string(),
            group_key: None,
            title: None,
            body: None,
            summary: None,
            layout: NotificationLayout::Default,
            display_on_foreground: true,
            display_on_background: true,
            created_source: NotificationSource::Local,
            large_icon: None,
            big_picture: None,
            payload: BTreeMap::new(),
            group_summary: false,
            created_at: None,
            created_lifecycle: None,
            displayed_at: None,
            displayed_lifecycle: None,
        }
    }
}

impl NotificationRequest {
    pub fn new(id: i32, channel_key: impl Into<String>) -> Self {
        Self {
            id,
            channel_key: channel_key.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_group(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    pub fn with_layout(mut self, layout: NotificationLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_display(mut self, on_foreground: bool, on_background: bool) -> Self {
        self.display_on_foreground = on_foreground;
        self.display_on_background = on_background;
        self
    }

    pub fn with_source(mut self, source: NotificationSource) -> Self {
        self.created_source = source;
        self
    }

    pub fn with_large_icon(mut self, uri: impl Into<String>) -> Self {
        self.large_icon = Some(uri.into());
        self
    }

    pub fn with_big_picture(mut self, uri: impl Into<String>) -> Self {
        self.big_picture = Some(uri.into());
        self
    }

    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// True when title or body is non-empty. Requests without content are silent.
    pub fn has_content(&self) -> bool {
        let filled = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.title) || filled(&self.body)
    }

    /// The group key, if present and non-empty
    pub fn group(&self) -> Option<&str> {
        self.group_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Stamp a successful presentation
    pub fn mark_displayed(&mut self, lifecycle: AppLifecycleState) {
        self.displayed_at = Some(Utc::now());
        self.displayed_lifecycle = Some(lifecycle);
    }
}
