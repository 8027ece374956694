//! Notification data model
//!
//! Requests, lifecycle states and the snapshots handed to event listeners.

mod lifecycle;
mod received;
mod request;

pub use lifecycle::{AppLifecycleState, LifecycleFlags};
pub use received::ReceivedNotification;
pub use request::{NotificationLayout, NotificationRequest, NotificationSource};
