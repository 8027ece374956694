//! Summary request derivation

use crate::model::{NotificationLayout, NotificationRequest};
use uuid::Uuid;

/// Random positive 31-bit notification id
pub fn next_notification_id() -> i32 {
    (Uuid::new_v4().as_u128() & i32::MAX as u128) as i32
}

/// Derive the summary request for the group `original` belongs to.
///
/// The summary is a deep copy with a fresh id, the default layout and no
/// per-item media. `original` is left untouched.
pub fn build_summary(original: &NotificationRequest) -> NotificationRequest {
    let mut summary = original.clone();

    summary.id = loop {
        let id = next_notification_id();
        if id != 0 && id != original.id {
            break id;
        }
    };
    summary.layout = NotificationLayout::Default;
    summary.large_icon = None;
    summary.big_picture = None;
    summary.group_summary = true;

    summary
}
