//! Display policy: whether a request may become visible in the current app state

use crate::model::{AppLifecycleState, NotificationRequest};

/// Foreground consults `display_on_foreground`, Background `display_on_background`.
///
/// Unrecognized states cannot reach this point; they are rejected when parsing
/// an `AppLifecycleState`.
pub fn should_display(state: AppLifecycleState, request: &NotificationRequest) -> bool {
    match state {
        AppLifecycleState::Foreground => request.display_on_foreground,
        AppLifecycleState::Background => request.display_on_background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_uses_foreground_flag() {
        let request = NotificationRequest::new(1, "c").with_display(true, false);
        assert!(should_display(AppLifecycleState::Foreground, &request));

        let request = NotificationRequest::new(1, "c").with_display(false, true);
        assert!(!should_display(AppLifecycleState::Foreground, &request));
    }

    #[test]
    fn test_background_uses_background_flag() {
        let request = NotificationRequest::new(1, "c").with_display(true, false);
        assert!(!should_display(AppLifecycleState::Background, &request));

        let request = NotificationRequest::new(1, "c").with_display(false, true);
        assert!(should_display(AppLifecycleState::Background, &request));
    }
}
