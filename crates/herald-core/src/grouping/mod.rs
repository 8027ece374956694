//! Group summaries and the per-group bookkeeping shared by dispatch units

mod state;
mod summary;

pub use state::{DEFAULT_GROUP_LIMIT, GroupEntry, GroupGuard, GroupState};
pub use summary::{build_summary, next_notification_id};
