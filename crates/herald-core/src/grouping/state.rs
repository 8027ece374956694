//! Per-group bookkeeping shared across concurrent dispatch units

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// What the runtime knows about one group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupEntry {
    /// Summary presented for the current "first active" transition
    pub summary_id: Option<i32>,
    /// Members shown since that transition
    pub members_shown: u32,
    /// How many times the group became active
    pub activations: u32,
}

impl GroupEntry {
    /// Start a new activation fronted by `summary_id`
    pub fn activate(&mut self, summary_id: i32) {
        self.summary_id = Some(summary_id);
        self.members_shown = 0;
        self.activations += 1;
    }
}

/// Exclusive access to one group's entry
pub type GroupGuard = OwnedMutexGuard<GroupEntry>;

/// Tracked groups kept before idle slots are pruned
pub const DEFAULT_GROUP_LIMIT: usize = 1024;

/// Group membership state, one lock per group key
///
/// The first-active check and everything it decides must happen while holding
/// the group's guard, otherwise two units could both claim the summary.
///
/// A slot is idle when the map holds the only reference to it: no guard is
/// alive and no unit is waiting on it. Only idle slots are ever removed, and
/// the check runs under the map's shard lock, so a removed mutex can never be
/// held by anyone.
#[derive(Debug)]
pub struct GroupState {
    groups: DashMap<String, Arc<Mutex<GroupEntry>>>,
    limit: usize,
}

impl Default for GroupState {
    fn default() -> Self {
        Self::with_limit(DEFAULT_GROUP_LIMIT)
    }
}

impl GroupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prune idle slots whenever more than `limit` groups are tracked
    pub fn with_limit(limit: usize) -> Self {
        Self {
            groups: DashMap::new(),
            limit: limit.max(1),
        }
    }

    /// Lock the entry for `group_key`, creating it on first use
    pub async fn lock(&self, group_key: &str) -> GroupGuard {
        let slot = Arc::clone(&*self.groups.entry(group_key.to_string()).or_default());
        if self.groups.len() > self.limit {
            let pruned = self.prune_idle();
            debug!(pruned, tracked = self.groups.len(), "Pruned idle group slots");
        }
        slot.lock_owned().await
    }

    /// Current entry for `group_key`, waiting for in-flight units on it
    pub async fn entry(&self, group_key: &str) -> Option<GroupEntry> {
        let slot = self.groups.get(group_key).map(|slot| Arc::clone(&*slot))?;
        let entry = slot.lock().await;
        Some(entry.clone())
    }

    /// Drop the bookkeeping for a group the host dismissed.
    ///
    /// Returns `false` when the group is unknown or still in use; a busy group
    /// keeps its slot so later units queue on the same lock.
    pub fn forget(&self, group_key: &str) -> bool {
        self.groups
            .remove_if(group_key, |_, slot| Arc::strong_count(slot) == 1)
            .is_some()
    }

    /// Remove every idle slot, returning how many were dropped
    pub fn prune_idle(&self) -> usize {
        let before = self.groups.len();
        self.groups.retain(|_, slot| Arc::strong_count(slot) > 1);
        before.saturating_sub(self.groups.len())
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
