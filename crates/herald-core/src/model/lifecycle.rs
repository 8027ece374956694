//! Application lifecycle state and per-request lifecycle flags

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the host application is currently foregrounded or backgrounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppLifecycleState {
    Foreground,
    Background,
}

impl AppLifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
        }
    }
}

impl fmt::Display for AppLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppLifecycleState {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "foreground" => Ok(Self::Foreground),
            "background" => Ok(Self::Background),
            other => Err(DispatchError::invalid_state(format!(
                "'{}' is not a known lifecycle state",
                other
            ))),
        }
    }
}

/// Lifecycle milestones computed once per request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleFlags {
    pub created: bool,
    pub displayed: bool,
}

impl LifecycleFlags {
    pub const NONE: Self = Self {
        created: false,
        displayed: false,
    };

    pub fn new(created: bool, displayed: bool) -> Self {
        Self { created, displayed }
    }

    /// Milestones that occurred, created before displayed
    pub fn milestones(&self) -> Vec<&'static str> {
        let mut taken = Vec::with_capacity(2);
        if self.created {
            taken.push("created");
        }
        if self.displayed {
            taken.push("displayed");
        }
        taken
    }

    pub fn is_empty(&self) -> bool {
        !self.created && !self.displayed
    }
}
