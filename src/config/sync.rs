//! Configuration for observer synchronization.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for observer synchronization.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between periodic snapshots while a charge is active.
    pub push_interval: f32,

    /// Rate (1/s) at which observers ease their displayed progress toward
    /// the latest received value.
    pub smoothing_rate: f32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            push_interval: 0.1,
            smoothing_rate: 12.0,
        }
    }
}
