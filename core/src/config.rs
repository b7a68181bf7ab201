// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule configuration for an engine instance

use serde::{Deserialize, Serialize};

/// Compensation added to White's area score by default
pub const DEFAULT_KOMI: f32 = 7.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Added to White's total when the game is scored
    #[serde(default = "default_komi")]
    pub komi: f32,
    /// Permit placements that leave the placed group without liberties.
    /// The group is removed and counted as captured by the opponent.
    #[serde(default)]
    pub allow_suicide: bool,
}

fn default_komi() -> f32 {
    DEFAULT_KOMI
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            komi: default_komi(),
            allow_suicide: false,
        }
    }
}
