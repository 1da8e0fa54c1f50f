//! Threshold tracker.
//!
//! A pure transition function over [`TrackerState`]. Given the hours logged so
//! far this month and the previously persisted state, it works out which
//! thresholds have been crossed since the last run and which remain.
//!
//! ## Transitions
//!
//! ```text
//! (absent | other month) -> reset to configured thresholds -> partition
//! (same month)           ->                                   partition
//! ```
//!
//! The reported threshold is the *last* surpassed one in configured order,
//! not the largest. With ascending thresholds the two coincide.

use serde::{Deserialize, Serialize};

/// Persisted record of thresholds not yet notified for a month.
///
/// Field names match the on-disk format written by earlier releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Tracked period, formatted `YYYY-MM`.
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "RemainingThresholds", default)]
    pub remaining_thresholds: Vec<u32>,
}

impl TrackerState {
    /// Fresh state for `month` with every configured threshold pending.
    pub fn new(month: &str, configured: &[u32]) -> Self {
        Self {
            month: month.to_string(),
            remaining_thresholds: configured.to_vec(),
        }
    }
}

/// Outcome of one [`advance`] step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub state: TrackerState,
    /// Last threshold (in configured order) newly reached, if any.
    pub surpassed: Option<u32>,
    /// Whether `state.remaining_thresholds` shrank during this step.
    pub changed: bool,
}

impl Advance {
    /// Threshold value as shown to the user, `0` when none was surpassed.
    pub fn notification_threshold(&self) -> u32 {
        self.surpassed.unwrap_or(0)
    }
}

/// Advance the tracker by one run.
///
/// `previous` is `None` on first run or when the stored record could not be
/// read. A state recorded for another month is discarded. Thresholds are
/// only ever removed from the returned state, never added back.
pub fn advance(
    previous: Option<TrackerState>,
    configured: &[u32],
    current_hours: u64,
    current_month: &str,
) -> Advance {
    let mut state = match previous {
        Some(state) if state.month == current_month => state,
        Some(stale) => {
            tracing::info!(
                previous = %stale.month,
                current = %current_month,
                "Month rolled over, resetting thresholds"
            );
            TrackerState::new(current_month, configured)
        }
        None => TrackerState::new(current_month, configured),
    };

    let mut retained = Vec::with_capacity(state.remaining_thresholds.len());
    let mut surpassed = None;
    for &threshold in &state.remaining_thresholds {
        if current_hours >= u64::from(threshold) {
            surpassed = Some(threshold);
        } else {
            retained.push(threshold);
        }
    }

    let changed = surpassed.is_some() && retained.len() < state.remaining_thresholds.len();
    if changed {
        state.remaining_thresholds = retained;
    }

    Advance {
        state,
        surpassed,
        changed,
    }
}
