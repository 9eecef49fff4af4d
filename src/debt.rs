//! Progress toward the fundraising goal that the booth's revenue is meant to pay off.

use serde::{Deserialize, Serialize};

/// The fundraising goal used when `config.json` does not set one.
pub const DEFAULT_DEBT_GOAL: u64 = 10_000;

/// Where revenue stands against the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Standing {
    /// Revenue has not reached the goal yet; `remaining` is still owed.
    InProgress { remaining: u64 },
    /// Revenue met or exceeded the goal; `surplus` is profit.
    GoalMet { surplus: u64 },
}

/// A derived view of revenue against the goal. Holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtProgress {
    pub revenue: u64,
    pub goal: u64,
    /// `revenue / goal * 100`, clamped to `[0, 100]`. A goal of 0 counts as fully met.
    pub percentage: f64,
    pub standing: Standing,
}

pub fn debt_progress(revenue: u64, goal: u64) -> DebtProgress {
    let remaining = i128::from(goal) - i128::from(revenue);
    let percentage = if goal == 0 {
        100.0
    } else {
        (revenue as f64 / goal as f64 * 100.0).clamp(0.0, 100.0)
    };
    let standing = if remaining <= 0 {
        Standing::GoalMet {
            surplus: u64::try_from(-remaining).unwrap_or(u64::MAX),
        }
    } else {
        Standing::InProgress {
            remaining: u64::try_from(remaining).unwrap_or(u64::MAX),
        }
    };
    DebtProgress {
        revenue,
        goal,
        percentage,
        standing,
    }
}
