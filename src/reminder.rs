//! A periodic reminder for the cashier. It only emits notifications and never touches the state.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::trace;

pub const DEFAULT_INTERVAL_MINUTES: u64 = 10;
pub const DEFAULT_MESSAGE: &str = "Time to check the supplies and update the buy list!";

/// The reminder settings stored in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Minutes between reminders, at least 1.
    pub interval_minutes: u64,
    pub message: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl ReminderSettings {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.max(1) * 60)
    }
}

/// Calls `notify` once per period, starting one period from now. Stops after `count` reminders,
/// or runs until the task is dropped when `count` is `None`. Returns how many reminders were sent.
pub async fn run_reminders<F>(settings: &ReminderSettings, count: Option<u64>, mut notify: F) -> u64
where
    F: FnMut(u64, &str),
{
    let mut ticker = interval(settings.period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let mut sent = 0;
    while count.map_or(true, |limit| sent < limit) {
        ticker.tick().await;
        sent += 1;
        trace!("reminder {sent}");
        notify(sent, &settings.message);
    }
    sent
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_period_is_at_least_a_minute() {
        let settings = ReminderSettings {
            interval_minutes: 0,
            message: String::new(),
        };
        assert_eq!(settings.period(), Duration::from_secs(60));
        assert_eq!(
            ReminderSettings::default().period(),
            Duration::from_secs(600)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminders_fire_each_period() {
        let settings = ReminderSettings::default();
        let start = Instant::now();
        let mut seen = Vec::new();
        let sent = run_reminders(&settings, Some(3), |n, message| {
            seen.push((n, message.to_string(), start.elapsed()));
        })
        .await;

        assert_eq!(sent, 3);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[0].1, DEFAULT_MESSAGE);
        assert_eq!(seen[0].2, Duration::from_secs(600));
        assert_eq!(seen[2].2, Duration::from_secs(1800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_count_sends_nothing() {
        let sent = run_reminders(&ReminderSettings::default(), Some(0), |_, _| {
            panic!("no reminder expected")
        })
        .await;
        assert_eq!(sent, 0);
    }
}
