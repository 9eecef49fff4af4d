use crate::args::RemindArgs;
use crate::commands::Out;
use crate::reminder::run_reminders;
use crate::{Config, Result};
use tracing::info;

/// Logs the configured reminder message every `interval_minutes`. Runs until interrupted unless
/// `args.count()` is given.
pub async fn remind(config: Config, args: RemindArgs) -> Result<Out<u64>> {
    let settings = config.reminder().clone();
    info!(
        "Reminding every {} minute{}",
        settings.interval_minutes,
        if settings.interval_minutes == 1 { "" } else { "s" }
    );
    let sent = run_reminders(&settings, args.count(), |n, message| {
        info!("Reminder {n}: {message}");
    })
    .await;
    Ok(Out::new(format!("Sent {sent} reminders"), sent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test(start_paused = true)]
    async fn test_remind_count() {
        let env = TestEnv::new().await;
        let out = remind(env.config(), RemindArgs::new(Some(2))).await.unwrap();
        assert_eq!(out.data(), &2);
    }
}
