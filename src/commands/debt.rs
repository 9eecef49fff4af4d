use crate::commands::Out;
use crate::debt::{DebtProgress, Standing};
use crate::utils::pesos;
use crate::{Config, Result};

/// Shows the total revenue against the fundraising goal from `config.json`.
pub async fn debt(config: Config) -> Result<Out<DebtProgress>> {
    let booth = config.open_booth().await?;
    let progress = booth.debt_progress(config.debt_goal());
    let standing = match progress.standing {
        Standing::InProgress { remaining } => format!("{} still owed", pesos(remaining)),
        Standing::GoalMet { surplus } => format!("goal met, {} profit", pesos(surplus)),
    };
    let message = format!(
        "Revenue {} of {} ({:.1}%), {standing}",
        pesos(progress.revenue),
        pesos(progress.goal),
        progress.percentage
    );
    Ok(Out::new(message, progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_debt() {
        let env = TestEnv::new().await;
        env.sell("Ana", "Ben", &["Triple Hit"]).await;
        env.sell("Cy", "Dee", &["Double Hit"]).await;

        let out = debt(env.config()).await.unwrap();
        let progress = out.data();
        assert_eq!(progress.revenue, 250);
        assert_eq!(progress.goal, 10_000);
        assert_eq!(progress.standing, Standing::InProgress { remaining: 9_750 });
        assert_eq!(
            out.message(),
            "Revenue ₱250 of ₱10,000 (2.5%), ₱9,750 still owed"
        );
    }
}
