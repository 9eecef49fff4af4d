//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::{Config, Result};

/// Deletes the sale with `args.id()` and returns whether one was removed. An id that does not
/// exist is reported but is not an error.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<bool>> {
    let mut booth = config.open_booth().await?;
    let removed = booth.delete_transaction(args.id()).await?;
    let message = if removed {
        format!("Deleted sale {}", args.id())
    } else {
        format!("No sale with id {}, nothing was deleted", args.id())
    };
    Ok(Out::new(message, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete() {
        let env = TestEnv::new().await;
        let first = env.sell("Ana", "Ben", &["Single Hit"]).await;
        let second = env.sell("Cy", "Dee", &["Double Hit"]).await;

        let out = delete(env.config(), DeleteArgs::new(first.id()))
            .await
            .unwrap();
        assert_eq!(out.data(), &true);
        assert!(out.message().contains("Deleted sale"));

        let booth = env.booth().await;
        assert_eq!(booth.state().transactions(), &[second]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_a_no_op() {
        let env = TestEnv::new().await;
        let sold = env.sell("Ana", "Ben", &["Single Hit"]).await;
        let before = env.booth().await.state().clone();

        let out = delete(env.config(), DeleteArgs::new(sold.id() + 1))
            .await
            .unwrap();
        assert_eq!(out.data(), &false);
        assert_eq!(env.booth().await.state(), &before);
    }
}
