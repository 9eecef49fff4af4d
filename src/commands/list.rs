//! Search and paginate the recorded sales.

use crate::args::ListArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::pagination::{paginate, Page};
use crate::utils::pesos;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Write;

/// The data returned by `list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub page: Page<Transaction>,
    /// Revenue across every sale, not only the matches.
    pub total_revenue: u64,
}

/// Searches the sales, newest first, and returns the requested page. The page size comes from
/// `config.json`.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Listing>> {
    let booth = config.open_booth().await?;
    let matches: Vec<Transaction> = booth
        .search(args.query(), args.mode())
        .into_iter()
        .cloned()
        .collect();
    let page = paginate(&matches, args.page(), config.page_size());
    let total_revenue = booth.total_revenue();
    let message = render(&page, total_revenue);
    Ok(Out::new(
        message,
        Listing {
            page,
            total_revenue,
        },
    ))
}

fn render(page: &Page<Transaction>, total_revenue: u64) -> String {
    let mut s = String::new();
    if page.items.is_empty() {
        s.push_str("No sales found\n");
    }
    for t in &page.items {
        // Writing to a String cannot fail.
        let _ = writeln!(
            s,
            "{:<14} {:<11} {} -> {} [{}{}] {} | {} | {}",
            t.id(),
            t.date(),
            t.client(),
            t.nominee(),
            t.batch(),
            t.section().map(|sec| format!(", {sec}")).unwrap_or_default(),
            t.package_display(),
            t.status(),
            pesos(t.cost()),
        );
    }
    let _ = write!(
        s,
        "Page {} of {} ({} matching), total revenue {}",
        page.page,
        page.total_pages,
        page.total_items,
        pesos(total_revenue)
    );
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SearchMode;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_list_pages_and_revenue() {
        let env = TestEnv::new().await;
        for i in 0..9 {
            env.sell(&format!("Client {i}"), "Ben", &["Single Hit"]).await;
        }
        let newest = env.sell("Ana", "Zed", &["Double Hit"]).await;

        let out = list(env.config(), ListArgs::new("", SearchMode::Name, 1))
            .await
            .unwrap();
        let listing = out.data();
        assert_eq!(listing.page.total_pages, 2);
        assert_eq!(listing.page.items.len(), 7);
        assert_eq!(listing.page.items[0], newest);
        assert_eq!(listing.total_revenue, 9 * 50 + 100);
        assert!(out.message().contains("Page 1 of 2"), "{}", out.message());
        assert!(out.message().contains("₱550"), "{}", out.message());

        // Past the end shows the last page.
        let out = list(env.config(), ListArgs::new("", SearchMode::Name, 99))
            .await
            .unwrap();
        let listing = out.data();
        assert_eq!(listing.page.page, 2);
        assert_eq!(listing.page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_list_search_keeps_total_revenue() {
        let env = TestEnv::new().await;
        env.sell("Ana", "Ben", &["Single Hit"]).await;
        env.sell("Cy", "Dee", &["Double Hit"]).await;

        let out = list(env.config(), ListArgs::new("dee", SearchMode::Name, 1))
            .await
            .unwrap();
        let listing = out.data();
        assert_eq!(listing.page.items.len(), 1);
        assert_eq!(listing.page.items[0].nominee(), "Dee");
        assert_eq!(listing.total_revenue, 150);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let env = TestEnv::new().await;
        let out = list(env.config(), ListArgs::new("nobody", SearchMode::Batch, -1))
            .await
            .unwrap();
        let listing = out.data();
        assert_eq!(listing.page.total_pages, 1);
        assert!(out.message().starts_with("No sales found"));
    }
}
