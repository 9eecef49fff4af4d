use crate::args::SelectionArgs;
use crate::commands::Out;
use crate::pricing::{quote as live_total, Quote};
use crate::utils::pesos;
use crate::{Config, Result};

/// Computes the live total for a selection at the configured prices. Nothing is recorded.
pub async fn quote(config: Config, args: SelectionArgs) -> Result<Out<Quote>> {
    let selection = config
        .price_list()
        .select(args.packages(), args.addons(), args.extra())?;
    let q = live_total(&selection);
    let mut message = format!(
        "Packages {} + add-ons {} = {}",
        pesos(q.package_total),
        pesos(q.addon_total),
        pesos(q.base)
    );
    if let Some(extra) = &selection.extra {
        message.push_str(&format!(", {} {}", extra.label, pesos(q.extra_charge)));
    }
    message.push_str(&format!(", total {}", pesos(q.total)));
    Ok(Out::new(message, q))
}
