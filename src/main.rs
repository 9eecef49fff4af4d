use booth_ledger::args::{Args, Command, MaterialsCommand};
use booth_ledger::{commands, Config, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().booth_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Sell(sell_args) => {
            let config = Config::load(home).await?;
            commands::sell(config, sell_args.clone()).await?.print()
        }

        Command::Update(update_args) => {
            let config = Config::load(home).await?;
            commands::update(config, update_args.clone()).await?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            commands::delete(config, delete_args.clone()).await?.print()
        }

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            commands::list(config, list_args.clone()).await?.print()
        }

        Command::Quote(selection_args) => {
            let config = Config::load(home).await?;
            commands::quote(config, selection_args.clone())
                .await?
                .print()
        }

        Command::Materials(materials_args) => {
            let config = Config::load(home).await?;
            match materials_args.action() {
                MaterialsCommand::Show => commands::materials_show(config).await?.print(),
                MaterialsCommand::Set { name, field, value } => {
                    commands::materials_set(config, &name, field, &value)
                        .await?
                        .print()
                }
                MaterialsCommand::Cost { name, value } => {
                    commands::materials_cost(config, &name, &value)
                        .await?
                        .print()
                }
            }
        }

        Command::Debt => commands::debt(Config::load(home).await?).await?.print(),

        Command::Export(export_args) => {
            let config = Config::load(home).await?;
            commands::export(config, export_args.clone()).await?.print()
        }

        Command::Import(import_args) => {
            let config = Config::load(home).await?;
            commands::import(config, import_args.clone()).await?.print()
        }

        Command::Remind(remind_args) => {
            let config = Config::load(home).await?;
            commands::remind(config, remind_args.clone()).await?.print()
        }
    };
    Ok(())
}

/// Sends events to stderr so that `booth export` can write the data itself to stdout.
pub fn init_logger(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` when it is set and parses, otherwise `level` for the booth's own targets only.
fn log_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(booth_directives(level)))
}

fn booth_directives(level: LevelFilter) -> String {
    [env!("CARGO_CRATE_NAME"), "booth_ledger"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booth_directives() {
        let directives = booth_directives(LevelFilter::DEBUG);
        assert!(directives.contains("booth_ledger=debug"), "{directives}");
        assert_eq!(directives.split(',').count(), 2);
    }
}
