//! These structs provide the CLI interface for the booth CLI.

use crate::ledger::SearchMode;
use crate::model::{MaterialField, Status};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// booth: A command-line cashier for a fundraising booth.
///
/// Records each sale with the packages and add-ons chosen, keeps a live total, tracks the
/// materials that need restocking, and shows how far the revenue has come toward paying off the
/// fundraising goal. Everything is kept in a JSON file in the booth home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the booth home directory, its config.json and an empty data file.
    ///
    /// This is the first command you should run. By default the booth home is $HOME/booth; pass
    /// --booth-home or set BOOTH_HOME to put it somewhere else.
    Init,
    /// Record a sale.
    Sell(SellArgs),
    /// Change fields of a recorded sale. Changing the packages, add-ons or extra option
    /// recomputes its cost.
    Update(UpdateArgs),
    /// Delete a recorded sale. Deleting an id that does not exist is not an error.
    Delete(DeleteArgs),
    /// Search the recorded sales and show one page of results along with the total revenue.
    List(ListArgs),
    /// Show the live total for a selection without recording anything.
    Quote(SelectionArgs),
    /// Show the buy list or change material quantities and unit costs.
    Materials(MaterialsArgs),
    /// Show progress of the revenue toward the fundraising goal.
    Debt,
    /// Write the booth data to a file or stdout.
    Export(ExportArgs),
    /// Replace the booth data with the contents of a previously exported file.
    Import(ImportArgs),
    /// Print a reminder every few minutes, as configured in config.json.
    Remind(RemindArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where booth data and configuration is held. Defaults to ~/booth
    #[arg(long, env = "BOOTH_HOME", default_value_t = default_booth_home())]
    booth_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn booth_home(&self) -> &DisplayPath {
        &self.booth_home
    }
}

/// The packages, add-ons and extra option picked for a sale.
#[derive(Debug, Parser, Clone, Default)]
pub struct SelectionArgs {
    /// A package to include. Repeat for more than one.
    #[arg(long = "package", short = 'p')]
    packages: Vec<String>,

    /// An add-on to include. Repeat for more than one.
    #[arg(long = "addon", short = 'a')]
    addons: Vec<String>,

    /// Take the extra option, which repeats the packages for a surcharge.
    #[arg(long)]
    extra: bool,
}

impl SelectionArgs {
    pub fn new(packages: Vec<String>, addons: Vec<String>, extra: bool) -> Self {
        Self {
            packages,
            addons,
            extra,
        }
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn addons(&self) -> &[String] {
        &self.addons
    }

    pub fn extra(&self) -> bool {
        self.extra
    }
}

/// (Not shown): Args for the `booth sell` command.
#[derive(Debug, Parser, Clone)]
pub struct SellArgs {
    /// Who paid.
    #[arg(long)]
    client: String,

    /// Who the sale is aimed at.
    #[arg(long)]
    nominee: String,

    /// The nominee's batch.
    #[arg(long)]
    batch: String,

    /// The nominee's section.
    #[arg(long)]
    section: Option<String>,

    /// Chase, Assassinated, Bailed or any other text.
    #[arg(long, default_value_t = Status::Chase)]
    status: Status,

    #[arg(long)]
    notes: Option<String>,

    #[clap(flatten)]
    selection: SelectionArgs,
}

impl SellArgs {
    pub fn new(
        client: impl Into<String>,
        nominee: impl Into<String>,
        batch: impl Into<String>,
        selection: SelectionArgs,
    ) -> Self {
        Self {
            client: client.into(),
            nominee: nominee.into(),
            batch: batch.into(),
            section: None,
            status: Status::Chase,
            notes: None,
            selection,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn nominee(&self) -> &str {
        &self.nominee
    }

    pub fn batch(&self) -> &str {
        &self.batch
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn selection(&self) -> &SelectionArgs {
        &self.selection
    }
}

/// (Not shown): Args for the `booth update` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateArgs {
    /// The id of the sale to change.
    id: i64,

    #[arg(long)]
    client: Option<String>,

    #[arg(long)]
    nominee: Option<String>,

    #[arg(long)]
    batch: Option<String>,

    #[arg(long)]
    section: Option<String>,

    /// Remove the section.
    #[arg(long, conflicts_with = "section")]
    clear_section: bool,

    #[arg(long)]
    status: Option<Status>,

    #[arg(long)]
    notes: Option<String>,

    /// Remove the notes.
    #[arg(long, conflicts_with = "notes")]
    clear_notes: bool,

    /// Replace the packages. Repeat for more than one.
    #[arg(long = "package", short = 'p')]
    packages: Vec<String>,

    /// Replace the add-ons. Repeat for more than one. Leaving this out keeps the stored add-ons.
    #[arg(long = "addon", short = 'a')]
    addons: Vec<String>,

    /// Remove every add-on and recompute the cost.
    #[arg(long, conflicts_with = "addons")]
    clear_addons: bool,

    /// Turn the extra option on (true) or off (false).
    #[arg(long)]
    extra: Option<bool>,

    /// Recompute the cost from the current price list even if the selection is unchanged.
    #[arg(long)]
    reprice: bool,
}

impl UpdateArgs {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    pub fn nominee(&self) -> Option<&str> {
        self.nominee.as_deref()
    }

    pub fn batch(&self) -> Option<&str> {
        self.batch.as_deref()
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn clear_section(&self) -> bool {
        self.clear_section
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn clear_notes(&self) -> bool {
        self.clear_notes
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn addons(&self) -> &[String] {
        &self.addons
    }

    pub fn clear_addons(&self) -> bool {
        self.clear_addons
    }

    pub fn extra(&self) -> Option<bool> {
        self.extra
    }

    /// Whether the selection changes and the cost must be recomputed.
    pub fn reprices(&self) -> bool {
        self.reprice
            || self.clear_addons
            || !self.packages.is_empty()
            || !self.addons.is_empty()
            || self.extra.is_some()
    }

    pub fn set_section(&mut self, section: impl Into<String>) {
        self.section = Some(section.into());
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = Some(notes.into());
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn set_packages(&mut self, packages: Vec<String>) {
        self.packages = packages;
    }

    pub fn set_extra(&mut self, extra: bool) {
        self.extra = Some(extra);
    }

    pub fn set_clear_addons(&mut self, clear: bool) {
        self.clear_addons = clear;
    }

    pub fn set_clear_section(&mut self, clear: bool) {
        self.clear_section = clear;
    }

    pub fn set_clear_notes(&mut self, clear: bool) {
        self.clear_notes = clear;
    }
}

/// (Not shown): Args for the `booth delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the sale to delete.
    id: i64,
}

impl DeleteArgs {
    pub fn new(id: i64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

/// (Not shown): Args for the `booth list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text to search for. Shows everything when omitted.
    #[arg(long, short = 'q', default_value = "")]
    query: String,

    /// What the query is matched against.
    #[arg(long, value_enum, default_value_t = SearchMode::Name)]
    mode: SearchMode,

    /// The page to show. Out of range pages show the first or last page.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,
}

impl ListArgs {
    pub fn new(query: impl Into<String>, mode: SearchMode, page: i64) -> Self {
        Self {
            query: query.into(),
            mode,
            page,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn page(&self) -> i64 {
        self.page
    }
}

/// (Not shown): Args for the `booth materials` command.
#[derive(Debug, Parser, Clone)]
pub struct MaterialsArgs {
    /// Defaults to `show`.
    #[command(subcommand)]
    action: Option<MaterialsCommand>,
}

impl MaterialsArgs {
    pub fn action(&self) -> MaterialsCommand {
        self.action.clone().unwrap_or(MaterialsCommand::Show)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MaterialsCommand {
    /// Show the buy list.
    Show,
    /// Set a quantity of a material. The value is read as a whole number; anything that is not a
    /// whole number, or is negative, counts as 0.
    Set {
        name: String,
        #[arg(value_enum)]
        field: MaterialField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Set the unit cost of a material, read the same way as `set`.
    Cost {
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// The full booth data, in the same format it is stored in. This can be imported.
    #[default]
    Json,
    /// The sales only, as a spreadsheet-friendly table.
    Csv,
}

serde_plain::derive_display_from_serialize!(ExportFormat);
serde_plain::derive_fromstr_from_deserialize!(ExportFormat);

/// (Not shown): Args for the `booth export` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExportArgs {
    /// Where to write the export. Writes to stdout when omitted.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
}

impl ExportArgs {
    pub fn new(output: Option<PathBuf>, format: ExportFormat) -> Self {
        Self { output, format }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }
}

/// (Not shown): Args for the `booth import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// A file previously written by `booth export`.
    path: PathBuf,
}

impl ImportArgs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// (Not shown): Args for the `booth remind` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct RemindArgs {
    /// Stop after this many reminders. Runs until interrupted when omitted.
    #[arg(long)]
    count: Option<u64>,
}

impl RemindArgs {
    pub fn new(count: Option<u64>) -> Self {
        Self { count }
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }
}

fn default_booth_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("booth"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --booth-home or BOOTH_HOME instead of relying on the default \
                booth home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("booth")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
