use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const CHASE: &str = "Chase";
const ASSASSINATED: &str = "Assassinated";
const BAILED: &str = "Bailed";

/// Represents one recorded sale.
///
/// The `id` and `date` are assigned when the transaction is created and never change afterwards.
/// The `cost` is computed from the selected options at submission time and is frozen: later price
/// changes do not affect it.
///
/// Records written by older versions of the app may carry a single `package` or `packageLabel`
/// string instead of a `packages` list. These are normalized into `packages` when read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredTransaction")]
pub struct Transaction {
    pub(crate) id: i64,
    pub(crate) date: String,
    pub(crate) client: String,
    pub(crate) nominee: String,
    pub(crate) batch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) section: Option<String>,
    pub(crate) packages: Vec<String>,
    pub(crate) ingredients: Vec<String>,
    pub(crate) status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notes: Option<String>,
    pub(crate) cost: u64,
}

impl Transaction {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn date(&self) -> &str {
        &self.date
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

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// The packages joined for display, or `Custom` when none were recorded.
    pub fn package_display(&self) -> String {
        if self.packages.is_empty() {
            String::from("Custom")
        } else {
            self.packages.join(", ")
        }
    }

    /// Overwrites every field that is `Some` in `updates`; `Some(None)` clears the section or the
    /// notes. The `id` and `date` are never touched.
    pub(crate) fn apply(&mut self, updates: TransactionUpdates) {
        let TransactionUpdates {
            client,
            nominee,
            batch,
            section,
            packages,
            ingredients,
            status,
            notes,
            cost,
        } = updates;
        if let Some(client) = client {
            self.client = client;
        }
        if let Some(nominee) = nominee {
            self.nominee = nominee;
        }
        if let Some(batch) = batch {
            self.batch = batch;
        }
        if let Some(section) = section {
            self.section = section;
        }
        if let Some(packages) = packages {
            self.packages = packages;
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
        if let Some(cost) = cost {
            self.cost = cost;
        }
    }
}

/// The free-text fields a cashier fills in when recording a sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFields {
    pub client: String,
    pub nominee: String,
    pub batch: String,
    pub section: Option<String>,
    pub status: Status,
    pub notes: Option<String>,
}

/// The fields to change on an existing transaction. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionUpdates {
    pub client: Option<String>,
    pub nominee: Option<String>,
    pub batch: Option<String>,
    /// `Some(None)` removes the section.
    pub section: Option<Option<String>>,
    pub packages: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub status: Option<Status>,
    /// `Some(None)` removes the notes.
    pub notes: Option<Option<String>>,
    pub cost: Option<u64>,
}

/// Where a nominee currently stands. Anything other than the three known values is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Chase,
    Assassinated,
    Bailed,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Chase => CHASE,
            Status::Assassinated => ASSASSINATED,
            Status::Bailed => BAILED,
            Status::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(CHASE) {
            Status::Chase
        } else if trimmed.eq_ignore_ascii_case(ASSASSINATED) {
            Status::Assassinated
        } else if trimmed.eq_ignore_ascii_case(BAILED) {
            Status::Bailed
        } else {
            Status::Other(value)
        }
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        match value {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Status {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Status::from(s.to_string()))
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The on-disk shape of a transaction, which tolerates the older single-package fields and missing
/// optional fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTransaction {
    id: i64,
    #[serde(default)]
    date: String,
    #[serde(default)]
    client: String,
    #[serde(default)]
    nominee: String,
    #[serde(default)]
    batch: String,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    packages: Option<Vec<String>>,
    #[serde(default)]
    package_label: Option<String>,
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    cost: u64,
}

impl From<StoredTransaction> for Transaction {
    fn from(stored: StoredTransaction) -> Self {
        let packages = match stored.packages {
            Some(packages) => packages,
            None => [stored.package_label, stored.package]
                .into_iter()
                .flatten()
                .find(|label| !label.is_empty())
                .into_iter()
                .collect(),
        };
        Self {
            id: stored.id,
            date: stored.date,
            client: stored.client,
            nominee: stored.nominee,
            batch: stored.batch,
            section: stored.section,
            packages,
            ingredients: stored.ingredients,
            status: stored.status,
            notes: stored.notes,
            cost: stored.cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Transaction {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_legacy_package_label_is_normalized() {
        let t = parse(
            r#"{"id": 1, "client": "Ana", "nominee": "Ben", "batch": "2024",
                "packageLabel": "Double Hit", "package": "double", "status": "Chase", "cost": 100}"#,
        );
        assert_eq!(t.packages(), &["Double Hit".to_string()]);
    }

    #[test]
    fn test_legacy_package_used_when_label_empty() {
        let t = parse(r#"{"id": 1, "packageLabel": "", "package": "Single Hit"}"#);
        assert_eq!(t.packages(), &["Single Hit".to_string()]);
    }

    #[test]
    fn test_packages_list_wins_over_legacy_fields() {
        let t = parse(r#"{"id": 1, "packages": ["A", "B"], "package": "C"}"#);
        assert_eq!(t.packages(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_no_packages_at_all() {
        let t = parse(r#"{"id": 7}"#);
        assert!(t.packages().is_empty());
        assert_eq!(t.package_display(), "Custom");
        assert_eq!(t.section(), None);
        assert_eq!(t.status(), &Status::Chase);
    }

    #[test]
    fn test_serialization_uses_camel_case_and_omits_missing_section() {
        let t = parse(
            r#"{"id": 5, "date": "1/2/2025", "client": "Ana", "nominee": "Ben", "batch": "B1",
                "packages": ["Single Hit"], "ingredients": ["Mayo"], "status": "Bailed",
                "notes": "", "cost": 65}"#,
        );
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["status"], "Bailed");
        assert_eq!(json["notes"], "");
        assert!(json.get("section").is_none());
        assert!(json.get("packageLabel").is_none());
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(Status::from_str("chase").unwrap(), Status::Chase);
        assert_eq!(Status::from_str("ASSASSINATED").unwrap(), Status::Assassinated);
        assert_eq!(Status::from_str("Bailed").unwrap(), Status::Bailed);
        assert_eq!(
            Status::from_str("Escaped").unwrap(),
            Status::Other("Escaped".to_string())
        );
        assert_eq!(Status::Other("Escaped".to_string()).to_string(), "Escaped");
    }

    #[test]
    fn test_apply_keeps_id_and_date() {
        let mut t = parse(r#"{"id": 9, "date": "3/4/2025", "client": "Ana", "cost": 50}"#);
        t.apply(TransactionUpdates {
            client: Some("Cy".to_string()),
            cost: Some(80),
            ..Default::default()
        });
        assert_eq!(t.id(), 9);
        assert_eq!(t.date(), "3/4/2025");
        assert_eq!(t.client(), "Cy");
        assert_eq!(t.cost(), 80);
    }
}
