//! Administrative statements
//!
//! Database, retention policy and schema exploration statements. None of these need
//! builder state.

use serde::{Deserialize, Serialize};

use super::error::{QlError, QlResult};
use super::quote::{convert, double_quote};

/// Replication factor used by `create retention policy` when none is given
const DEFAULT_REPLICATION: u32 = 1;

/// `create database`
pub fn create_database(database: &str) -> String {
    format!("create database {}", convert(database))
}

/// `create database if not exists`
pub fn create_database_if_not_exists(database: &str) -> String {
    format!("create database if not exists {}", convert(database))
}

/// `drop database`
pub fn drop_database(database: &str) -> String {
    format!("drop database {}", convert(database))
}

/// `show databases`
pub fn show_databases() -> String {
    "show databases".to_string()
}

/// `show retention policies on <db>`
pub fn show_retention_policies(database: &str) -> String {
    format!("show retention policies on {}", convert(database))
}

/// `show measurements`
pub fn show_measurements() -> String {
    "show measurements".to_string()
}

/// `show tag keys`, optionally limited to one measurement
pub fn show_tag_keys(measurement: Option<&str>) -> String {
    with_measurement("show tag keys", measurement)
}

/// `show field keys`, optionally limited to one measurement
pub fn show_field_keys(measurement: Option<&str>) -> String {
    with_measurement("show field keys", measurement)
}

/// `show series`, optionally limited to one measurement
pub fn show_series(measurement: Option<&str>) -> String {
    with_measurement("show series", measurement)
}

fn with_measurement(statement: &str, measurement: Option<&str>) -> String {
    match measurement.filter(|m| !m.is_empty()) {
        Some(m) => format!("{} from {}", statement, double_quote(m)),
        None => statement.to_string(),
    }
}

/// Retention policy options for [`create_rp`] and [`update_rp`]
///
/// ```rust
/// use influx_ql::{create_rp, RetentionPolicy};
///
/// let rp = RetentionPolicy::new("two_hours", "mydb")
///     .duration("2d")
///     .replication(2)
///     .shard_duration("1h")
///     .default_policy(true);
///
/// assert_eq!(
///     create_rp(&rp).unwrap(),
///     "create retention policy \"two_hours\" on \"mydb\" duration 2d replication 2 shard duration 1h default"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Policy name
    pub name: String,
    /// Database the policy belongs to
    pub database: String,
    /// How long data is kept, e.g. `2h`, `52w`, `INF`
    #[serde(default)]
    pub duration: String,
    /// Number of copies stored in the cluster
    #[serde(default)]
    pub replication: Option<u32>,
    /// Time range covered by each shard group
    #[serde(default)]
    pub shard_duration: Option<String>,
    /// Make this the database's default policy
    #[serde(default)]
    pub is_default: bool,
}

impl RetentionPolicy {
    /// Policy `name` on `database`, with every option unset
    pub fn new(name: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set how long data is kept
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Set the replication factor
    pub fn replication(mut self, replication: u32) -> Self {
        self.replication = Some(replication);
        self
    }

    /// Set the shard group duration
    pub fn shard_duration(mut self, shard_duration: impl Into<String>) -> Self {
        self.shard_duration = Some(shard_duration.into());
        self
    }

    /// Mark the policy as the database default
    pub fn default_policy(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    fn require(&self, with_duration: bool) -> QlResult<()> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.database.is_empty() {
            missing.push("database");
        }
        if with_duration && self.duration.is_empty() {
            missing.push("duration");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            tracing::warn!(?missing, "Retention policy is missing required arguments");
            Err(QlError::InvalidArgument { missing })
        }
    }

    /// Append replication, shard duration and default flag
    fn push_options(&self, parts: &mut Vec<String>, replication: Option<u32>) {
        if let Some(replication) = replication.filter(|r| *r > 0) {
            parts.push(format!("replication {}", replication));
        }
        if let Some(shard) = self.shard_duration.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("shard duration {}", shard));
        }
        if self.is_default {
            parts.push("default".to_string());
        }
    }
}

/// `create retention policy`; name, database and duration are required
///
/// Replication defaults to 1.
pub fn create_rp(rp: &RetentionPolicy) -> QlResult<String> {
    rp.require(true)?;

    let mut parts = vec![
        format!(
            "create retention policy {} on {}",
            double_quote(&rp.name),
            double_quote(&rp.database)
        ),
        format!("duration {}", rp.duration),
    ];
    rp.push_options(&mut parts, Some(rp.replication.unwrap_or(DEFAULT_REPLICATION)));

    Ok(parts.join(" "))
}

/// `alter retention policy`; name and database are required
///
/// An empty duration or `0` leaves the duration unchanged.
pub fn update_rp(rp: &RetentionPolicy) -> QlResult<String> {
    rp.require(false)?;

    let mut parts = vec![format!(
        "alter retention policy {} on {}",
        double_quote(&rp.name),
        double_quote(&rp.database)
    )];
    if !rp.duration.is_empty() && rp.duration != "0" {
        parts.push(format!("duration {}", rp.duration));
    }
    rp.push_options(&mut parts, rp.replication);

    Ok(parts.join(" "))
}

/// `drop retention policy`
pub fn drop_rp(name: &str, database: &str) -> String {
    format!(
        "drop retention policy {} on {}",
        double_quote(name),
        double_quote(database)
    )
}
