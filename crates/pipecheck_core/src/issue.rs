//! Issue records and issue reports.
//!
//! An [`Issue`] is the atomic output of validation: one finding about one
//! cell (or, for missing columns, one column). An [`IssueReport`] collects
//! the issues of a single validation pass in a deterministic order.

use crate::{CoreError, DataValue, EntityKind, IdColumn};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Message attached to the placeholder issue of an empty input.
pub const MSG_NO_UPLOADED: &str = "No information uploaded";

/// Severity of an issue.
///
/// `Error` orders before `Warning`, the same order their lowercase names
/// have as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// The record violates a rule
    Error,
    /// The record needs review
    Warning,
}

impl Level {
    /// Returns the lowercase level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Level::Error),
            "warning" => Ok(Level::Warning),
            other => Err(CoreError::UnknownLevel(other.to_string())),
        }
    }
}

/// A single data-quality finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Value of the row's identifying column, `Null` for column-level issues
    pub entity_key: DataValue,

    /// Offending column
    pub column: String,

    /// Severity
    pub level: Level,

    /// Human-readable description
    pub message: String,

    /// Offending raw value, `Null` for column-level issues
    pub value: DataValue,
}

impl Issue {
    /// Creates a new issue.
    pub fn new(
        entity_key: impl Into<DataValue>,
        column: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        value: impl Into<DataValue>,
    ) -> Self {
        Self {
            entity_key: entity_key.into(),
            column: column.into(),
            level,
            message: message.into(),
            value: value.into(),
        }
    }

    /// Creates a new error-level issue.
    pub fn error(
        entity_key: impl Into<DataValue>,
        column: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<DataValue>,
    ) -> Self {
        Self::new(entity_key, column, Level::Error, message, value)
    }

    /// Creates a new warning-level issue.
    pub fn warning(
        entity_key: impl Into<DataValue>,
        column: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<DataValue>,
    ) -> Self {
        Self::new(entity_key, column, Level::Warning, message, value)
    }

    /// Creates the column-level error for a required column absent from the dataset.
    pub fn missing_column(column: &str) -> Self {
        Self::error(
            DataValue::Null,
            column,
            format!("Missing required column '{}'.", column),
            DataValue::Null,
        )
    }

    /// Returns true if this is an error-level issue.
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// The ordered issues of one validation pass.
///
/// Reports built with [`IssueReport::from_issues`] are sorted by
/// `(level, column, entity_key)`. Issues appended later with
/// [`IssueReport::extend`] stay where they were put until
/// [`IssueReport::sort`] is called.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueReport {
    /// Identifying column of the entity the report was produced for
    id_column: IdColumn,

    /// Issues, in report order
    issues: Vec<Issue>,
}

impl IssueReport {
    /// Creates an empty report.
    pub fn empty(id_column: IdColumn) -> Self {
        Self {
            id_column,
            issues: Vec::new(),
        }
    }

    /// Creates a report from issues, sorting them into report order.
    pub fn from_issues(id_column: IdColumn, issues: Vec<Issue>) -> Self {
        let mut report = Self { id_column, issues };
        report.sort();
        report
    }

    /// Creates the placeholder report for an entity whose input was empty.
    pub fn no_information(entity: EntityKind) -> Self {
        Self {
            id_column: entity.id_column(),
            issues: vec![Issue::warning(
                DataValue::Null,
                entity.table_name(),
                MSG_NO_UPLOADED,
                DataValue::Null,
            )],
        }
    }

    /// Sorts issues by `(level, column, entity_key)`. The sort is stable.
    pub fn sort(&mut self) {
        self.issues.sort_by(|a, b| {
            a.level
                .cmp(&b.level)
                .then_with(|| a.column.cmp(&b.column))
                .then_with(|| a.entity_key.sort_cmp(&b.entity_key))
        });
    }

    /// Appends issues without re-sorting.
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Returns the identifying column.
    pub fn id_column(&self) -> IdColumn {
        self.id_column
    }

    /// Returns the issues in report order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the report, returning its issues.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Returns an iterator over the issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if the report holds no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Counts error-level issues.
    pub fn error_count(&self) -> usize {
        self.count(Level::Error)
    }

    /// Counts warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.count(Level::Warning)
    }

    /// Returns true if any issue is an error.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }

    /// Returns true if the issues are in `(level, column, entity_key)` order.
    pub fn is_sorted(&self) -> bool {
        self.issues.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            a.level
                .cmp(&b.level)
                .then_with(|| a.column.cmp(&b.column))
                .then_with(|| a.entity_key.sort_cmp(&b.entity_key))
                .is_le()
        })
    }

    fn count(&self, level: Level) -> usize {
        self.issues.iter().filter(|i| i.level == level).count()
    }
}

impl<'a> IntoIterator for &'a IssueReport {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
