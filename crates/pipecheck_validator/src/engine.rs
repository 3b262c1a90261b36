//! Rule evaluation engine.
//!
//! [`SchemaEngine`] applies a [`Schema`] to a [`DataSet`] and produces an
//! [`IssueReport`]. Checks run in a fixed order: missing required columns
//! first, for every schema column, then per column `null_warning`,
//! `numeric`, `integer`, `non_negative`, `min`/`max`, `four_digits`,
//! `max_year_current`, `date_format` and `duplicate_error`.
//!
//! Once a column has been coerced to numbers, values that failed coercion
//! count as missing for every later numeric check, so a bad cell is reported
//! once, by `numeric`.

use crate::coerce::{is_non_numeric, is_valid_date, to_numbers};
use crate::DataSet;
use pipecheck_core::{
    ColumnRules, DataValue, IdColumn, Issue, IssueReport, Level, RuleSet, Schema,
    ValidationContext,
};
use std::cmp::Ordering;
use tracing::debug;

pub const MSG_NULL: &str = "The value is null, please review this information";
pub const MSG_NEG: &str = "The value is negative, please review this information";
pub const MSG_NUMERIC: &str = "This data is supposed to be numerical; please review this information";
pub const MSG_NOT_INT: &str = "The value is not an integer number; please review this information";
pub const MSG_DUP_ID: &str = "Two or more pipes share the same ID";
pub const MSG_DUPLICATE: &str = "Duplicate value found.";
pub const MSG_FOUR_DIGITS: &str = "The year must have four digits; please review this information.";
pub const MSG_FUTURE_YEAR: &str =
    "The installation year is over the expected range of values; please review this information.";
pub const MSG_DATE_FORMAT: &str =
    "The installation date does not follow the expected formats (YYYY-MM-DD or DD-MM-YYYY).";

/// Applies rule schemas to datasets.
///
/// # Example
///
/// ```rust
/// use pipecheck_core::{IdColumn, ValidationContext};
/// use pipecheck_validator::{DataSet, SchemaEngine, PIPES_SCHEMA};
///
/// let dataset = DataSet::from_table(&["Pipe_ID"], vec![vec!["P1".into()]]);
/// let report = SchemaEngine::new().validate(
///     &dataset,
///     &PIPES_SCHEMA,
///     IdColumn::Pipe,
///     &ValidationContext::for_year(2024),
/// );
///
/// // Material and Installation_year are required but absent.
/// assert_eq!(report.error_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaEngine;

impl SchemaEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Validates a dataset against a schema.
    ///
    /// `id_column` selects the column whose value keys each issue. The
    /// dataset is not modified and the call never fails: every problem
    /// found becomes an issue.
    pub fn validate(
        &self,
        dataset: &DataSet,
        schema: &Schema,
        id_column: IdColumn,
        context: &ValidationContext,
    ) -> IssueReport {
        let mut issues = self.check_required_columns(dataset, schema);

        for column in schema.columns() {
            if !dataset.has_column(column.name) {
                continue;
            }
            issues.extend(self.check_column(dataset, column, id_column, context));
        }

        debug!(
            "Validated {} row(s) against the {} schema: {} issue(s)",
            dataset.len(),
            schema.entity(),
            issues.len()
        );

        IssueReport::from_issues(id_column, issues)
    }

    /// Reports every required schema column absent from the dataset.
    fn check_required_columns(&self, dataset: &DataSet, schema: &Schema) -> Vec<Issue> {
        schema
            .required_columns()
            .filter(|column| !dataset.has_column(column))
            .map(Issue::missing_column)
            .collect()
    }

    /// Runs the rules of one column.
    fn check_column(
        &self,
        dataset: &DataSet,
        column: &ColumnRules,
        id_column: IdColumn,
        context: &ValidationContext,
    ) -> Vec<Issue> {
        let mut check = ColumnCheck::new(dataset, column.name, id_column);
        let rules: &RuleSet = &column.rules;

        if rules.null_warning {
            check.null_warning();
        }
        if rules.numeric {
            check.numeric();
        }
        if rules.integer {
            check.flag_numbers(Level::Error, |x| x.floor() != x, || MSG_NOT_INT.to_string());
        }
        if rules.non_negative {
            check.flag_numbers(Level::Error, |x| x < 0.0, || MSG_NEG.to_string());
        }
        if let Some(min) = rules.min {
            check.flag_numbers(
                Level::Error,
                |x| x < min,
                || format!("Value is below minimum ({}).", min),
            );
        }
        if let Some(max) = rules.max {
            check.flag_numbers(
                Level::Error,
                |x| x > max,
                || format!("Value exceeds maximum ({}).", max),
            );
        }
        if rules.four_digits {
            check.flag_numbers(
                Level::Error,
                |x| !(1000.0..=9999.0).contains(&x),
                || MSG_FOUR_DIGITS.to_string(),
            );
        }
        if rules.max_year_current {
            let year = f64::from(context.reference_year);
            check.flag_numbers(Level::Error, |x| x > year, || MSG_FUTURE_YEAR.to_string());
        }
        if rules.date_format {
            check.date_format();
        }
        if rules.duplicate_error {
            check.duplicates();
        }

        check.into_issues()
    }
}

/// Working state for the checks of one column.
struct ColumnCheck<'a> {
    column: &'a str,
    /// Raw cells, one per row
    values: Vec<&'a DataValue>,
    /// Identifying value of each row
    keys: Vec<&'a DataValue>,
    /// Numeric view of the column, built on first use
    numbers: Option<Vec<Option<f64>>>,
    issues: Vec<Issue>,
}

impl<'a> ColumnCheck<'a> {
    fn new(dataset: &'a DataSet, column: &'a str, id_column: IdColumn) -> Self {
        Self {
            column,
            values: dataset.column_values(column).collect(),
            keys: dataset.column_values(id_column.name()).collect(),
            numbers: None,
            issues: Vec::new(),
        }
    }

    fn push(&mut self, row: usize, level: Level, message: impl Into<String>) {
        self.issues.push(Issue::new(
            self.keys[row].clone(),
            self.column,
            level,
            message,
            self.values[row].clone(),
        ));
    }

    fn null_warning(&mut self) {
        let blank: Vec<usize> = self.rows_where(|v| v.is_blank());
        for row in blank {
            self.push(row, Level::Warning, MSG_NULL);
        }
    }

    fn numeric(&mut self) {
        let bad: Vec<usize> = self.rows_where(is_non_numeric);
        for row in bad {
            self.push(row, Level::Error, MSG_NUMERIC);
        }
        self.numbers = Some(to_numbers(self.values.iter().copied()));
    }

    /// Emits an issue for every coerced number matching `predicate`.
    fn flag_numbers(
        &mut self,
        level: Level,
        predicate: impl Fn(f64) -> bool,
        message: impl Fn() -> String,
    ) {
        let values = &self.values;
        let numbers = self
            .numbers
            .get_or_insert_with(|| to_numbers(values.iter().copied()));

        let flagged: Vec<usize> = numbers
            .iter()
            .enumerate()
            .filter_map(|(row, n)| n.filter(|x| predicate(*x)).map(|_| row))
            .collect();

        for row in flagged {
            self.push(row, level, message());
        }
    }

    fn date_format(&mut self) {
        let bad: Vec<usize> = self.rows_where(|v| !v.is_blank() && !is_valid_date(v));
        for row in bad {
            self.push(row, Level::Error, MSG_DATE_FORMAT);
        }
    }

    /// Flags every row whose non-blank value occurs more than once.
    ///
    /// Rows are reported grouped by value, groups in ascending value order.
    fn duplicates(&mut self) {
        let mut candidates: Vec<usize> = self.rows_where(|v| !v.is_blank());
        candidates.sort_by(|a, b| self.values[*a].sort_cmp(self.values[*b]));

        let message = if self.column == IdColumn::Pipe.name() {
            MSG_DUP_ID
        } else {
            MSG_DUPLICATE
        };

        let groups: Vec<Vec<usize>> = candidates
            .chunk_by(|a, b| self.values[*a].sort_cmp(self.values[*b]) == Ordering::Equal)
            .filter(|group| group.len() > 1)
            .map(<[usize]>::to_vec)
            .collect();

        for row in groups.into_iter().flatten() {
            self.push(row, Level::Error, message);
        }
    }

    fn rows_where(&self, predicate: impl Fn(&DataValue) -> bool) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(row, v)| predicate(*v).then_some(row))
            .collect()
    }

    fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
