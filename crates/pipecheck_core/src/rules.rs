//! Typed column rules and schemas.
//!
//! A schema is an ordered list of columns, each with a [`RuleSet`]. Rule
//! sets are plain `Copy` records so schemas can be written as `static`
//! values:
//!
//! ```rust
//! use pipecheck_core::{ColumnRules, EntityKind, RuleSet, Schema};
//!
//! const COLUMNS: &[ColumnRules] = &[
//!     ColumnRules::new("Pipe_ID", RuleSet::new().required().duplicate_error()),
//!     ColumnRules::new("Diameter", RuleSet::new().numeric().min(0.0).max(4000.0)),
//! ];
//!
//! static SCHEMA: Schema = Schema::new(EntityKind::Pipes, COLUMNS);
//!
//! assert!(SCHEMA.get("Diameter").unwrap().numeric);
//! ```

use crate::EntityKind;
use serde::Serialize;
use std::fmt;

/// One rule a column can carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum Rule {
    /// Column must be present in the dataset
    Required,
    /// Warn on null or blank cells
    NullWarning,
    /// Cells must parse as numbers
    Numeric,
    /// Numbers must have no fractional part
    Integer,
    /// Numbers must not be negative
    NonNegative,
    /// Numbers must not be below the bound
    Min(f64),
    /// Numbers must not exceed the bound
    Max(f64),
    /// Numbers must be four-digit years
    FourDigits,
    /// Numbers must not exceed the reference year
    MaxYearCurrent,
    /// Cells must be `YYYY-MM-DD` or `DD-MM-YYYY` dates
    DateFormat,
    /// Non-null values must be unique
    DuplicateError,
}

impl Rule {
    /// Returns the rule name as written in schemas.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::NullWarning => "null_warning",
            Rule::Numeric => "numeric",
            Rule::Integer => "integer",
            Rule::NonNegative => "non_negative",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::FourDigits => "four_digits",
            Rule::MaxYearCurrent => "max_year_current",
            Rule::DateFormat => "date_format",
            Rule::DuplicateError => "duplicate_error",
        }
    }

    /// Returns true if the rule works on numerically coerced values.
    pub fn is_numeric_family(&self) -> bool {
        matches!(
            self,
            Rule::Numeric
                | Rule::Integer
                | Rule::NonNegative
                | Rule::Min(_)
                | Rule::Max(_)
                | Rule::FourDigits
                | Rule::MaxYearCurrent
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Min(bound) | Rule::Max(bound) => write!(f, "{}={}", self.name(), bound),
            other => f.write_str(other.name()),
        }
    }
}

/// The rules applied to one column.
///
/// Rules combine independently: a column can be `numeric`, `non_negative`
/// and carry a `min` at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RuleSet {
    /// Column must be present in the dataset
    pub required: bool,
    /// Warn on null or blank cells
    pub null_warning: bool,
    /// Cells must parse as numbers
    pub numeric: bool,
    /// Numbers must have no fractional part
    pub integer: bool,
    /// Numbers must not be negative
    pub non_negative: bool,
    /// Lower bound (inclusive)
    pub min: Option<f64>,
    /// Upper bound (inclusive)
    pub max: Option<f64>,
    /// Numbers must lie in [1000, 9999]
    pub four_digits: bool,
    /// Numbers must not exceed the reference year
    pub max_year_current: bool,
    /// Cells must be dates in a recognized format
    pub date_format: bool,
    /// Non-null values must be unique
    pub duplicate_error: bool,
}

impl RuleSet {
    /// Creates a rule set with no rules.
    pub const fn new() -> Self {
        Self {
            required: false,
            null_warning: false,
            numeric: false,
            integer: false,
            non_negative: false,
            min: None,
            max: None,
            four_digits: false,
            max_year_current: false,
            date_format: false,
            duplicate_error: false,
        }
    }

    /// Adds a rule.
    pub const fn with(mut self, rule: Rule) -> Self {
        match rule {
            Rule::Required => self.required = true,
            Rule::NullWarning => self.null_warning = true,
            Rule::Numeric => self.numeric = true,
            Rule::Integer => self.integer = true,
            Rule::NonNegative => self.non_negative = true,
            Rule::Min(bound) => self.min = Some(bound),
            Rule::Max(bound) => self.max = Some(bound),
            Rule::FourDigits => self.four_digits = true,
            Rule::MaxYearCurrent => self.max_year_current = true,
            Rule::DateFormat => self.date_format = true,
            Rule::DuplicateError => self.duplicate_error = true,
        }
        self
    }

    pub const fn required(self) -> Self {
        self.with(Rule::Required)
    }

    pub const fn null_warning(self) -> Self {
        self.with(Rule::NullWarning)
    }

    pub const fn numeric(self) -> Self {
        self.with(Rule::Numeric)
    }

    pub const fn integer(self) -> Self {
        self.with(Rule::Integer)
    }

    pub const fn non_negative(self) -> Self {
        self.with(Rule::NonNegative)
    }

    pub const fn min(self, bound: f64) -> Self {
        self.with(Rule::Min(bound))
    }

    pub const fn max(self, bound: f64) -> Self {
        self.with(Rule::Max(bound))
    }

    pub const fn four_digits(self) -> Self {
        self.with(Rule::FourDigits)
    }

    pub const fn max_year_current(self) -> Self {
        self.with(Rule::MaxYearCurrent)
    }

    pub const fn date_format(self) -> Self {
        self.with(Rule::DateFormat)
    }

    pub const fn duplicate_error(self) -> Self {
        self.with(Rule::DuplicateError)
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> Vec<Rule> {
        let mut rules = Vec::new();
        if self.required {
            rules.push(Rule::Required);
        }
        if self.null_warning {
            rules.push(Rule::NullWarning);
        }
        if self.numeric {
            rules.push(Rule::Numeric);
        }
        if self.integer {
            rules.push(Rule::Integer);
        }
        if self.non_negative {
            rules.push(Rule::NonNegative);
        }
        if let Some(bound) = self.min {
            rules.push(Rule::Min(bound));
        }
        if let Some(bound) = self.max {
            rules.push(Rule::Max(bound));
        }
        if self.four_digits {
            rules.push(Rule::FourDigits);
        }
        if self.max_year_current {
            rules.push(Rule::MaxYearCurrent);
        }
        if self.date_format {
            rules.push(Rule::DateFormat);
        }
        if self.duplicate_error {
            rules.push(Rule::DuplicateError);
        }
        rules
    }

    /// Returns true if no rule is set.
    pub fn is_empty(&self) -> bool {
        self.rules().is_empty()
    }

    /// Returns true if any numeric-family rule is set.
    pub fn needs_numeric(&self) -> bool {
        self.rules().iter().any(Rule::is_numeric_family)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        iter.into_iter().fold(RuleSet::new(), RuleSet::with)
    }
}

/// A schema column and its rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnRules {
    /// Column name
    pub name: &'static str,
    /// Rules applied to the column
    pub rules: RuleSet,
}

impl ColumnRules {
    /// Creates a new schema column.
    pub const fn new(name: &'static str, rules: RuleSet) -> Self {
        Self { name, rules }
    }
}

/// An ordered, immutable mapping from column name to rule set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Schema {
    /// Entity kind the schema describes
    entity: EntityKind,
    /// Columns in declaration order
    columns: &'static [ColumnRules],
}

impl Schema {
    /// Creates a schema over a static column list.
    pub const fn new(entity: EntityKind, columns: &'static [ColumnRules]) -> Self {
        Self { entity, columns }
    }

    /// Returns the entity kind.
    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Returns the columns in declaration order.
    pub fn columns(&self) -> &'static [ColumnRules] {
        self.columns
    }

    /// Looks up the rules of a column.
    pub fn get(&self, column: &str) -> Option<&'static RuleSet> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| &c.rules)
    }

    /// Returns true if the schema declares the column.
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Returns the names of required columns, in declaration order.
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> {
        self.columns
            .iter()
            .filter(|c| c.rules.required)
            .map(|c| c.name)
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COLUMNS: &[ColumnRules] = &[
        ColumnRules::new("Pipe_ID", RuleSet::new().required().null_warning()),
        ColumnRules::new(
            "Diameter",
            RuleSet::new().numeric().integer().min(0.0).max(4000.0),
        ),
        ColumnRules::new("Comments", RuleSet::new()),
    ];

    static SCHEMA: Schema = Schema::new(EntityKind::Pipes, COLUMNS);

    #[test]
    fn test_rule_set_builders() {
        let rules = RuleSet::new().numeric().non_negative().min(1.0);
        assert!(rules.numeric);
        assert!(rules.non_negative);
        assert_eq!(rules.min, Some(1.0));
        assert_eq!(rules.max, None);
        assert!(!rules.required);
    }

    #[test]
    fn test_rules_round_trip_through_iterator() {
        let rules = RuleSet::new()
            .required()
            .numeric()
            .max(5.0)
            .duplicate_error();
        let rebuilt: RuleSet = rules.rules().into_iter().collect();
        assert_eq!(rebuilt, rules);
        assert_eq!(
            rules.rules(),
            vec![
                Rule::Required,
                Rule::Numeric,
                Rule::Max(5.0),
                Rule::DuplicateError
            ]
        );
    }

    #[test]
    fn test_numeric_family() {
        assert!(RuleSet::new().four_digits().needs_numeric());
        assert!(!RuleSet::new().null_warning().date_format().needs_numeric());
        assert!(RuleSet::new().is_empty());
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::Min(0.0).to_string(), "min=0");
        assert_eq!(Rule::Max(0.5).to_string(), "max=0.5");
        assert_eq!(Rule::MaxYearCurrent.to_string(), "max_year_current");
    }

    #[test]
    fn test_schema_lookup() {
        assert_eq!(SCHEMA.entity(), EntityKind::Pipes);
        assert_eq!(SCHEMA.len(), 3);
        assert!(SCHEMA.contains("Diameter"));
        assert!(!SCHEMA.contains("diameter"));
        assert_eq!(SCHEMA.get("Diameter").and_then(|r| r.max), Some(4000.0));
        assert_eq!(SCHEMA.required_columns().collect::<Vec<_>>(), vec!["Pipe_ID"]);
    }
}
