//! # pipecheck Core
//!
//! Core data structures for the pipecheck asset-data validator.
//!
//! This crate holds the vocabulary shared by every other pipecheck crate:
//! the typed rule model that schemas are written in, the issue records the
//! validation engine produces, and the entity kinds (pipes, CCTV inspections,
//! defects, hydraulic properties) that datasets are validated as.
//!
//! ## Key Concepts
//!
//! - **RuleSet**: the rules applied to a single column (`required`, `numeric`, `min`, ...)
//! - **Schema**: an ordered list of columns with their rule sets, one per entity kind
//! - **Issue**: one data-quality finding, keyed by the row's identifying column
//! - **IssueReport**: the sorted issues of one validation pass
//!
//! ## Example
//!
//! ```rust
//! use pipecheck_core::{DataValue, IdColumn, Issue, IssueReport, Level};
//!
//! let report = IssueReport::from_issues(
//!     IdColumn::Pipe,
//!     vec![
//!         Issue::warning("P2", "Material", "The value is null, please review this information", DataValue::Null),
//!         Issue::error("P1", "Diameter", "The value is negative, please review this information", -5),
//!     ],
//! );
//!
//! assert_eq!(report.issues()[0].level, Level::Error);
//! assert!(report.has_errors());
//! ```

pub mod context;
pub mod entity;
pub mod error;
pub mod issue;
pub mod rules;
pub mod value;

pub use context::*;
pub use entity::*;
pub use error::*;
pub use issue::*;
pub use rules::*;
pub use value::*;
