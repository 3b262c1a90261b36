//! # pipecheck Validator
//!
//! Validation engine for asset datasets. This crate provides:
//!
//! - The dataset model (`DataSet`, `DataRow`)
//! - The schema registry: one rule schema per entity kind
//! - The rule evaluation engine that turns a dataset and a schema into an `IssueReport`
//! - Entity validators for pipes, CCTV inspections, defects and hydraulic properties
//!
//! ## Example
//!
//! ```rust
//! use pipecheck_core::{DataValue, ValidationContext};
//! use pipecheck_validator::{DataSet, EntityValidator};
//!
//! let dataset = DataSet::from_table(
//!     &["Pipe_ID", "Material", "Installation_year", "Diameter"],
//!     vec![
//!         vec!["P1".into(), "PVC".into(), 1995.into(), 300.into()],
//!         vec!["P2".into(), "Concrete".into(), 2099.into(), (-5).into()],
//!     ],
//! );
//!
//! let validator = EntityValidator::new();
//! let context = ValidationContext::for_year(2024);
//! let result = validator.validate_pipes(dataset, &context);
//!
//! assert!(!result.ok);
//! assert_eq!(result.issues.error_count(), 2);
//! ```

mod coerce;
mod dataset;
mod engine;
mod entities;
mod schemas;

pub use coerce::*;
pub use dataset::*;
pub use engine::*;
pub use entities::*;
pub use schemas::*;
