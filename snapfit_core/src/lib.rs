//! # snapfit_core - Snap-Fit Joint Calculation Engine
//!
//! `snapfit_core` computes strain, deflection force and assembly forces for
//! plastic snap-fit hooks from closed-form beam formulas, and checks the
//! strain against the material's permissible strain. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: calculations are pure functions of one input record
//! - **JSON-First**: all records implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Explicit I/O**: reference data is read through a [`ParameterSource`]
//!   built once and passed around, never through a global
//!
//! ## Quick Start
//!
//! ```rust
//! use snapfit_core::{build_report, ParameterSource, SnapShape};
//! use snapfit_core::units::ForceUnit;
//!
//! let source = ParameterSource::bundled();
//! let mut defaults = source.defaults(SnapShape::Cantilever).unwrap();
//! defaults.input.deflection_mm = 3.5;
//!
//! let report = build_report(SnapShape::Cantilever, &defaults.input, ForceUnit::Newtons);
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - per-shape calculation engines
//! - [`safety`] - permissible strain check
//! - [`reference`] - reference workbook sheets and lenient defaults
//! - [`materials`] - material property table
//! - [`report`] - display-ready results
//! - [`settings`] - layered configuration
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod reference;
pub mod report;
pub mod safety;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, InputLabel, SnapFitInput, SnapFitOutputs, SnapFitResult, SnapShape};
pub use errors::{CalcError, CalcResult};
pub use reference::{InputDefaults, ParameterSource, ParameterValue};
pub use report::{build_report, SnapFitReport};
pub use safety::SafetyVerdict;
pub use settings::Settings;
