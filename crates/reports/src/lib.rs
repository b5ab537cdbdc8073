//! # Registrar Reports
//!
//! This crate is the presentation layer of the system. It turns query
//! results into aligned text tables and holds the one non-trivial piece of
//! logic in the whole program: the long-to-wide cross-tab transformation.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No knowledge of the store. Inputs are plain row values
//!   (or `core-types` rows); output is text. This keeps every transformation
//!   testable without a database.
//! - **Nothing renders as "null":** missing values are `Cell::Empty` and
//!   print as the empty string.
//!
//! ## Public API
//!
//! - `Cell` / `Report`: the tabular value model and its comfy-table renderer.
//! - `Tabular`: implemented by query row types so any result set can be
//!   assembled into a `Report`.
//! - `build_cross_tab`: the pivot builder.

// Declare the modules that constitute this crate.
pub mod pivot;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use pivot::build_cross_tab;
pub use table::{Cell, Report, Tabular};
