//! # Registrar Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL store holding the students, subjects, and exams tables.
//!
//! ## Architectural Principles
//!
//! - **Adapter layer:** encapsulates all SQL — schema provisioning, the
//!   one-shot seeder, and the report queries — behind a clean API, hiding
//!   the database implementation details from the rest of the application.
//! - **Two defense layers:** every write goes through the validated domain
//!   types from `core-types` AND the CHECK constraints in the schema; a bad
//!   value is rejected in application code before the store ever sees it.
//! - **Asynchronous & Pooled:** all operations are asynchronous over a
//!   shared `PgPool`.
//!
//! ## Public API
//!
//! - `connect`: the async function to establish the database connection pool.
//! - `ensure_schema` / `table_structure`: idempotent provisioning and the
//!   column-layout introspection behind the structure dumps.
//! - `seed_if_empty`: the atomic, advisory-locked one-shot seeder.
//! - `DbRepository`: the main struct that holds the connection pool and
//!   provides the query catalog.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;
pub mod seed;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::DbRepository;
pub use schema::{ensure_schema, table_structure};
pub use seed::seed_if_empty;
