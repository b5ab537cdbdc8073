use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database operation failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Seed data failed domain validation: {0}")]
    SeedData(#[from] core_types::CoreError),
}
