use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, Settings};

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults matching the reference
/// deployment, an optional `config.toml` next to the binary, and
/// `REGISTRAR__`-prefixed environment variables (section separator `__`,
/// e.g. `REGISTRAR__DATABASE__HOST`).
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("database.host", "db")?
        .set_default("database.port", 5432)?
        .set_default("database.username", "uni_user")?
        .set_default("database.password", "uni_pass")?
        .set_default("database.database_name", "university_db")?
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(config::Environment::with_prefix("REGISTRAR").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_deployment() {
        let settings = load_config().unwrap();
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.database.database_name, "university_db");
    }
}
