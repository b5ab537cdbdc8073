use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
}

/// Connection parameters for the PostgreSQL store.
///
/// Every field has a default matching the reference deployment, so the
/// program runs with no configuration file at all; any field can be
/// overridden from `config.toml` or a `REGISTRAR__DATABASE__*` environment
/// variable.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_name: String,
}

impl DatabaseSettings {
    /// Renders the settings as a `postgres://` connection URL for sqlx.
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_string_has_the_expected_shape() {
        let settings = DatabaseSettings {
            host: "db".to_string(),
            port: 5432,
            username: "uni_user".to_string(),
            password: "uni_pass".to_string(),
            database_name: "university_db".to_string(),
        };
        assert_eq!(
            settings.connection_string(),
            "postgres://uni_user:uni_pass@db:5432/university_db"
        );
    }
}
