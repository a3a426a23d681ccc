use crate::error::{QualityError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::collections::HashMap;
use std::path::Path;
use validator::Validate;

/// Credential keys as they appear in the environment and the secrets file.
#[derive(Debug, Default, Deserialize)]
struct RawCredentials {
    #[serde(alias = "PG_USER")]
    pg_user: Option<String>,
    #[serde(alias = "PG_PASSWORD")]
    pg_password: Option<String>,
    #[serde(alias = "PG_HOST")]
    pg_host: Option<String>,
    #[serde(alias = "PG_PORT")]
    pg_port: Option<String>,
    #[serde(alias = "PG_DB")]
    pg_db: Option<String>,
}

#[derive(Clone, Validate)]
pub struct DbCredentials {
    #[validate(length(min = 1))]
    pub user: String,

    pub password: String,

    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    #[validate(length(min = 1))]
    pub dbname: String,
}

impl std::fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .finish()
    }
}

impl DbCredentials {
    /// Load credentials from the process environment, overridden by the
    /// secrets file when it exists.
    pub fn load(secrets_file: &Path) -> Result<Self> {
        Self::load_from(secrets_file, None)
    }

    /// Same as [`DbCredentials::load`], with an explicit environment map in
    /// place of the process environment.
    pub fn load_from(
        secrets_file: &Path,
        environment: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::default().source(environment))
            .add_source(
                File::new(&secrets_file.to_string_lossy(), FileFormat::Toml).required(false),
            )
            .build()?;

        let raw: RawCredentials = settings.try_deserialize()?;
        tracing::debug!(secrets_file = %secrets_file.display(), "resolved credential sources");
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCredentials) -> Result<Self> {
        let entries = [
            ("user", &raw.pg_user),
            ("password", &raw.pg_password),
            ("host", &raw.pg_host),
            ("port", &raw.pg_port),
            ("dbname", &raw.pg_db),
        ];
        let missing: Vec<&str> = entries
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(key, _)| *key)
            .collect();
        if !missing.is_empty() {
            return Err(QualityError::MissingCredentials(missing.join(", ")));
        }

        let port_text = raw.pg_port.unwrap_or_default();
        let port = port_text
            .trim()
            .parse::<u16>()
            .map_err(|e| QualityError::InvalidCredential {
                key: "port",
                message: format!("'{}' is not a valid port ({})", port_text, e),
            })?;

        let credentials = Self {
            user: raw.pg_user.unwrap_or_default(),
            password: raw.pg_password.unwrap_or_default(),
            host: raw.pg_host.unwrap_or_default(),
            port,
            dbname: raw.pg_db.unwrap_or_default(),
        };
        credentials.validate()?;

        Ok(credentials)
    }

    /// Driver options; the password is passed as-is, so no URL escaping is needed.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
    }

    /// Connection string with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        format!(
            "postgresql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.dbname
        )
    }
}
