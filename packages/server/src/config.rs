use user_admin_client::Credentials;
use user_admin_env_utils::{DefaultEnvUsizeError, default_env, default_env_u16, option_env};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port argument '{0}'")]
    InvalidPortArgument(String),
    #[error("Invalid PORT environment variable: {0}")]
    InvalidPort(#[from] DefaultEnvUsizeError),
    #[error("Invalid ACTIX_WORKERS environment variable: {0}")]
    InvalidWorkers(std::num::ParseIntError),
    #[error("USER_ADMIN_API_USERNAME and USER_ADMIN_API_PASSWORD must be set together")]
    IncompleteBasicAuth,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub api_url: String,
    pub credentials: Option<Credentials>,
    pub workers: Option<usize>,
}

impl ServerConfig {
    /// Reads the configuration from the environment. `port_arg`, usually the first CLI
    /// argument, takes precedence over `PORT`.
    ///
    /// # Errors
    ///
    /// * If the port argument or `PORT` is not a valid `u16`
    /// * If `ACTIX_WORKERS` is not a valid number
    /// * If only one of the basic auth variables is set
    pub fn from_env(port_arg: Option<&str>) -> Result<Self, ConfigError> {
        let port = match port_arg {
            Some(arg) => arg
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPortArgument(arg.to_string()))?,
            None => default_env_u16("PORT", DEFAULT_PORT)?,
        };

        let workers = option_env("ACTIX_WORKERS")
            .map(|x| x.trim().parse::<usize>())
            .transpose()
            .map_err(ConfigError::InvalidWorkers)?;

        Ok(Self {
            bind_addr: default_env("BIND_ADDR", "0.0.0.0"),
            port,
            api_url: default_env("USER_ADMIN_API_URL", DEFAULT_API_URL),
            credentials: credentials_from(
                option_env("USER_ADMIN_API_TOKEN"),
                option_env("USER_ADMIN_API_USERNAME"),
                option_env("USER_ADMIN_API_PASSWORD"),
            )?,
            workers,
        })
    }
}

/// A bearer token wins over basic auth. No values means anonymous requests.
///
/// # Errors
///
/// * If exactly one of `username` and `password` is given
pub fn credentials_from(
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<Credentials>, ConfigError> {
    if let Some(token) = token {
        return Ok(Some(Credentials::Bearer(token)));
    }

    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(Credentials::Basic { username, password })),
        (None, None) => Ok(None),
        _ => Err(ConfigError::IncompleteBasicAuth),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn token_takes_precedence_over_basic_auth() {
        let credentials = credentials_from(
            Some("abc".to_string()),
            Some("test@liferay.com".to_string()),
            Some("test".to_string()),
        )
        .unwrap();

        assert_eq!(credentials, Some(Credentials::Bearer("abc".to_string())));
    }

    #[test_log::test]
    fn username_and_password_make_basic_auth() {
        let credentials = credentials_from(
            None,
            Some("test@liferay.com".to_string()),
            Some("test".to_string()),
        )
        .unwrap();

        assert_eq!(
            credentials,
            Some(Credentials::Basic {
                username: "test@liferay.com".to_string(),
                password: "test".to_string(),
            })
        );
    }

    #[test_log::test]
    fn nothing_set_is_anonymous() {
        assert_eq!(credentials_from(None, None, None).unwrap(), None);
    }

    #[test_log::test]
    fn username_without_password_is_an_error() {
        let result = credentials_from(None, Some("test@liferay.com".to_string()), None);

        assert!(matches!(result, Err(ConfigError::IncompleteBasicAuth)));
    }

    #[test_log::test]
    fn invalid_port_argument_is_an_error() {
        let result = ServerConfig::from_env(Some("not-a-port"));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPortArgument(arg)) if arg == "not-a-port"
        ));
    }
}
