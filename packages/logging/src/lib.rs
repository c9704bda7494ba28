#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

#[cfg(feature = "macros")]
mod macros;

pub use log;

#[cfg(feature = "free_log")]
pub use free_log::*;

#[cfg(feature = "free_log")]
mod free_log {
    use std::path::PathBuf;

    use free_log_client::FreeLogLayer;
    use thiserror::Error;
    use user_admin_env_utils::{default_env, option_env};

    pub use free_log_client;

    /// Environment variable naming the directory log files are written to.
    pub const LOG_DIR_ENV: &str = "USER_ADMIN_LOG_DIR";

    #[derive(Debug, Error)]
    pub enum InitError {
        #[error(transparent)]
        Logs(#[from] free_log_client::LogsInitError),
        #[error(transparent)]
        BuildLogsConfig(#[from] free_log_client::BuildLogsConfigError),
        #[error(transparent)]
        BuildFileWriterConfig(#[from] free_log_client::BuildFileWriterConfigError),
    }

    /// Resolves the env filter, preferring `USER_ADMIN_LOG`, then `RUST_LOG`, then the
    /// build-dependent default.
    #[must_use]
    pub fn env_filter() -> String {
        #[cfg(debug_assertions)]
        const DEFAULT_LOG_LEVEL: &str = "user_admin=trace";
        #[cfg(not(debug_assertions))]
        const DEFAULT_LOG_LEVEL: &str = "user_admin=info";

        option_env("USER_ADMIN_LOG").unwrap_or_else(|| default_env("RUST_LOG", DEFAULT_LOG_LEVEL))
    }

    #[derive(Debug, PartialEq, Eq)]
    enum LogFile {
        Disabled,
        Path(PathBuf),
        /// A file was requested but there is no directory to put it in.
        MissingDir(String),
    }

    fn log_file(filename: Option<&str>, log_dir: Option<&str>) -> LogFile {
        match (filename, log_dir) {
            (None, _) => LogFile::Disabled,
            (Some(filename), Some(dir)) => LogFile::Path(PathBuf::from(dir).join(filename)),
            (Some(filename), None) => LogFile::MissingDir(filename.to_string()),
        }
    }

    /// Initializes the global logger.
    ///
    /// When `filename` is given and `USER_ADMIN_LOG_DIR` is set, debug level logs are also
    /// written to that file.
    ///
    /// # Errors
    ///
    /// * If the logs config fails to build
    /// * If the file writer config fails to build
    /// * If the global logger was already initialized
    pub fn init(filename: Option<&str>) -> Result<FreeLogLayer, InitError> {
        let mut logs_config = free_log_client::LogsConfig::builder();
        let target = log_file(filename, option_env(LOG_DIR_ENV).as_deref());

        if let LogFile::Path(path) = &target {
            logs_config = logs_config.with_file_writer(
                free_log_client::FileWriterConfig::builder()
                    .file_path(path.clone())
                    .log_level(free_log_client::Level::Debug),
            )?;
        }

        let layer = free_log_client::init(logs_config.env_filter(env_filter()))?;

        if let LogFile::MissingDir(filename) = target {
            log::warn!("{LOG_DIR_ENV} is not set, not writing logs to {filename}");
        }

        Ok(layer)
    }

}
