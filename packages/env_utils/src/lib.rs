#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DefaultEnvUsizeError {
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),
}

/// # Errors
///
/// * If encounters an invalid digit in the `&str`
pub fn default_env_usize(name: &str, default: usize) -> Result<usize, DefaultEnvUsizeError> {
    parse_or_default(option_env(name).as_deref(), default)
}

/// # Errors
///
/// * If encounters an invalid digit in the `&str`
/// * If the value does not fit in a `u16`
pub fn default_env_u16(name: &str, default: u16) -> Result<u16, DefaultEnvUsizeError> {
    parse_or_default(option_env(name).as_deref(), default)
}

fn parse_or_default<T: FromStr<Err = std::num::ParseIntError>>(
    value: Option<&str>,
    default: T,
) -> Result<T, DefaultEnvUsizeError> {
    match value {
        Some(value) => Ok(value.trim().parse::<T>()?),
        None => Ok(default),
    }
}

/// Reads an environment variable, treating blank values the same as missing ones.
#[must_use]
pub fn option_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|x| !x.trim().is_empty())
}

#[must_use]
pub fn default_env(name: &str, default: &str) -> String {
    option_env(name).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{default_env, default_env_u16, default_env_usize, option_env, parse_or_default};

    const UNSET: &str = "USER_ADMIN_ENV_UTILS_TEST_SURELY_UNSET";

    #[test_log::test]
    fn parse_or_default_uses_default_when_missing() {
        let result: u16 = parse_or_default(None, 8000).unwrap();

        assert_eq!(result, 8000);
    }

    #[test_log::test]
    fn parse_or_default_parses_padded_value() {
        let result: u16 = parse_or_default(Some(" 9090 "), 8000).unwrap();

        assert_eq!(result, 9090);
    }

    #[test_log::test]
    fn parse_or_default_rejects_out_of_range_u16() {
        let result: Result<u16, _> = parse_or_default(Some("70000"), 8000);

        assert!(result.is_err());
    }

    #[test_log::test]
    fn parse_or_default_rejects_invalid_digit() {
        let result: Result<usize, _> = parse_or_default(Some("12a"), 1);

        assert!(result.is_err());
    }

    #[test_log::test]
    fn missing_variables_fall_back_to_defaults() {
        assert_eq!(option_env(UNSET), None);
        assert_eq!(default_env(UNSET, "fallback"), "fallback");
        assert_eq!(default_env_u16(UNSET, 8000).unwrap(), 8000);
        assert_eq!(default_env_usize(UNSET, 64).unwrap(), 64);
    }
}
