//! Shared type definitions.

use std::fmt;
use std::str::FromStr;

use crate::error::PaySignError;

/// The payment API environment a merchant account lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiEnvironment {
    /// Test endpoint (`apitest.cybersource.com`).
    #[default]
    Sandbox,
    /// Live endpoint (`api.cybersource.com`).
    Production,
}

impl ApiEnvironment {
    /// Host name of the payment API for this environment.
    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::Sandbox => "apitest.cybersource.com",
            Self::Production => "api.cybersource.com",
        }
    }

    /// Upper-case name as used in the `VISA_ACCEPTANCE_ENVIRONMENT` variable.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "SANDBOX",
            Self::Production => "PRODUCTION",
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = PaySignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SANDBOX" | "TEST" => Ok(Self::Sandbox),
            "PRODUCTION" | "LIVE" => Ok(Self::Production),
            _ => Err(PaySignError::UnknownEnvironment(s.to_owned())),
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_map_environment_to_host() {
        assert_eq!(ApiEnvironment::Sandbox.host(), "apitest.cybersource.com");
        assert_eq!(ApiEnvironment::Production.host(), "api.cybersource.com");
    }

    #[test]
    fn test_should_parse_environment_case_insensitively() {
        assert_eq!(
            "sandbox".parse::<ApiEnvironment>().unwrap(),
            ApiEnvironment::Sandbox
        );
        assert_eq!(
            " PRODUCTION ".parse::<ApiEnvironment>().unwrap(),
            ApiEnvironment::Production
        );
    }

    #[test]
    fn test_should_reject_unknown_environment() {
        let result = "staging".parse::<ApiEnvironment>();
        assert!(matches!(result, Err(PaySignError::UnknownEnvironment(_))));
    }

    #[test]
    fn test_should_default_to_sandbox() {
        assert_eq!(ApiEnvironment::default(), ApiEnvironment::Sandbox);
    }

    #[test]
    fn test_should_display_environment_upper_case() {
        assert_eq!(ApiEnvironment::Production.to_string(), "PRODUCTION");
        assert_eq!(
            ApiEnvironment::Production.as_str().parse::<ApiEnvironment>().unwrap(),
            ApiEnvironment::Production
        );
    }
}
