//! Configuration surface for the storefront under test.
//!
//! Credentials and the target URL resolve from environment variables with
//! fixed fallback literals, so a suite can retarget a deployment without
//! code changes. Resolution goes through an injected lookup function, which
//! keeps it testable without touching process state.

use crate::result::ComprarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default storefront URL
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";

/// Password shared by every demo account
pub const DEFAULT_PASSWORD: &str = "secret_sauce";

/// Environment variable overriding the storefront URL
pub const BASE_URL_ENV: &str = "SAUCE_BASE_URL";

/// Environment variable overriding the shared password
pub const PASSWORD_ENV: &str = "SAUCE_PASSWORD";

/// Account categories the storefront provisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Well-behaved account
    Standard,
    /// Account rejected at login
    Locked,
    /// Account with known rendering defects
    Problem,
    /// Account with artificial latency
    Performance,
    /// Account that triggers client-side errors
    Error,
    /// Account with visual differences
    Visual,
}

impl UserType {
    /// Every provisioned user type
    pub const ALL: [Self; 6] = [
        Self::Standard,
        Self::Locked,
        Self::Problem,
        Self::Performance,
        Self::Error,
        Self::Visual,
    ];

    /// Key name for this user type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Locked => "locked",
            Self::Problem => "problem",
            Self::Performance => "performance",
            Self::Error => "error",
            Self::Visual => "visual",
        }
    }

    /// Default account name for this user type
    #[must_use]
    pub const fn default_username(self) -> &'static str {
        match self {
            Self::Standard => "standard_user",
            Self::Locked => "locked_out_user",
            Self::Problem => "problem_user",
            Self::Performance => "performance_glitch_user",
            Self::Error => "error_user",
            Self::Visual => "visual_user",
        }
    }

    /// Environment variable overriding this user type's account name
    #[must_use]
    pub fn username_env(self) -> String {
        format!("SAUCE_USERNAME_{}", self.as_str().to_uppercase())
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ComprarError;

    /// Keys are the lowercase names; anything else fails fast
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "locked" => Ok(Self::Locked),
            "problem" => Ok(Self::Problem),
            "performance" => Ok(Self::Performance),
            "error" => Ok(Self::Error),
            "visual" => Ok(Self::Visual),
            other => Err(ComprarError::UnknownUserType {
                name: other.to_string(),
            }),
        }
    }
}

/// Login credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credential {
    /// Create a new credential pair
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Resolved credentials for every user type
///
/// The map is total by construction: lookups cannot miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredentials {
    standard: Credential,
    locked: Credential,
    problem: Credential,
    performance: Credential,
    error: Credential,
    visual: Credential,
}

impl UserCredentials {
    /// Resolve credentials through a configuration lookup
    ///
    /// Each username checks its own override variable; the password override
    /// is shared across all user types. Absent values fall back to the fixed
    /// demo literals.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let password = lookup(PASSWORD_ENV).unwrap_or_else(|| DEFAULT_PASSWORD.to_string());
        let credential = |user_type: UserType| {
            let username = lookup(&user_type.username_env())
                .unwrap_or_else(|| user_type.default_username().to_string());
            Credential::new(username, password.clone())
        };
        Self {
            standard: credential(UserType::Standard),
            locked: credential(UserType::Locked),
            problem: credential(UserType::Problem),
            performance: credential(UserType::Performance),
            error: credential(UserType::Error),
            visual: credential(UserType::Visual),
        }
    }

    /// Resolve credentials from process environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Credential for a user type
    #[must_use]
    pub const fn credential_for(&self, user_type: UserType) -> &Credential {
        match user_type {
            UserType::Standard => &self.standard,
            UserType::Locked => &self.locked,
            UserType::Problem => &self.problem,
            UserType::Performance => &self.performance,
            UserType::Error => &self.error,
            UserType::Visual => &self.visual,
        }
    }
}

impl Default for UserCredentials {
    fn default() -> Self {
        Self::resolve(|_| None)
    }
}

/// Suite configuration: target URL plus resolved credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Storefront root URL
    pub base_url: String,
    /// Credentials for every user type
    pub users: UserCredentials,
}

impl TestConfig {
    /// Resolve configuration through a lookup
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            users: UserCredentials::resolve(&lookup),
        }
    }

    /// Resolve configuration from process environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Override the storefront URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::resolve(|_| None)
    }
}
