//! Run settings assembled from the environment and command line

use super::validation::{require_version, ValidationError};
use crate::manifest::Placement;
use crate::mode::{Mode, DEFAULT_GITHUB_ORG, DEFAULT_RELEASE_BASE_URL};
use crate::{FetchError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Version variables, one per mode
pub const VERSION_VARS: [&str; 2] = ["CSO_VERSION", "CSPO_VERSION"];

/// Credential variables, always required
pub const GIT_VARS: [&str; 4] = [
    "GIT_ACCESS_TOKEN_B64",
    "GIT_ORG_NAME_B64",
    "GIT_PROVIDER_B64",
    "GIT_REPOSITORY_NAME_B64",
];

/// The known environment variables, captured once
///
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the known variables from the process environment
    pub fn from_env() -> Self {
        Self::from_pairs(
            VERSION_VARS
                .iter()
                .chain(GIT_VARS.iter())
                .filter_map(|key| std::env::var(key).ok().map(|value| (*key, value))),
        )
    }

    /// Build a snapshot from arbitrary key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .filter_map(|(k, v)| {
                let value: String = v.into();
                (!value.is_empty()).then(|| (k.into(), value))
            })
            .collect();
        Self { vars }
    }

    /// Non-empty value of `key`, if set
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Base64 git credentials written into the cluster-stack variables Secret
///
/// Values are copied verbatim and never decoded.
#[derive(Clone, PartialEq, Eq)]
pub struct GitCredentials {
    pub access_token: String,
    pub org_name: String,
    pub provider: String,
    pub repository_name: String,
}

impl GitCredentials {
    /// Read the four GIT_*_B64 variables
    pub fn from_env(env: &EnvSnapshot) -> Result<Self> {
        let mut missing = Vec::new();
        let mut take = |key: &str| match env.get(key) {
            Some(value) => value.to_string(),
            None => {
                missing.push(ValidationError::new(key, "must be set and non-empty"));
                String::new()
            }
        };

        let credentials = Self {
            access_token: take(GIT_VARS[0]),
            org_name: take(GIT_VARS[1]),
            provider: take(GIT_VARS[2]),
            repository_name: take(GIT_VARS[3]),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(FetchError::MissingEnv(missing))
        }
    }
}

impl fmt::Debug for GitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitCredentials")
            .field("access_token", &"<redacted>")
            .field("org_name", &self.org_name)
            .field("provider", &self.provider)
            .field("repository_name", &self.repository_name)
            .finish()
    }
}

/// Optional knobs that do not come from the required environment
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Host serving release downloads
    pub release_base_url: String,

    /// GitHub organization owning the release repositories
    pub github_org: String,

    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,

    /// Where the patched document goes in the output
    pub placement: Placement,

    /// Directory for the downloaded manifest; `None` uses the system temp dir
    pub download_dir: Option<PathBuf>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            release_base_url: DEFAULT_RELEASE_BASE_URL.to_string(),
            github_org: DEFAULT_GITHUB_ORG.to_string(),
            timeout: None,
            placement: Placement::default(),
            download_dir: None,
        }
    }
}

/// Fully resolved input for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub version: String,
    pub credentials: GitCredentials,
    pub release_base_url: String,
    pub github_org: String,
    pub timeout: Option<Duration>,
    pub placement: Placement,
    pub download_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings for `mode`
    ///
    /// Only the version variable of the selected mode is required here.
    pub fn resolve(env: &EnvSnapshot, mode: Mode, options: FetchOptions) -> Result<Self> {
        let version = require_version(env, mode)?;
        let credentials = GitCredentials::from_env(env)?;

        Ok(Self {
            mode,
            version,
            credentials,
            release_base_url: options.release_base_url,
            github_org: options.github_org,
            timeout: options.timeout,
            placement: options.placement,
            download_dir: options.download_dir,
        })
    }

    /// Download URL of the release manifest
    pub fn manifest_url(&self) -> String {
        self.mode
            .artifact()
            .url(&self.release_base_url, &self.github_org, &self.version)
    }
}
