//! Release mode selection
//!
//! A mode picks which cluster-stack release artifact is fetched and which
//! version variable names its tag.

use crate::FetchError;
use std::fmt;
use std::str::FromStr;

/// Default host serving GitHub release downloads
pub const DEFAULT_RELEASE_BASE_URL: &str = "https://github.com";

/// Default GitHub organization owning both release repositories
pub const DEFAULT_GITHUB_ORG: &str = "SovereignCloudStack";

/// Which release artifact to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Cluster Stack Operator
    Cso,
    /// Cluster Stack Provider OpenStack
    Cspo,
}

/// Location of a release asset inside a GitHub repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseArtifact {
    /// Repository name under the organization
    pub repository: &'static str,

    /// Asset file name attached to the release
    pub file_name: &'static str,
}

impl Mode {
    /// Parse a command-line argument. Matching is case-sensitive.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "cso" => Some(Mode::Cso),
            "cspo" => Some(Mode::Cspo),
            _ => None,
        }
    }

    /// Command-line spelling of this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Cso => "cso",
            Mode::Cspo => "cspo",
        }
    }

    /// Environment variable holding the release tag for this mode
    pub fn version_var(&self) -> &'static str {
        match self {
            Mode::Cso => "CSO_VERSION",
            Mode::Cspo => "CSPO_VERSION",
        }
    }

    /// Release asset fetched in this mode
    pub fn artifact(&self) -> ReleaseArtifact {
        match self {
            Mode::Cso => ReleaseArtifact {
                repository: "cluster-stack-operator",
                file_name: "cso-infrastructure-components.yaml",
            },
            Mode::Cspo => ReleaseArtifact {
                repository: "cluster-stack-provider-openstack",
                file_name: "cspo-infrastructure-components.yaml",
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_arg(s)
            .ok_or_else(|| FetchError::Usage(format!("unknown mode '{}', expected cso or cspo", s)))
    }
}

impl ReleaseArtifact {
    /// Download URL of this asset for a release tag
    ///
    /// The version is inserted verbatim.
    pub fn url(&self, base: &str, org: &str, version: &str) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/{}",
            base.trim_end_matches('/'),
            org,
            self.repository,
            version,
            self.file_name
        )
    }
}
