//! Configuration system
//!
//! The process environment is the only configuration source:
//! - CSO_VERSION / CSPO_VERSION pick the release tag
//! - GIT_*_B64 variables carry the credentials copied into the Secret
//!
//! Optional knobs (release host, organization, timeout, placement) come from
//! the command line via [`FetchOptions`].

mod settings;
pub mod validation;

pub use settings::{EnvSnapshot, FetchOptions, GitCredentials, Settings, GIT_VARS, VERSION_VARS};
pub use validation::{
    require_version, validate_env, validate_env_result, ValidationError, ValidationResult,
};
