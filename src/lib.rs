//! cluster-stack-fetch - release manifest patcher for Cluster Stacks
//!
//! Downloads the infrastructure-components manifest of the Cluster Stack
//! Operator (CSO) or the Cluster Stack Provider OpenStack (CSPO), fills the
//! `*-cluster-stack-variables` Secret with git credentials from the
//! environment, and writes the patched manifest next to the download.
//!
//! # Architecture
//!
//! - **mode**: CSO/CSPO selection and release URL templates
//! - **config**: Environment capture, validation and run settings
//! - **fetch**: HTTP download of the release asset
//! - **manifest**: Multi-document YAML parsing, target lookup and patching
//! - **run**: The end-to-end fetch-patch-write pipeline

pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod manifest;
pub mod mode;
pub mod run;

// Re-exports
pub use error::{FetchError, Result};
pub use mode::Mode;
pub use run::run;
