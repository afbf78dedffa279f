//! Release manifest handling
//!
//! A release manifest is a multi-document YAML stream of Kubernetes objects.
//! Exactly one of them is the Secret that carries the git credentials for
//! cluster stacks; its `data` is replaced and the stream written back out.
//!
//! # Example target document
//!
//! ```yaml
//! apiVersion: v1
//! kind: Secret
//! metadata:
//!   name: cso-cluster-stack-variables
//!   namespace: cso-system
//! data:
//!   git-access-token: ${GIT_ACCESS_TOKEN_B64}
//!   git-org-name: ${GIT_ORG_NAME_B64}
//!   git-provider: ${GIT_PROVIDER_B64}
//!   git-repo-name: ${GIT_REPOSITORY_NAME_B64}
//! ```

mod quoting;
mod secret;
mod stream;

pub use quoting::needs_quoting;
pub use secret::{
    is_target, locate_target, secret_data, target_name, Placement, SplitManifest, TargetSearch,
    DATA_KEYS, TARGET_KIND, TARGET_NAME_SUFFIX,
};
pub use stream::{parse_documents, read_documents, render_documents, write_documents};
