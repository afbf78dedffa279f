//! Locating and patching the cluster-stack variables Secret

use crate::config::GitCredentials;
use crate::{FetchError, Result};
use serde_yaml::{Mapping, Value};

/// `kind` of the document to patch
pub const TARGET_KIND: &str = "Secret";

/// Suffix of `metadata.name`, shared by the CSO and CSPO manifests
pub const TARGET_NAME_SUFFIX: &str = "-cluster-stack-variables";

/// Keys written into the Secret's `data`, in output order
pub const DATA_KEYS: [&str; 4] = [
    "git-access-token",
    "git-org-name",
    "git-provider",
    "git-repo-name",
];

/// Where the patched Secret is placed in the output stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    /// After every other document
    #[default]
    Append,
    /// At the position it was found
    InPlace,
}

/// A manifest split into the target Secret and everything else
#[derive(Debug, Clone, PartialEq)]
pub struct SplitManifest {
    /// Non-matching documents, in encounter order
    pub rest: Vec<Value>,

    /// The matched Secret
    pub target: Value,

    /// Index of the target in the original stream
    pub position: usize,
}

/// Outcome of scanning a manifest for the target Secret
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSearch {
    NotFound,
    Found(SplitManifest),
    /// Names of the first two matches
    Ambiguous { names: Vec<String> },
}

/// `metadata.name` of `document` if it is the target Secret
pub fn target_name(document: &Value) -> Option<&str> {
    if document.get("kind")?.as_str()? != TARGET_KIND {
        return None;
    }
    let name = document.get("metadata")?.get("name")?.as_str()?;
    name.ends_with(TARGET_NAME_SUFFIX).then_some(name)
}

/// Whether `document` is the target Secret
pub fn is_target(document: &Value) -> bool {
    target_name(document).is_some()
}

/// Scan `documents` once for the target Secret
///
/// The scan stops at the second match.
pub fn locate_target(documents: Vec<Value>) -> TargetSearch {
    let mut rest = Vec::with_capacity(documents.len());
    let mut found: Option<(usize, String, Value)> = None;

    for (index, document) in documents.into_iter().enumerate() {
        let Some(name) = target_name(&document).map(str::to_string) else {
            rest.push(document);
            continue;
        };

        if let Some((_, first, _)) = &found {
            tracing::warn!(first = %first, second = %name, "Second cluster-stack variables Secret");
            return TargetSearch::Ambiguous {
                names: vec![first.clone(), name],
            };
        }

        tracing::debug!(index, name = %name, "Found cluster-stack variables Secret");
        found = Some((index, name, document));
    }

    match found {
        Some((position, _, target)) => TargetSearch::Found(SplitManifest {
            rest,
            target,
            position,
        }),
        None => TargetSearch::NotFound,
    }
}

impl TargetSearch {
    /// Turn the search outcome into the split manifest or its error
    pub fn into_result(self) -> Result<SplitManifest> {
        match self {
            TargetSearch::Found(split) => Ok(split),
            TargetSearch::NotFound => Err(FetchError::TargetNotFound),
            TargetSearch::Ambiguous { names } => Err(FetchError::AmbiguousTarget(names)),
        }
    }
}

/// Replacement `data` mapping built from the credentials
pub fn secret_data(credentials: &GitCredentials) -> Mapping {
    let values = [
        &credentials.access_token,
        &credentials.org_name,
        &credentials.provider,
        &credentials.repository_name,
    ];

    DATA_KEYS
        .iter()
        .zip(values)
        .map(|(key, value)| (Value::String(key.to_string()), Value::String(value.clone())))
        .collect()
}

fn mapping_mut(value: &mut Value) -> Option<&mut Mapping> {
    match value {
        Value::Mapping(mapping) => Some(mapping),
        Value::Tagged(tagged) => mapping_mut(&mut tagged.value),
        _ => None,
    }
}

impl SplitManifest {
    /// Replace the target's `data` wholesale and reassemble the stream
    pub fn patch(mut self, credentials: &GitCredentials, placement: Placement) -> Vec<Value> {
        if let Some(mapping) = mapping_mut(&mut self.target) {
            mapping.insert(
                Value::String("data".to_string()),
                Value::Mapping(secret_data(credentials)),
            );
        }

        let mut documents = self.rest;
        match placement {
            Placement::Append => documents.push(self.target),
            Placement::InPlace => documents.insert(self.position, self.target),
        }
        documents
    }
}
