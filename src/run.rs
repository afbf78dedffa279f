//! Fetch, patch and write a release manifest

use crate::config::{GitCredentials, Settings};
use crate::fetch::ReleaseClient;
use crate::manifest::{self, Placement};
use crate::Result;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to the downloaded file's path for the patched output
pub const PATCHED_SUFFIX: &str = "_patched";

/// Download the manifest for `settings`, patch it and return the output path
pub async fn run(settings: &Settings) -> Result<PathBuf> {
    let url = settings.manifest_url();
    tracing::info!(mode = %settings.mode, version = %settings.version, "Fetching release manifest");

    let client =
        ReleaseClient::new(settings.timeout)?.with_download_dir(settings.download_dir.clone());
    let downloaded = client.download(&url).await?;

    patch_file(&downloaded, &settings.credentials, settings.placement)
}

/// Patch the manifest stored at `path` into `<path>_patched`
///
/// Nothing is written when the target Secret is missing or ambiguous.
pub fn patch_file(
    path: &Path,
    credentials: &GitCredentials,
    placement: Placement,
) -> Result<PathBuf> {
    let documents = manifest::read_documents(path)?;
    let split = manifest::locate_target(documents).into_result()?;
    let patched = split.patch(credentials, placement);

    let output = patched_path(path);
    manifest::write_documents(&output, &patched)?;
    Ok(output)
}

/// Write `path` to `out` with no trailing newline and flush it
///
/// A failed write or flush is an error, so a caller never exits 0 without
/// having delivered the path.
pub fn emit_path<W: Write>(mut out: W, path: &Path) -> Result<()> {
    write!(out, "{}", path.display())?;
    out.flush()?;
    Ok(())
}

/// `<path>_patched`
pub fn patched_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(PATCHED_SUFFIX);
    PathBuf::from(name)
}
