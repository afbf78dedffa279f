//! fetch-cso-cspo - fetch a CSO/CSPO release manifest and inject git credentials
//!
//! Prints the path of the patched manifest without a trailing newline so a
//! shell can capture it with `$(fetch-cso-cspo cso)`.

use clap::error::ErrorKind;
use clap::Parser;
use cluster_stack_fetch::config::{validate_env_result, EnvSnapshot, FetchOptions, Settings};
use cluster_stack_fetch::manifest::Placement;
use cluster_stack_fetch::mode::{DEFAULT_GITHUB_ORG, DEFAULT_RELEASE_BASE_URL};
use cluster_stack_fetch::run::emit_path;
use cluster_stack_fetch::{FetchError, Mode};
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// Fetch a cluster-stack release manifest and fill in its git credentials
///
/// Requires CSO_VERSION or CSPO_VERSION and the GIT_ACCESS_TOKEN_B64,
/// GIT_ORG_NAME_B64, GIT_PROVIDER_B64 and GIT_REPOSITORY_NAME_B64 variables.
#[derive(Parser, Debug)]
#[command(name = "fetch-cso-cspo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Release to fetch: cso or cspo
    mode: Option<String>,

    /// Host serving GitHub release downloads
    #[arg(long, env = "CLUSTER_STACK_RELEASE_BASE_URL", default_value = DEFAULT_RELEASE_BASE_URL)]
    release_base_url: String,

    /// GitHub organization owning the release repositories
    #[arg(long, env = "CLUSTER_STACK_GITHUB_ORG", default_value = DEFAULT_GITHUB_ORG)]
    github_org: String,

    /// Abort the download after this many seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Keep the patched Secret at its original position instead of appending it
    #[arg(long)]
    keep_order: bool,

    /// Directory for the downloaded manifest (default: system temp dir)
    #[arg(long, value_name = "DIR")]
    download_dir: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> FetchOptions {
        FetchOptions {
            release_base_url: self.release_base_url.clone(),
            github_org: self.github_org.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            placement: if self.keep_order {
                Placement::InPlace
            } else {
                Placement::Append
            },
            download_dir: self.download_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    if let Err(e) = cluster_stack_fetch::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = match Cli::try_parse() {
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        parsed => parsed,
    };

    let result = run(cli)
        .await
        .and_then(|path| emit_path(std::io::stdout().lock(), &path));

    if let Err(e) = result {
        // stdout may be the thing that failed; the exit status still reports it
        let _ = writeln!(std::io::stdout(), "{}", e);
        process::exit(e.exit_code());
    }
}

/// Validate the environment before the arguments, matching the exit-code order
/// scripts rely on: missing variables (1) win over a bad mode (2).
async fn run(cli: Result<Cli, clap::Error>) -> cluster_stack_fetch::Result<PathBuf> {
    let env = EnvSnapshot::from_env();
    validate_env_result(&env)?;

    let cli = cli.map_err(|e| FetchError::Usage(clap_summary(&e)))?;
    let mode: Mode = cli
        .mode
        .as_deref()
        .ok_or_else(|| FetchError::Usage("missing mode argument".to_string()))?
        .parse()?;

    let settings = Settings::resolve(&env, mode, cli.options())?;
    tracing::debug!(?settings, "Resolved settings");

    cluster_stack_fetch::run(&settings).await
}

/// First line of a clap error without its `error:` prefix
fn clap_summary(e: &clap::Error) -> String {
    let rendered = e.to_string();
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}
