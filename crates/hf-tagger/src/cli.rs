use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Repository list written by `scan` and read by `review`
pub const DEFAULT_REPO_LIST: &str = "no_library_repos.yaml";

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Review Hub model cards and open metadata pull requests")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of .hf-tagger.toml lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bypass the API response cache entirely
    #[arg(long, global = true, conflicts_with = "refresh")]
    pub no_cache: bool,

    /// Ignore cached responses but store fresh ones
    #[arg(long, global = true)]
    pub refresh: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List trending models that have no library_name
    Scan(ScanArgs),
    /// Sort repositories into library/keyword buckets
    Categorize(CategorizeArgs),
    /// Page through READMEs, confirm and open metadata PRs
    Review(ReviewArgs),
    /// Open the metadata PR for a single repository
    Update(RepoArgs),
    /// Show the metadata of a single repository
    Info(RepoArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    /// Sort key (likes7d, likes30d, downloads, ...)
    #[arg(long)]
    pub sort: Option<String>,

    /// Number of trending models to inspect
    #[arg(long)]
    pub limit: Option<usize>,

    /// Where to write the YAML id list
    #[arg(long, default_value = DEFAULT_REPO_LIST)]
    pub output: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CategorizeArgs {
    /// Repository ids
    #[arg(required_unless_present = "file")]
    pub repos: Vec<String>,

    /// Read repository ids from a YAML list or one-per-line file
    #[arg(long, conflicts_with = "repos")]
    pub file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ReviewArgs {
    /// YAML list or one-per-line file of repository ids
    #[arg(long, default_value = DEFAULT_REPO_LIST)]
    pub file: PathBuf,

    /// Review only; do not open pull requests
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RepoArgs {
    /// Repository id, e.g. openai-community/gpt2
    pub repo: String,
}
