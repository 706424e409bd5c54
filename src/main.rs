//! apicommit - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use git2::Repository;
use tracing_subscriber::EnvFilter;

use apicommit::artifacts::ArtifactLayout;
use apicommit::orchestrator::executor::{GitCli, Identity};
use apicommit::orchestrator::{self, CommitConfig};
use apicommit::summary::{self, SummaryConfig};

#[derive(Parser)]
#[command(name = "apicommit")]
#[command(about = "Summarize discovery-document changes and commit generated API client artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one commit per changed API using prepared summary files
    Commit {
        /// Manifest of changed API identifiers
        #[arg(long, default_value = "changed_files")]
        manifest: PathBuf,

        /// Directory holding the per-API .verbose commit messages
        #[arg(long, default_value = "temp")]
        temp_dir: PathBuf,

        /// Directory holding the discovery documents
        #[arg(long, default_value = "googleapiclient/discovery_cache/documents")]
        discovery_dir: PathBuf,

        /// Directory holding the generated HTML docs
        #[arg(long, default_value = "docs/dyn")]
        docs_dir: PathBuf,

        /// Push each commit after creating it
        #[arg(long)]
        push: bool,

        /// Remote to push to
        #[arg(long, default_value = "origin")]
        remote: String,

        /// Branch to push to
        #[arg(long, default_value = "master")]
        branch: String,

        /// Treat a missing summary file as a hard error instead of a skip
        #[arg(long)]
        strict: bool,

        /// Committer name
        #[arg(long, default_value = "Yoshi Automation")]
        author_name: String,

        /// Committer email
        #[arg(long, default_value = "yoshi-automation@google.com")]
        author_email: String,
    },

    /// Diff discovery artifacts and write per-API commit summaries
    Summarize {
        /// Directory with the newly generated discovery documents
        #[arg(long)]
        new_dir: PathBuf,

        /// Directory with the currently committed discovery documents
        #[arg(long)]
        current_dir: PathBuf,

        /// Manifest of changed documents (defaults to <new-dir>/changed_files)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Where to write the per-API .verbose files
        #[arg(long, default_value = "temp")]
        temp_dir: PathBuf,

        /// Print the reports as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Commit {
            manifest,
            temp_dir,
            discovery_dir,
            docs_dir,
            push,
            remote,
            branch,
            strict,
            author_name,
            author_email,
        } => {
            let repo = Repository::open(".")
                .context("Not a git repository. Run apicommit from within a git repository.")?;
            let workdir = repo
                .workdir()
                .context("Bare repository not supported")?
                .to_path_buf();

            let config = CommitConfig {
                manifest,
                layout: ArtifactLayout {
                    discovery_dir,
                    docs_dir,
                    temp_dir,
                },
                push,
                remote,
                branch,
                strict,
            };
            let vcs = GitCli::new(
                workdir,
                Identity {
                    name: author_name,
                    email: author_email,
                },
            );

            println!("Committing changed APIs:");
            let report = orchestrator::run(&config, &vcs)
                .context("Commit orchestration failed")?;

            println!();
            println!(
                "{} committed, {} skipped, {} failed",
                report.committed.len(),
                report.skipped.len(),
                report.failed.len()
            );

            if !report.failed.is_empty() {
                bail!("{} API(s) failed to commit", report.failed.len());
            }
            Ok(())
        }

        Commands::Summarize {
            new_dir,
            current_dir,
            manifest,
            temp_dir,
            json,
        } => {
            let manifest = manifest.unwrap_or_else(|| new_dir.join("changed_files"));
            let config = SummaryConfig {
                new_dir,
                current_dir,
                manifest,
                temp_dir,
            };

            let reports = summary::run(&config).context("Failed to summarize changes")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
                return Ok(());
            }

            if reports.is_empty() {
                println!("No changes detected.");
                return Ok(());
            }

            for report in &reports {
                println!("{}", report.summary);
            }
            println!();
            for report in &reports {
                println!("{}", report.verbose);
            }

            Ok(())
        }
    }
}
