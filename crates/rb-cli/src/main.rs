//! roguebook: build tool for the roguelike tutorial book.
//!
//! Renders the AsciiDoc chapters, checks the generated listings
//! against the reference source tree, and publishes the rendered site.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};

use rb_book::BookConfig;
use rb_publish::PublishOptions;

/// Build, check and publish the roguelike tutorial book.
#[derive(Parser, Debug)]
#[command(name = "roguebook", version, about, long_about = None)]
struct Args {
    /// Book repository root
    #[arg(long = "book-dir", default_value = ".")]
    book_dir: PathBuf,

    /// Override the document renderer program
    #[arg(long)]
    renderer: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: CommandKind,
}

#[derive(Subcommand, Debug)]
enum CommandKind {
    /// Render the book and normalize the generated listings
    Docs,
    /// Diff the normalized listings against the reference source tree
    DiffRust {
        /// Emit the machine-readable JSON report instead of unified diffs
        #[arg(long)]
        json: bool,
    },
    /// Open the rendered book in a browser
    Preview,
    /// Publish the rendered book to the publish branch
    Publish {
        /// Commit message for the publish commit
        #[arg(long, default_value = "Update the rendered tutorial")]
        message: String,
    },
    /// Remove the rendered output directory
    Clean,
    /// List book contributors from git history
    Contributors {
        #[command(subcommand)]
        list: ContributorList,
    },
}

#[derive(Subcommand, Debug)]
enum ContributorList {
    /// Sorted unique author names
    Names,
    /// Sorted markdown link list
    Links,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _logger = init_logging(args.verbose);
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) -> Option<flexi_logger::LoggerHandle> {
    let spec = if verbose { "debug" } else { "info" };
    let logger = match flexi_logger::Logger::try_with_env_or_str(spec) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("logging setup failed: {err}");
            return None;
        }
    };
    match logger.log_to_stderr().start() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("logging setup failed: {err}");
            None
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut config = BookConfig::load_or_default(&args.book_dir)
        .with_context(|| format!("loading book config from {}", args.book_dir.display()))?;
    if let Some(renderer) = args.renderer {
        config.renderer = renderer;
    }

    match args.command {
        CommandKind::Docs => {
            let summary = rb_book::render(&config)?;
            println!(
                "Rendered {} chapters and {} listing templates; normalized {} listings ({} changed)",
                summary.prose_rendered,
                summary.listings_rendered,
                summary.listings_normalized,
                summary.listings_changed
            );
            Ok(ExitCode::SUCCESS)
        }
        CommandKind::DiffRust { json } => {
            let label = format!(
                "{} vs {}",
                config.output_dir.display(),
                config.reference_dir.display()
            );
            let report =
                rb_compare::compare_trees(&config.output_path(), &config.reference_path(), label)?;
            if json {
                println!("{}", report.to_json());
            } else {
                for entry in &report.entries {
                    if let Some(diff) = &entry.diff {
                        print!("{diff}");
                    }
                }
                report.print_summary();
            }
            Ok(if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        CommandKind::Preview => {
            rb_book::render(&config)?;
            open_page(&config.index_page())?;
            Ok(ExitCode::SUCCESS)
        }
        CommandKind::Publish { message } => {
            let opts = PublishOptions {
                branch: config.publish_branch.clone(),
                remote: config.remote.clone(),
                output_dir: config.output_dir.clone(),
                message,
            };
            rb_publish::publish(&config.book_dir, &opts)?;
            println!(
                "Published {} to {}/{}",
                config.output_dir.display(),
                opts.remote,
                opts.branch
            );
            Ok(ExitCode::SUCCESS)
        }
        CommandKind::Clean => {
            rb_book::clean(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        CommandKind::Contributors { list } => {
            let git = rb_publish::GitClient::new(&config.book_dir);
            let contributors = rb_publish::contributors(&git)?;
            let lines = match list {
                ContributorList::Names => rb_publish::names(&contributors),
                ContributorList::Links => rb_publish::markdown_links(&contributors),
            };
            for line in lines {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(target_os = "macos")]
fn open_page(page: &Path) -> anyhow::Result<()> {
    Command::new("open")
        .arg(page)
        .spawn()
        .with_context(|| format!("opening {}", page.display()))?;
    Ok(())
}

#[cfg(target_os = "windows")]
fn open_page(page: &Path) -> anyhow::Result<()> {
    Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(page)
        .spawn()
        .with_context(|| format!("opening {}", page.display()))?;
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_page(page: &Path) -> anyhow::Result<()> {
    Command::new("xdg-open")
        .arg(page)
        .spawn()
        .with_context(|| format!("opening {}", page.display()))?;
    Ok(())
}
