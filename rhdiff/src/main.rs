use anyhow::Result;
use clap::{CommandFactory, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rhdiff",
    version,
    about = "Compare the filesystem contents of two remote hosts over SSH",
    long_about = "`rhdiff` audits two hosts that are meant to be identical. It connects to
both over SSH, enumerates the files under a set of root directories, and
reports files present on only one host as well as files whose content
differs.

The report is written to stdout as JSON with four keys: \"additions\"
(paths only on HOST1), \"omissions\" (paths only on HOST2), \"differences\"
(paths present on both with different content) and \"errors\" (paths that
could not be compared).

By default the exit code is 0 for any completed comparison; use --check to
fail when the hosts drifted apart.

EXAMPLES:
    # Compare the default system directories of two web servers
    rhdiff ops@web1.example.com ops@web2.example.com

    # Compare specific roots and fail the pipeline on any drift
    rhdiff ops@web1 ops@web2 /etc:/usr/local/bin --check"
)]
struct Args {
    // Comparison options
    /// Checksum tool used to decide whether file contents differ
    #[arg(
        long,
        value_name = "KIND",
        default_value = "md5",
        help_heading = "Comparison options"
    )]
    checksum: common::ChecksumKind,

    /// Return exit code 1 if any additions, omissions, differences or
    /// comparison errors were found
    #[arg(long, help_heading = "Comparison options")]
    check: bool,

    // Progress & output
    /// Verbose level: -v INFO / -vv DEBUG / -vvv TRACE (default: ERROR)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Progress & output")]
    verbose: u8,

    /// Print per-category counts at the end
    #[arg(long, help_heading = "Progress & output")]
    summary: bool,

    /// Quiet mode, don't report errors
    #[arg(short = 'q', long = "quiet", help_heading = "Progress & output")]
    quiet: bool,

    // Advanced settings
    /// Number of worker threads, 0 means number of cores
    #[arg(
        long,
        default_value = "0",
        value_name = "N",
        help_heading = "Advanced settings"
    )]
    max_workers: usize,

    // ARGUMENTS
    /// First host to compare, as `user@address`
    #[arg(value_name = "HOST1")]
    host1: String,

    /// Second host to compare, as `user@address`
    #[arg(value_name = "HOST2")]
    host2: String,

    /// Colon separated root directories to enumerate, overriding the
    /// built-in system directories
    #[arg(value_name = "ROOTS")]
    roots: Option<String>,
}

async fn async_main(args: Args) -> Result<common::report::DeltaReport> {
    let session1 = remote::parse_connect_string(&args.host1)?;
    let session2 = remote::parse_connect_string(&args.host2)?;
    let runner1 = remote::SshCommandRunner::connect(&session1).await?;
    let runner2 = remote::SshCommandRunner::connect(&session2).await?;
    let roots = common::config::resolve_roots(args.roots.as_deref());
    tracing::info!("Enumerating {} roots on {}", roots.len(), session1.host);
    let files1 = common::build_file_set(&runner1, &roots).await?;
    tracing::info!("Enumerating {} roots on {}", roots.len(), session2.host);
    let files2 = common::build_file_set(&runner2, &roots).await?;
    let diff = common::diff_file_sets(&files1, &files2);
    tracing::info!("Comparing {} common paths", diff.common.len());
    let outcome = common::compare_files(&runner1, &runner2, &diff.common, args.checksum).await?;
    let report = common::report::DeltaReport::new(diff, outcome);
    report.write_pretty(std::io::stdout().lock())?;
    if let Err(error) = runner1.close().await {
        tracing::warn!("{:#}", error);
    }
    if let Err(error) = runner2.close().await {
        tracing::warn!("{:#}", error);
    }
    Ok(report)
}

fn main() -> Result<()> {
    // a first argument containing "help" prints usage instead of being
    // parsed as a connect string
    let first_arg = std::env::args().nth(1).unwrap_or_default();
    if first_arg.contains("help") {
        Args::command().print_long_help()?;
        return Ok(());
    }
    let args = Args::parse();
    let func = {
        let args = args.clone();
        || async_main(args)
    };
    let output = common::OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        print_summary: args.summary,
    };
    let runtime = common::RuntimeConfig {
        max_workers: args.max_workers,
    };
    match common::run(output, runtime, func) {
        Some(report) => {
            if args.check && !report.is_clean() {
                std::process::exit(1);
            }
            Ok(())
        }
        None => std::process::exit(2),
    }
}
