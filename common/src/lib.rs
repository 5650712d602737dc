use anyhow::Result;

pub mod cmp;
pub mod config;
pub mod diff;
pub mod exec;
pub mod listing;
pub mod report;

pub use cmp::{ChecksumKind, compare_files};
pub use config::{OutputConfig, RuntimeConfig};
pub use diff::diff_file_sets;
pub use listing::build_file_set;

// tracing filter directive for each -v level
fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Shared entry point for the rhdiff binary.
///
/// Sets up the tracing subscriber and the tokio runtime, then drives `func`
/// to completion. Returns `None` if the run failed; the caller maps that to
/// an exit code.
pub fn run<Summary, Func, Fut>(
    output: config::OutputConfig,
    runtime: config::RuntimeConfig,
    func: Func,
) -> Option<Summary>
where
    Summary: std::fmt::Display,
    Func: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<Summary>>,
{
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity_filter(output.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if runtime.max_workers > 0 {
        builder.worker_threads(runtime.max_workers);
    }
    builder.enable_all();
    let tokio_runtime = match builder.build() {
        Ok(tokio_runtime) => tokio_runtime,
        Err(error) => {
            tracing::error!("Failed to create tokio runtime: {}", error);
            return None;
        }
    };
    match tokio_runtime.block_on(func()) {
        Ok(summary) => {
            if output.print_summary {
                println!("{}", &summary);
            }
            Some(summary)
        }
        Err(error) => {
            if !output.quiet {
                tracing::error!("{:#}", error);
            }
            None
        }
    }
}
