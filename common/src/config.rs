//! Configuration types for output, runtime and enumeration roots

/// Root directories enumerated when no override is given on the command line
pub const DEFAULT_ROOTS: [&str; 9] = [
    "/bin",
    "/sbin",
    "/usr/bin",
    "/usr/sbin",
    "/usr/local/bin",
    "/usr/local/sbin",
    "/usr/local/mongo/bin",
    "/usr/local/apache2/bin",
    "/etc",
];

/// Resolve the list of root directories to enumerate.
///
/// `roots` is a colon separated list, e.g. `/etc:/usr/local/bin`; empty
/// segments are dropped. `None` selects [`DEFAULT_ROOTS`]. Order is
/// preserved, it determines enumeration and report order.
pub fn resolve_roots(roots: Option<&str>) -> Vec<String> {
    match roots {
        Some(list) => list
            .split(':')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
        None => DEFAULT_ROOTS.iter().map(|root| root.to_string()).collect(),
    }
}

/// Output and logging configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress error output
    pub quiet: bool,
    /// Verbosity level: 0=ERROR, 1=INFO, 2=DEBUG, 3=TRACE
    pub verbose: u8,
    /// Print summary statistics at the end
    pub print_summary: bool,
}

/// Runtime configuration for tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeConfig {
    /// Number of worker threads (0 = number of CPU cores)
    pub max_workers: usize,
}
