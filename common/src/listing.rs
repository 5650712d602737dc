//! Recursive directory listing: command construction and output parsing.
//!
//! The parser understands the block structure of `ls -R` output: blocks are
//! separated by blank lines, a `<dir>:` header line introduces the entries
//! of that directory, and a headerless first block holds entries directly
//! under the listed root.

use crate::exec::{CommandRunner, ExecError, shell_escape};

/// Listing command issued for one root directory.
pub fn listing_command(root: &str) -> String {
    format!("ls -R {}", shell_escape(root))
}

fn join_entry(dir: &str, entry: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), entry)
}

/// Parse recursive listing output into absolute file paths.
///
/// Blocks that are empty after trimming are skipped. Empty output yields an
/// empty list; a missing root and a genuinely empty directory are therefore
/// indistinguishable here, the caller decides how loudly to report that.
pub fn parse_recursive_listing(root: &str, output: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for (index, block) in output.split("\n\n").enumerate() {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        let mut lines = block.lines().peekable();
        let header = match lines.peek().copied() {
            // the first block may be headerless, later blocks always open
            // with the subdirectory's own path
            Some(first) if index > 0 || first.ends_with(':') => {
                lines.next();
                Some(first.strip_suffix(':').unwrap_or(first))
            }
            _ => None,
        };
        let dir = header.unwrap_or(root);
        for entry in lines.filter(|line| !line.is_empty()) {
            paths.push(join_entry(dir, entry));
        }
    }
    paths
}

/// Build the flat file set of one host by enumerating every configured root.
///
/// Roots are visited in configuration order and results concatenated. A root
/// whose listing fails on the host (typically: the directory does not exist)
/// or produces no output contributes zero paths and a warning; transport
/// failures abort the run.
pub async fn build_file_set<R: CommandRunner + ?Sized>(
    runner: &R,
    roots: &[String],
) -> Result<Vec<String>, ExecError> {
    let mut file_set = Vec::new();
    for root in roots {
        let command = listing_command(root);
        let output = match runner.execute(&command).await {
            Ok(output) => output,
            Err(error) if error.is_command_scoped() => {
                tracing::warn!("listing {} failed, treating as empty: {}", root, error);
                continue;
            }
            Err(error) => return Err(error),
        };
        if output.trim().is_empty() {
            tracing::warn!("no entries under {} (missing or empty directory)", root);
            continue;
        }
        let paths = parse_recursive_listing(root, &output);
        tracing::debug!("{}: {} entries", root, paths.len());
        file_set.extend(paths);
    }
    Ok(file_set)
}
