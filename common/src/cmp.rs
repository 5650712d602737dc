//! Content comparison over the paths two hosts have in common.

use crate::exec::{CommandRunner, ExecError, shell_escape};

/// Checksum tool used to decide whether file contents differ.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ChecksumKind {
    /// `md5sum`
    #[default]
    Md5,
    /// `sha256sum`
    Sha256,
}

impl ChecksumKind {
    /// Checksum command issued for one file path.
    pub fn command(self, path: &str) -> String {
        let tool = match self {
            ChecksumKind::Md5 => "md5sum",
            ChecksumKind::Sha256 => "sha256sum",
        };
        format!("{} {}", tool, shell_escape(path))
    }
}

/// Extract the hash value from checksum tool output (`<hash>  <path>`).
///
/// Only the parsed value takes part in comparison; the raw output embeds the
/// file path and tool formatting, which would turn cosmetic differences
/// between hosts into false content mismatches.
pub fn parse_checksum(output: &str) -> Option<&str> {
    output.split_whitespace().next()
}

/// Result of comparing the common paths of two hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareOutcome {
    /// Paths whose content hash differs between the hosts.
    pub differences: Vec<String>,
    /// Paths that could not be hashed on at least one host.
    pub errors: Vec<String>,
}

async fn fetch_checksum<R: CommandRunner + ?Sized>(
    runner: &R,
    kind: ChecksumKind,
    path: &str,
) -> Result<Option<String>, ExecError> {
    let command = kind.command(path);
    match runner.execute(&command).await {
        Ok(output) => match parse_checksum(&output) {
            Some(hash) => Ok(Some(hash.to_string())),
            None => {
                tracing::warn!("empty checksum output for {}", path);
                Ok(None)
            }
        },
        Err(error) if error.is_command_scoped() => {
            tracing::warn!("checksum of {} failed: {}", path, error);
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

/// Hash every path on both hosts and record mismatches.
///
/// Paths are processed in the order given, one at a time, two blocking
/// round-trips each. A path whose checksum command fails or returns nothing
/// on either host is recorded under `errors` rather than guessed at;
/// transport failures abort the run.
#[tracing::instrument(skip_all, fields(paths = paths.len()))]
pub async fn compare_files<R1, R2>(
    host1: &R1,
    host2: &R2,
    paths: &[String],
    kind: ChecksumKind,
) -> Result<CompareOutcome, ExecError>
where
    R1: CommandRunner + ?Sized,
    R2: CommandRunner + ?Sized,
{
    let mut outcome = CompareOutcome::default();
    for path in paths {
        let first = fetch_checksum(host1, kind, path).await?;
        let second = fetch_checksum(host2, kind, path).await?;
        match (first, second) {
            (Some(hash1), Some(hash2)) => {
                if hash1 != hash2 {
                    tracing::debug!("{} differs", path);
                    outcome.differences.push(path.clone());
                }
            }
            _ => outcome.errors.push(path.clone()),
        }
    }
    Ok(outcome)
}
