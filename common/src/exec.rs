//! Remote command execution capability.
//!
//! The comparison logic only ever needs one operation from a host: run a
//! command string and hand back its standard output. Keeping that behind a
//! trait lets the SSH transport live in the `remote` crate while tests drive
//! the comparison with scripted in-memory runners.

use async_trait::async_trait;

/// Failure modes of running a command on a host.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The command ran on the host but exited with a non-zero status.
    #[error("command `{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },
    /// The session itself failed (connection dropped, channel error).
    #[error("transport failure running `{command}`")]
    Transport {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ExecError {
    /// True when the failure is scoped to this one command rather than the
    /// session as a whole.
    pub fn is_command_scoped(&self) -> bool {
        matches!(self, ExecError::CommandFailed { .. })
    }
}

/// A host we can run commands on.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute `command` through a shell and return its standard output.
    async fn execute(&self, command: &str) -> Result<String, ExecError>;
}

/// Quote `arg` for safe interpolation into a `sh -c` command line.
pub fn shell_escape(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_is_single_quoted() {
        assert_eq!(shell_escape("/usr/bin"), "'/usr/bin'");
    }

    #[test]
    fn embedded_quote_is_escaped() {
        assert_eq!(shell_escape("/tmp/o'brien"), r"'/tmp/o'\''brien'");
    }

    #[test]
    fn spaces_and_globs_are_inert() {
        assert_eq!(shell_escape("/tmp/a b*"), "'/tmp/a b*'");
    }

    #[test]
    fn command_failure_is_command_scoped() {
        let error = ExecError::CommandFailed {
            command: "ls -R '/gone'".to_string(),
            status: 2,
            stderr: "ls: cannot access '/gone'".to_string(),
        };
        assert!(error.is_command_scoped());
    }

    #[test]
    fn transport_failure_is_not_command_scoped() {
        let error = ExecError::Transport {
            command: "md5sum '/etc/hosts'".to_string(),
            source: anyhow::anyhow!("connection reset"),
        };
        assert!(!error.is_command_scoped());
    }
}
