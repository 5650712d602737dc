use anyhow::Context;
use async_trait::async_trait;

use common::exec::{CommandRunner, ExecError};

/// Identity of one host in a comparison, parsed from a connect string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshSession {
    pub user: Option<String>,
    pub host: String,
    pub port: Option<u16>,
}

/// Parse a connect string of the form `[user@]host[:port]`.
///
/// The user part is everything before the last `@`, so usernames containing
/// `@` survive. A trailing `:port` is only recognized when the host part is
/// not itself colon-separated (bare IPv6 addresses pass through whole).
pub fn parse_connect_string(connect: &str) -> anyhow::Result<SshSession> {
    let (user, rest) = match connect.rsplit_once('@') {
        Some((user, rest)) => {
            if user.is_empty() {
                anyhow::bail!("connect string {:?} has an empty user", connect);
            }
            (Some(user.to_string()), rest)
        }
        None => (None, connect),
    };
    let (host, port) = match rest.rsplit_once(':') {
        Some((host, port))
            if !host.contains(':') && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("invalid port in connect string {:?}", connect))?;
            (host, Some(port))
        }
        _ => (rest, None),
    };
    if host.is_empty() {
        anyhow::bail!("connect string {:?} has an empty address", connect);
    }
    Ok(SshSession {
        user,
        host: host.to_string(),
        port,
    })
}

/// Remote command execution over an established SSH session.
pub struct SshCommandRunner {
    session: openssh::Session,
    host: String,
}

impl SshCommandRunner {
    /// Open a session to the host, authenticating as the configured user.
    ///
    /// Failure here is fatal to the run; there are no retries.
    pub async fn connect(session: &SshSession) -> anyhow::Result<Self> {
        let host = session.host.as_str();
        let destination = match (session.user.as_deref(), session.port) {
            (Some(user), Some(port)) => format!("ssh://{user}@{host}:{port}"),
            (None, Some(port)) => format!("ssh://{host}:{port}"),
            (Some(user), None) => format!("ssh://{user}@{host}"),
            (None, None) => format!("ssh://{host}"),
        };
        tracing::debug!("Connecting to SSH destination: {}", destination);
        let ssh = openssh::Session::connect(destination, openssh::KnownHosts::Accept)
            .await
            .with_context(|| format!("Failed to establish SSH connection to {}", host))?;
        Ok(Self {
            session: ssh,
            host: session.host.clone(),
        })
    }

    /// Close the underlying session.
    ///
    /// Teardown errors are reported by the caller, they do not invalidate a
    /// completed comparison.
    pub async fn close(self) -> anyhow::Result<()> {
        self.session
            .close()
            .await
            .with_context(|| format!("Failed to close SSH session to {}", self.host))
    }
}

#[async_trait]
impl CommandRunner for SshCommandRunner {
    async fn execute(&self, command: &str) -> Result<String, ExecError> {
        tracing::debug!("[{}] {}", self.host, command);
        let output = self
            .session
            .command("sh")
            .arg("-c")
            .arg(command)
            .output()
            .await
            .map_err(|error| ExecError::Transport {
                command: command.to_string(),
                source: error.into(),
            })?;
        if !output.status.success() {
            return Err(ExecError::CommandFailed {
                command: command.to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
