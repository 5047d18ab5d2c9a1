//! Unix-socket host container.
//!
//! The container starts the calculator with `FLASHCALC_HOST_SOCKET` pointing
//! at a listening Unix socket and waits for a `ready` line on it.

use super::HostContext;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable naming the host socket.
pub const HOST_SOCKET_ENV: &str = "FLASHCALC_HOST_SOCKET";

/// Line sent once the initial render is done.
const READY_MESSAGE: &[u8] = b"ready\n";

#[derive(Debug, Clone)]
pub struct SocketHost {
    path: PathBuf,
}

impl SocketHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns None if the environment variable is unset or empty.
    pub fn from_env() -> Option<Self> {
        let path = std::env::var_os(HOST_SOCKET_ENV)?;
        if path.is_empty() {
            return None;
        }
        Some(Self::new(path))
    }
}

impl HostContext for SocketHost {
    fn is_in_mini_app(&self) -> Result<bool> {
        let exists = self
            .path
            .try_exists()
            .with_context(|| format!("Failed to stat host socket {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), exists, "isInMiniApp");
        Ok(exists)
    }

    #[cfg(unix)]
    fn ready(&self) -> Result<()> {
        use std::io::Write;
        use std::os::unix::net::UnixStream;

        let mut stream = UnixStream::connect(&self.path)
            .with_context(|| format!("Failed to connect to host at {}", self.path.display()))?;
        stream
            .write_all(READY_MESSAGE)
            .context("Failed to send ready signal")?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn ready(&self) -> Result<()> {
        let _ = READY_MESSAGE;
        anyhow::bail!("Socket hosts are only supported on Unix")
    }

    fn name(&self) -> &'static str {
        "socket"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Read;
    use std::os::unix::net::UnixListener;

    #[test]
    fn test_missing_socket_is_web() {
        let dir = tempfile::tempdir().unwrap();
        let host = SocketHost::new(dir.path().join("absent.sock"));
        assert!(!host.is_in_mini_app().unwrap());
        assert!(host.ready().is_err());
    }

    #[test]
    fn test_ready_handshake() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let host = SocketHost::new(&path);
        assert!(host.is_in_mini_app().unwrap());
        host.ready().unwrap();

        let (mut conn, _) = listener.accept().unwrap();
        let mut received = String::new();
        conn.read_to_string(&mut received).unwrap();
        assert_eq!(received, "ready\n");
    }
}
