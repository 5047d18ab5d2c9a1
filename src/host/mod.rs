//! Host-context detection and the readiness handshake.
//!
//! A host container (a "mini app" shell) can embed the calculator and wants
//! to know when the first frame is on screen. Everything here is optional:
//! failures are logged and the calculator carries on as a standalone app.

mod socket;

pub use socket::{HOST_SOCKET_ENV, SocketHost};

use anyhow::Result;
use std::path::PathBuf;

/// Where the calculator is running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// Embedded in a host container.
    MiniApp,
    /// Standalone.
    #[default]
    Web,
}

impl Environment {
    pub fn label(self) -> &'static str {
        match self {
            Self::MiniApp => "mini app",
            Self::Web => "web",
        }
    }
}

/// The host SDK surface the calculator depends on.
pub trait HostContext {
    /// Whether a host container is present.
    fn is_in_mini_app(&self) -> Result<bool>;

    /// Tell the host the initial render is complete.
    fn ready(&self) -> Result<()>;

    /// Get the name of this host implementation.
    fn name(&self) -> &'static str;
}

/// Host used when no container is configured. Always standalone.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandaloneHost;

impl HostContext for StandaloneHost {
    fn is_in_mini_app(&self) -> Result<bool> {
        Ok(false)
    }

    fn ready(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "standalone"
    }
}

/// Pick a host: an explicit socket path wins, then the environment
/// variable, otherwise standalone.
pub fn detect_host(socket: Option<PathBuf>) -> Box<dyn HostContext> {
    if let Some(path) = socket {
        return Box::new(SocketHost::new(path));
    }

    match SocketHost::from_env() {
        Some(host) => Box::new(host),
        None => Box::new(StandaloneHost),
    }
}

/// Query the host for the current environment. Errors fall back to
/// [`Environment::Web`].
pub fn detect_environment(host: &dyn HostContext) -> Environment {
    match host.is_in_mini_app() {
        Ok(true) => Environment::MiniApp,
        Ok(false) => Environment::Web,
        Err(e) => {
            tracing::error!(host = host.name(), "Host query failed: {:#}", e);
            Environment::Web
        }
    }
}

/// Signal readiness when running inside a container. Call after the first
/// render.
pub fn signal_ready(host: &dyn HostContext, environment: Environment) {
    if environment != Environment::MiniApp {
        return;
    }

    match host.ready() {
        Ok(()) => tracing::info!(host = host.name(), "Host notified: ready"),
        Err(e) => {
            tracing::error!(host = host.name(), "Host ready signal failed: {:#}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeHost {
        inside: Result<bool, &'static str>,
        fail_ready: bool,
        ready_calls: Cell<u32>,
    }

    impl FakeHost {
        fn new(inside: Result<bool, &'static str>) -> Self {
            Self {
                inside,
                fail_ready: false,
                ready_calls: Cell::new(0),
            }
        }
    }

    impl HostContext for FakeHost {
        fn is_in_mini_app(&self) -> Result<bool> {
            self.inside.map_err(|msg| anyhow::anyhow!(msg))
        }

        fn ready(&self) -> Result<()> {
            self.ready_calls.set(self.ready_calls.get() + 1);
            if self.fail_ready {
                anyhow::bail!("host went away");
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Environment::MiniApp.label(), "mini app");
        assert_eq!(Environment::Web.label(), "web");
    }

    #[test]
    fn test_mini_app_signals_ready() {
        let host = FakeHost::new(Ok(true));
        let env = detect_environment(&host);
        assert_eq!(env, Environment::MiniApp);

        signal_ready(&host, env);
        assert_eq!(host.ready_calls.get(), 1);
    }

    #[test]
    fn test_web_does_not_signal() {
        let host = FakeHost::new(Ok(false));
        let env = detect_environment(&host);
        assert_eq!(env, Environment::Web);

        signal_ready(&host, env);
        assert_eq!(host.ready_calls.get(), 0);
    }

    #[test]
    fn test_query_failure_falls_back_to_web() {
        let host = FakeHost::new(Err("sdk missing"));
        assert_eq!(detect_environment(&host), Environment::Web);
    }

    #[test]
    fn test_ready_failure_is_absorbed() {
        let mut host = FakeHost::new(Ok(true));
        host.fail_ready = true;
        signal_ready(&host, Environment::MiniApp);
        assert_eq!(host.ready_calls.get(), 1);
    }

    #[test]
    fn test_standalone_host() {
        let host = StandaloneHost;
        assert_eq!(detect_environment(&host), Environment::Web);
        assert!(host.ready().is_ok());
    }

    #[test]
    fn test_explicit_socket_wins() {
        let host = detect_host(Some(PathBuf::from("/nonexistent/flashcalc.sock")));
        assert_eq!(host.name(), "socket");
    }
}
