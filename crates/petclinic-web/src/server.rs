//! Listener setup and shutdown for the clinic pages.
//!
//! [`start_server`] is what the binary runs: it stops on `Ctrl-C`.
//! [`serve_until`] takes any shutdown future, which lets callers that own
//! their own lifecycle (tests, embedding) stop the server themselves.
//! In-flight requests finish before either returns.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Where the clinic listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface, e.g. `0.0.0.0` or `127.0.0.1`.
    pub host: String,
    /// TCP port. `0` picks a free one.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Resolve host and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e| ServerError::Bind(format!("invalid address {raw}: {e}")))
    }
}

/// Why the server could not start or stopped abnormally.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Bad address, or the port is unavailable.
    #[error("bind error: {0}")]
    Bind(String),

    /// Accept loop failed.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Bind the configured address and serve until `Ctrl-C`.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address is invalid or taken, or
/// [`ServerError::Serve`] on a fatal I/O error.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    serve_until(listener, state, ctrl_c()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServerError::Serve`] on a fatal I/O error.
pub async fn serve_until<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("listener has no local address: {e}")))?;
    info!(%addr, "Petclinic listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    info!(%addr, "Petclinic stopped");
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use petclinic_core::Clinic;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    use super::*;
    use crate::views::Views;

    #[test]
    fn socket_addr_rejects_hostnames() {
        let config = ServerConfig {
            host: String::from("localhost"),
            port: 8080,
        };
        assert!(matches!(config.socket_addr(), Err(ServerError::Bind(_))));
        assert_eq!(
            ServerConfig::default().socket_addr().unwrap().to_string(),
            "0.0.0.0:8080"
        );
    }

    #[tokio::test]
    async fn serves_until_shutdown_resolves() {
        let state = Arc::new(AppState::new(Clinic::in_memory(), Views::builtin().unwrap()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let server = tokio::spawn(serve_until(listener, state, async move {
            let _ = stopped.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
