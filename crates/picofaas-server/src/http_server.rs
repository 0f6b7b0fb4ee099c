//! HTTP server for the picofaas executor.
//!
//! A plain hyper http1 accept loop: one tokio task per connection, each
//! request's body collected and handed to the [`Router`]. Request latency
//! is logged per call.

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use picofaas_common::protocol::error::{FaasError, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

use crate::registry::Registry;
use crate::router::Router;

/// HTTP server for the picofaas executor.
pub struct HttpServer {
    router: Arc<Router>,
}

impl HttpServer {
    /// Creates a server over the given registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            router: Arc::new(Router::new(registry)),
        }
    }

    /// Binds to `addr` and serves until the task is dropped.
    pub async fn run(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| FaasError::Transport(format!("failed to bind to {}: {}", addr, e)))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| FaasError::Transport(format!("failed to get local address: {}", e)))?;
        tracing::info!("picofaas server listening on {}", local_addr);

        self.serve(listener).await
    }

    /// Serves connections from an already-bound listener.
    ///
    /// Split out from [`HttpServer::run`] so tests can bind to port 0 and
    /// learn the assigned address before serving.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        loop {
            let (stream, _) = listener
                .accept()
                .await
                .map_err(|e| FaasError::Transport(format!("failed to accept connection: {}", e)))?;

            let io = TokioIo::new(stream);
            let router = self.router.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let router = router.clone();
                    async move { Self::handle_request(router, req).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::error!("error serving connection: {}", err);
                }
            });
        }
    }

    async fn handle_request(
        router: Arc<Router>,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>> {
        let (parts, body) = req.into_parts();

        let bytes = body
            .collect()
            .await
            .map_err(|e| FaasError::Transport(format!("failed to read request body: {}", e)))?
            .to_bytes();

        let start = Instant::now();
        let response = router.handle(&parts.method, parts.uri.path(), &bytes);
        tracing::info!(
            "{} {} {} {:.2}ms",
            parts.method,
            parts.uri.path(),
            response.status().as_u16(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(response)
    }
}
