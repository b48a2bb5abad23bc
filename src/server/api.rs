//! HTTP adapter using rouille.
//!
//! # Purpose
//!
//! Glue between rouille and the [`Dispatcher`]: every request, whatever its
//! path, becomes a [`ControlRequest`] and every response is the JSON status
//! body with `200 OK`.
//!
//! # Key types
//!
//! - [`ApiServer`] - binds the listener and runs it on a background thread
//! - [`ApiHandle`] - bound address + stop switch for the running server
//!
//! # Thread safety
//!
//! - rouille serves connections on its own thread pool and calls the handler
//!   closure concurrently; the closure only holds an `Arc<Dispatcher>`
//! - file opens leave the server threads through the bridge, everything else
//!   calls the engine directly

use crate::server::ServerConfig;
use crate::server::dispatch::{ControlRequest, Dispatcher};
use crate::server::report;
use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use rouille::{Request, Response};
use std::io::Read;
use std::net::SocketAddr;
use std::sync::{Arc, mpsc};
use std::thread;

/// HTTP control server
pub struct ApiServer;

impl ApiServer {
    /// Bind and start serving in a background thread.
    pub fn start(config: ServerConfig, dispatcher: Arc<Dispatcher>) -> Result<ApiHandle> {
        let addr = config.addr();
        let handler_config = config.clone();

        let server = rouille::Server::new(addr.as_str(), move |request| {
            Self::handle_request(request, &dispatcher, &handler_config)
        })
        .map_err(|e| anyhow!("Failed to bind control server on {}: {}", addr, e))?;

        let local = server.server_addr();
        info!("Control server listening on http://{}", local);

        let (join, stop) = server.stoppable();
        Ok(ApiHandle {
            addr: local,
            stop,
            join: Some(join),
        })
    }

    /// Serve one request.
    pub fn handle_request(request: &Request, dispatcher: &Dispatcher, config: &ServerConfig) -> Response {
        debug!("{} {}", request.method(), request.url());

        let body = if request.method() == "POST" {
            Self::read_body(request, config.max_body)
        } else {
            Vec::new()
        };
        let control = ControlRequest::new(request.method(), body);

        let snapshot = dispatcher.handle(&control);
        let response = Response::from_data("application/json", report::render(&snapshot));

        if config.cors {
            response.with_additional_header("Access-Control-Allow-Origin", "*")
        } else {
            response
        }
    }

    /// Read the whole body if it fits in `limit` bytes.
    ///
    /// Oversized and unreadable bodies count as empty, so the request only
    /// reports status. A body is never truncated and then parsed.
    fn read_body(request: &Request, limit: usize) -> Vec<u8> {
        let Some(data) = request.data() else {
            return Vec::new();
        };
        let mut body = Vec::new();
        if let Err(e) = data.take(limit as u64 + 1).read_to_end(&mut body) {
            warn!("Failed to read request body: {}", e);
            return Vec::new();
        }
        if body.len() > limit {
            warn!("Request body exceeds {} bytes, ignoring it", limit);
            return Vec::new();
        }
        body
    }
}

/// Running server
pub struct ApiHandle {
    addr: SocketAddr,
    stop: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl ApiHandle {
    /// Address actually bound (resolves port 0)
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for the server thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
            info!("Control server on {} stopped", self.addr);
        }
    }
}

impl Drop for ApiHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
