//! HTTP server and graceful shutdown.
//!
//! The server is the transport in front of an [`Application`]: it accepts
//! connections, turns each hyper request into a [`Request`], runs the
//! application and writes the [`Response`] back. The application is
//! synchronous and its handlers may block, so every invocation runs on
//! tokio's blocking pool.
//!
//! A handler or middleware that panics is not the application's problem to
//! report: the server logs the panic and answers `500 Internal Server
//! Error`. A body that cannot be read is answered with `400 Bad Request`.
//!
//! # Graceful shutdown
//!
//! On **SIGTERM** or **Ctrl-C** the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::app::Application;
use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::settings::Settings;
use crate::status::Status;

/// The HTTP server.
#[derive(Debug)]
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust
    /// use spindle::Server;
    ///
    /// assert!(Server::bind("0.0.0.0:3000").is_ok());
    /// assert!(Server::bind("localhost").is_err());
    /// ```
    pub fn bind(addr: &str) -> Result<Self, Error> {
        let addr = addr
            .parse()
            .map_err(|_| Error::InvalidAddress(addr.to_owned()))?;
        Ok(Self { addr })
    }

    /// Configures the server from startup [`Settings`].
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        Ok(Self { addr: settings.addr()? })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Binds, then serves `app` until SIGTERM or Ctrl-C.
    ///
    /// Returns only after a full graceful shutdown (signal received, then all
    /// in-flight requests completed).
    pub async fn serve(self, app: Application) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        serve_listener(listener, app, shutdown_signal()).await
    }
}

/// Serves `app` on an already bound listener until `shutdown` resolves, then
/// drains in-flight connections.
pub async fn serve_listener(
    listener: TcpListener,
    app: Application,
    shutdown: impl Future<Output = ()>,
) -> Result<(), Error> {
    info!(addr = %listener.local_addr()?, "spindle listening");

    // JoinSet tracks every spawned connection task so we can wait for
    // them all to finish during graceful shutdown.
    let mut tasks = tokio::task::JoinSet::new();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Shutdown is checked first so a signal stops accepting at once,
            // even if more connections are queued.
            biased;

            () = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let app = app.clone();
                let io = TokioIo::new(stream);

                tasks.spawn(async move {
                    // Called once per request on the connection.
                    let svc = service_fn(move |req: hyper::Request<Incoming>| {
                        dispatch(app.clone(), req)
                    });

                    // `auto::Builder` serves HTTP/1.1 or HTTP/2, whichever
                    // the client speaks.
                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(io, svc)
                        .await
                    {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            // Reap finished connection tasks so the JoinSet does not grow
            // without bound on long-running servers.
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}

    info!("spindle stopped");
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one hyper request through the application.
///
/// Never fails: unreadable bodies and application panics become 400 and 500
/// responses, so hyper never sees an error.
async fn dispatch<B>(app: Application, req: http::Request<B>) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let request = match read_request(req).await {
        Ok(request) => request,
        Err(e) => {
            warn!("failed to read request body: {e}");
            return Ok(into_http_response(
                Response::builder().status(Status::BadRequest).text("Bad Request"),
            ));
        }
    };

    let method = request.method().to_owned();
    let path = request.path().to_owned();

    let response = match tokio::task::spawn_blocking(move || app.invoke(&request)).await {
        Ok(response) => response,
        Err(e) => {
            error!(%method, %path, "application fault: {e}");
            Response::builder()
                .status(Status::InternalServerError)
                .text("Internal Server Error")
        }
    };

    Ok(into_http_response(response))
}

/// Buffers the body and copies method, path and headers into a [`Request`].
///
/// Repeated header names collapse to the last value. The query string is
/// not part of the path.
async fn read_request<B: Body>(req: http::Request<B>) -> Result<Request, B::Error> {
    let (parts, body) = req.into_parts();
    let body = body.collect().await?.to_bytes();

    let mut request = Request::new(parts.method.as_str(), parts.uri.path())
        .with_body(String::from_utf8_lossy(&body));
    for (name, value) in &parts.headers {
        request = request.with_header(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    Ok(request)
}

/// Sets status, each header and the body on a hyper response.
///
/// Headers that are not valid HTTP are dropped with a warning; a status
/// outside 100-999 becomes 500.
fn into_http_response(response: Response) -> http::Response<Full<Bytes>> {
    let Response { status, headers, body } = response;

    let mut out = http::Response::new(Full::new(Bytes::from(body)));
    *out.status_mut() = StatusCode::from_u16(status).unwrap_or_else(|_| {
        warn!(status, "invalid status code, sending 500");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    for (name, value) in headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
            (Ok(name), Ok(value)) => {
                out.headers_mut().insert(name, value);
            }
            _ => warn!(header = %name, "dropping invalid response header"),
        }
    }
    out
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available. A signal whose handler cannot be
/// installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
