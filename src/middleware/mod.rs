//! Middleware layer.
//!
//! A middleware gets the first look at every request, before routing. It
//! either answers the request itself (`Some(response)`), which ends
//! processing on the spot, or declines (`None`) and lets the next one in
//! line have a go. When every middleware declines, the request reaches the
//! router.
//!
//! Declining is the default, so observational middleware (logging,
//! metrics, auditing) only overrides [`Middleware::process_request`] to do
//! its side effect and still returns `None`:
//!
//! ```rust
//! use spindle::middleware::{Middleware, MiddlewareChain};
//! use spindle::{Request, Response, Status};
//!
//! struct RequireToken;
//!
//! impl Middleware for RequireToken {
//!     fn process_request(&self, req: &Request) -> Option<Response> {
//!         match req.header("authorization") {
//!             Some(_) => None,
//!             None    => Some(Response::status(Status::Unauthorized)),
//!         }
//!     }
//! }
//!
//! let chain = MiddlewareChain::new().with(RequireToken);
//! let res = chain.run(&Request::new("GET", "/")).unwrap();
//! assert_eq!(res.status_code(), 401);
//! ```

mod logging;

pub use logging::Logging;

use std::sync::Arc;

use tracing::debug;

use crate::request::Request;
use crate::response::Response;

/// An interceptor that may short-circuit a request before routing.
pub trait Middleware: Send + Sync + 'static {
    /// Returns `Some` to answer the request here, `None` to pass it on.
    fn process_request(&self, _req: &Request) -> Option<Response> {
        None
    }

    /// Name used in trace events and [`MiddlewareChain::names`].
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// An ordered sequence of middleware, evaluated first to last.
///
/// Order is part of the contract: a middleware registered earlier gets the
/// first chance to answer.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a middleware. Returns `self` for chaining.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.push(middleware);
        self
    }

    pub fn push(&mut self, middleware: impl Middleware) {
        self.layers.push(Arc::new(middleware));
    }

    /// Offers the request to each middleware in order and returns the first
    /// response produced. Later middleware are not invoked after that.
    pub fn run(&self, req: &Request) -> Option<Response> {
        for layer in &self.layers {
            if let Some(response) = layer.process_request(req) {
                debug!(
                    middleware = layer.name(),
                    status = response.status_code(),
                    "request short-circuited"
                );
                return Some(response);
            }
        }
        None
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

// ── Closure middleware ────────────────────────────────────────────────────────

/// Middleware built from a closure. See [`from_fn`].
pub struct FromFn<F> {
    name: &'static str,
    f: F,
}

/// Turns a closure into a named middleware.
///
/// ```rust
/// use spindle::middleware::{from_fn, MiddlewareChain};
/// use spindle::{Request, Response};
///
/// let chain = MiddlewareChain::new()
///     .with(from_fn("maintenance", |_req: &Request| Some(Response::text("back soon"))));
/// assert_eq!(chain.names(), vec!["maintenance"]);
/// ```
pub fn from_fn<F>(name: &'static str, f: F) -> FromFn<F>
where
    F: Fn(&Request) -> Option<Response> + Send + Sync + 'static,
{
    FromFn { name, f }
}

impl<F> Middleware for FromFn<F>
where
    F: Fn(&Request) -> Option<Response> + Send + Sync + 'static,
{
    fn process_request(&self, req: &Request) -> Option<Response> {
        (self.f)(req)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
