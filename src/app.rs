//! The composed application: middleware chain in front of a base handler.
//!
//! # Lifecycle
//!
//! [`build_application`] is a pure factory: every call assembles a fresh
//! router from [`ROUTES`](crate::routes::ROUTES) and wraps its dispatcher
//! in the [`installed_middleware`]. The process-wide instance lives behind
//! [`shared_application`], which builds it on first access and hands out
//! the same instance forever after.
//!
//! First access may race. [`SharedApplication`] uses a [`OnceLock`], so the
//! build function runs at most once and every caller observes the finished
//! value. If the build panics the panic reaches that first caller, the cell
//! stays empty, and the next access tries again.

use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{Logging, MiddlewareChain};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::routes::ROUTES;

/// A middleware chain composed with a base handler.
///
/// Cheap to clone; clones share the chain and the handler.
///
/// ```rust
/// use spindle::middleware::{from_fn, MiddlewareChain};
/// use spindle::{Application, Request, Response, Router};
///
/// let dispatcher = Router::new()
///     .get("/", |_req: &Request| "home")
///     .dispatcher();
/// let chain = MiddlewareChain::new()
///     .with(from_fn("teapot", |req: &Request| {
///         (req.path() == "/coffee").then(|| Response::text("I'm a teapot"))
///     }));
///
/// let app = Application::new(chain, move |req: &Request| dispatcher.dispatch(req));
/// assert_eq!(app.invoke(&Request::new("GET", "/")).body(), "home");
/// assert_eq!(app.invoke(&Request::new("GET", "/coffee")).body(), "I'm a teapot");
/// ```
#[derive(Clone)]
pub struct Application {
    middleware: Arc<MiddlewareChain>,
    handler: BoxedHandler,
}

impl Application {
    pub fn new(middleware: impl Into<Arc<MiddlewareChain>>, handler: impl Handler) -> Self {
        Self {
            middleware: middleware.into(),
            handler: handler.into_boxed_handler(),
        }
    }

    /// Runs the middleware chain; if every middleware declines, delegates
    /// to the base handler.
    pub fn invoke(&self, req: &Request) -> Response {
        match self.middleware.run(req) {
            Some(response) => response,
            None => self.handler.call(req),
        }
    }

    pub fn middleware(&self) -> &MiddlewareChain {
        &self.middleware
    }
}

/// The middleware installed in front of every request, first to last.
pub fn installed_middleware() -> MiddlewareChain {
    MiddlewareChain::new().with(Logging)
}

/// Builds a fresh application from the static route table and the
/// installed middleware.
pub fn build_application() -> Application {
    let mut router = Router::new();
    for &(method, path, handler) in ROUTES {
        router.add_route(method, path, handler);
    }
    let dispatcher = router.dispatcher();
    let middleware = installed_middleware();

    info!(
        routes = dispatcher.len(),
        middleware = ?middleware.names(),
        "application built"
    );

    Application::new(middleware, move |req: &Request| dispatcher.dispatch(req))
}

/// A lazily built, process-scoped [`Application`].
///
/// Usable in a `static`; `init` runs on first [`get`](Self::get) and never
/// again once it has returned.
pub struct SharedApplication {
    cell: OnceLock<Application>,
    init: fn() -> Application,
}

impl SharedApplication {
    pub const fn new(init: fn() -> Application) -> Self {
        Self { cell: OnceLock::new(), init }
    }

    pub fn get(&self) -> &Application {
        self.cell.get_or_init(self.init)
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

static SHARED: SharedApplication = SharedApplication::new(build_application);

/// The process-wide application, built on first call.
pub fn shared_application() -> &'static Application {
    SHARED.get()
}
