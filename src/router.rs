//! Exact-match route table and its dispatcher.
//!
//! Routes are kept in registration order and matched by plain string
//! equality on method and path: no patterns, no normalization, no
//! trailing-slash folding. The first registered match wins. Anything
//! unmatched gets [`Response::not_found`].

use std::sync::Arc;

use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// A registered (method, path, handler) triple.
#[derive(Clone)]
pub(crate) struct Route {
    method: String,
    path: String,
    handler: BoxedHandler,
}

impl Route {
    fn matches(&self, req: &Request) -> bool {
        self.method == req.method() && self.path == req.path()
    }
}

/// The application route table.
///
/// Build it once at startup, then take a [`Dispatcher`] from it. Every
/// registration method has a chaining form that returns `self`:
///
/// ```rust
/// use spindle::{Method, Request, Response, Router};
///
/// fn hello(_req: &Request) -> Response { Response::text("hi") }
///
/// let dispatcher = Router::new()
///     .get("/", hello)
///     .on("PURGE", "/cache", |_req: &Request| "purged")
///     .on(Method::Delete, "/cache", |_req: &Request| "deleted")
///     .dispatcher();
///
/// assert_eq!(dispatcher.dispatch(&Request::new("GET", "/")).body(), "hi");
/// ```
#[derive(Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route. Any method and path strings are accepted; duplicates
    /// are kept and the earliest one shadows the rest.
    pub fn add_route(
        &mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        handler: impl Handler,
    ) {
        self.routes.push(Route {
            method: method.into(),
            path: path.into(),
            handler: handler.into_boxed_handler(),
        });
    }

    /// Chaining form of [`add_route`](Self::add_route).
    pub fn on(mut self, method: impl Into<String>, path: &str, handler: impl Handler) -> Self {
        self.add_route(method, path, handler);
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    pub fn options(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Options, path, handler)
    }

    /// Returns a dispatcher over a snapshot of the routes registered so far.
    ///
    /// Routes added afterwards are invisible to it.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher { routes: self.routes.iter().cloned().collect() }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// A frozen view of a [`Router`], mapping requests to responses.
///
/// Cheap to clone and safe to share between threads.
#[derive(Clone)]
pub struct Dispatcher {
    routes: Arc<[Route]>,
}

impl Dispatcher {
    /// Runs the first route whose method and path equal the request's,
    /// or returns the 404 fallback.
    pub fn dispatch(&self, req: &Request) -> Response {
        match self.routes.iter().find(|route| route.matches(req)) {
            Some(route) => route.handler.call(req),
            None => {
                debug!(method = req.method(), path = req.path(), "no route matched");
                Response::not_found()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rstest::rstest;

    use super::*;
    use crate::Status;

    fn ok(_req: &Request) -> Response {
        Response::text("ok")
    }

    #[test]
    fn matched_route_returns_handler_result_unmodified() {
        let expected = Response::builder()
            .status(Status::Accepted)
            .header("X-Custom", "1")
            .json("{}");
        let returned = expected.clone();
        let dispatcher = Router::new()
            .post("/jobs", move |_req: &Request| returned.clone())
            .dispatcher();

        assert_eq!(dispatcher.dispatch(&Request::new("POST", "/jobs")), expected);
    }

    #[rstest]
    #[case("GET", "/missing")]
    #[case("POST", "/")]
    #[case("get", "/")]
    #[case("GET", "")]
    #[case("GET", "/?q=1")]
    #[case("GET", "/users/")]
    fn unmatched_requests_get_the_fallback(#[case] method: &str, #[case] path: &str) {
        let dispatcher = Router::new().get("/", ok).get("/users", ok).dispatcher();
        assert_eq!(dispatcher.dispatch(&Request::new(method, path)), Response::not_found());
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(10)]
    fn first_registered_duplicate_wins(#[case] copies: usize) {
        let mut router = Router::new();
        for i in 0..copies {
            router.add_route("GET", "/dup", move |_req: &Request| format!("route {i}"));
        }
        let dispatcher = router.dispatcher();
        assert_eq!(dispatcher.dispatch(&Request::new("GET", "/dup")).body(), "route 0");
    }

    #[test]
    fn method_and_path_must_both_match() {
        let dispatcher = Router::new()
            .get("/a", |_req: &Request| "get a")
            .post("/b", |_req: &Request| "post b")
            .dispatcher();

        assert_eq!(dispatcher.dispatch(&Request::new("GET", "/a")).body(), "get a");
        assert_eq!(dispatcher.dispatch(&Request::new("POST", "/b")).body(), "post b");
        assert_eq!(dispatcher.dispatch(&Request::new("GET", "/b")).status_code(), 404);
        assert_eq!(dispatcher.dispatch(&Request::new("POST", "/a")).status_code(), 404);
    }

    #[test]
    fn any_method_string_can_be_routed() {
        let dispatcher = Router::new()
            .on("BREW", "/pot", |_req: &Request| "brewing")
            .dispatcher();
        assert_eq!(dispatcher.dispatch(&Request::new("BREW", "/pot")).body(), "brewing");
    }

    #[test]
    fn dispatcher_is_a_snapshot() {
        let mut router = Router::new().get("/", ok);
        let before = router.dispatcher();
        router.add_route("GET", "/late", ok);
        let after = router.dispatcher();

        assert_eq!(before.len(), 1);
        assert_eq!(before.dispatch(&Request::new("GET", "/late")).status_code(), 404);
        assert_eq!(after.dispatch(&Request::new("GET", "/late")).status_code(), 200);
    }

    #[test]
    fn only_the_matched_handler_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let dispatcher = Router::new()
            .get("/", ok)
            .get("/count", move |_req: &Request| {
                counted.fetch_add(1, Ordering::SeqCst);
                "counted"
            })
            .dispatcher();

        dispatcher.dispatch(&Request::new("GET", "/"));
        dispatcher.dispatch(&Request::new("GET", "/nope"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        dispatcher.dispatch(&Request::new("GET", "/count"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_panics_propagate() {
        let dispatcher = Router::new()
            .get("/boom", |_req: &Request| -> Response { panic!("handler fault") })
            .dispatcher();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            dispatcher.dispatch(&Request::new("GET", "/boom"))
        }));
        assert!(outcome.is_err());
    }

    #[test]
    fn empty_router_dispatches_everything_to_404() {
        let router = Router::new();
        assert!(router.is_empty());
        let dispatcher = router.dispatcher();
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.dispatch(&Request::new("GET", "/")), Response::not_found());
    }
}
