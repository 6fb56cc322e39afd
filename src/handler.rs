//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! A route table holds handlers of *different* types in one `Vec`. Rust
//! collections can only hold one concrete type, so each handler is hidden
//! behind a trait object (`dyn ErasedHandler`) and stored uniformly:
//!
//! ```text
//! fn hello(req: &Request) -> Response { … }   ← user writes this
//!        ↓ router.get("/", hello)
//! hello.into_boxed_handler()                  ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(hello))                  ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(&req)  at request time         ← one vtable dispatch
//! ```
//!
//! Handlers are synchronous. They borrow the request and return anything
//! that implements [`IntoResponse`]. The `Arc` lets a route table hand out
//! frozen copies of itself without cloning the handlers.

use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Object-safe calling convention shared by every stored handler.
///
/// Public only because [`Handler::into_boxed_handler`] names it; hidden from
/// the docs.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: &Request) -> Response;
}

/// A type-erased handler shared between route tables, dispatchers and threads.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Anything that can answer a routed request.
///
/// Satisfied automatically by every function or closure shaped like:
///
/// ```text
/// fn name(req: &Request) -> impl IntoResponse
/// ```
///
/// Closures need their argument annotated (`|req: &Request| …`) so the
/// compiler infers a signature that accepts any borrow.
///
/// Sealed: the private `Sealed` supertrait keeps the blanket impl below
/// the only implementation.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, R> private::Sealed for F
where
    F: Fn(&Request) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
}

impl<F, R> Handler for F
where
    F: Fn(&Request) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and implements [`ErasedHandler`], bridging
/// the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, R> ErasedHandler for FnHandler<F>
where
    F: Fn(&Request) -> R,
    R: IntoResponse,
{
    fn call(&self, req: &Request) -> Response {
        (self.0)(req).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    fn echo_path(req: &Request) -> String {
        req.path().to_owned()
    }

    #[test]
    fn fn_items_are_handlers() {
        let handler = echo_path.into_boxed_handler();
        let res = handler.call(&Request::new("GET", "/echo"));
        assert_eq!(res, Response::text("/echo"));
    }

    #[test]
    fn closures_are_handlers() {
        let handler = (|_req: &Request| Status::NoContent).into_boxed_handler();
        assert_eq!(handler.call(&Request::new("GET", "/")).status_code(), 204);
    }

    #[test]
    fn boxed_handlers_share_one_instance() {
        let handler = echo_path.into_boxed_handler();
        let copy = Arc::clone(&handler);
        assert!(Arc::ptr_eq(&handler, &copy));
    }
}
