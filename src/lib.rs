//! # spindle
//!
//! A minimal HTTP dispatch core. A request goes through an ordered chain of
//! middleware, any of which may answer it on the spot, and then to the
//! first route whose method and path match it exactly. Anything unmatched
//! gets a plain-text `404 Not Found`.
//!
//! ## The pieces
//!
//! - [`Request`] / [`Response`]: plain values with string headers and bodies.
//! - [`Router`] / [`Dispatcher`]: an ordered, exact-match route table and
//!   the frozen lookup function taken from it.
//! - [`middleware`]: the [`Middleware`](middleware::Middleware) trait and the
//!   ordered [`MiddlewareChain`](middleware::MiddlewareChain).
//! - [`Application`]: a chain composed with a base handler, plus the
//!   process-wide instance behind [`shared_application`].
//! - [`Server`]: the hyper transport that feeds requests to an application.
//!
//! The core is synchronous and does no I/O. Handlers and middleware borrow
//! the request and return a response; panics inside them are not caught by
//! the core.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use spindle::middleware::{Logging, MiddlewareChain};
//! use spindle::{Application, Request, Response, Router, Server, Status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), spindle::Error> {
//!     let dispatcher = Router::new()
//!         .get("/users", list_users)
//!         .post("/users", create_user)
//!         .dispatcher();
//!     let app = Application::new(
//!         MiddlewareChain::new().with(Logging),
//!         move |req: &Request| dispatcher.dispatch(req),
//!     );
//!
//!     Server::bind("0.0.0.0:3000")?.serve(app).await
//! }
//!
//! fn list_users(_req: &Request) -> Response {
//!     Response::json(r#"[{"id":"1"}]"#)
//! }
//!
//! fn create_user(req: &Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(Status::BadRequest);
//!     }
//!     Response::builder()
//!         .status(Status::Created)
//!         .header("Location", "/users/2")
//!         .json(r#"{"id":"2"}"#)
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod middleware;
pub mod routes;
pub mod settings;

pub use app::{build_application, shared_application, Application, SharedApplication};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::{Dispatcher, Router};
pub use server::{serve_listener, Server};
pub use settings::Settings;
pub use status::Status;
