//! The statically configured route table.
//!
//! Entries are registered in declaration order, so when two entries share
//! a method and path the one listed first is the one that answers.

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// One static registration: method, exact path, handler.
pub type RouteEntry = (Method, &'static str, fn(&Request) -> Response);

pub static ROUTES: &[RouteEntry] = &[
    (Method::Get, "/",       hello_world),
    (Method::Get, "/whoami", whoami),
];

pub fn hello_world(_req: &Request) -> Response {
    Response::text("Hello, World!")
}

pub fn whoami(_req: &Request) -> Response {
    Response::text("DjangoCPP")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_declared_in_order() {
        let paths: Vec<&str> = ROUTES.iter().map(|(_, path, _)| *path).collect();
        assert_eq!(paths, vec!["/", "/whoami"]);
    }

    #[test]
    fn handlers_answer_plain_text() {
        let req = Request::new("GET", "/");
        assert_eq!(hello_world(&req).body(), "Hello, World!");
        assert_eq!(whoami(&req).header("Content-Type"), Some("text/plain"));
    }
}
