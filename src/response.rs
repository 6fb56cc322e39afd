//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler or middleware and return it. The
//! transport owns serialization; this module only describes what to send.

use std::collections::BTreeMap;

use crate::status::Status;

const CONTENT_TYPE: &str = "Content-Type";

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`ResponseBuilder::body`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Csv,         // text/csv
    EventStream, // text/event-stream  (SSE)
    FormData,    // application/x-www-form-urlencoded
    Html,        // text/html; charset=utf-8
    Json,        // application/json
    Text,        // text/plain
    Xml,         // application/xml
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv         => "text/csv",
            Self::EventStream => "text/event-stream",
            Self::FormData    => "application/x-www-form-urlencoded",
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::Text        => "text/plain",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response: a status code, a header map and a text body.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use spindle::{Response, Status};
///
/// Response::text("hello");
/// Response::json(r#"{"id":1}"#);
/// Response::status(Status::NoContent);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use spindle::{ContentType, Response, Status};
///
/// Response::builder()
///     .status(Status::Created)
///     .header("Location", "/users/42")
///     .json(r#"{"id":42}"#);
///
/// Response::builder()
///     .status(Status::Ok)
///     .body(ContentType::Xml, "<ok/>");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub(crate) status: u16,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: String,
}

impl Response {
    /// `200 OK` with `Content-Type: text/plain`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::typed(ContentType::Text, body.into())
    }

    /// `200 OK` with `Content-Type: application/json`.
    ///
    /// spindle does not serialize; pass the output of your serializer.
    pub fn json(body: impl Into<String>) -> Self {
        Self::typed(ContentType::Json, body.into())
    }

    /// Response with no body and no headers.
    pub fn status(code: Status) -> Self {
        Self { status: code.into(), headers: BTreeMap::new(), body: String::new() }
    }

    /// The fallback produced when no route matches: `404`, plain text, `Not Found`.
    pub fn not_found() -> Self {
        Self::builder().status(Status::NotFound).text("Not Found")
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: BTreeMap::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status }
    pub fn headers(&self) -> &BTreeMap<String, String> { &self.headers }
    pub fn body(&self) -> &str { &self.body }

    /// Exact-name header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    fn typed(content_type: ContentType, body: String) -> Self {
        Self::builder().body(content_type, body)
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method, so the content type is always set
/// alongside the body.
#[derive(Debug)]
pub struct ResponseBuilder {
    headers: BTreeMap<String, String>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    /// Sets a header. A later call with the same name replaces the value.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Terminate with a plain-text body (`text/plain`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.body(ContentType::Text, body)
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: impl Into<String>) -> Response {
        self.body(ContentType::Json, body)
    }

    /// Terminate with a typed body. Use this for HTML, XML, CSV, SSE, etc.
    ///
    /// An explicit `Content-Type` set through [`header`](Self::header) wins.
    pub fn body(mut self, content_type: ContentType, body: impl Into<String>) -> Response {
        self.headers
            .entry(CONTENT_TYPE.to_owned())
            .or_insert_with(|| content_type.as_str().to_owned());
        Response { status: self.status, headers: self.headers, body: body.into() }
    }

    /// Terminate with no body (e.g. `Status::NoContent`, `Status::MovedPermanently`).
    pub fn no_body(self) -> Response {
        Response { status: self.status, headers: self.headers, body: String::new() }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a [`Status`] directly from a handler: `return Status::NoContent`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}
