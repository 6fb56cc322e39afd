//! Incoming HTTP request type.

use std::collections::BTreeMap;

/// An incoming HTTP request, already normalized by the transport.
///
/// Immutable once built: middleware and handlers only ever see `&Request`.
/// Header names are kept exactly as received and compared case-sensitively;
/// inserting a name twice keeps the last value.
///
/// ```rust
/// use spindle::Request;
///
/// let req = Request::new("POST", "/users")
///     .with_header("X-Trace", "a")
///     .with_header("X-Trace", "b")
///     .with_body("{}");
///
/// assert_eq!(req.header("X-Trace"), Some("b"));
/// assert_eq!(req.body(), "{}");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: String,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// Adds a header, replacing any earlier value under the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &BTreeMap<String, String> { &self.headers }
    pub fn body(&self) -> &str { &self.body }

    /// Exact-name header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_case_sensitive() {
        let req = Request::new("GET", "/").with_header("Accept", "text/plain");
        assert_eq!(req.header("Accept"), Some("text/plain"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn duplicate_header_keeps_last_value() {
        let req = Request::new("GET", "/")
            .with_header("Cookie", "a=1")
            .with_header("Cookie", "b=2");
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.header("Cookie"), Some("b=2"));
    }

    #[test]
    fn defaults_to_empty_headers_and_body() {
        let req = Request::new("DELETE", "/users/1");
        assert_eq!(req.method(), "DELETE");
        assert_eq!(req.path(), "/users/1");
        assert!(req.headers().is_empty());
        assert!(req.body().is_empty());
    }
}
