//! Request logging.

use tracing::info;

use super::Middleware;
use crate::request::Request;
use crate::response::Response;

/// Emits one `incoming request` event per request and always declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logging;

impl Middleware for Logging {
    fn process_request(&self, req: &Request) -> Option<Response> {
        info!(method = %req.method(), path = %req.path(), "incoming request");
        None
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logs_method_and_path_then_declines() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let outcome = tracing::subscriber::with_default(subscriber, || {
            Logging.process_request(&Request::new("PATCH", "/users/7"))
        });

        assert_eq!(outcome, None);
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("incoming request").count(), 1);
        assert!(output.contains("method=PATCH"), "{output}");
        assert!(output.contains("path=/users/7"), "{output}");
    }
}
