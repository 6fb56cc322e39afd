//! Unified error type.

use thiserror::Error;

/// The error type returned by spindle's fallible operations.
///
/// Application-level outcomes (an unmatched route, a rejected request) are
/// expressed as [`Response`](crate::Response) values, not as `Error`s. This
/// type surfaces infrastructure failures: reading settings, binding to a
/// port, accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{0}`")]
    InvalidAddress(String),

    #[error("config: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_keep_their_message() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "io: taken");
    }

    #[test]
    fn invalid_address_names_the_input() {
        let err = Error::InvalidAddress("nowhere:99999".to_owned());
        assert_eq!(err.to_string(), "invalid socket address `nowhere:99999`");
    }
}
