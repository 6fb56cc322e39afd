//! Startup settings for the listener.
//!
//! Only the server and the binary read these; the dispatch core never does.

use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::Error;

pub const HOST_VAR: &str = "SPINDLE_HOST";
pub const PORT_VAR: &str = "SPINDLE_PORT";

/// Where the server binds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_owned(), port: 8080 }
    }
}

impl Settings {
    /// Defaults, overridden by `SPINDLE_HOST` / `SPINDLE_PORT` when set.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut settings = Self::default();
        if let Some(host) = lookup(HOST_VAR) {
            settings.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            settings.port = port
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{PORT_VAR}=`{port}`: {e}")))?;
        }
        Ok(settings)
    }

    /// Resolves `host:port` to the first matching socket address.
    pub fn addr(&self) -> Result<SocketAddr, Error> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or(Error::InvalidAddress(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let settings = Settings::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.addr().unwrap(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn environment_overrides_host_and_port() {
        let settings =
            Settings::from_lookup(lookup_in(&[(HOST_VAR, "0.0.0.0"), (PORT_VAR, "3000")])).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn rejects_a_non_numeric_port() {
        let err = Settings::from_lookup(lookup_in(&[(PORT_VAR, "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("SPINDLE_PORT")), "{err}");
    }

    #[test]
    fn rejects_an_out_of_range_port() {
        assert!(Settings::from_lookup(lookup_in(&[(PORT_VAR, "70000")])).is_err());
    }

    #[test]
    fn unparseable_host_is_an_invalid_address() {
        let settings = Settings { host: "not a host".to_owned(), port: 80 };
        assert!(matches!(settings.addr(), Err(Error::InvalidAddress(_))));
    }
}
