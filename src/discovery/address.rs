//! Backend address and port validation.

use std::fmt;

/// Location of a backend instance.
///
/// The port is always within 1..=65535; construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendAddress {
    host: String,
    port: u16,
}

impl BackendAddress {
    /// Build an address, rejecting port 0.
    pub fn new(host: impl Into<String>, port: u16) -> Option<Self> {
        if port == 0 {
            return None;
        }
        Some(Self {
            host: host.into(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Same host, different port.
    pub fn with_port(&self, port: u16) -> Option<Self> {
        Self::new(self.host.clone(), port)
    }

    /// `http://host:port`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Absolute URL for a path on this backend. `path` must start with '/'.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl fmt::Display for BackendAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse a port value the way every discovery source does: trim, parse as an
/// unsigned integer, accept only 1..=65535.
pub fn parse_port(raw: &str) -> Option<u16> {
    let value: u64 = raw.trim().parse().ok()?;
    match u16::try_from(value) {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_ports() {
        assert_eq!(parse_port("5338"), Some(5338));
        assert_eq!(parse_port("  5338\n"), Some(5338));
        assert_eq!(parse_port("65535"), Some(65535));
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        assert_eq!(parse_port("abc"), None);
        assert_eq!(parse_port(""), None);
        assert_eq!(parse_port("0"), None);
        assert_eq!(parse_port("-1"), None);
        assert_eq!(parse_port("65536"), None);
        assert_eq!(parse_port("99999999"), None);
        assert_eq!(parse_port("5338abc"), None);
    }

    #[test]
    fn address_urls() {
        let addr = BackendAddress::new("localhost", 5338).unwrap();
        assert_eq!(addr.base_url(), "http://localhost:5338");
        assert_eq!(addr.url_for("/api/health"), "http://localhost:5338/api/health");
        assert_eq!(addr.to_string(), "localhost:5338");
        assert!(BackendAddress::new("localhost", 0).is_none());
        assert_eq!(addr.with_port(5000).unwrap().port(), 5000);
    }
}
