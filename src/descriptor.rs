use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::error::MetadataError;

/// Parameter holding the root namespace of the metadata tree.
pub const GROUP_KEY: &str = "group";

/// Parameter holding additional comma-separated cluster addresses.
pub const BACKUP_KEY: &str = "backup";

/// Connection descriptor of a metadata report backend.
///
/// Parsed from URLs of the form:
///
/// ```text
/// zookeeper://127.0.0.1:2181?group=dubbo&backup=10.0.0.2:2181,10.0.0.3:2181
/// ```
///
/// The descriptor performs no validation beyond URL syntax.
/// Whether the protocol is supported is decided by the collector
/// registry at initialization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    protocol: String,
    address: String,
    parameters: BTreeMap<String, String>,
}

impl ConnectionDescriptor {
    pub fn new(protocol: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            address: address.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Parses a metadata report URL.
    ///
    /// ERRORS:
    /// - `InvalidDescriptor` if the input is not a URL or has no host
    pub fn parse(input: &str) -> Result<Self, MetadataError> {
        let invalid = |reason: String| MetadataError::InvalidDescriptor {
            input: input.to_string(),
            reason,
        };

        let url = Url::parse(input.trim()).map_err(|e| invalid(e.to_string()))?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("missing host".to_string()))?;

        let address = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let parameters = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            protocol: url.scheme().to_string(),
            address,
            parameters,
        })
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Primary `host:port` of the backend.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Returns the parameter value, or `default` if it is missing or empty.
    pub fn parameter_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.parameter(key) {
            Some(v) if !v.is_empty() => v,
            _ => default,
        }
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Cluster connect string: the primary address followed by every
    /// `backup` address, comma-joined.
    pub fn connect_address(&self) -> String {
        let mut hosts = vec![self.address.clone()];
        if let Some(backup) = self.parameter(BACKUP_KEY) {
            hosts.extend(
                backup
                    .split(',')
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(str::to_string),
            );
        }
        hosts.join(",")
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.address)?;
        let mut sep = '?';
        for (k, v) in &self.parameters {
            write!(f, "{}{}={}", sep, k, v)?;
            sep = '&';
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zookeeper_url_with_parameters() {
        let d = ConnectionDescriptor::parse("zookeeper://127.0.0.1:2181?group=foo&timeout=5000")
            .unwrap();

        assert_eq!(d.protocol(), "zookeeper");
        assert_eq!(d.address(), "127.0.0.1:2181");
        assert_eq!(d.parameter(GROUP_KEY), Some("foo"));
        assert_eq!(d.parameter("timeout"), Some("5000"));
        assert_eq!(d.parameter("missing"), None);
    }

    #[test]
    fn address_without_port_is_host_only() {
        let d = ConnectionDescriptor::parse("redis://cache.local").unwrap();
        assert_eq!(d.address(), "cache.local");
    }

    #[test]
    fn rejects_input_without_host() {
        let err = ConnectionDescriptor::parse("127.0.0.1:2181").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidDescriptor { .. }));

        let err = ConnectionDescriptor::parse("not a url").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidDescriptor { .. }));
    }

    #[test]
    fn connect_address_appends_backups() {
        let d = ConnectionDescriptor::parse(
            "zookeeper://10.0.0.1:2181?backup=10.0.0.2:2181, 10.0.0.3:2181,",
        )
        .unwrap();

        assert_eq!(
            d.connect_address(),
            "10.0.0.1:2181,10.0.0.2:2181,10.0.0.3:2181"
        );

        let single = ConnectionDescriptor::new("zookeeper", "zk:2181");
        assert_eq!(single.connect_address(), "zk:2181");
    }

    #[test]
    fn empty_parameter_falls_back_to_default() {
        let d = ConnectionDescriptor::new("zookeeper", "zk:2181").with_parameter(GROUP_KEY, "");
        assert_eq!(d.parameter_or(GROUP_KEY, "dubbo"), "dubbo");
    }

    #[test]
    fn display_renders_url_form() {
        let d = ConnectionDescriptor::new("zookeeper", "zk:2181")
            .with_parameter("group", "a")
            .with_parameter("backup", "b:1");
        assert_eq!(d.to_string(), "zookeeper://zk:2181?backup=b:1&group=a");
    }
}
