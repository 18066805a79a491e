use std::fmt;

use serde::Deserialize;
use url::form_urlencoded;

/// Wildcard interface name; it maps to an empty service path.
const ANY_VALUE: &str = "*";

/// Path tag under which metadata nodes are stored.
const DEFAULT_PATH_TAG: &str = "metadata";

const KEY_SEPARATOR: &str = ":";
const PATH_SEPARATOR: char = '/';

/// Role of the application that reported the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Provider,
    Consumer,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Provider => "provider",
            Side::Consumer => "consumer",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects the textual form of an identifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Slash-separated form used as a node path below the root.
    Path,

    /// Colon-separated form used as a flat key.
    UniqueKey,
}

/// Identifies one piece of service metadata reported by an application.
///
/// Version and group are optional and skipped in the path form when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetadataIdentifier {
    pub service_interface: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    pub side: Side,
    pub application: String,
}

impl MetadataIdentifier {
    pub fn new(
        service_interface: impl Into<String>,
        side: Side,
        application: impl Into<String>,
    ) -> Self {
        Self {
            service_interface: service_interface.into(),
            version: None,
            group: None,
            side,
            application: application.into(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn unique_key(&self, key_type: KeyType) -> String {
        match key_type {
            KeyType::Path => self.path_key(),
            KeyType::UniqueKey => self.identifier_key(),
        }
    }

    // interface:version:group:side:application
    fn identifier_key(&self) -> String {
        let parts = [
            self.service_interface.as_str(),
            self.version.as_deref().unwrap_or(""),
            self.group.as_deref().unwrap_or(""),
            self.side.as_str(),
            self.application.as_str(),
        ];
        parts.join(KEY_SEPARATOR)
    }

    // metadata/interface/[version/][group/]side/application
    fn path_key(&self) -> String {
        let mut key = String::from(DEFAULT_PATH_TAG);
        key.push(PATH_SEPARATOR);
        key.push_str(&self.service_path());
        key.push(PATH_SEPARATOR);

        for segment in [&self.version, &self.group].into_iter().flatten() {
            key.push_str(segment);
            key.push(PATH_SEPARATOR);
        }

        key.push_str(self.side.as_str());
        key.push(PATH_SEPARATOR);
        key.push_str(&self.application);
        key
    }

    fn service_path(&self) -> String {
        if self.service_interface == ANY_VALUE {
            return String::new();
        }
        // form encoding: space becomes '+', '*' stays literal
        form_urlencoded::byte_serialize(self.service_interface.as_bytes()).collect()
    }
}
