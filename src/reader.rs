use std::fmt;

use log::{debug, error};

use crate::error::StoreError;
use crate::store::CoordinationClient;

/// Outcome of a metadata lookup.
///
/// Keeps "not registered" apart from "store unreachable" so callers
/// can pick their own retry policy.
#[derive(Debug)]
pub enum MetadataLookup {
    Found(String),
    NotFound,
    TransientError(StoreError),
}

impl MetadataLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, MetadataLookup::Found(_))
    }

    /// Collapses the lookup into a plain optional value; faults read
    /// as absent.
    pub fn into_option(self) -> Option<String> {
        match self {
            MetadataLookup::Found(value) => Some(value),
            MetadataLookup::NotFound | MetadataLookup::TransientError(_) => None,
        }
    }
}

impl fmt::Display for MetadataLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataLookup::Found(value) => f.write_str(value),
            MetadataLookup::NotFound => f.write_str("<not found>"),
            MetadataLookup::TransientError(e) => write!(f, "<error: {}>", e),
        }
    }
}

/// Reads the node at `path` after checking that it exists.
///
/// FLOW:
/// - missing node            -> NotFound
/// - node present            -> Found(content as UTF-8)
/// - any fault (check, read,
///   decode)                 -> TransientError, logged
///
/// The check and the read are two separate requests. A node removed in
/// between surfaces as a TransientError.
pub async fn read_metadata(client: &dyn CoordinationClient, path: &str) -> MetadataLookup {
    match try_read(client, path).await {
        Ok(Some(value)) => {
            debug!("Metadata found at {}", path);
            MetadataLookup::Found(value)
        }
        Ok(None) => {
            debug!("No metadata node at {}", path);
            MetadataLookup::NotFound
        }
        Err(e) => {
            error!("Failed to read metadata at {}: {}", path, e);
            MetadataLookup::TransientError(e)
        }
    }
}

async fn try_read(
    client: &dyn CoordinationClient,
    path: &str,
) -> Result<Option<String>, StoreError> {
    if !client.exists(path).await? {
        return Ok(None);
    }
    let data = client.get_data(path).await?;
    Ok(Some(String::from_utf8(data)?))
}
