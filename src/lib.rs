// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - config:      Configuration structs loaded from JSON
// - descriptor:  Metadata-report URL (protocol, address, parameters)
// - identifier:  Metadata identifier and its key formats
// - path:        Root namespace and node path resolution
// - retry:       Bounded exponential backoff for connection setup
// - store:       Coordination-service clients and connection manager
// - reader:      Existence-checked metadata reads
// - collectors:  Collector contract, backends and registry
// - error:       Library error types
//
pub mod config;
pub mod descriptor;
pub mod identifier;
pub mod path;
pub mod retry;
pub mod store;
pub mod reader;
pub mod collectors;
pub mod error;

pub use collectors::{CollectorBuilder, MetaDataCollector};
pub use descriptor::ConnectionDescriptor;
pub use error::{MetadataError, StoreError};
pub use identifier::{KeyType, MetadataIdentifier, Side};
pub use reader::MetadataLookup;
pub use retry::RetryPolicy;
