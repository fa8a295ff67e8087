//! # wireline-client — Service Locator Client Glue
//!
//! The thin request/response layer over `wireline-core`'s value types: a
//! [`Transport`] seam for the POST-and-parse exchange, the directory entry
//! and permission values the service locator deals in, and a
//! [`ServiceLocatorClient`] that holds the session and speaks the wire
//! format end to end.
//!
//! ## Design
//!
//! The client contains no protocol intelligence of its own. Every operation
//! is one POST whose body and response are built from `wireline-core`
//! encodings; the transport decides how bytes move. Swapping the production
//! HTTP stack for a closure returning canned JSON is how the crate tests
//! itself, and how downstream code can fake the service.
//!
//! Network retry, backoff, and authentication protocol design are out of
//! scope here: a transport failure surfaces as a [`ServiceError`] and the
//! caller decides what to do with it.

pub mod directory;
pub mod error;
pub mod locator;
pub mod transport;

// Re-export primary types for ergonomic imports.
pub use directory::{DirectoryEntry, EntryType, Permission, Permissions};
pub use error::ServiceError;
pub use locator::ServiceLocatorClient;
pub use transport::Transport;
