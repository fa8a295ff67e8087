//! # Service Errors
//!
//! One error enum for everything a service call can fail with: the service
//! said no, the POST never completed, the response had the wrong shape, or
//! the client has no session to speak with.

use thiserror::Error;
use wireline_core::WireError;

/// A failed service operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service processed the request and rejected it. The numeric code
    /// is optional; older service versions report only a message.
    #[error("service rejected the request: {message}")]
    Rejected {
        /// The service's human-readable rejection reason.
        message: String,
        /// The service's numeric rejection code, when reported.
        code: Option<i32>,
    },

    /// The POST itself failed before any response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response arrived but did not decode to the expected shape.
    #[error("malformed response payload: {0}")]
    Payload(#[from] WireError),

    /// A session-scoped operation was called before a successful login.
    #[error("not logged in")]
    NotLoggedIn,
}
