//! # Transport — The POST-and-Parse Seam
//!
//! The locator client never talks to a socket directly. It hands every
//! request to a [`Transport`], which POSTs a JSON body to a path and returns
//! the decoded JSON response. Anything that can do that is a transport: an
//! HTTP client wrapper in production, a closure returning canned responses
//! in tests.

use serde_json::Value;

use crate::error::ServiceError;

/// POSTs a JSON body to a service path and returns the decoded response.
///
/// Implementations report a service-side rejection as
/// [`ServiceError::Rejected`] and a failed exchange as
/// [`ServiceError::Transport`]; a returned `Value` is always the decoded
/// body of a successful response.
pub trait Transport {
    /// Sends `body` to `path` and returns the response payload.
    fn post(&mut self, path: &str, body: &Value) -> Result<Value, ServiceError>;
}

impl<F> Transport for F
where
    F: FnMut(&str, &Value) -> Result<Value, ServiceError>,
{
    fn post(&mut self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        self(path, body)
    }
}
