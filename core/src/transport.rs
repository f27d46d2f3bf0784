//! The seam where a host plugs in real I/O.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one request and hands back whatever the server answered.
///
/// Non-2xx statuses are returned as data, not as `Err`; status
/// interpretation belongs to `PostsClient`. `Err` is reserved for failures
/// where no response exists at all.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

