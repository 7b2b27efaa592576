//! User-facing error messages

use techhub_http::ClientError;

/// Message for a failed action: the server's `detail` verbatim when it sent
/// one, otherwise the action's fixed fallback.
pub fn detail_or(error: &ClientError, fallback: &str) -> String {
    error
        .detail()
        .map_or_else(|| fallback.to_string(), str::to_string)
}

/// Like [`detail_or`], with a separate fallback for requests that never
/// received a response.
pub fn detail_or_transport(error: &ClientError, fallback: &str, transport: &str) -> String {
    if error.is_transport() {
        transport.to_string()
    } else {
        detail_or(error, fallback)
    }
}
