use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

use super::request_id::REQUEST_ID_HEADER;

/// Span maker for `TraceLayer` that tags every request span with its
/// correlation id.
///
/// Install [`request_id_middleware`](super::request_id_middleware) as an
/// outer layer so the header is present when the span is created.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}
