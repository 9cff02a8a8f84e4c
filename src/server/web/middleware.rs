use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Tags each request with an `x-request-id` and logs its status and latency.
pub async fn trace_request(mut request: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = Uuid::new_v4().to_string();

    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    request.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&request_id).unwrap_or_else(|_| HeaderValue::from_static("invalid"))
    );

    let span = info_span!(
        "request",
        method = %method,
        uri = %uri,
        version = ?version,
        request_id = %request_id,
    );

    async move {
        let response = next.run(request).await;

        let latency = start.elapsed();
        let status = response.status();

        tracing::info!(
            latency_ms = latency.as_millis(),
            status = %status,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}
