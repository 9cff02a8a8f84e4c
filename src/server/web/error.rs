use axum::{http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use crate::server;

/// The body of every failed request: `{"error": "<message>"}`.
#[derive(Clone, Debug, Serialize)]
pub struct ClientError {
    pub error: String,
}

impl server::error::ServerError {
    pub fn to_status_and_client_error(&self) -> (StatusCode, ClientError) {
        let status_code = match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::AxumError { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::IOError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, ClientError { error: self.to_string() })
    }
}

impl IntoResponse for server::error::ServerError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        response.extensions_mut().insert(self);

        response
    }
}

#[cfg(test)]
mod tests {
    use crate::server::error::ServerError;
    use axum::http::StatusCode;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (ServerError::ValidationError { why: "Missing old_name or new_name".into() }, StatusCode::BAD_REQUEST),
            (ServerError::file_not_found(), StatusCode::NOT_FOUND),
            (ServerError::IOError { why: "Permission denied (os error 13)".into() }, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let (status, client_err) = err.to_status_and_client_error();
            assert_eq!(status, expected);
            assert_eq!(client_err.error, err.to_string());
        }
    }

    #[test]
    fn io_errors_pass_their_message_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "disk says no");
        let (_, client_err) = ServerError::from(io).to_status_and_client_error();
        assert_eq!(client_err.error, "disk says no");
    }
}
