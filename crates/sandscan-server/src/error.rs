use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sandscan_core::Error;
use serde_json::json;

/// Erros devolvidos pelos handlers
#[derive(Debug)]
pub enum ApiError {
    /// Requisição inválida: 400 `{"error": ...}`
    BadRequest(String),
    /// Falha do colaborador (provedor, decodificação)
    Core(Error),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Core(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Core(Error::ValidationError(message)) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Core(e) => {
                let status = match e {
                    Error::RpcError(_) | Error::DecodeError(_) => StatusCode::BAD_GATEWAY,
                    Error::NotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                tracing::error!(error = %e, status = status.as_u16(), "falha na análise");
                (status, Json(json!({ "status": "error", "message": e.to_string() }))).into_response()
            }
        }
    }
}
