use crate::utils::error::AdapterError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Decode(String),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::Adapter(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// 錯誤訊息以純文字原樣回傳
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Decode(message) => tracing::warn!("Rejected request body: {:?}", message),
            ApiError::Adapter(e) => tracing::error!("❌ Enumeration failed: {}", e),
        }
        (status, self.to_string()).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
