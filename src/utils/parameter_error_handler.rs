use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload rejected for {}: {}", req.path(), err);

    let response = match &err {
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType().json(
            ApiResponse::error_empty(ErrorCode::BadRequest, "Unsupported media type."),
        ),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Request body is too large.",
            ))
        }
        _ => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("JSON parse error - {err}"),
        )),
    };

    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query string rejected for {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters - {err}"),
    ));

    InternalError::from_response(err, response).into()
}
