use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_error_omits_data() {
        let body = serde_json::to_value(ApiResponse::error_empty(ErrorCode::NotFound, "Not found."))
            .unwrap();
        assert_eq!(body["code"], ErrorCode::NotFound as i32);
        assert_eq!(body["message"], "Not found.");
        assert!(body.get("data").is_none());
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_error_with_field_map() {
        let fields = serde_json::json!({ "password": ["Password too short."] });
        let body = serde_json::to_value(ApiResponse::error(
            ErrorCode::ValidationFailed,
            fields,
            "Invalid input.",
        ))
        .unwrap();
        assert_eq!(body["data"]["password"][0], "Password too short.");
    }
}
