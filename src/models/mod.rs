//! 数据模型：业务实体、请求与响应

pub mod auth;
pub mod classes;
pub mod comments;
pub mod common;
pub mod exams;
pub mod grades;
pub mod homeworks;
pub mod materials;
pub mod news;
pub mod notifications;
pub mod profiles;
pub mod subjects;
pub mod submissions;
pub mod users;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 响应业务码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    NotOwner = 1003,
    Forbidden = 1004,
    NotFound = 1005,
    InternalServerError = 1006,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserEmailAlreadyExists = 2002,
    UserNameAlreadyExists = 2003,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}
