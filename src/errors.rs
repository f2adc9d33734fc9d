//! 统一错误处理模块
//!
//! 内部错误通过宏生成，带错误代码与类型名称；请求级错误由服务层直接转换为 HTTP 响应。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成 enum、code()、error_type()、message() 以及 snake_case 构造函数。
macro_rules! define_elsyser_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ElsyserError {
            $($variant(String),)*
        }

        impl ElsyserError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ElsyserError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ElsyserError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(ElsyserError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl ElsyserError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ElsyserError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_elsyser_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Io("E005", "IO Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    Notification("E012", "Notification Error"),
}

impl ElsyserError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ElsyserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ElsyserError {}

impl From<sea_orm::DbErr> for ElsyserError {
    fn from(err: sea_orm::DbErr) -> Self {
        ElsyserError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ElsyserError {
    fn from(err: std::io::Error) -> Self {
        ElsyserError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ElsyserError {
    fn from(err: serde_json::Error) -> Self {
        ElsyserError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ElsyserError {
    fn from(err: chrono::ParseError) -> Self {
        ElsyserError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ElsyserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ElsyserError::cache_connection("x").code(), "E001");
        assert_eq!(ElsyserError::database_operation("x").code(), "E004");
        assert_eq!(ElsyserError::validation("x").code(), "E006");
        assert_eq!(ElsyserError::notification("x").code(), "E012");
    }

    #[test]
    fn test_db_err_converts_to_database_operation() {
        let err: ElsyserError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.error_type(), "Database Operation Error");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = ElsyserError::not_found("homework 7");
        assert_eq!(err.format_simple(), "Resource Not Found: homework 7");
        assert_eq!(err.to_string(), err.format_simple());
    }

    #[test]
    fn test_date_parse_error() {
        let err: ElsyserError = chrono::NaiveDate::parse_from_str("2025-13-40", "%Y-%m-%d")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E009");
    }
}
