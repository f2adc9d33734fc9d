//! 路径 ID 提取器
//!
//! 路径中的 ID 无法解析为正整数时，与记录不存在同样返回 404。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

pub const NOT_FOUND_MESSAGE: &str = "Not found.";

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            InternalError::from_response(
                format!("invalid path parameter: {name}"),
                HttpResponse::NotFound()
                    .json(ApiResponse::error_empty(ErrorCode::NotFound, NOT_FOUND_MESSAGE)),
            )
            .into()
        })
}

macro_rules! define_safe_id_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_path_id(req, $param).map($name))
            }
        }
    };
}

define_safe_id_extractor!(
    /// `{id}`
    SafeIDI64,
    "id"
);
define_safe_id_extractor!(SafeSubjectIdI64, "subject_pk");
define_safe_id_extractor!(SafeNewsIdI64, "news_pk");
define_safe_id_extractor!(
    /// `{user_pk}`，用户 ID 而非资料 ID
    SafeUserIdI64,
    "user_pk"
);
define_safe_id_extractor!(SafeHomeworkIdI64, "homework_pk");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_numeric_id_extracted() {
        let req = TestRequest::default().param("id", "17").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeIDI64(17));
    }

    #[actix_web::test]
    async fn test_invalid_id_is_not_found() {
        for raw in ["abc", "-3", "0"] {
            let req = TestRequest::default()
                .param("news_pk", raw)
                .to_http_request();
            let err = SafeNewsIdI64::extract(&req).await.unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::NOT_FOUND
            );
        }
    }
}
