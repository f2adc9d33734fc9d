/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>`，解析出请求主体（学生 / 教师 / 未分配）
 * 并存入请求扩展，供后续的策略中间件与业务层使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/homeworks")
 *         .wrap(RequireJWT)
 *         .route("/", web::get().to(list_homeworks)),
 * );
 *
 * async fn list_homeworks(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let principal = RequireJWT::extract_principal(&req);
 *     // ...
 * }
 * ```
 *
 * 解析结果按用户 ID 缓存在对象缓存中，资料更新时由业务层失效。
 */

use crate::access::Principal;
use crate::access::evaluator::UNAUTHENTICATED_MESSAGE;
use crate::cache::{ObjectCache, get_json, insert_json};
use crate::models::ErrorCode;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";
const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";

#[derive(Clone)]
pub struct RequireJWT;

/// 主体缓存键，同一用户的所有令牌共用
pub fn principal_cache_key(user_id: i64) -> String {
    format!("principal:{user_id}")
}

#[derive(Debug)]
enum AuthError {
    Missing,
    Invalid(String),
    Internal(String),
}

impl AuthError {
    fn into_response(self) -> HttpResponse {
        match self {
            AuthError::Missing => create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                UNAUTHENTICATED_MESSAGE,
            ),
            AuthError::Invalid(_) => create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                INVALID_TOKEN_MESSAGE,
            ),
            AuthError::Internal(_) => create_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Internal server error.",
            ),
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// 辅助函数：验证令牌并解析主体
async fn authenticate(req: &ServiceRequest) -> Result<Principal, AuthError> {
    let token = bearer_token(req).ok_or(AuthError::Missing)?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(&token)
        .map_err(|err| AuthError::Invalid(format!("JWT token validation failed: {err}")))?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthError::Invalid("Invalid user ID in JWT".to_string()))?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    let key = principal_cache_key(user_id);
    if let Some(cache) = &cache
        && let Some(principal) = get_json::<Principal>(cache.as_ref(), &key).await
    {
        return Ok(principal);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthError::Internal("Storage not found in app data".to_string()))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| AuthError::Internal(format!("Failed to retrieve user: {e}")))?
        .ok_or_else(|| AuthError::Invalid(format!("User {user_id} not found")))?;

    let principal = Principal::resolve(storage.as_ref(), user)
        .await
        .map_err(|e| AuthError::Internal(format!("Failed to resolve principal: {e}")))?;

    if let Some(cache) = &cache {
        insert_json(cache.as_ref(), key, &principal).await;
    }

    Ok(principal)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            match authenticate(&req).await {
                Ok(principal) => {
                    debug!(
                        "JWT authentication successful for user {} ({:?})",
                        principal.user_id(),
                        principal.role()
                    );
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    match &err {
                        AuthError::Internal(msg) => error!("{}", msg),
                        AuthError::Invalid(msg) => {
                            info!("JWT authentication failed for {}: {}", req.path(), msg)
                        }
                        AuthError::Missing => {
                            info!("Missing credentials for request to {}", req.path())
                        }
                    }
                    Ok(req.into_response(err.into_response().map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取主体
impl RequireJWT {
    /// 从请求扩展中提取主体
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_principal(req: &actix_web::HttpRequest) -> Option<Principal> {
        req.extensions().get::<Principal>().cloned()
    }
}
