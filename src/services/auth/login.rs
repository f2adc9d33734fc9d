use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::common::{VALIDATION_FAILED_MESSAGE, internal_error, validation_failed};
use crate::utils::password::verify_password;
use crate::utils::validate::{FieldErrors, TextRule, check_text};

use super::AuthService;

const BAD_CREDENTIALS_MESSAGE: &str = "Unable to log in with provided credentials.";

fn bad_credentials() -> HttpResponse {
    let mut errors = FieldErrors::new();
    errors.add("non_field_errors", BAD_CREDENTIALS_MESSAGE);
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::AuthFailed,
        errors.into_value(),
        VALIDATION_FAILED_MESSAGE,
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut errors = FieldErrors::new();
    let rule = TextRule {
        max: None,
        ..TextRule::required(0)
    };
    check_text(
        &mut errors,
        "email_or_username",
        login_request.email_or_username.as_deref(),
        rule,
    );
    check_text(&mut errors, "password", login_request.password.as_deref(), rule);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    let identifier = login_request.email_or_username.unwrap_or_default();
    let password = login_request.password.unwrap_or_default();

    // 1. 根据用户名或邮箱获取用户信息
    let user = match storage.get_user_by_username_or_email(&identifier).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(bad_credentials()),
        Err(e) => return Ok(internal_error("Login lookup failed", e)),
    };

    // 2. 验证密码
    if !verify_password(&password, &user.password_hash) {
        tracing::info!("Rejected login for {}", user.username);
        return Ok(bad_credentials());
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    let is_teacher = match storage.get_teacher_by_user_id(user.id).await {
        Ok(teacher) => teacher.is_some(),
        Err(e) => return Ok(internal_error("Failed to resolve profile", e)),
    };

    // 4. 生成令牌
    let token = match user.generate_access_token() {
        Ok(token) => token,
        Err(e) => return Ok(internal_error("Failed to generate JWT token", e)),
    };

    tracing::info!("User {} logged in successfully", user.username);

    let response = LoginResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        token,
        is_teacher,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful.")))
}
