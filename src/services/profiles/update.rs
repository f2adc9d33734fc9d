use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProfileService;
use super::get::load_profile;
use crate::access::DenyReason;
use crate::middlewares::require_jwt::principal_cache_key;
use crate::models::{
    ApiResponse,
    profiles::{entities::ProfileChanges, requests::UpdateProfileRequest},
};
use crate::services::common::{current_principal, internal_error, not_found, validation_failed};
use crate::storage::Storage;
use crate::utils::validate::{
    FieldErrors, MSG_INVALID_URL, TextRule, check_email, check_text, is_valid_url,
};

const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";
const EMAIL_TAKEN_MESSAGE: &str = "A user with that email already exists.";

fn check_fields(req: &UpdateProfileRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(user) = &req.user {
        let mut user_errors = FieldErrors::new();
        check_text(
            &mut user_errors,
            "username",
            user.username.as_deref(),
            TextRule::required(150).partial(true),
        );
        check_text(
            &mut user_errors,
            "first_name",
            user.first_name.as_deref(),
            TextRule::required(30).partial(true),
        );
        check_text(
            &mut user_errors,
            "last_name",
            user.last_name.as_deref(),
            TextRule::required(30).partial(true),
        );
        check_text(
            &mut user_errors,
            "email",
            user.email.as_deref(),
            TextRule::required(100).partial(true),
        );
        if let Some(email) = user.email.as_deref() {
            check_email(&mut user_errors, "email", email);
        }
        errors.nest("user", user_errors);
    }

    check_text(&mut errors, "info", req.info.as_deref(), TextRule::blank_ok(2048));
    if let Some(url) = req.profile_image_url.as_deref()
        && !is_valid_url(url)
    {
        errors.add("profile_image_url", MSG_INVALID_URL);
    }

    errors
}

/// 用户名与邮箱不得与其他用户重复
async fn check_unique(
    storage: &dyn Storage,
    user_id: i64,
    req: &UpdateProfileRequest,
) -> crate::errors::Result<FieldErrors> {
    let mut errors = FieldErrors::new();
    let Some(user) = &req.user else {
        return Ok(errors);
    };

    let mut user_errors = FieldErrors::new();
    if let Some(username) = user.username.as_deref()
        && let Some(existing) = storage.get_user_by_username(username).await?
        && existing.id != user_id
    {
        user_errors.add("username", USERNAME_TAKEN_MESSAGE);
    }
    if let Some(email) = user.email.as_deref()
        && let Some(existing) = storage.get_user_by_email(email).await?
        && existing.id != user_id
    {
        user_errors.add("email", EMAIL_TAKEN_MESSAGE);
    }
    errors.nest("user", user_errors);
    Ok(errors)
}

pub async fn update_profile(
    service: &ProfileService,
    request: &HttpRequest,
    user_id: i64,
    req: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 目标用户不存在时先返回 404
    match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load user", e)),
    }

    // 只能修改自己的资料
    if principal.user_id() != user_id {
        info!(
            "User {} attempted to edit profile of user {}",
            principal.user_id(),
            user_id
        );
        return Ok(DenyReason::WrongRole.into_response());
    }

    let errors = check_fields(&req);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }
    match check_unique(storage.as_ref(), user_id, &req).await {
        Ok(errors) if !errors.is_empty() => return Ok(validation_failed(errors)),
        Ok(_) => {}
        Err(e) => return Ok(internal_error("Failed to check profile uniqueness", e)),
    }

    let user = req.user.unwrap_or_default();
    let changes = ProfileChanges {
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        info: req.info,
        profile_image_url: req.profile_image_url,
    };

    match storage.update_profile(user_id, changes).await {
        Ok(true) => {}
        Ok(false) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to update profile", e)),
    }

    // 该用户所有令牌缓存的主体均已过期
    if let Some(cache) = service.get_cache(request) {
        cache.remove(&principal_cache_key(user_id)).await;
    }

    match load_profile(storage.as_ref(), user_id).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile.with_can_edit(true),
            "Profile successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to load profile", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profiles::requests::UpdateProfileUser;

    #[test]
    fn test_user_errors_are_nested() {
        let req = UpdateProfileRequest {
            user: Some(UpdateProfileUser {
                username: Some(String::new()),
                first_name: Some("x".repeat(31)),
                ..Default::default()
            }),
            info: None,
            profile_image_url: Some("not-a-url".into()),
        };
        let errors = check_fields(&req).into_value();
        assert_eq!(errors["user"]["username"][0], "This field may not be blank.");
        assert_eq!(
            errors["user"]["first_name"][0],
            "Ensure this field has no more than 30 characters."
        );
        assert_eq!(errors["profile_image_url"][0], MSG_INVALID_URL);
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(check_fields(&UpdateProfileRequest::default()).is_empty());
    }
}
