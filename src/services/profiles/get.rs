use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::errors::Result;
use crate::models::{ApiResponse, profiles::responses::ProfileResponse};
use crate::services::common::{current_principal, internal_error, not_found};
use crate::storage::Storage;

/// 教师资料优先，其次学生资料
pub(crate) async fn load_profile(
    storage: &dyn Storage,
    user_id: i64,
) -> Result<Option<ProfileResponse>> {
    if let Some(teacher) = storage.get_teacher_by_user_id(user_id).await? {
        return Ok(Some(ProfileResponse::from(&teacher)));
    }
    Ok(storage
        .get_student_by_user_id(user_id)
        .await?
        .map(|student| ProfileResponse::from(&student)))
}

pub async fn get_profile(
    service: &ProfileService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    match load_profile(storage.as_ref(), user_id).await {
        Ok(Some(profile)) => {
            let can_edit = principal.user_id() == user_id;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                profile.with_can_edit(can_edit),
                "Query successful.",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to load profile", e)),
    }
}
