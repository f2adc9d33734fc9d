use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{HomeworkService, check_homework_text};
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    homeworks::{requests::UpdateHomeworkRequest, responses::HomeworkWriteResponse},
};
use crate::services::common::{
    check_class_ref, current_principal, internal_error, not_found, validation_failed,
};
use crate::utils::validate::FieldErrors;

pub async fn update_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    req: UpdateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let homework = match storage.get_homework_by_id(homework_id).await {
        Ok(Some(homework)) => homework,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load homework", e)),
    };

    // 先检查所有权再校验
    if let Decision::Deny(reason) = authorize(
        Action::Update,
        ResourceKind::Homework,
        Some(&homework),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let mut errors = FieldErrors::new();
    check_homework_text(&mut errors, req.topic.as_deref(), req.details.as_deref(), true);
    if let Err(e) = check_class_ref(storage.as_ref(), &mut errors, "clazz", req.clazz).await {
        return Ok(internal_error("Failed to check class", e));
    }
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    match storage.update_homework(homework_id, req).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HomeworkWriteResponse::from(&updated),
            "Homework successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update homework", e)),
    }
}
