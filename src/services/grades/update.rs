use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, check_grade_value};
use crate::access::nested::resolve_grade;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    grades::{requests::GradeRequest, responses::GradeWriteResponse},
};
use crate::services::common::{current_principal, internal_error, not_found, validation_failed};

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
    user_id: i64,
    grade_id: i64,
    req: GradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let (_, _, grade) =
        match resolve_grade(storage.as_ref(), subject_id, user_id, grade_id).await {
            Ok(resolved) => resolved,
            Err(e) => return Ok(e.into_response()),
        };

    if let Decision::Deny(reason) = authorize(
        Action::Update,
        ResourceKind::Grade,
        Some(&grade),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    // 成绩只有一个字段，未提供即视为无修改
    let Some(value) = req.value else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeWriteResponse::from(&grade),
            "Grade successfully updated.",
        )));
    };
    let value = match check_grade_value(Some(value)) {
        Ok(value) => value,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    match storage.update_grade(grade.id, value).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeWriteResponse::from(&updated),
            "Grade successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update grade", e)),
    }
}
