use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::access::nested::resolve_grade;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

pub async fn delete_grade(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
    user_id: i64,
    grade_id: i64,
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
        Action::Destroy,
        ResourceKind::Grade,
        Some(&grade),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    match storage.delete_grade(grade.id).await {
        Ok(true) => {
            info!("Grade {} deleted by user {}", grade.id, principal.user_id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade successfully deleted.")))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete grade", e)),
    }
}
