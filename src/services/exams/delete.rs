use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let exam = match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load exam", e)),
    };

    if let Decision::Deny(reason) =
        authorize(Action::Destroy, ResourceKind::Exam, Some(&exam), Some(&principal))
    {
        return Ok(reason.into_response());
    }

    match storage.delete_exam(exam_id).await {
        Ok(true) => {
            info!("Exam {} deleted by user {}", exam_id, principal.user_id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Exam successfully deleted.")))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete exam", e)),
    }
}
