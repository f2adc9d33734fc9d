use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::access::DenyReason;
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error};

/// 仅教师可见
pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    if principal.as_teacher().is_none() {
        return Ok(DenyReason::WrongRole.into_response());
    }

    match storage.list_subjects().await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(subjects, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to list subjects", e)),
    }
}
