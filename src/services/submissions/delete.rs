use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::access::nested::resolve_submission;
use crate::access::{Action, Decision, ResourceKind, SubmissionView, authorize};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, internal_error, not_found};

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    homework_id: i64,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let (homework, submission) =
        match resolve_submission(storage.as_ref(), &principal, homework_id, submission_id).await {
            Ok(resolved) => resolved,
            Err(e) => return Ok(e.into_response()),
        };

    let view = SubmissionView {
        homework: &homework,
        submission: &submission,
    };
    if let Decision::Deny(reason) = authorize(
        Action::Destroy,
        ResourceKind::Submission,
        Some(&view),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    match storage.delete_submission(submission.id).await {
        Ok(true) => {
            info!(
                "Submission {} deleted by user {}",
                submission.id,
                principal.user_id()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Submission successfully deleted.",
            )))
        }
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete submission", e)),
    }
}
