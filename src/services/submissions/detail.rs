use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::access::nested::resolve_submission;
use crate::access::{Action, Decision, ResourceKind, SubmissionView, authorize};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    submissions::{entities::Submission, responses::SubmissionResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error};

pub(crate) async fn render_submission(
    loader: &mut RelationLoader<'_>,
    submission: Submission,
) -> Result<SubmissionResponse> {
    Ok(SubmissionResponse {
        id: submission.id,
        homework: submission.homework_id,
        student: loader.student(submission.student_id).await?,
        content: submission.content,
        solution_url: submission.solution_url,
        checked: submission.checked,
        submitted_at: submission.submitted_at,
    })
}

pub async fn get_submission(
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

    // 提交者本人或作业作者可见
    let view = SubmissionView {
        homework: &homework,
        submission: &submission,
    };
    if let Decision::Deny(reason) = authorize(
        Action::Retrieve,
        ResourceKind::Submission,
        Some(&view),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let mut loader = RelationLoader::new(storage.as_ref());
    match render_submission(&mut loader, submission).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to load submission relations", e)),
    }
}
