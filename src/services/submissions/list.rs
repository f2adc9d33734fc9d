use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use super::detail::render_submission;
use crate::access::nested::resolve_homework;
use crate::access::{ResourceKind, scope_filter};
use crate::models::{
    ApiResponse,
    submissions::{entities::SubmissionListQuery, responses::SubmissionResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error};

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let homework = match resolve_homework(storage.as_ref(), &principal, homework_id).await {
        Ok(homework) => homework,
        Err(e) => return Ok(e.into_response()),
    };

    // 学生只看到自己的提交，教师看到本科目作业的全部提交
    let filter = scope_filter(ResourceKind::Submission, &principal);
    let out_of_subject = filter
        .value_for("subject")
        .is_some_and(|subject| subject != homework.subject_id);
    if filter.is_nothing() || out_of_subject {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<SubmissionResponse>::new(),
            "Query successful.",
        )));
    }

    let query = SubmissionListQuery {
        homework_id: Some(homework.id),
        student_id: filter.value_for("student"),
    };
    let submissions = match storage.list_submissions(query).await {
        Ok(submissions) => submissions,
        Err(e) => return Ok(internal_error("Failed to list submissions", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    let mut items = Vec::with_capacity(submissions.len());
    for submission in submissions {
        match render_submission(&mut loader, submission).await {
            Ok(item) => items.push(item),
            Err(e) => return Ok(internal_error("Failed to load submission relations", e)),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Query successful.")))
}
