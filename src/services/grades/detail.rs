use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::access::nested::resolve_grade;
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    grades::{entities::Grade, responses::GradeResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error};

pub(crate) async fn render_grade(
    loader: &mut RelationLoader<'_>,
    grade: Grade,
) -> Result<GradeResponse> {
    Ok(GradeResponse {
        id: grade.id,
        value: grade.value,
        subject: loader.subject(grade.subject_id).await?,
        student: loader.student(grade.student_id).await?,
        author: loader.teacher(grade.author_id).await?,
    })
}

pub async fn get_grade(
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
        Action::Retrieve,
        ResourceKind::Grade,
        Some(&grade),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let mut loader = RelationLoader::new(storage.as_ref());
    match render_grade(&mut loader, grade).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to load grade relations", e)),
    }
}
