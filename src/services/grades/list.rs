use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::detail::render_grade;
use crate::access::nested::{resolve_graded_student, resolve_subject};
use crate::access::{Action, Decision, FieldSet, ResourceKind, authorize, scope_filter};
use crate::models::{
    ApiResponse,
    grades::{
        entities::{Grade, GradeListQuery},
        responses::GradeResponse,
    },
};
use crate::services::common::{RelationLoader, current_principal, internal_error};
use crate::storage::Storage;

async fn render_all(storage: &dyn Storage, grades: Vec<Grade>) -> HttpResponse {
    let mut loader = RelationLoader::new(storage);
    let mut items: Vec<GradeResponse> = Vec::with_capacity(grades.len());
    for grade in grades {
        match render_grade(&mut loader, grade).await {
            Ok(item) => items.push(item),
            Err(e) => return internal_error("Failed to load grade relations", e),
        }
    }
    HttpResponse::Ok().json(ApiResponse::success(items, "Query successful."))
}

/// 科目下的成绩：学生只看到自己的，教师只看到本科目的
pub async fn list_subject_grades(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let subject = match resolve_subject(storage.as_ref(), subject_id).await {
        Ok(subject) => subject,
        Err(e) => return Ok(e.into_response()),
    };

    let filter = scope_filter(ResourceKind::Grade, &principal);
    let other_subject = filter
        .value_for("subject")
        .is_some_and(|scoped| scoped != subject.id);
    if filter.is_nothing() || other_subject {
        return Ok(render_all(storage.as_ref(), Vec::new()).await);
    }

    let query = GradeListQuery {
        subject_id: Some(subject.id),
        student_id: filter.value_for("student"),
    };
    match storage.list_grades(query).await {
        Ok(grades) => Ok(render_all(storage.as_ref(), grades).await),
        Err(e) => Ok(internal_error("Failed to list grades", e)),
    }
}

/// 某个学生在科目下的成绩
pub async fn list_student_grades(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let (subject, student) =
        match resolve_graded_student(storage.as_ref(), subject_id, user_id).await {
            Ok(resolved) => resolved,
            Err(e) => return Ok(e.into_response()),
        };

    // 学生本人或该科目教师
    let view = FieldSet::default()
        .with("subject", subject.id)
        .with("student", student.id);
    if let Decision::Deny(reason) = authorize(
        Action::Retrieve,
        ResourceKind::Grade,
        Some(&view),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let query = GradeListQuery {
        subject_id: Some(subject.id),
        student_id: Some(student.id),
    };
    match storage.list_grades(query).await {
        Ok(grades) => Ok(render_all(storage.as_ref(), grades).await),
        Err(e) => Ok(internal_error("Failed to list grades", e)),
    }
}
