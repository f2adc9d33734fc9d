use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use super::detail::render_exam;
use crate::access::{ResourceKind, scope_filter};
use crate::models::{
    ApiResponse,
    exams::{entities::ExamListQuery, responses::ExamResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error, today};

pub async fn list_exams(service: &ExamService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let filter = scope_filter(ResourceKind::Exam, &principal);
    if filter.is_nothing() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<ExamResponse>::new(),
            "Query successful.",
        )));
    }

    // 已经过去的考试不再列出
    let query = ExamListQuery {
        class_id: filter.value_for("clazz"),
        subject_id: filter.value_for("subject"),
        not_before: Some(today()),
    };

    let exams = match storage.list_exams(query).await {
        Ok(exams) => exams,
        Err(e) => return Ok(internal_error("Failed to list exams", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    let mut items = Vec::with_capacity(exams.len());
    for exam in exams {
        match render_exam(&mut loader, exam).await {
            Ok(item) => items.push(item),
            Err(e) => return Ok(internal_error("Failed to load exam relations", e)),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Query successful.")))
}
