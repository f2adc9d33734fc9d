use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use super::detail::render_homework;
use crate::access::{ResourceKind, scope_filter};
use crate::models::{
    ApiResponse,
    homeworks::{entities::HomeworkListQuery, responses::HomeworkResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error, today};

pub async fn list_homeworks(
    service: &HomeworkService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let filter = scope_filter(ResourceKind::Homework, &principal);
    if filter.is_nothing() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<HomeworkResponse>::new(),
            "Query successful.",
        )));
    }

    // 截止日期早于今天的作业不再列出
    let query = HomeworkListQuery {
        class_id: filter.value_for("clazz"),
        subject_id: filter.value_for("subject"),
        not_before: Some(today()),
    };

    let homeworks = match storage.list_homeworks(query).await {
        Ok(homeworks) => homeworks,
        Err(e) => return Ok(internal_error("Failed to list homeworks", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    let mut items = Vec::with_capacity(homeworks.len());
    for homework in homeworks {
        match render_homework(&mut loader, homework).await {
            Ok(item) => items.push(item),
            Err(e) => return Ok(internal_error("Failed to load homework relations", e)),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Query successful.")))
}
