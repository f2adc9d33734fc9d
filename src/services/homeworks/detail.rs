use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::access::nested::resolve_homework;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    homeworks::{entities::Homework, responses::HomeworkResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error};

pub(crate) async fn render_homework(
    loader: &mut RelationLoader<'_>,
    homework: Homework,
) -> Result<HomeworkResponse> {
    Ok(HomeworkResponse {
        id: homework.id,
        subject: loader.subject(homework.subject_id).await?,
        clazz: loader.class(homework.class_id).await?,
        author: loader.teacher(homework.author_id).await?,
        topic: homework.topic,
        deadline: homework.deadline,
        details: homework.details,
    })
}

pub async fn get_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 范围外的作业视为不存在
    let homework = match resolve_homework(storage.as_ref(), &principal, homework_id).await {
        Ok(homework) => homework,
        Err(e) => return Ok(e.into_response()),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    match render_homework(&mut loader, homework).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to load homework relations", e)),
    }
}
